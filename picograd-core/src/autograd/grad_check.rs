use super::graph::{Graph, NodeId};
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for input {input_index}. f(x+eps) = {value_plus:?}, f(x-eps) = {value_minus:?}")]
    NumericalGradNonFinite {
        input_index: usize,
        value_plus: f64,
        value_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}: {value:?}")]
    AnalyticalGradNonFinite { input_index: usize, value: f64 },
}

/// Checks analytical gradients against central finite differences.
///
/// `build` receives a fresh graph together with one leaf per entry of
/// `inputs` and must return the scalar output node. For every input `i` the
/// gradient from [`Graph::backward`] is compared with
/// `(f(x + eps) - f(x - eps)) / (2 * eps)`; the check passes for that input
/// when either the absolute or the relative difference is within
/// `tolerance`.
///
/// # Arguments
/// * `inputs`: values of the leaves the function is differentiated against.
/// * `build`: graph-building function under test.
/// * `epsilon`: finite-difference step.
/// * `tolerance`: accepted absolute or relative error.
pub fn check_grad<F>(
    inputs: &[f64],
    build: F,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> NodeId,
{
    let analytical = analytical_grads(inputs, &build);

    for (i, &analytical_grad) in analytical.iter().enumerate() {
        let mut plus = inputs.to_vec();
        plus[i] += epsilon;
        let mut minus = inputs.to_vec();
        minus[i] -= epsilon;

        let value_plus = evaluate(&plus, &build);
        let value_minus = evaluate(&minus, &build);
        let numerical_grad = (value_plus - value_minus) / (2.0 * epsilon);

        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNonFinite {
                input_index: i,
                value_plus,
                value_minus,
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNonFinite {
                input_index: i,
                value: analytical_grad,
            });
        }

        let close = approx::abs_diff_eq!(analytical_grad, numerical_grad, epsilon = tolerance)
            || approx::relative_eq!(analytical_grad, numerical_grad, max_relative = tolerance);
        if !close {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }

    log::debug!("check_grad: {} inputs within tolerance {}", inputs.len(), tolerance);
    Ok(())
}

/// Builds the function once and returns `d(output)/d(input_i)` for every input.
pub fn analytical_grads<F>(inputs: &[f64], build: F) -> Vec<f64>
where
    F: Fn(&mut Graph, &[NodeId]) -> NodeId,
{
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs.iter().map(|&v| graph.constant(v)).collect();
    let output = build(&mut graph, &leaves);
    graph.backward(output);
    leaves.iter().map(|&leaf| graph.grad(leaf)).collect()
}

fn evaluate<F>(inputs: &[f64], build: &F) -> f64
where
    F: Fn(&mut Graph, &[NodeId]) -> NodeId,
{
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs.iter().map(|&v| graph.constant(v)).collect();
    let output = build(&mut graph, &leaves);
    graph.value(output)
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
