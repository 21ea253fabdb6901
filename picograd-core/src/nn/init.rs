use crate::autograd::Graph;
use crate::error::PicogradError;
use crate::ops::Matrix;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Creates an `n_out x n_in` grid of parameter leaves drawn from `N(0, std^2)`.
///
/// The generator is passed in explicitly so that initialization is
/// reproducible from a seed. `std == 0` produces an all-zero matrix.
///
/// # Arguments
/// * `graph`: graph the parameter leaves are created in.
/// * `n_out`, `n_in`: number of rows and columns.
/// * `std`: standard deviation of the normal distribution.
/// * `rng`: source of randomness.
///
/// # Returns
/// The matrix, or a `ConfigurationError` if `std` is negative or not finite.
pub fn normal_matrix<R: Rng + ?Sized>(
    graph: &mut Graph,
    n_out: usize,
    n_in: usize,
    std: f64,
    rng: &mut R,
) -> Result<Matrix, PicogradError> {
    if std == 0.0 {
        return Ok(zeros_matrix(graph, n_out, n_in));
    }
    if !(std > 0.0 && std.is_finite()) {
        return Err(PicogradError::ConfigurationError(format!(
            "init std must be finite and non-negative, got {}",
            std
        )));
    }
    let normal = Normal::new(0.0, std).map_err(|e| {
        PicogradError::ConfigurationError(format!("invalid init std {}: {}", std, e))
    })?;

    let mut matrix = Vec::with_capacity(n_out);
    for _ in 0..n_out {
        let mut row = Vec::with_capacity(n_in);
        for _ in 0..n_in {
            row.push(graph.parameter(normal.sample(&mut *rng)));
        }
        matrix.push(row);
    }
    Ok(matrix)
}

/// Creates an `n_out x n_in` grid of zero-valued parameter leaves.
pub fn zeros_matrix(graph: &mut Graph, n_out: usize, n_in: usize) -> Matrix {
    (0..n_out)
        .map(|_| (0..n_in).map(|_| graph.parameter(0.0)).collect())
        .collect()
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
