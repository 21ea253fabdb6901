use super::*;
use crate::optim::CosineDecay;
use approx::assert_relative_eq;

fn params(graph: &mut Graph, values: &[f64]) -> Vec<NodeId> {
    values.iter().map(|&v| graph.parameter(v)).collect()
}

/// Sets `grad(p) = g` through a tiny `p * g` graph so the test goes through
/// `backward` like real training does.
fn accumulate(graph: &mut Graph, p: NodeId, g: f64) {
    let c = graph.constant(g);
    let y = graph.mul(p, c);
    graph.backward(y);
}

#[test]
fn test_new_rejects_invalid_config() {
    let mut graph = Graph::new();
    let ps = params(&mut graph, &[1.0]);
    let config = AdamConfig { learning_rate: -1e-3, ..AdamConfig::default() };
    assert!(matches!(
        AdamOptimizer::new(ps, config),
        Err(PicogradError::ConfigurationError(_))
    ));
}

#[test]
fn test_first_step_moves_by_learning_rate() -> Result<(), PicogradError> {
    // With bias correction the first update is lr * g / (|g| + eps).
    let mut graph = Graph::new();
    let ps = params(&mut graph, &[10.0, -3.0]);
    accumulate(&mut graph, ps[0], 2.0);
    accumulate(&mut graph, ps[1], -0.5);

    let mut adam = AdamOptimizer::new(ps.clone(), AdamConfig::default())?;
    adam.step(&mut graph)?;

    assert_relative_eq!(graph.value(ps[0]), 10.0 - 0.01, epsilon = 1e-9);
    assert_relative_eq!(graph.value(ps[1]), -3.0 + 0.01, epsilon = 1e-9);
    assert_eq!(adam.iterations(), 1);
    assert_eq!(adam.learning_rate(), 0.01);
    Ok(())
}

#[test]
fn test_step_resets_gradients() -> Result<(), PicogradError> {
    let mut graph = Graph::new();
    let ps = params(&mut graph, &[1.0]);
    accumulate(&mut graph, ps[0], 3.0);
    let mut adam = AdamOptimizer::new(ps.clone(), AdamConfig::default())?;
    adam.step(&mut graph)?;
    assert_eq!(graph.grad(ps[0]), 0.0);
    Ok(())
}

#[test]
fn test_zero_gradient_keeps_value() -> Result<(), PicogradError> {
    let mut graph = Graph::new();
    let ps = params(&mut graph, &[0.7]);
    let mut adam = AdamOptimizer::new(ps.clone(), AdamConfig::default())?;
    adam.step(&mut graph)?;
    assert_eq!(graph.value(ps[0]), 0.7);
    Ok(())
}

#[test]
fn test_second_step_matches_reference_update() -> Result<(), PicogradError> {
    let config = AdamConfig::default();
    let mut graph = Graph::new();
    let ps = params(&mut graph, &[0.5]);
    let mut adam = AdamOptimizer::new(ps.clone(), config)?;

    let grads = [0.3, -0.1];
    let (mut m, mut v, mut x) = (0.0f64, 0.0f64, 0.5f64);
    for (i, &g) in grads.iter().enumerate() {
        accumulate(&mut graph, ps[0], g);
        adam.step(&mut graph)?;

        let t = (i + 1) as f64;
        m = config.beta1 * m + (1.0 - config.beta1) * g;
        v = config.beta2 * v + (1.0 - config.beta2) * g * g;
        let m_hat = m / (1.0 - config.beta1.powf(t));
        let v_hat = v / (1.0 - config.beta2.powf(t));
        x -= config.learning_rate * m_hat / (v_hat.sqrt() + config.eps);
    }
    assert_relative_eq!(graph.value(ps[0]), x, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_cosine_schedule_is_applied() -> Result<(), PicogradError> {
    let mut graph = Graph::new();
    let ps = params(&mut graph, &[0.0]);
    let mut adam = AdamOptimizer::new(ps.clone(), AdamConfig::default())?
        .with_scheduler(Box::new(CosineDecay::new(2)?));

    accumulate(&mut graph, ps[0], 1.0);
    adam.step(&mut graph)?;
    assert_eq!(adam.learning_rate(), 0.01);

    accumulate(&mut graph, ps[0], 1.0);
    adam.step(&mut graph)?;
    assert_relative_eq!(adam.learning_rate(), 0.005, epsilon = 1e-15);
    Ok(())
}

#[test]
fn test_non_finite_gradient_is_refused() -> Result<(), PicogradError> {
    let mut graph = Graph::new();
    let ps = params(&mut graph, &[1.0, 2.0]);
    accumulate(&mut graph, ps[0], 1.0);
    accumulate(&mut graph, ps[1], f64::NAN);

    let mut adam = AdamOptimizer::new(ps.clone(), AdamConfig::default())?;
    assert!(matches!(adam.step(&mut graph), Err(PicogradError::NonFinite(_))));
    assert_eq!(graph.value(ps[0]), 1.0);
    assert_eq!(graph.value(ps[1]), 2.0);
    assert_eq!(adam.iterations(), 0);
    Ok(())
}

#[test]
fn test_zero_grad_clears_managed_parameters() -> Result<(), PicogradError> {
    let mut graph = Graph::new();
    let ps = params(&mut graph, &[1.0, 2.0]);
    accumulate(&mut graph, ps[0], 4.0);
    accumulate(&mut graph, ps[1], 5.0);
    let adam = AdamOptimizer::new(ps.clone(), AdamConfig::default())?;
    adam.zero_grad(&mut graph);
    assert!(ps.iter().all(|&p| graph.grad(p) == 0.0));
    Ok(())
}

#[test]
fn test_state_round_trip_and_mismatch() -> Result<(), PicogradError> {
    let mut graph = Graph::new();
    let ps = params(&mut graph, &[1.0, 2.0]);
    accumulate(&mut graph, ps[0], 0.4);
    let mut adam = AdamOptimizer::new(ps.clone(), AdamConfig::default())?;
    adam.step(&mut graph)?;

    let state = adam.state();
    assert_eq!(state.iterations, 1);
    let mut resumed = AdamOptimizer::new(ps.clone(), AdamConfig::default())?;
    resumed.load_state(state.clone())?;
    assert_eq!(resumed.state(), state);
    assert_eq!(resumed.iterations(), 1);

    let short = AdamState { iterations: 1, m: vec![0.0], v: vec![0.0, 0.0] };
    assert!(matches!(
        resumed.load_state(short),
        Err(PicogradError::DimensionMismatch { expected: 2, actual: 1, .. })
    ));
    Ok(())
}

#[test]
fn test_empty_parameter_list_is_a_no_op() -> Result<(), PicogradError> {
    let mut graph = Graph::new();
    let mut adam = AdamOptimizer::new(Vec::new(), AdamConfig::default())?;
    adam.step(&mut graph)?;
    assert_eq!(adam.iterations(), 0);
    Ok(())
}
