use super::*;
use crate::autograd::check_grad;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn leaves(graph: &mut Graph, values: &[f64]) -> Vec<NodeId> {
    values.iter().map(|&v| graph.constant(v)).collect()
}

fn probabilities(values: &[f64]) -> Vec<f64> {
    let mut graph = Graph::new();
    let logits = leaves(&mut graph, values);
    softmax(&mut graph, &logits)
        .iter()
        .map(|&p| graph.value(p))
        .collect()
}

#[test]
fn test_softmax_sums_to_one_and_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 1..12 {
        let values: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
        let probs = probabilities(&values);
        let total: f64 = probs.iter().sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
        for p in probs {
            assert!(p > 0.0 && p <= 1.0, "probability {} out of range", p);
        }
    }
}

#[test]
fn test_softmax_single_element_is_one() {
    assert_eq!(probabilities(&[-3.5]), vec![1.0]);
}

#[test]
fn test_softmax_shift_invariance() {
    let base = [0.3, -1.2, 2.5, 0.0];
    let shifted: Vec<f64> = base.iter().map(|v| v + 123.4).collect();
    let p = probabilities(&base);
    let q = probabilities(&shifted);
    for (a, b) in p.iter().zip(&q) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
    }
}

#[test]
fn test_softmax_large_logits_do_not_overflow() {
    let probs = probabilities(&[1000.0, 1000.0, 999.0]);
    assert!(probs.iter().all(|p| p.is_finite()));
    assert_relative_eq!(probs[0], probs[1]);
}

#[test]
fn test_softmax_cross_entropy_gradient() {
    let mut graph = Graph::new();
    let logits = leaves(&mut graph, &[1.0, 1.0]);
    let probs = softmax(&mut graph, &logits);
    assert_relative_eq!(graph.value(probs[0]), 0.5);
    assert_relative_eq!(graph.value(probs[1]), 0.5);

    let log_p = graph.log(probs[0]);
    let loss = graph.neg(log_p);
    assert_relative_eq!(graph.value(loss), std::f64::consts::LN_2, epsilon = 1e-12);

    graph.backward(loss);
    // softmax - onehot
    assert_abs_diff_eq!(graph.grad(logits[0]), -0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(graph.grad(logits[1]), 0.5, epsilon = 1e-12);
}

#[test]
fn test_softmax_grad_check() {
    check_grad(
        &[0.2, -0.7, 1.1],
        |g, x| {
            let p = softmax(g, x);
            let w = g.mul_scalar(p[2], 3.0);
            g.add(p[0], w)
        },
        1e-6,
        1e-4,
    )
    .unwrap();
}

#[test]
#[should_panic(expected = "softmax: empty input")]
fn test_softmax_empty_panics() {
    let mut graph = Graph::new();
    softmax(&mut graph, &[]);
}
