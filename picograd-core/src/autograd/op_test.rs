use super::*;
use approx::assert_relative_eq;

#[test]
fn test_arity_per_variant() {
    assert_eq!(Op::Leaf.arity(), 0);
    assert_eq!(Op::Add.arity(), 2);
    assert_eq!(Op::Mul.arity(), 2);
    assert_eq!(Op::Pow(3.0).arity(), 1);
    assert_eq!(Op::Log.arity(), 1);
    assert_eq!(Op::Exp.arity(), 1);
    assert_eq!(Op::Relu.arity(), 1);
    assert!(Op::Leaf.is_leaf());
    assert!(!Op::Relu.is_leaf());
}

#[test]
fn test_forward_rules() {
    assert_eq!(Op::Add.forward([2.0, 3.0]), 5.0);
    assert_eq!(Op::Mul.forward([2.0, 3.0]), 6.0);
    assert_relative_eq!(Op::Pow(3.0).forward([2.0, 0.0]), 8.0);
    assert_relative_eq!(Op::Log.forward([std::f64::consts::E, 0.0]), 1.0);
    assert_relative_eq!(Op::Exp.forward([1.0, 0.0]), std::f64::consts::E);
    assert_eq!(Op::Relu.forward([-1.5, 0.0]), 0.0);
    assert_eq!(Op::Relu.forward([1.5, 0.0]), 1.5);
    assert!(Op::Relu.forward([f64::NAN, 0.0]).is_nan());
}

#[test]
fn test_local_derivative_rules() {
    assert_eq!(Op::Add.local_derivatives([2.0, 3.0], 5.0), [1.0, 1.0]);
    assert_eq!(Op::Mul.local_derivatives([2.0, 3.0], 6.0), [3.0, 2.0]);
    // d/dx x^3 = 3x^2 = 12 at x=2
    assert_relative_eq!(Op::Pow(3.0).local_derivatives([2.0, 0.0], 8.0)[0], 12.0);
    assert_relative_eq!(Op::Log.local_derivatives([4.0, 0.0], 4f64.ln())[0], 0.25);
}

#[test]
fn test_exp_derivative_reuses_output() {
    // The rule must return the forward value it is handed, not recompute it.
    let derivs = Op::Exp.local_derivatives([1.0, 0.0], 42.0);
    assert_eq!(derivs[0], 42.0);
}

#[test]
fn test_relu_derivative_at_zero_is_zero() {
    assert_eq!(Op::Relu.local_derivatives([0.0, 0.0], 0.0)[0], 0.0);
    assert_eq!(Op::Relu.local_derivatives([1e-12, 0.0], 1e-12)[0], 1.0);
    assert_eq!(Op::Relu.local_derivatives([-1e-12, 0.0], 0.0)[0], 0.0);
    assert!(Op::Relu.local_derivatives([f64::NAN, 0.0], f64::NAN)[0].is_nan());
}

#[test]
fn test_log_of_zero_is_negative_infinity() {
    let out = Op::Log.forward([0.0, 0.0]);
    assert_eq!(out, f64::NEG_INFINITY);
    assert_eq!(Op::Log.local_derivatives([0.0, 0.0], out)[0], f64::INFINITY);
}
