/// The primitive operation that produced a node.
///
/// The set is closed: every node in a [`Graph`](super::Graph) is either a leaf
/// or the result of one of these primitives. Derived combinators (negate,
/// subtract, divide, scalar variants) are compositions of these and carry no
/// rule of their own.
///
/// Each variant owns two rules:
/// * [`Op::forward`] computes the node value from the input values.
/// * [`Op::local_derivatives`] computes `d(out)/d(input_i)` at those inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// Constant or trainable parameter. No inputs.
    Leaf,
    /// `a + b`
    Add,
    /// `a * b`
    Mul,
    /// `a ^ exponent`, exponent is a plain number (not a graph node).
    Pow(f64),
    /// Natural logarithm.
    Log,
    /// `e ^ a`
    Exp,
    /// `max(0, a)`
    Relu,
}

/// Largest number of inputs any [`Op`] takes.
pub const MAX_ARITY: usize = 2;

impl Op {
    /// Number of input nodes this operation consumes.
    pub fn arity(&self) -> usize {
        match self {
            Op::Leaf => 0,
            Op::Pow(_) | Op::Log | Op::Exp | Op::Relu => 1,
            Op::Add | Op::Mul => 2,
        }
    }

    /// Returns `true` for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Op::Leaf)
    }

    /// Short lowercase name, used in logs and panic messages.
    pub fn name(&self) -> &'static str {
        match self {
            Op::Leaf => "leaf",
            Op::Add => "add",
            Op::Mul => "mul",
            Op::Pow(_) => "pow",
            Op::Log => "log",
            Op::Exp => "exp",
            Op::Relu => "relu",
        }
    }

    /// Computes the forward value from the first `arity()` entries of `args`.
    ///
    /// Leaves have no forward rule; their value is supplied at construction.
    pub(crate) fn forward(&self, args: [f64; MAX_ARITY]) -> f64 {
        let [a, b] = args;
        match *self {
            Op::Leaf => unreachable!("leaf nodes have no forward rule"),
            Op::Add => a + b,
            Op::Mul => a * b,
            Op::Pow(exponent) => a.powf(exponent),
            Op::Log => a.ln(),
            Op::Exp => a.exp(),
            // NaN passes through (f64::max would turn it into 0).
            Op::Relu => {
                if a > 0.0 || a.is_nan() {
                    a
                } else {
                    0.0
                }
            }
        }
    }

    /// Partial derivatives of the output with respect to each input.
    ///
    /// `out` is the already computed forward value, so `Exp` reuses it
    /// instead of evaluating the exponential twice. Entries past `arity()`
    /// are zero and never read.
    pub(crate) fn local_derivatives(&self, args: [f64; MAX_ARITY], out: f64) -> [f64; MAX_ARITY] {
        let [a, b] = args;
        match *self {
            Op::Leaf => [0.0, 0.0],
            Op::Add => [1.0, 1.0],
            Op::Mul => [b, a],
            Op::Pow(exponent) => [exponent * a.powf(exponent - 1.0), 0.0],
            Op::Log => [1.0 / a, 0.0],
            Op::Exp => [out, 0.0],
            // Zero at exactly 0, NaN for a NaN input.
            Op::Relu => {
                let d = if a > 0.0 {
                    1.0
                } else if a.is_nan() {
                    a
                } else {
                    0.0
                };
                [d, 0.0]
            }
        }
    }
}

#[cfg(test)]
#[path = "op_test.rs"]
mod tests;
