use crate::autograd::Graph;
use crate::error::PicogradError;

/// Common interface of the optimizers.
pub trait Optimizer {
    /// Applies one update to every managed parameter from its accumulated
    /// gradient.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the step was applied, or a `PicogradError` if it was
    /// refused (in which case no parameter changed).
    fn step(&mut self, graph: &mut Graph) -> Result<(), PicogradError>;

    /// Clears the gradients of all managed parameters.
    fn zero_grad(&self, graph: &mut Graph);

    /// Learning rate used by the most recent step (the base rate before the
    /// first one).
    fn learning_rate(&self) -> f64;

    /// Number of steps applied so far.
    fn iterations(&self) -> u64;
}
