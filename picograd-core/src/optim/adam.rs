use crate::autograd::{Graph, NodeId};
use crate::config::AdamConfig;
use crate::error::PicogradError;
use crate::optim::lr_scheduler::{ConstantLr, LrScheduler};
use crate::optim::Optimizer;
use log::debug;

/// Moment estimates and step count of an [`AdamOptimizer`], one entry per
/// parameter in the optimizer's order.
#[derive(Debug, Clone, PartialEq)]
pub struct AdamState {
    pub iterations: u64,
    /// First moment (moving average of gradients).
    pub m: Vec<f64>,
    /// Second moment (moving average of squared gradients).
    pub v: Vec<f64>,
}

/// Adam with bias correction and an optional learning-rate schedule.
///
/// Each step reads the gradient of every parameter, updates the moment
/// buffers, writes the new value back with [`Graph::set_value`] and resets
/// the gradient to 0, so the next pass starts from clean accumulators.
#[derive(Debug)]
pub struct AdamOptimizer {
    params: Vec<NodeId>,
    config: AdamConfig,
    scheduler: Box<dyn LrScheduler>,
    iterations: u64,
    last_lr: f64,
    m: Vec<f64>,
    v: Vec<f64>,
}

impl AdamOptimizer {
    /// Creates an optimizer over `params` with a constant learning rate.
    ///
    /// Returns a `ConfigurationError` if the hyper-parameters are invalid.
    pub fn new(params: Vec<NodeId>, config: AdamConfig) -> Result<Self, PicogradError> {
        config.validate()?;
        let n = params.len();
        Ok(AdamOptimizer {
            params,
            config,
            scheduler: Box::new(ConstantLr),
            iterations: 0,
            last_lr: config.learning_rate,
            m: vec![0.0; n],
            v: vec![0.0; n],
        })
    }

    /// Replaces the learning-rate schedule.
    pub fn with_scheduler(mut self, scheduler: Box<dyn LrScheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }

    pub fn params(&self) -> &[NodeId] {
        &self.params
    }

    /// Snapshot of the moment buffers, e.g. to resume training later.
    pub fn state(&self) -> AdamState {
        AdamState {
            iterations: self.iterations,
            m: self.m.clone(),
            v: self.v.clone(),
        }
    }

    /// Restores a snapshot taken from an optimizer over the same parameters.
    pub fn load_state(&mut self, state: AdamState) -> Result<(), PicogradError> {
        for (what, len) in [("m", state.m.len()), ("v", state.v.len())] {
            if len != self.params.len() {
                return Err(PicogradError::DimensionMismatch {
                    operation: format!("Adam state {}", what),
                    expected: self.params.len(),
                    actual: len,
                });
            }
        }
        self.iterations = state.iterations;
        self.m = state.m;
        self.v = state.v;
        Ok(())
    }
}

impl Optimizer for AdamOptimizer {
    fn step(&mut self, graph: &mut Graph) -> Result<(), PicogradError> {
        if self.params.is_empty() {
            return Ok(());
        }
        if let Some(&bad) = self.params.iter().find(|&&p| !graph.grad(p).is_finite()) {
            return Err(PicogradError::NonFinite(format!(
                "gradient of parameter {} ({})",
                bad,
                graph.grad(bad)
            )));
        }

        self.iterations += 1;
        let t = self.iterations;
        let AdamConfig { beta1, beta2, eps, learning_rate } = self.config;
        let lr = self.scheduler.learning_rate(learning_rate, t);
        let bias_correction1 = 1.0 - beta1.powf(t as f64);
        let bias_correction2 = 1.0 - beta2.powf(t as f64);

        for (i, &p) in self.params.iter().enumerate() {
            let g = graph.grad(p);
            self.m[i] = beta1 * self.m[i] + (1.0 - beta1) * g;
            self.v[i] = beta2 * self.v[i] + (1.0 - beta2) * g * g;
            let m_hat = self.m[i] / bias_correction1;
            let v_hat = self.v[i] / bias_correction2;
            let value = graph.value(p) - lr * m_hat / (v_hat.sqrt() + eps);
            graph.set_value(p, value);
            graph.zero_grad(p);
        }
        self.last_lr = lr;
        debug!("Adam step {}: lr {:.6}, {} parameters", t, lr, self.params.len());
        Ok(())
    }

    fn zero_grad(&self, graph: &mut Graph) {
        for &p in &self.params {
            graph.zero_grad(p);
        }
    }

    fn learning_rate(&self) -> f64 {
        self.last_lr
    }

    fn iterations(&self) -> u64 {
        self.iterations
    }
}

#[cfg(test)]
#[path = "adam_test.rs"]
mod tests;
