use crate::error::PicogradError;
use std::f64::consts::PI;
use std::fmt::Debug;

/// Maps a base learning rate and a 1-based step number to the rate used for
/// that step.
pub trait LrScheduler: Debug {
    fn learning_rate(&self, base_lr: f64, step: u64) -> f64;
}

/// Keeps the base rate for every step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstantLr;

impl LrScheduler for ConstantLr {
    fn learning_rate(&self, base_lr: f64, _step: u64) -> f64 {
        base_lr
    }
}

/// Half-cosine decay over `total_steps`:
/// `lr_t = lr * 0.5 * (1 + cos(pi * (t - 1) / T))`.
///
/// Step 1 uses the full base rate. Steps past `total_steps` keep the rate of
/// the last scheduled step instead of climbing back up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosineDecay {
    total_steps: u64,
}

impl CosineDecay {
    pub fn new(total_steps: u64) -> Result<Self, PicogradError> {
        if total_steps == 0 {
            return Err(PicogradError::ConfigurationError(
                "CosineDecay: total_steps must be positive".to_string(),
            ));
        }
        Ok(CosineDecay { total_steps })
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }
}

impl LrScheduler for CosineDecay {
    fn learning_rate(&self, base_lr: f64, step: u64) -> f64 {
        let t = step.clamp(1, self.total_steps);
        let progress = (t - 1) as f64 / self.total_steps as f64;
        base_lr * 0.5 * (1.0 + (PI * progress).cos())
    }
}

#[cfg(test)]
#[path = "lr_scheduler_test.rs"]
mod tests;
