//! Hyper-parameters for the model, the optimizer and the training run.
//!
//! Each struct carries the reference defaults and a `validate()` that
//! reports the first rule that fails as a
//! [`PicogradError::ConfigurationError`].

use crate::error::PicogradError;
use std::path::PathBuf;
use std::str::FromStr;

/// Prefix of the environment variables read by [`TrainConfig::from_env`].
pub const ENV_PREFIX: &str = "PICOGRAD_";

/// Shape of the transformer.
#[derive(Debug, Clone, PartialEq)]
pub struct GptConfig {
    /// Number of token ids, including BOS.
    pub vocab_size: usize,
    /// Embedding width (must be divisible by `n_head`).
    pub n_embd: usize,
    pub n_head: usize,
    pub n_layer: usize,
    /// Maximum context length.
    pub block_size: usize,
    /// Standard deviation of the normal weight initializer.
    pub init_std: f64,
}

impl GptConfig {
    /// Reference shape (16-wide, 4 heads, 1 layer, context 8) for `vocab_size` tokens.
    pub fn new(vocab_size: usize) -> Self {
        GptConfig {
            vocab_size,
            n_embd: 16,
            n_head: 4,
            n_layer: 1,
            block_size: 8,
            init_std: 0.02,
        }
    }

    /// Width of one attention head.
    pub fn head_dim(&self) -> usize {
        self.n_embd / self.n_head
    }

    pub fn validate(&self) -> Result<(), PicogradError> {
        if self.vocab_size == 0 {
            return Err(config_error("vocab_size must be positive"));
        }
        if self.n_embd == 0 || self.n_head == 0 {
            return Err(config_error("n_embd and n_head must be positive"));
        }
        if self.n_embd % self.n_head != 0 {
            return Err(PicogradError::ConfigurationError(format!(
                "n_embd ({}) must be divisible by n_head ({})",
                self.n_embd, self.n_head
            )));
        }
        if self.block_size == 0 {
            return Err(config_error("block_size must be positive"));
        }
        if !(self.init_std >= 0.0 && self.init_std.is_finite()) {
            return Err(config_error("init_std must be finite and non-negative"));
        }
        Ok(())
    }
}

/// Adam hyper-parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub eps: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            learning_rate: 1e-2,
            beta1: 0.9,
            beta2: 0.95,
            eps: 1e-8,
        }
    }
}

impl AdamConfig {
    pub fn validate(&self) -> Result<(), PicogradError> {
        if !(self.learning_rate > 0.0) {
            return Err(config_error("Learning rate must be positive"));
        }
        if !(0.0..1.0).contains(&self.beta1) {
            return Err(config_error("Beta1 must be in [0, 1)"));
        }
        if !(0.0..1.0).contains(&self.beta2) {
            return Err(config_error("Beta2 must be in [0, 1)"));
        }
        if !(self.eps > 0.0) {
            return Err(config_error("Epsilon must be positive"));
        }
        Ok(())
    }
}

/// Settings of a training + sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Seed of the single random generator used for init, shuffling and sampling.
    pub seed: u64,
    /// Corpus file, one document per line.
    pub input_path: PathBuf,
    pub num_steps: usize,
    /// Sampling temperature, in `(0, 1]` for sharper-than-model samples.
    pub temperature: f64,
    pub num_samples: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            seed: 42,
            input_path: PathBuf::from("input.txt"),
            num_steps: 500,
            temperature: 0.5,
            num_samples: 20,
        }
    }
}

impl TrainConfig {
    /// Defaults overridden by `PICOGRAD_SEED`, `PICOGRAD_INPUT`,
    /// `PICOGRAD_NUM_STEPS`, `PICOGRAD_TEMPERATURE` and `PICOGRAD_NUM_SAMPLES`.
    pub fn from_env() -> Result<Self, PicogradError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TrainConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PicogradError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = TrainConfig::default();
        let config = TrainConfig {
            seed: parsed(&lookup, "SEED", defaults.seed)?,
            input_path: lookup(&env_key("INPUT"))
                .map(PathBuf::from)
                .unwrap_or(defaults.input_path),
            num_steps: parsed(&lookup, "NUM_STEPS", defaults.num_steps)?,
            temperature: parsed(&lookup, "TEMPERATURE", defaults.temperature)?,
            num_samples: parsed(&lookup, "NUM_SAMPLES", defaults.num_samples)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PicogradError> {
        if self.num_steps == 0 {
            return Err(config_error("num_steps must be positive"));
        }
        if !(self.temperature > 0.0 && self.temperature.is_finite()) {
            return Err(config_error("temperature must be finite and positive"));
        }
        Ok(())
    }
}

/// Full variable name for `suffix`, e.g. `PICOGRAD_SEED`.
pub fn env_key(suffix: &str) -> String {
    format!("{}{}", ENV_PREFIX, suffix)
}

fn parsed<T, F>(lookup: &F, suffix: &str, default: T) -> Result<T, PicogradError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let key = env_key(suffix);
    match lookup(&key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            PicogradError::ConfigurationError(format!("{} has invalid value {:?}", key, raw))
        }),
    }
}

fn config_error(message: &str) -> PicogradError {
    PicogradError::ConfigurationError(message.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
