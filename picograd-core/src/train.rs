//! One training step and autoregressive sampling on top of [`Gpt`].
//!
//! Both functions leave the graph as they found it: every node created past
//! the model's watermark is truncated before returning, on success and on
//! error alike.

use crate::autograd::{Graph, NodeId};
use crate::error::PicogradError;
use crate::nn::losses::{cross_entropy, reduce, Reduction};
use crate::nn::{weighted_choice, Gpt};
use crate::ops::{scale, softmax};
use crate::optim::Optimizer;
use log::{debug, warn};
use rand::Rng;

/// Builds the mean next-token cross-entropy of `tokens` and returns the loss
/// node with the number of positions it covers.
///
/// `tokens` is a full document, `[BOS, ids.., BOS]`. Only the first
/// `min(len - 1, block_size)` positions are used.
pub fn document_loss(
    graph: &mut Graph,
    model: &Gpt,
    tokens: &[usize],
) -> Result<(NodeId, usize), PicogradError> {
    if tokens.len() < 2 {
        return Err(PicogradError::EmptySequence {
            min: 2,
            actual: tokens.len(),
        });
    }
    let n = (tokens.len() - 1).min(model.config().block_size);
    let mut cache = model.new_cache();
    let mut losses = Vec::with_capacity(n);
    for pos in 0..n {
        let logits = model.forward(graph, tokens[pos], pos, &mut cache)?;
        losses.push(cross_entropy(graph, &logits, tokens[pos + 1])?);
    }
    let loss = reduce(graph, &losses, Reduction::Mean)?;
    Ok((loss, n))
}

/// Loss of `tokens` under the current weights, without touching gradients.
pub fn evaluate_loss(graph: &mut Graph, model: &Gpt, tokens: &[usize]) -> Result<f64, PicogradError> {
    let result = document_loss(graph, model, tokens).map(|(loss, _)| graph.value(loss));
    graph.truncate(model.watermark());
    result
}

/// Forward pass, backward pass and one optimizer step on one document.
///
/// Returns the loss measured before the update. A non-finite loss is logged
/// and still stepped on; the optimizer decides whether the gradients are
/// usable.
pub fn train_step<O: Optimizer + ?Sized>(
    graph: &mut Graph,
    model: &Gpt,
    optimizer: &mut O,
    tokens: &[usize],
) -> Result<f64, PicogradError> {
    let result = run_step(graph, model, optimizer, tokens);
    if result.is_err() {
        optimizer.zero_grad(graph);
    }
    graph.truncate(model.watermark());
    result
}

fn run_step<O: Optimizer + ?Sized>(
    graph: &mut Graph,
    model: &Gpt,
    optimizer: &mut O,
    tokens: &[usize],
) -> Result<f64, PicogradError> {
    let (loss, n) = document_loss(graph, model, tokens)?;
    let loss_value = graph.value(loss);
    if !loss_value.is_finite() {
        warn!("Non-finite loss {} at step {}", loss_value, optimizer.iterations() + 1);
    }
    debug!("Training on {} positions ({} graph nodes)", n, graph.len());
    graph.backward(loss);
    optimizer.step(graph)?;
    Ok(loss_value)
}

/// Samples one document, starting from `bos` and stopping when `bos` is drawn
/// again or after `block_size` tokens.
///
/// Logits are divided by `temperature` before the softmax; values below 1
/// sharpen the distribution. Returns the sampled ids without the BOS markers.
pub fn generate<R: Rng + ?Sized>(
    graph: &mut Graph,
    model: &Gpt,
    rng: &mut R,
    bos: usize,
    temperature: f64,
) -> Result<Vec<usize>, PicogradError> {
    if !(temperature > 0.0 && temperature.is_finite()) {
        return Err(PicogradError::ConfigurationError(format!(
            "temperature must be finite and positive, got {}",
            temperature
        )));
    }
    let result = sample_tokens(graph, model, rng, bos, temperature);
    graph.truncate(model.watermark());
    result
}

fn sample_tokens<R: Rng + ?Sized>(
    graph: &mut Graph,
    model: &Gpt,
    rng: &mut R,
    bos: usize,
    temperature: f64,
) -> Result<Vec<usize>, PicogradError> {
    let mut cache = model.new_cache();
    let mut token = bos;
    let mut sample = Vec::new();
    for pos in 0..model.config().block_size {
        let logits = model.forward(graph, token, pos, &mut cache)?;
        let scaled = scale(graph, &logits, 1.0 / temperature);
        let probs = softmax(graph, &scaled);
        let weights: Vec<f64> = probs.iter().map(|&p| graph.value(p)).collect();
        token = weighted_choice(&weights, rng);
        if token == bos {
            break;
        }
        sample.push(token);
    }
    Ok(sample)
}

#[cfg(test)]
#[path = "train_test.rs"]
mod tests;
