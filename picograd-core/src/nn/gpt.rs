use crate::autograd::{Checkpoint, Graph, NodeId};
use crate::config::GptConfig;
use crate::error::PicogradError;
use crate::nn::init::normal_matrix;
use crate::nn::parameter::StateDict;
use crate::ops::{add_vecs, dot, linear, rmsnorm, softmax, Matrix};
use log::{debug, info};
use rand::Rng;

/// Keys and values computed so far for one sequence, per layer.
///
/// Each position appends its key and value vectors; later positions attend
/// over all of them. The entries are graph nodes, so the loss of a later
/// position also sends gradient into the projections of earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KvCache {
    keys: Vec<Vec<Vec<NodeId>>>,
    values: Vec<Vec<Vec<NodeId>>>,
}

impl KvCache {
    pub fn new(n_layer: usize) -> Self {
        KvCache {
            keys: vec![Vec::new(); n_layer],
            values: vec![Vec::new(); n_layer],
        }
    }

    pub fn num_layers(&self) -> usize {
        self.keys.len()
    }

    /// Number of positions cached (the same for every layer).
    pub fn len(&self) -> usize {
        self.keys.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every cached position, keeping the layer count.
    pub fn clear(&mut self) {
        self.keys.iter_mut().for_each(Vec::clear);
        self.values.iter_mut().for_each(Vec::clear);
    }

    pub fn keys(&self, layer: usize) -> &[Vec<NodeId>] {
        &self.keys[layer]
    }

    pub fn values(&self, layer: usize) -> &[Vec<NodeId>] {
        &self.values[layer]
    }

    fn push(&mut self, layer: usize, key: Vec<NodeId>, value: Vec<NodeId>) {
        self.keys[layer].push(key);
        self.values[layer].push(value);
    }
}

/// Decoder-only transformer evaluated one token at a time.
///
/// Layout per layer: pre-norm multi-head causal self-attention with a
/// residual connection, then a pre-norm ReLU² MLP with a residual
/// connection. Logits come from an untied `lm_head`.
#[derive(Debug, Clone)]
pub struct Gpt {
    config: GptConfig,
    state: StateDict,
    watermark: Checkpoint,
}

impl Gpt {
    /// Creates every weight matrix as parameter leaves of `graph`.
    ///
    /// `attn_wo` and `mlp_fc2` start at zero so that every block begins as
    /// the identity on its residual stream; the rest is drawn from
    /// `N(0, init_std^2)`. The graph is expected to be empty, or at least to
    /// hold nothing that later passes may discard.
    pub fn new<R: Rng + ?Sized>(
        config: GptConfig,
        graph: &mut Graph,
        rng: &mut R,
    ) -> Result<Self, PicogradError> {
        config.validate()?;
        let (vocab, embd, std) = (config.vocab_size, config.n_embd, config.init_std);

        let mut state = StateDict::new();
        state.insert("wte", normal_matrix(graph, vocab, embd, std, rng)?);
        state.insert("wpe", normal_matrix(graph, config.block_size, embd, std, rng)?);
        state.insert("lm_head", normal_matrix(graph, vocab, embd, std, rng)?);
        for layer in 0..config.n_layer {
            let name = |suffix: &str| layer_key(layer, suffix);
            state.insert(name("attn_wq"), normal_matrix(graph, embd, embd, std, rng)?);
            state.insert(name("attn_wk"), normal_matrix(graph, embd, embd, std, rng)?);
            state.insert(name("attn_wv"), normal_matrix(graph, embd, embd, std, rng)?);
            state.insert(name("attn_wo"), normal_matrix(graph, embd, embd, 0.0, rng)?);
            state.insert(name("mlp_fc1"), normal_matrix(graph, 4 * embd, embd, std, rng)?);
            state.insert(name("mlp_fc2"), normal_matrix(graph, embd, 4 * embd, 0.0, rng)?);
        }

        let model = Gpt {
            config,
            state,
            watermark: graph.checkpoint(),
        };
        info!(
            "Initialized GPT: {} layer(s), {} heads, n_embd {}, vocab {}, {} parameters",
            model.config.n_layer,
            model.config.n_head,
            model.config.n_embd,
            model.config.vocab_size,
            model.num_parameters()
        );
        Ok(model)
    }

    /// Wraps existing weights, checking that every matrix is present with the
    /// shape `config` implies.
    ///
    /// The graph's current length becomes the watermark, so the weights must
    /// already live in `graph`.
    pub fn from_state_dict(
        config: GptConfig,
        state: StateDict,
        graph: &Graph,
    ) -> Result<Self, PicogradError> {
        config.validate()?;
        let embd = config.n_embd;
        let mut expected = vec![
            ("wte".to_string(), config.vocab_size, embd),
            ("wpe".to_string(), config.block_size, embd),
            ("lm_head".to_string(), config.vocab_size, embd),
        ];
        for layer in 0..config.n_layer {
            for (suffix, rows, cols) in [
                ("attn_wq", embd, embd),
                ("attn_wk", embd, embd),
                ("attn_wv", embd, embd),
                ("attn_wo", embd, embd),
                ("mlp_fc1", 4 * embd, embd),
                ("mlp_fc2", embd, 4 * embd),
            ] {
                expected.push((layer_key(layer, suffix), rows, cols));
            }
        }
        for (name, rows, cols) in &expected {
            check_shape(name, state.get(name)?, *rows, *cols)?;
        }
        for (name, matrix) in state.iter() {
            for &id in matrix.iter().flatten() {
                if id.index() >= graph.len() {
                    return Err(PicogradError::IndexOutOfBounds {
                        what: "parameter node",
                        index: id.index(),
                        len: graph.len(),
                    });
                }
                let op = graph.node(id).op();
                if !op.is_leaf() {
                    return Err(PicogradError::ConfigurationError(format!(
                        "{} holds node {}, a {} result rather than a leaf",
                        name,
                        id.index(),
                        op.name()
                    )));
                }
            }
        }
        Ok(Gpt {
            config,
            state,
            watermark: graph.checkpoint(),
        })
    }

    pub fn config(&self) -> &GptConfig {
        &self.config
    }

    pub fn state_dict(&self) -> &StateDict {
        &self.state
    }

    /// Graph length right after the weights were created; everything past it
    /// is transient and can be truncated after a pass.
    pub fn watermark(&self) -> Checkpoint {
        self.watermark
    }

    pub fn parameters(&self) -> Vec<NodeId> {
        self.state.parameters()
    }

    pub fn num_parameters(&self) -> usize {
        self.state.num_parameters()
    }

    /// A cache with one slot per layer of this model.
    pub fn new_cache(&self) -> KvCache {
        KvCache::new(self.config.n_layer)
    }

    /// Runs one position and returns `vocab_size` logits.
    ///
    /// Appends this position's keys and values to `cache`, so positions of a
    /// sequence must be fed in order, starting from an empty cache: `pos`
    /// must equal `cache.len()`.
    pub fn forward(
        &self,
        graph: &mut Graph,
        token: usize,
        pos: usize,
        cache: &mut KvCache,
    ) -> Result<Vec<NodeId>, PicogradError> {
        let config = &self.config;
        if token >= config.vocab_size {
            return Err(PicogradError::IndexOutOfBounds {
                what: "token",
                index: token,
                len: config.vocab_size,
            });
        }
        if pos >= config.block_size {
            return Err(PicogradError::IndexOutOfBounds {
                what: "position",
                index: pos,
                len: config.block_size,
            });
        }
        if cache.num_layers() != config.n_layer {
            return Err(PicogradError::DimensionMismatch {
                operation: "kv cache layers".to_string(),
                expected: config.n_layer,
                actual: cache.num_layers(),
            });
        }
        if pos != cache.len() {
            return Err(PicogradError::DimensionMismatch {
                operation: "kv cache position".to_string(),
                expected: cache.len(),
                actual: pos,
            });
        }

        let tok_emb = &self.state.get("wte")?[token];
        let pos_emb = &self.state.get("wpe")?[pos];
        let mut x = add_vecs(graph, tok_emb, pos_emb);
        x = rmsnorm(graph, &x);

        for layer in 0..config.n_layer {
            let weights = |suffix: &str| self.state.get(&layer_key(layer, suffix));

            let residual = x.clone();
            x = rmsnorm(graph, &x);
            let q = linear(graph, &x, weights("attn_wq")?);
            let k = linear(graph, &x, weights("attn_wk")?);
            let v = linear(graph, &x, weights("attn_wv")?);
            cache.push(layer, k, v);

            let attended = self.attention(graph, &q, cache, layer);
            x = linear(graph, &attended, weights("attn_wo")?);
            x = add_vecs(graph, &x, &residual);

            let residual = x.clone();
            x = rmsnorm(graph, &x);
            x = linear(graph, &x, weights("mlp_fc1")?);
            x = x
                .into_iter()
                .map(|h| {
                    let r = graph.relu(h);
                    graph.mul(r, r)
                })
                .collect();
            x = linear(graph, &x, weights("mlp_fc2")?);
            x = add_vecs(graph, &x, &residual);
        }

        let logits = linear(graph, &x, self.state.get("lm_head")?);
        debug!(
            "GPT forward token {} pos {}: graph now holds {} nodes",
            token,
            pos,
            graph.len()
        );
        Ok(logits)
    }

    /// Multi-head attention of `q` over every position cached for `layer`.
    fn attention(&self, graph: &mut Graph, q: &[NodeId], cache: &KvCache, layer: usize) -> Vec<NodeId> {
        let head_dim = self.config.head_dim();
        let inv_sqrt = 1.0 / (head_dim as f64).sqrt();
        let keys = cache.keys(layer);
        let values = cache.values(layer);

        let mut out = Vec::with_capacity(self.config.n_embd);
        for head in 0..self.config.n_head {
            let span = head * head_dim..(head + 1) * head_dim;
            let q_h = &q[span.clone()];

            let logits: Vec<NodeId> = keys
                .iter()
                .map(|k| {
                    let score = dot(graph, q_h, &k[span.clone()]);
                    graph.mul_scalar(score, inv_sqrt)
                })
                .collect();
            let attn = softmax(graph, &logits);

            for j in span {
                let column: Vec<NodeId> = values.iter().map(|v| v[j]).collect();
                out.push(dot(graph, &attn, &column));
            }
        }
        out
    }
}

fn layer_key(layer: usize, suffix: &str) -> String {
    format!("layer{}.{}", layer, suffix)
}

fn check_shape(name: &str, matrix: &Matrix, rows: usize, cols: usize) -> Result<(), PicogradError> {
    if matrix.len() != rows {
        return Err(PicogradError::DimensionMismatch {
            operation: format!("{} rows", name),
            expected: rows,
            actual: matrix.len(),
        });
    }
    if let Some(row) = matrix.iter().find(|row| row.len() != cols) {
        return Err(PicogradError::DimensionMismatch {
            operation: format!("{} columns", name),
            expected: cols,
            actual: row.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "gpt_test.rs"]
mod tests;
