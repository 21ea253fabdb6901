use picograd_core::config::GptConfig;
use picograd_core::nn::Gpt;
use picograd_core::{Graph, NodeId};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Each integration test file compiles this module separately and uses a
// different subset of it.
#[allow(dead_code)]
pub(crate) fn leaves(graph: &mut Graph, values: &[f64]) -> Vec<NodeId> {
    values.iter().map(|&v| graph.parameter(v)).collect()
}

#[allow(dead_code)]
pub(crate) fn values(graph: &Graph, ids: &[NodeId]) -> Vec<f64> {
    ids.iter().map(|&id| graph.value(id)).collect()
}

/// A 4-token vocabulary plus BOS (id 4) on a model small enough for
/// debug-mode tests.
#[allow(dead_code)]
pub(crate) fn tiny_gpt(seed: u64) -> (Graph, Gpt, StdRng) {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let config = GptConfig {
        vocab_size: 5,
        n_embd: 8,
        n_head: 2,
        n_layer: 2,
        block_size: 6,
        init_std: 0.02,
    };
    let model = Gpt::new(config, &mut graph, &mut rng).expect("valid tiny config");
    (graph, model, rng)
}
