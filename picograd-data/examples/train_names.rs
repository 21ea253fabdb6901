//! Trains a tiny character-level GPT on a list of names and samples new ones.
//!
//! Reads one name per line from `input.txt` (override with `PICOGRAD_INPUT`),
//! e.g. the `names.txt` file of the makemore project. Other settings:
//! `PICOGRAD_SEED`, `PICOGRAD_NUM_STEPS`, `PICOGRAD_TEMPERATURE`,
//! `PICOGRAD_NUM_SAMPLES`. Set `RUST_LOG=debug` for per-step details.
//!
//! ```text
//! cargo run --release -p picograd-data --example train_names
//! ```

use log::info;
use picograd_core::config::{AdamConfig, GptConfig, TrainConfig};
use picograd_core::nn::Gpt;
use picograd_core::optim::{AdamOptimizer, CosineDecay};
use picograd_core::train::{generate, train_step};
use picograd_core::{Graph, PicogradError};
use picograd_data::{CharTokenizer, CyclicSampler, Dataset, Sampler, TextDataset};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), PicogradError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrainConfig::from_env()?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut dataset = TextDataset::from_path(&config.input_path)?;
    dataset.shuffle(&mut rng);
    info!("num docs: {}", dataset.len());

    let tokenizer = CharTokenizer::fit(dataset.documents());

    let mut graph = Graph::new();
    let model = Gpt::new(GptConfig::new(tokenizer.vocab_size()), &mut graph, &mut rng)?;
    info!("num params: {}", model.num_parameters());

    let mut optimizer = AdamOptimizer::new(model.parameters(), AdamConfig::default())?
        .with_scheduler(Box::new(CosineDecay::new(config.num_steps as u64)?));

    let sampler = CyclicSampler::new(config.num_steps);
    for (step, index) in sampler.iter(dataset.len()).enumerate() {
        let tokens = tokenizer.encode_document(&dataset.get(index)?)?;
        let loss = train_step(&mut graph, &model, &mut optimizer, &tokens)?;
        info!("step {:4} / {:4} | loss {:.4}", step + 1, config.num_steps, loss);
    }

    info!("--- inference ---");
    for sample_idx in 1..=config.num_samples {
        let ids = generate(&mut graph, &model, &mut rng, tokenizer.bos(), config.temperature)?;
        info!("sample {:2}: {}", sample_idx, tokenizer.decode_tokens(&ids)?);
    }
    Ok(())
}
