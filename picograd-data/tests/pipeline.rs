use picograd_core::config::{AdamConfig, GptConfig};
use picograd_core::nn::Gpt;
use picograd_core::optim::AdamOptimizer;
use picograd_core::train::{evaluate_loss, generate, train_step};
use picograd_core::{Graph, PicogradError};
use picograd_data::{CharTokenizer, CyclicSampler, Dataset, Sampler, TextDataset};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn corpus_to_samples() -> Result<(), PicogradError> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut dataset = TextDataset::from_lines(["ana", "anna", "nan", " ann "]);
    dataset.shuffle(&mut rng);
    let tokenizer = CharTokenizer::fit(dataset.documents());
    assert_eq!(tokenizer.vocab_size(), 3);

    let mut graph = Graph::new();
    let config = GptConfig {
        n_embd: 8,
        n_head: 2,
        block_size: 6,
        ..GptConfig::new(tokenizer.vocab_size())
    };
    let model = Gpt::new(config, &mut graph, &mut rng)?;
    let mut optimizer = AdamOptimizer::new(
        model.parameters(),
        AdamConfig { learning_rate: 3e-2, ..AdamConfig::default() },
    )?;

    let first = tokenizer.encode_document(&dataset.get(0)?)?;
    let before = evaluate_loss(&mut graph, &model, &first)?;

    let sampler = CyclicSampler::new(40);
    for index in sampler.iter(dataset.len()) {
        let tokens = tokenizer.encode_document(&dataset.get(index)?)?;
        train_step(&mut graph, &model, &mut optimizer, &tokens)?;
    }
    assert!(evaluate_loss(&mut graph, &model, &first)? < before);

    for _ in 0..5 {
        let ids = generate(&mut graph, &model, &mut rng, tokenizer.bos(), 0.5)?;
        let text = tokenizer.decode_tokens(&ids)?;
        assert!(text.chars().all(|c| c == 'a' || c == 'n'), "{:?}", text);
    }
    Ok(())
}
