use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_single_weight() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..10 {
        assert_eq!(weighted_choice(&[0.3], &mut rng), 0);
    }
}

#[test]
fn test_zero_weights_are_never_chosen() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..200 {
        let i = weighted_choice(&[0.0, 1.0, 0.0, 2.0], &mut rng);
        assert!(i == 1 || i == 3, "picked {}", i);
    }
}

#[test]
fn test_frequencies_follow_weights() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut counts = [0usize; 3];
    let n = 20_000;
    for _ in 0..n {
        counts[weighted_choice(&[1.0, 2.0, 7.0], &mut rng)] += 1;
    }
    let freq: Vec<f64> = counts.iter().map(|&c| c as f64 / n as f64).collect();
    assert!((freq[0] - 0.1).abs() < 0.02, "{:?}", freq);
    assert!((freq[1] - 0.2).abs() < 0.02, "{:?}", freq);
    assert!((freq[2] - 0.7).abs() < 0.02, "{:?}", freq);
}

#[test]
fn test_same_seed_same_draws() {
    let weights = [0.25, 0.25, 0.5];
    let mut a = StdRng::seed_from_u64(3);
    let mut b = StdRng::seed_from_u64(3);
    let da: Vec<usize> = (0..50).map(|_| weighted_choice(&weights, &mut a)).collect();
    let db: Vec<usize> = (0..50).map(|_| weighted_choice(&weights, &mut b)).collect();
    assert_eq!(da, db);
}

#[test]
#[should_panic(expected = "empty weights")]
fn test_empty_weights_panic() {
    let mut rng = StdRng::seed_from_u64(4);
    weighted_choice(&[], &mut rng);
}
