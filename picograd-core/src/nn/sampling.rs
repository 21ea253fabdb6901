use rand::Rng;

/// Draws an index with probability proportional to `weights[i]`.
///
/// Walks the cumulative sum until it reaches a uniform draw in
/// `[0, total)`. If rounding leaves the draw above the final cumulative sum
/// the last index is returned. Weights need not be normalized.
///
/// # Panics
/// Panics if `weights` is empty.
pub fn weighted_choice<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    assert!(!weights.is_empty(), "weighted_choice: empty weights");
    let total: f64 = weights.iter().sum();
    let r = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if r <= cumulative {
            return i;
        }
    }
    weights.len() - 1
}

#[cfg(test)]
#[path = "sampling_test.rs"]
mod tests;
