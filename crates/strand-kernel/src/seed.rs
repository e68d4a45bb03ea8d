//! Initial-state seeding.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Draw an initial binary value for each of `cells` slots, each alive with
/// probability `alive_probability` (independent Bernoulli draws).
///
/// A fixed `seed` makes the draw reproducible; `None` seeds from entropy.
pub fn bernoulli(cells: usize, alive_probability: f64, seed: Option<u64>) -> Vec<u8> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };
    (0..cells)
        .map(|_| u8::from(rng.random_bool(alive_probability)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_requested_length_and_binary_values() {
        let cells = bernoulli(64, 0.5, Some(7));
        assert_eq!(cells.len(), 64);
        assert!(cells.iter().all(|&v| v <= 1));
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        assert_eq!(bernoulli(32, 0.3, Some(42)), bernoulli(32, 0.3, Some(42)));
    }

    #[test]
    fn extreme_probabilities_are_deterministic() {
        assert!(bernoulli(16, 0.0, None).iter().all(|&v| v == 0));
        assert!(bernoulli(16, 1.0, None).iter().all(|&v| v == 1));
    }
}
