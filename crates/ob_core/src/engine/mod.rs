//! The possession engine: probability kernel, distribution builders,
//! role fit, resolution, and the possession/game loops.

pub mod builders;
pub mod defense;
pub mod game;
pub mod participants;
pub mod possession;
pub mod prob;
pub mod profiles;
pub mod resolve;
pub mod role_fit;
pub mod rotation;

pub use game::{simulate_game, simulate_game_with_sink, SimOptions, ENGINE_VERSION};

use rand::Rng;
use std::collections::BTreeMap;

/// Normalizes a weight map to sum 1, clamping negatives to zero and
/// pruning non-positive entries. A zero-sum map becomes uniform.
pub fn normalize_weights<K: Ord + Copy>(weights: &BTreeMap<K, f64>) -> BTreeMap<K, f64> {
    let total: f64 = weights.values().map(|w| w.max(0.0)).sum();
    if total <= 1e-12 {
        if weights.is_empty() {
            return BTreeMap::new();
        }
        let uniform = 1.0 / weights.len() as f64;
        return weights.keys().map(|k| (*k, uniform)).collect();
    }
    weights
        .iter()
        .filter_map(|(k, w)| {
            let w = w.max(0.0) / total;
            (w > 0.0).then_some((*k, w))
        })
        .collect()
}

/// Samples a key proportionally to its weight. Negative weights count as
/// zero; a degenerate map yields its first key.
pub fn weighted_choice<K: Ord + Copy, R: Rng>(rng: &mut R, weights: &BTreeMap<K, f64>) -> Option<K> {
    if weights.is_empty() {
        return None;
    }
    let total: f64 = weights.values().map(|w| w.max(0.0)).sum();
    if total <= 1e-12 {
        return weights.keys().next().copied();
    }
    let r = rng.gen::<f64>() * total;
    let mut upto = 0.0;
    for (k, w) in weights {
        upto += w.max(0.0);
        if upto >= r {
            return Some(*k);
        }
    }
    weights.keys().next_back().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn normalize_sums_to_one_and_prunes() {
        let mut w = BTreeMap::new();
        w.insert("a", 2.0);
        w.insert("b", -1.0);
        w.insert("c", 6.0);
        let n = normalize_weights(&w);
        assert_eq!(n.len(), 2);
        let sum: f64 = n.values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((n["c"] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn zero_sum_becomes_uniform() {
        let mut w = BTreeMap::new();
        w.insert("a", 0.0);
        w.insert("b", 0.0);
        let n = normalize_weights(&w);
        assert!((n["a"] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn weighted_choice_never_picks_zero_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut w = BTreeMap::new();
        w.insert("never", 0.0);
        w.insert("always", 1.0);
        for _ in 0..200 {
            assert_eq!(weighted_choice(&mut rng, &w), Some("always"));
        }
    }

    #[test]
    fn weighted_choice_is_roughly_proportional() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut w = BTreeMap::new();
        w.insert("rare", 1.0);
        w.insert("common", 9.0);
        let mut hits = 0;
        for _ in 0..5000 {
            if weighted_choice(&mut rng, &w) == Some("common") {
                hits += 1;
            }
        }
        let rate = hits as f64 / 5000.0;
        assert!(rate > 0.85 && rate < 0.95, "rate {rate}");
    }
}
