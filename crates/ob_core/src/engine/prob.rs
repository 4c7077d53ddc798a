//! Probability kernel: logistic mapping from an ability matchup onto a
//! success probability, with optional logit-space noise.

use crate::era::EraConfig;
use crate::ids::{Ability, OutcomeKind};
use crate::models::player::Player;
use rand::Rng;
use rand_distr::StandardNormal;

pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

/// Weighted dot product of a participant's fatigue-sensitive abilities
/// against a coefficient vector.
pub fn dot_profile(player: &Player, profile: &[(Ability, f64)]) -> f64 {
    profile.iter().map(|(k, w)| player.rated(*k) * w).sum()
}

/// Converts an OffScore/DefScore matchup into a probability.
///
/// `p = sigmoid(logit(base_p) + (off - def) * sensitivity + deltas + noise)`
///
/// Noise is drawn only when an RNG is supplied; the deterministic rebound
/// model passes `None`. The team variance multiplier is clamped into the
/// era's team-mult range before it scales the noise std.
#[allow(clippy::too_many_arguments)]
pub fn prob_from_scores<R: Rng>(
    rng: Option<&mut R>,
    era: &EraConfig,
    base_p: f64,
    off_score: f64,
    def_score: f64,
    kind: OutcomeKind,
    variance_mult: f64,
    logit_delta: f64,
    fatigue_logit_delta: f64,
) -> f64 {
    let pm = &era.prob_model;
    let base_p = base_p.clamp(pm.base_p_min, pm.base_p_max);
    let base_logit = (base_p / (1.0 - base_p)).ln();

    let gap = (off_score - def_score) * era.sensitivity(kind);

    let mut noise = 0.0;
    if let Some(rng) = rng {
        let vp = &era.variance;
        let kind_mult = vp.kind_mult.get(&kind).copied().unwrap_or(1.0);
        let vm = variance_mult.clamp(vp.team_mult_lo, vp.team_mult_hi);
        let std = vp.logit_noise_std * kind_mult * vm;
        if std > 1e-9 {
            let z: f64 = rng.sample(StandardNormal);
            noise = z * std;
        }
    }

    let p = sigmoid(base_logit + gap + noise + logit_delta + fatigue_logit_delta);
    p.clamp(pm.prob_min, pm.prob_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::default_era;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn sigmoid_is_symmetric_and_bounded() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!((sigmoid(3.0) + sigmoid(-3.0) - 1.0).abs() < 1e-12);
        assert!(sigmoid(50.0) <= 1.0);
        assert!(sigmoid(-50.0) >= 0.0);
    }

    #[test]
    fn final_probability_is_clamped() {
        let era = default_era();
        let p_hi = prob_from_scores::<ChaCha8Rng>(
            None, &era, 0.999, 100.0, 0.0, OutcomeKind::ShotRim, 1.0, 5.0, 0.0,
        );
        let p_lo = prob_from_scores::<ChaCha8Rng>(
            None, &era, 0.001, 0.0, 100.0, OutcomeKind::ShotRim, 1.0, -5.0, 0.0,
        );
        assert_eq!(p_hi, era.prob_model.prob_max);
        assert_eq!(p_lo, era.prob_model.prob_min);
    }

    #[test]
    fn deterministic_without_rng() {
        let era = default_era();
        let a = prob_from_scores::<ChaCha8Rng>(
            None, &era, 0.40, 60.0, 50.0, OutcomeKind::Shot3, 1.0, 0.0, 0.0,
        );
        let b = prob_from_scores::<ChaCha8Rng>(
            None, &era, 0.40, 60.0, 50.0, OutcomeKind::Shot3, 1.0, 0.0, 0.0,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn score_gap_moves_probability() {
        let era = default_era();
        let even = prob_from_scores::<ChaCha8Rng>(
            None, &era, 0.40, 50.0, 50.0, OutcomeKind::Shot3, 1.0, 0.0, 0.0,
        );
        let ahead = prob_from_scores::<ChaCha8Rng>(
            None, &era, 0.40, 65.0, 50.0, OutcomeKind::Shot3, 1.0, 0.0, 0.0,
        );
        let behind = prob_from_scores::<ChaCha8Rng>(
            None, &era, 0.40, 35.0, 50.0, OutcomeKind::Shot3, 1.0, 0.0, 0.0,
        );
        assert!(ahead > even && even > behind);
    }

    #[test]
    fn fatigue_delta_lowers_probability() {
        let era = default_era();
        let fresh = prob_from_scores::<ChaCha8Rng>(
            None, &era, 0.40, 55.0, 50.0, OutcomeKind::ShotRim, 1.0, 0.0, 0.0,
        );
        let gassed = prob_from_scores::<ChaCha8Rng>(
            None, &era, 0.40, 55.0, 50.0, OutcomeKind::ShotRim, 1.0, 0.0, -0.25,
        );
        assert!(gassed < fresh);
    }

    #[test]
    fn variance_mult_widens_probability_spread() {
        let era = default_era();
        let spread = |vm: f64, seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let samples: Vec<f64> = (0..4000)
                .map(|_| {
                    prob_from_scores(
                        Some(&mut rng),
                        &era,
                        0.40,
                        50.0,
                        50.0,
                        OutcomeKind::Shot3,
                        vm,
                        0.0,
                        0.0,
                    )
                })
                .collect();
            let mean = samples.iter().sum::<f64>() / samples.len() as f64;
            (samples.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / samples.len() as f64).sqrt()
        };
        let clutch = spread(0.80, 11);
        let garbage = spread(1.25, 11);
        assert!(
            clutch < garbage * 0.90,
            "clutch std {clutch} should be at least 10% under garbage std {garbage}"
        );
    }

    #[test]
    fn team_variance_mult_is_clamped() {
        let era = default_era();
        // 10.0 clamps to team_mult_hi, so both runs draw identical noise
        let mut rng_a = ChaCha8Rng::seed_from_u64(5);
        let mut rng_b = ChaCha8Rng::seed_from_u64(5);
        let a = prob_from_scores(
            Some(&mut rng_a), &era, 0.4, 50.0, 50.0, OutcomeKind::Shot3, 10.0, 0.0, 0.0,
        );
        let b = prob_from_scores(
            Some(&mut rng_b), &era, 0.4, 50.0, 50.0, OutcomeKind::Shot3, era.variance.team_mult_hi,
            0.0, 0.0,
        );
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::era::default_era;
    use proptest::prelude::*;
    use rand_chacha::ChaCha8Rng;

    proptest! {
        #[test]
        fn probability_stays_in_clamp_range(
            base_p in 0.0f64..1.0,
            off in 0.0f64..100.0,
            def in 0.0f64..100.0,
            delta in -2.0f64..2.0,
        ) {
            let era = default_era();
            let p = prob_from_scores::<ChaCha8Rng>(
                None, &era, base_p, off, def, OutcomeKind::ShotMid, 1.0, delta, 0.0,
            );
            prop_assert!(p >= era.prob_model.prob_min && p <= era.prob_model.prob_max);
        }
    }
}
