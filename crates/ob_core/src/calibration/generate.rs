//! Structured dummy roster and tactic sampling for calibration batches.

use crate::ids::{Ability, DefScheme, OffScheme, Position, SlotRole};
use crate::models::player::Player;
use crate::models::team::{best_on_court, TeamState};
use rand::Rng;
use std::collections::BTreeMap;

use Ability as K;

/// Roster archetypes sampled by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    PgShoot,
    Wing3D,
    BigRim,
    BigSkill,
    Slash,
    Balanced,
}

impl Archetype {
    fn position(self) -> Position {
        match self {
            Archetype::PgShoot | Archetype::Slash => Position::Guard,
            Archetype::Wing3D | Archetype::Balanced => Position::Forward,
            Archetype::BigRim | Archetype::BigSkill => Position::Center,
        }
    }
}

/// Directional style profile: scheme preferences plus knob priors.
#[derive(Debug, Clone)]
pub struct StyleProfile {
    pub name: &'static str,
    pub offense_w: &'static [(OffScheme, f64)],
    pub defense_w: &'static [(DefScheme, f64)],
    pub sharp_mu: f64,
    pub strength_mu: f64,
    pub knob_sd: f64,
}

/// Resolves a style name; unknown styles fall back to `modern`.
pub fn style_profile(name: &str) -> StyleProfile {
    match name {
        "motion" => StyleProfile {
            name: "motion",
            offense_w: &[
                (OffScheme::MotionSplitCut, 0.34),
                (OffScheme::DhoChicago, 0.24),
                (OffScheme::FiveOut, 0.18),
                (OffScheme::HornsElbow, 0.14),
                (OffScheme::SpreadHeavyPnr, 0.10),
            ],
            defense_w: &[
                (DefScheme::SwitchEverything, 0.34),
                (DefScheme::Drop, 0.26),
                (DefScheme::PackLineGapHelp, 0.20),
                (DefScheme::HedgeShowRecover, 0.12),
                (DefScheme::Zone, 0.08),
            ],
            sharp_mu: 1.02,
            strength_mu: 1.04,
            knob_sd: 0.08,
        },
        "post" => StyleProfile {
            name: "post",
            offense_w: &[
                (OffScheme::PostInsideOut, 0.40),
                (OffScheme::HornsElbow, 0.24),
                (OffScheme::MotionSplitCut, 0.16),
                (OffScheme::SpreadHeavyPnr, 0.12),
                (OffScheme::DriveKick, 0.08),
            ],
            defense_w: &[
                (DefScheme::Drop, 0.36),
                (DefScheme::Zone, 0.22),
                (DefScheme::PackLineGapHelp, 0.22),
                (DefScheme::SwitchEverything, 0.12),
                (DefScheme::IceSidePnr, 0.08),
            ],
            sharp_mu: 1.05,
            strength_mu: 1.05,
            knob_sd: 0.08,
        },
        "pace" => StyleProfile {
            name: "pace",
            offense_w: &[
                (OffScheme::TransitionEarly, 0.36),
                (OffScheme::DriveKick, 0.24),
                (OffScheme::FiveOut, 0.20),
                (OffScheme::SpreadHeavyPnr, 0.14),
                (OffScheme::DhoChicago, 0.06),
            ],
            defense_w: &[
                (DefScheme::SwitchEverything, 0.28),
                (DefScheme::Drop, 0.24),
                (DefScheme::BlitzTrapPnr, 0.20),
                (DefScheme::HedgeShowRecover, 0.16),
                (DefScheme::Zone, 0.12),
            ],
            sharp_mu: 1.08,
            strength_mu: 1.03,
            knob_sd: 0.10,
        },
        _ => StyleProfile {
            name: "modern",
            offense_w: &[
                (OffScheme::SpreadHeavyPnr, 0.28),
                (OffScheme::FiveOut, 0.20),
                (OffScheme::DriveKick, 0.20),
                (OffScheme::MotionSplitCut, 0.12),
                (OffScheme::DhoChicago, 0.10),
                (OffScheme::TransitionEarly, 0.06),
                (OffScheme::HornsElbow, 0.03),
                (OffScheme::PostInsideOut, 0.01),
            ],
            defense_w: &[
                (DefScheme::Drop, 0.42),
                (DefScheme::SwitchEverything, 0.28),
                (DefScheme::HedgeShowRecover, 0.10),
                (DefScheme::IceSidePnr, 0.08),
                (DefScheme::Zone, 0.06),
                (DefScheme::PackLineGapHelp, 0.04),
                (DefScheme::BlitzTrapPnr, 0.02),
            ],
            sharp_mu: 1.05,
            strength_mu: 1.03,
            knob_sd: 0.10,
        },
    }
}

fn pick_weighted<T: Copy, R: Rng>(rng: &mut R, table: &[(T, f64)]) -> T {
    let total: f64 = table.iter().map(|(_, w)| w.max(0.0)).sum();
    let r = rng.gen::<f64>() * total.max(1e-12);
    let mut upto = 0.0;
    for (item, w) in table {
        upto += w.max(0.0);
        if upto >= r {
            return *item;
        }
    }
    table[table.len() - 1].0
}

fn bump<R: Rng>(rng: &mut R, base: &mut BTreeMap<Ability, f64>, keys: &[Ability], lo: f64, hi: f64) {
    for k in keys {
        let v = base.get(k).copied().unwrap_or(50.0);
        let bumped = (v + rng.gen_range(lo..hi)).clamp(25.0, 95.0);
        base.insert(*k, bumped);
    }
}

/// Samples one archetyped player with every required derived key set.
pub fn sample_player<R: Rng>(rng: &mut R, pid: &str, name: &str, archetype: Archetype) -> Player {
    let mut base: BTreeMap<Ability, f64> = Ability::ALL.iter().map(|a| (*a, 50.0)).collect();
    match archetype {
        Archetype::PgShoot => {
            bump(
                rng,
                &mut base,
                &[
                    K::Shot3Cs,
                    K::Shot3Od,
                    K::PassCreate,
                    K::PassSafe,
                    K::PnrRead,
                    K::HandleSafe,
                    K::FirstStep,
                    K::DriveCreate,
                ],
                12.0,
                25.0,
            );
            bump(rng, &mut base, &[K::DefPoa, K::Endurance], 5.0, 12.0);
        }
        Archetype::Wing3D => {
            bump(
                rng,
                &mut base,
                &[K::Shot3Cs, K::DefPoa, K::DefHelp, K::DefSteal, K::Endurance],
                10.0,
                20.0,
            );
            bump(rng, &mut base, &[K::DriveCreate, K::HandleSafe], 2.0, 10.0);
        }
        Archetype::BigRim => {
            bump(
                rng,
                &mut base,
                &[K::DefRim, K::DefPost, K::RebDr, K::Physical, K::Endurance],
                12.0,
                25.0,
            );
            bump(
                rng,
                &mut base,
                &[K::FinRim, K::FinDunk, K::FinContact, K::ShortrollPlay, K::RebOr, K::SealPower],
                6.0,
                15.0,
            );
        }
        Archetype::BigSkill => {
            bump(
                rng,
                &mut base,
                &[
                    K::ShotMidCs,
                    K::PassSafe,
                    K::PassCreate,
                    K::ShortrollPlay,
                    K::PostScore,
                    K::PostControl,
                ],
                8.0,
                18.0,
            );
            bump(rng, &mut base, &[K::DefHelp, K::DefPost, K::Endurance], 6.0, 14.0);
        }
        Archetype::Slash => {
            bump(
                rng,
                &mut base,
                &[
                    K::FinRim,
                    K::FinContact,
                    K::FirstStep,
                    K::DriveCreate,
                    K::HandleSafe,
                    K::Endurance,
                ],
                12.0,
                24.0,
            );
            bump(rng, &mut base, &[K::Shot3Cs], 0.0, 10.0);
        }
        Archetype::Balanced => {
            let keys: Vec<Ability> = Ability::ALL.to_vec();
            bump(rng, &mut base, &keys, -5.0, 10.0);
        }
    }
    Player::with_ratings(pid, name, archetype.position(), &base)
}

const LINEUP_ARCHETYPES: [Archetype; 12] = [
    Archetype::PgShoot,
    Archetype::Wing3D,
    Archetype::Slash,
    Archetype::BigSkill,
    Archetype::BigRim,
    Archetype::Balanced,
    Archetype::Wing3D,
    Archetype::BigRim,
    Archetype::Slash,
    Archetype::PgShoot,
    Archetype::Balanced,
    Archetype::BigSkill,
];

fn gauss_knob<R: Rng>(rng: &mut R, mu: f64, sd: f64) -> f64 {
    let z: f64 = rng.sample(rand_distr::StandardNormal);
    (mu + z * sd).clamp(0.90, 1.20)
}

/// Builds a 12-man team with style-directed tactics and ability-ranked
/// role assignments, valid under the engine's validation contract.
pub fn build_team<R: Rng>(
    rng: &mut R,
    team_id: &str,
    name: &str,
    profile: &StyleProfile,
) -> TeamState {
    let lineup: Vec<Player> = LINEUP_ARCHETYPES
        .iter()
        .enumerate()
        .map(|(i, arch)| sample_player(rng, &format!("{team_id}_{i}"), &format!("{name} {i}"), *arch))
        .collect();

    let mut team = TeamState::new(team_id, name, lineup);
    let starters: Vec<usize> = (0..5).collect();

    // slot roles from the starting five, ability-ranked
    for slot in SlotRole::ALL {
        let idx = best_on_court(&team, &starters, slot.fallback_rank());
        team.roles.insert(slot.as_str().to_string(), team.lineup[idx].pid.clone());
    }

    // scheme participant roles the role-fit engine grades
    let fit_assignments = [
        ("PnR_PrimaryHandler", K::PnrRead),
        ("PnR_SecondaryHandler", K::PassCreate),
        ("Roll_Man", K::FinDunk),
        ("ShortRoll_Playmaker", K::ShortrollPlay),
        ("SpotUp_Wing", K::Shot3Cs),
        ("Corner_Specialist", K::Shot3Cs),
        ("Post_Scorer", K::PostScore),
        ("Primary_Cutter", K::FirstStep),
        ("Transition_Pusher", K::FirstStep),
        ("Rim_Runner", K::FinDunk),
        ("ExtraPass_Connector", K::PassSafe),
        ("Kickout_Trigger", K::DriveCreate),
        ("DHO_PrimaryHandler", K::HandleSafe),
        ("DHO_Hub_Big", K::ShortrollPlay),
        ("Elbow_Hub", K::PassSafe),
        ("Horns_Big_A", K::ShortrollPlay),
        ("Horns_Big_B", K::FinRim),
        ("Movement_Shooter", K::Shot3Cs),
        ("Post_Facilitator", K::PostControl),
    ];
    for (role, key) in fit_assignments {
        let idx = best_on_court(&team, &starters, key);
        team.roles.insert(role.to_string(), team.lineup[idx].pid.clone());
    }

    let tactics = &mut team.tactics;
    tactics.offense_scheme = pick_weighted(rng, profile.offense_w).as_str().to_string();
    tactics.defense_scheme = pick_weighted(rng, profile.defense_w).as_str().to_string();
    tactics.scheme_weight_sharpness = gauss_knob(rng, profile.sharp_mu, profile.knob_sd);
    tactics.scheme_outcome_strength = gauss_knob(rng, profile.strength_mu, profile.knob_sd);
    tactics.def_scheme_weight_sharpness = gauss_knob(rng, profile.sharp_mu, profile.knob_sd);
    tactics.def_scheme_outcome_strength = gauss_knob(rng, profile.strength_mu, profile.knob_sd);

    team
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::{default_era, EraRuntime};
    use crate::validate::{validate_and_sanitize_team, ValidationConfig, ValidationReport};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn generated_team_passes_strict_validation() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let profile = style_profile("modern");
        let mut team = build_team(&mut rng, "T1", "Team One", &profile);
        let runtime = EraRuntime::from_config(default_era());
        let mut report = ValidationReport::default();
        validate_and_sanitize_team(
            &mut team,
            &runtime,
            &ValidationConfig::default(),
            &mut report,
            "team[T1]",
        );
        assert!(report.ok(), "errors: {:?}", report.errors);
        assert_eq!(team.lineup.len(), 12);
        assert!(!team.slot_roles.is_empty());
        assert!(!team.fit_roles.is_empty());
    }

    #[test]
    fn styles_resolve_with_modern_fallback() {
        assert_eq!(style_profile("post").name, "post");
        assert_eq!(style_profile("anything_else").name, "modern");
    }

    #[test]
    fn abilities_stay_in_sample_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for arch in [
            Archetype::PgShoot,
            Archetype::Wing3D,
            Archetype::BigRim,
            Archetype::BigSkill,
            Archetype::Slash,
            Archetype::Balanced,
        ] {
            let p = sample_player(&mut rng, "x", "x", arch);
            for (_, v) in &p.derived {
                assert!((25.0..=95.0).contains(v), "{arch:?} produced {v}");
            }
        }
    }
}
