//! Role-fit engine: grades how well the assigned players fit the roles an
//! action family asks for, then distorts the outcome prior (60% of the
//! effect) and shifts the resolution logit (40%).

use crate::era::EraConfig;
use crate::ids::{Ability, Action, FitRole, Grade, Outcome};
use crate::models::player::Player;
use crate::models::team::TeamState;
use std::collections::BTreeMap;

use super::builders::StepTags;
use super::normalize_weights;

use Ability as K;

/// Ability weights per role. Coefficients sum to 1.
pub fn fit_role_weights(role: FitRole) -> &'static [(Ability, f64)] {
    match role {
        FitRole::PnrPrimaryHandler => &[
            (K::PnrRead, 0.25),
            (K::DriveCreate, 0.20),
            (K::HandleSafe, 0.20),
            (K::Shot3Od, 0.15),
            (K::ShotMidPu, 0.10),
            (K::PassCreate, 0.10),
        ],
        FitRole::PnrSecondaryHandler => &[
            (K::Shot3Cs, 0.25),
            (K::PnrRead, 0.20),
            (K::PassSafe, 0.15),
            (K::DriveCreate, 0.15),
            (K::HandleSafe, 0.15),
            (K::Shot3Od, 0.10),
        ],
        FitRole::DhoPrimaryHandler => &[
            (K::DriveCreate, 0.20),
            (K::HandleSafe, 0.20),
            (K::PassSafe, 0.15),
            (K::ShotMidPu, 0.15),
            (K::PassCreate, 0.10),
            (K::Shot3Od, 0.10),
            (K::Shot3Cs, 0.10),
        ],
        FitRole::ElbowHub => &[
            (K::PassSafe, 0.25),
            (K::PassCreate, 0.20),
            (K::PnrRead, 0.15),
            (K::ShortrollPlay, 0.15),
            (K::ShotMidCs, 0.10),
            (K::ShotTouch, 0.10),
            (K::HandleSafe, 0.05),
        ],
        FitRole::PointForward => &[
            (K::DriveCreate, 0.18),
            (K::PassCreate, 0.18),
            (K::PassSafe, 0.18),
            (K::HandleSafe, 0.14),
            (K::PnrRead, 0.12),
            (K::FirstStep, 0.10),
            (K::Shot3Cs, 0.10),
        ],
        FitRole::TransitionPusher => &[
            (K::FirstStep, 0.20),
            (K::DriveCreate, 0.20),
            (K::PassSafe, 0.15),
            (K::PassCreate, 0.15),
            (K::HandleSafe, 0.15),
            (K::FinRim, 0.10),
            (K::Endurance, 0.05),
        ],
        FitRole::ThreeOffDribbleScorer => &[
            (K::Shot3Od, 0.35),
            (K::HandleSafe, 0.15),
            (K::DriveCreate, 0.15),
            (K::PnrRead, 0.10),
            (K::ShotMidPu, 0.10),
            (K::Endurance, 0.10),
            (K::ShotFt, 0.05),
        ],
        FitRole::MidPullUpScorer => &[
            (K::ShotMidPu, 0.35),
            (K::DriveCreate, 0.15),
            (K::HandleSafe, 0.15),
            (K::ShotTouch, 0.10),
            (K::PnrRead, 0.10),
            (K::Endurance, 0.10),
            (K::ShotFt, 0.05),
        ],
        FitRole::SpotUpWing => &[
            (K::Shot3Cs, 0.40),
            (K::ShotMidCs, 0.15),
            (K::PassSafe, 0.10),
            (K::HandleSafe, 0.10),
            (K::FirstStep, 0.10),
            (K::Endurance, 0.10),
            (K::FinRim, 0.05),
        ],
        FitRole::CornerSpecialist => &[
            (K::Shot3Cs, 0.50),
            (K::PassSafe, 0.10),
            (K::HandleSafe, 0.10),
            (K::Endurance, 0.10),
            (K::FirstStep, 0.10),
            (K::ShotFt, 0.05),
            (K::FinRim, 0.05),
        ],
        FitRole::MovementShooter => &[
            (K::Shot3Cs, 0.35),
            (K::Endurance, 0.15),
            (K::ShotMidCs, 0.10),
            (K::PassSafe, 0.10),
            (K::FirstStep, 0.10),
            (K::HandleSafe, 0.10),
            (K::DriveCreate, 0.05),
            (K::Shot3Od, 0.05),
        ],
        FitRole::RelocationShooter => &[
            (K::Shot3Cs, 0.40),
            (K::Endurance, 0.15),
            (K::PassSafe, 0.10),
            (K::HandleSafe, 0.10),
            (K::FirstStep, 0.10),
            (K::ShotMidCs, 0.10),
            (K::FinRim, 0.05),
        ],
        FitRole::RollMan => &[
            (K::FinRim, 0.25),
            (K::FinDunk, 0.25),
            (K::FinContact, 0.15),
            (K::RebOr, 0.10),
            (K::Physical, 0.10),
            (K::Endurance, 0.10),
            (K::ShortrollPlay, 0.05),
        ],
        FitRole::ShortRollPlaymaker => &[
            (K::ShortrollPlay, 0.30),
            (K::PassSafe, 0.20),
            (K::PassCreate, 0.15),
            (K::HandleSafe, 0.10),
            (K::FinRim, 0.10),
            (K::Physical, 0.10),
            (K::PnrRead, 0.05),
        ],
        FitRole::PopBig => &[
            (K::Shot3Cs, 0.35),
            (K::ShotMidCs, 0.15),
            (K::PassSafe, 0.15),
            (K::ShortrollPlay, 0.10),
            (K::Physical, 0.10),
            (K::Endurance, 0.10),
            (K::HandleSafe, 0.05),
        ],
        FitRole::DhoHubBig => &[
            (K::PassSafe, 0.22),
            (K::ShortrollPlay, 0.20),
            (K::PassCreate, 0.15),
            (K::Shot3Cs, 0.15),
            (K::HandleSafe, 0.10),
            (K::Physical, 0.10),
            (K::ShotMidCs, 0.08),
        ],
        FitRole::HornsBigA => &[
            (K::ShortrollPlay, 0.22),
            (K::PassSafe, 0.20),
            (K::PassCreate, 0.15),
            (K::ShotMidCs, 0.15),
            (K::Physical, 0.10),
            (K::FinRim, 0.10),
            (K::HandleSafe, 0.08),
        ],
        FitRole::HornsBigB => &[
            (K::FinRim, 0.20),
            (K::FinDunk, 0.15),
            (K::ShotMidCs, 0.15),
            (K::Shot3Cs, 0.15),
            (K::FinContact, 0.10),
            (K::Physical, 0.10),
            (K::ShortrollPlay, 0.10),
            (K::PassSafe, 0.05),
        ],
        FitRole::PostScorer => &[
            (K::PostScore, 0.45),
            (K::PostControl, 0.25),
            (K::FinContact, 0.10),
            (K::ShotTouch, 0.10),
            (K::Physical, 0.10),
        ],
        FitRole::PostFacilitator => &[
            (K::PostControl, 0.30),
            (K::PassSafe, 0.20),
            (K::PassCreate, 0.15),
            (K::PostScore, 0.15),
            (K::HandleSafe, 0.10),
            (K::ShotTouch, 0.10),
        ],
        FitRole::SealFinisher => &[
            (K::SealPower, 0.35),
            (K::FinRim, 0.20),
            (K::FinDunk, 0.15),
            (K::Physical, 0.15),
            (K::RebOr, 0.10),
            (K::FinContact, 0.05),
        ],
        FitRole::PrimaryCutter => &[
            (K::FirstStep, 0.25),
            (K::FinRim, 0.20),
            (K::HandleSafe, 0.15),
            (K::Endurance, 0.15),
            (K::Shot3Cs, 0.10),
            (K::PassSafe, 0.10),
            (K::FinContact, 0.05),
        ],
        FitRole::DunkerSpot => &[
            (K::FinDunk, 0.30),
            (K::FinRim, 0.20),
            (K::RebOr, 0.15),
            (K::Physical, 0.15),
            (K::Endurance, 0.10),
            (K::FinContact, 0.10),
        ],
        FitRole::BackdoorThreat => &[
            (K::FirstStep, 0.20),
            (K::FinRim, 0.20),
            (K::HandleSafe, 0.15),
            (K::PassSafe, 0.15),
            (K::Endurance, 0.10),
            (K::Shot3Cs, 0.10),
            (K::ShotTouch, 0.10),
        ],
        FitRole::RimRunner => &[
            (K::Endurance, 0.20),
            (K::FinRim, 0.20),
            (K::FinDunk, 0.20),
            (K::FirstStep, 0.10),
            (K::RebOr, 0.10),
            (K::Physical, 0.10),
            (K::FinContact, 0.10),
        ],
        FitRole::ExtraPassConnector => &[
            (K::PassSafe, 0.35),
            (K::PassCreate, 0.20),
            (K::HandleSafe, 0.15),
            (K::Shot3Cs, 0.15),
            (K::Endurance, 0.10),
            (K::PnrRead, 0.05),
        ],
        FitRole::KickoutTrigger => &[
            (K::DriveCreate, 0.25),
            (K::PassSafe, 0.20),
            (K::PassCreate, 0.15),
            (K::HandleSafe, 0.15),
            (K::PnrRead, 0.10),
            (K::Shot3Od, 0.10),
            (K::FinContact, 0.05),
        ],
    }
}

/// Grade cutoffs (S, A, B, C minimums) per role.
pub fn fit_role_cuts(role: FitRole) -> (f64, f64, f64, f64) {
    match role {
        FitRole::PnrPrimaryHandler => (80.0, 72.0, 64.0, 56.0),
        FitRole::PnrSecondaryHandler => (78.0, 70.0, 62.0, 54.0),
        FitRole::DhoPrimaryHandler => (78.0, 70.0, 62.0, 54.0),
        FitRole::ElbowHub => (80.0, 72.0, 64.0, 56.0),
        FitRole::PointForward => (78.0, 70.0, 62.0, 54.0),
        FitRole::TransitionPusher => (75.0, 67.0, 59.0, 51.0),
        FitRole::ThreeOffDribbleScorer => (79.0, 71.0, 63.0, 55.0),
        FitRole::MidPullUpScorer => (78.0, 70.0, 62.0, 54.0),
        FitRole::SpotUpWing => (80.0, 72.0, 64.0, 56.0),
        FitRole::CornerSpecialist => (82.0, 74.0, 66.0, 58.0),
        FitRole::MovementShooter => (80.0, 72.0, 64.0, 56.0),
        FitRole::RelocationShooter => (80.0, 72.0, 64.0, 56.0),
        FitRole::RollMan => (76.0, 68.0, 60.0, 52.0),
        FitRole::ShortRollPlaymaker => (78.0, 70.0, 62.0, 54.0),
        FitRole::PopBig => (80.0, 72.0, 64.0, 56.0),
        FitRole::DhoHubBig => (78.0, 70.0, 62.0, 54.0),
        FitRole::HornsBigA => (78.0, 70.0, 62.0, 54.0),
        FitRole::HornsBigB => (76.0, 68.0, 60.0, 52.0),
        FitRole::PostScorer => (77.0, 69.0, 61.0, 53.0),
        FitRole::PostFacilitator => (78.0, 70.0, 62.0, 54.0),
        FitRole::SealFinisher => (75.0, 67.0, 59.0, 51.0),
        FitRole::PrimaryCutter => (74.0, 66.0, 58.0, 50.0),
        FitRole::DunkerSpot => (72.0, 64.0, 56.0, 48.0),
        FitRole::BackdoorThreat => (74.0, 66.0, 58.0, 50.0),
        FitRole::RimRunner => (74.0, 66.0, 58.0, 50.0),
        FitRole::ExtraPassConnector => (78.0, 70.0, 62.0, 54.0),
        FitRole::KickoutTrigger => (76.0, 68.0, 60.0, 52.0),
    }
}

/// Raw prior multipliers per grade: (good-outcome mult, bad-outcome mult).
fn prior_mult_raw(grade: Grade) -> (f64, f64) {
    match grade {
        Grade::S => (1.06, 0.94),
        Grade::A => (1.03, 0.97),
        Grade::B => (1.00, 1.00),
        Grade::C => (0.93, 1.10),
        Grade::D => (0.85, 1.25),
    }
}

fn logit_delta_raw(grade: Grade) -> f64 {
    match grade {
        Grade::S => 0.18,
        Grade::A => 0.10,
        Grade::B => 0.00,
        Grade::C => -0.18,
        Grade::D => -0.35,
    }
}

/// Weighted role-fit score for one player, clamped to [0, 100].
pub fn role_fit_score(player: &Player, role: FitRole) -> f64 {
    let score: f64 = fit_role_weights(role)
        .iter()
        .map(|(k, w)| player.rated(*k) * w)
        .sum();
    score.clamp(0.0, 100.0)
}

pub fn role_fit_grade(role: FitRole, fit: f64) -> Grade {
    let (s_min, a_min, b_min, c_min) = fit_role_cuts(role);
    if fit >= s_min {
        Grade::S
    } else if fit >= a_min {
        Grade::A
    } else if fit >= b_min {
        Grade::B
    } else if fit >= c_min {
        Grade::C
    } else {
        Grade::D
    }
}

fn role_fit_strength(offense: &TeamState, era: &EraConfig) -> f64 {
    offense
        .tactics
        .resolved
        .context
        .role_fit_strength
        .unwrap_or(era.role_fit_default_strength)
        .clamp(0.0, 1.0)
}

fn find_on_court(team: &TeamState, on_court: &[usize], pid: &str) -> Option<usize> {
    on_court
        .iter()
        .copied()
        .find(|idx| team.lineup.get(*idx).map(|p| p.pid == pid).unwrap_or(false))
}

fn assigned(team: &TeamState, on_court: &[usize], role: FitRole) -> Option<(FitRole, usize, f64)> {
    let pid = team.fit_roles.get(&role)?;
    let idx = find_on_court(team, on_court, pid)?;
    Some((role, idx, role_fit_score(&team.lineup[idx], role)))
}

/// Best-fitting assigned role out of a candidate group.
fn choose_best_role(
    team: &TeamState,
    on_court: &[usize],
    roles: &[FitRole],
) -> Option<(FitRole, usize, f64)> {
    roles
        .iter()
        .filter_map(|r| assigned(team, on_court, *r))
        .max_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
}

/// Participant roles for an action family, in evaluation order.
fn collect_participants(
    family: Action,
    team: &TeamState,
    on_court: &[usize],
) -> Vec<(FitRole, usize, f64)> {
    let mut parts = Vec::new();
    let mut push = |pick: Option<(FitRole, usize, f64)>| {
        if let Some(p) = pick {
            parts.push(p);
        }
    };
    match family {
        Action::PnR => {
            push(choose_best_role(team, on_court, &[FitRole::PnrPrimaryHandler]));
            push(choose_best_role(team, on_court, &[FitRole::PnrSecondaryHandler]));
            // roll and short-roll are both evaluated when assigned
            push(assigned(team, on_court, FitRole::RollMan));
            push(assigned(team, on_court, FitRole::ShortRollPlaymaker));
            push(assigned(team, on_court, FitRole::PopBig));
        }
        Action::Dho => {
            push(choose_best_role(team, on_court, &[FitRole::DhoPrimaryHandler]));
            push(choose_best_role(
                team,
                on_court,
                &[FitRole::MovementShooter, FitRole::RelocationShooter],
            ));
            push(choose_best_role(team, on_court, &[FitRole::DhoHubBig]));
        }
        Action::Drive => {
            push(choose_best_role(
                team,
                on_court,
                &[FitRole::KickoutTrigger, FitRole::PnrPrimaryHandler],
            ));
        }
        Action::Kickout => {
            push(choose_best_role(team, on_court, &[FitRole::KickoutTrigger]));
            push(choose_best_role(
                team,
                on_court,
                &[FitRole::SpotUpWing, FitRole::CornerSpecialist],
            ));
        }
        Action::ExtraPass => {
            push(choose_best_role(team, on_court, &[FitRole::ExtraPassConnector]));
            push(choose_best_role(team, on_court, &[FitRole::ElbowHub, FitRole::PointForward]));
        }
        Action::PostUp => {
            push(choose_best_role(
                team,
                on_court,
                &[FitRole::PostScorer, FitRole::PostFacilitator],
            ));
            push(choose_best_role(
                team,
                on_court,
                &[FitRole::SpotUpWing, FitRole::CornerSpecialist],
            ));
        }
        Action::HornsSet => {
            push(choose_best_role(team, on_court, &[FitRole::ElbowHub]));
            push(choose_best_role(team, on_court, &[FitRole::HornsBigA]));
            push(choose_best_role(team, on_court, &[FitRole::HornsBigB]));
        }
        Action::SpotUp => {
            push(choose_best_role(
                team,
                on_court,
                &[FitRole::SpotUpWing, FitRole::CornerSpecialist, FitRole::RelocationShooter],
            ));
        }
        Action::Cut => {
            push(choose_best_role(
                team,
                on_court,
                &[FitRole::PrimaryCutter, FitRole::BackdoorThreat],
            ));
            push(choose_best_role(
                team,
                on_court,
                &[FitRole::ElbowHub, FitRole::ExtraPassConnector],
            ));
        }
        Action::TransitionEarly => {
            push(choose_best_role(team, on_court, &[FitRole::TransitionPusher]));
            push(choose_best_role(team, on_court, &[FitRole::RimRunner]));
            push(choose_best_role(team, on_court, &[FitRole::CornerSpecialist]));
        }
        _ => {}
    }
    parts
}

/// Multi-participant fits blend toward the weakest link:
/// `0.70 * min + 0.30 * mean`.
fn effective_score(fits: &[f64]) -> f64 {
    match fits {
        [] => 50.0,
        [only] => *only,
        _ => {
            let min = fits.iter().copied().fold(f64::INFINITY, f64::min);
            let mean = fits.iter().sum::<f64>() / fits.len() as f64;
            (0.70 * min + 0.30 * mean).clamp(0.0, 100.0)
        }
    }
}

/// Grade from the effective fit; the worst grade across participant role
/// cutoffs wins.
fn worst_grade(participants: &[(FitRole, usize, f64)], fit_eff: f64) -> Grade {
    participants
        .iter()
        .map(|(role, _, _)| role_fit_grade(*role, fit_eff))
        .max_by_key(|g| g.severity())
        .unwrap_or(Grade::B)
}

/// Applies role fit to the outcome prior and records the logit shift in
/// the step tags. Also feeds the per-team diagnostics.
pub fn apply_role_fit(
    mut priors: BTreeMap<Outcome, f64>,
    family: Action,
    offense: &mut TeamState,
    on_court: &[usize],
    tags: &mut StepTags,
    era: &EraConfig,
) -> BTreeMap<Outcome, f64> {
    let strength = role_fit_strength(offense, era);
    let participants = collect_participants(family, offense, on_court);
    let applied = !participants.is_empty();

    let fits: Vec<f64> = participants.iter().map(|(_, _, f)| *f).collect();
    let fit_eff = if applied { effective_score(&fits) } else { 50.0 };
    let grade = if applied { worst_grade(&participants, fit_eff) } else { Grade::B };

    let mut mults_applied: Vec<f64> = Vec::new();
    if applied && strength > 1e-9 {
        let (good_raw, bad_raw) = prior_mult_raw(grade);
        for (outcome, weight) in priors.iter_mut() {
            if outcome.is_foul() {
                continue;
            }
            let raw = if outcome.is_shot() || outcome.is_pass() {
                good_raw
            } else if outcome.is_turnover() || outcome.is_reset() {
                bad_raw
            } else {
                continue;
            };
            let mult = 1.0 + (0.60 * strength) * (raw - 1.0);
            *weight *= mult;
            mults_applied.push(mult);
        }
        priors = normalize_weights(&priors);
    }

    let avg_mult = if mults_applied.is_empty() {
        1.0
    } else {
        mults_applied.iter().sum::<f64>() / mults_applied.len() as f64
    };
    let delta = if applied { (0.40 * strength) * logit_delta_raw(grade) } else { 0.0 };

    tags.role_fit_applied = applied;
    tags.role_logit_delta = delta;
    tags.role_fit_eff = fit_eff;
    tags.role_fit_grade = grade;

    offense.role_fit.pos_log.push(crate::models::team::RoleFitStepLog {
        action_family: family.as_str().to_string(),
        applied,
        n_roles: participants.len(),
        fit_eff,
        grade,
        role_fit_strength: strength,
        avg_mult_final: avg_mult,
        delta_final: delta,
    });
    if applied {
        *offense.role_fit.grade_counts.entry(grade).or_insert(0) += 1;
        for (role, _, _) in &participants {
            *offense
                .role_fit
                .role_counts
                .entry(role.as_str().to_string())
                .or_insert(0) += 1;
        }
    }

    priors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::default_era;
    use crate::ids::Position;
    use crate::models::player::Player;

    fn uniform_player(pid: &str, level: f64) -> Player {
        let mut ratings = BTreeMap::new();
        for a in Ability::ALL {
            ratings.insert(a, level);
        }
        Player::with_ratings(pid, pid, Position::Guard, &ratings)
    }

    fn team_with_handler(level: f64) -> TeamState {
        let lineup = vec![
            uniform_player("p0", level),
            uniform_player("p1", 55.0),
            uniform_player("p2", 55.0),
            uniform_player("p3", 55.0),
            uniform_player("p4", 55.0),
        ];
        let mut team = TeamState::new("t", "T", lineup);
        team.fit_roles.insert(FitRole::PnrPrimaryHandler, "p0".to_string());
        team
    }

    #[test]
    fn weights_sum_to_one_per_role() {
        for role in FitRole::ALL {
            let sum: f64 = fit_role_weights(role).iter().map(|(_, w)| w).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{role} weights sum {sum}");
        }
    }

    #[test]
    fn grading_follows_cutoffs() {
        assert_eq!(role_fit_grade(FitRole::PnrPrimaryHandler, 85.0), Grade::S);
        assert_eq!(role_fit_grade(FitRole::PnrPrimaryHandler, 72.5), Grade::A);
        assert_eq!(role_fit_grade(FitRole::PnrPrimaryHandler, 64.0), Grade::B);
        assert_eq!(role_fit_grade(FitRole::PnrPrimaryHandler, 57.0), Grade::C);
        assert_eq!(role_fit_grade(FitRole::PnrPrimaryHandler, 20.0), Grade::D);
    }

    #[test]
    fn effective_score_leans_on_the_weakest_fit() {
        assert_eq!(effective_score(&[]), 50.0);
        assert_eq!(effective_score(&[70.0]), 70.0);
        let mixed = effective_score(&[40.0, 80.0]);
        assert!((mixed - (0.70 * 40.0 + 0.30 * 60.0)).abs() < 1e-9);
    }

    #[test]
    fn elite_handler_shifts_prior_toward_good_outcomes() {
        let era = default_era();
        let mut team = team_with_handler(95.0);
        let on_court = [0usize, 1, 2, 3, 4];
        let mut tags = StepTags::default();
        let mut priors = BTreeMap::new();
        priors.insert(Outcome::Shot3Cs, 0.5);
        priors.insert(Outcome::ToBadPass, 0.5);
        let out = apply_role_fit(priors, Action::PnR, &mut team, &on_court, &mut tags, &era);
        assert!(tags.role_fit_applied);
        assert_eq!(tags.role_fit_grade, Grade::S);
        assert!(tags.role_logit_delta > 0.0);
        assert!(out[&Outcome::Shot3Cs] > 0.5);
        assert!(out[&Outcome::ToBadPass] < 0.5);
    }

    #[test]
    fn zero_strength_leaves_prior_untouched() {
        let era = default_era();
        let mut team = team_with_handler(95.0);
        team.tactics.resolved.context.role_fit_strength = Some(0.0);
        let on_court = [0usize, 1, 2, 3, 4];
        let mut tags = StepTags::default();
        let mut priors = BTreeMap::new();
        priors.insert(Outcome::Shot3Cs, 0.5);
        priors.insert(Outcome::ToBadPass, 0.5);
        let out =
            apply_role_fit(priors.clone(), Action::PnR, &mut team, &on_court, &mut tags, &era);
        assert_eq!(out, priors);
        assert_eq!(tags.role_logit_delta, 0.0);
    }

    #[test]
    fn no_assignments_means_not_applied() {
        let era = default_era();
        let mut team = team_with_handler(95.0);
        team.fit_roles.clear();
        let on_court = [0usize, 1, 2, 3, 4];
        let mut tags = StepTags::default();
        let mut priors = BTreeMap::new();
        priors.insert(Outcome::Shot3Cs, 1.0);
        apply_role_fit(priors, Action::PnR, &mut team, &on_court, &mut tags, &era);
        assert!(!tags.role_fit_applied);
        assert_eq!(tags.role_fit_grade, Grade::B);
    }

    #[test]
    fn foul_mass_is_never_distorted() {
        let era = default_era();
        let mut team = team_with_handler(20.0);
        let on_court = [0usize, 1, 2, 3, 4];
        let mut tags = StepTags::default();
        let mut priors = BTreeMap::new();
        priors.insert(Outcome::FoulDrawRim, 0.25);
        priors.insert(Outcome::Shot3Cs, 0.25);
        priors.insert(Outcome::ToBadPass, 0.50);
        let out = apply_role_fit(priors, Action::PnR, &mut team, &on_court, &mut tags, &era);
        // bad grade inflates TO mass relative to fouls, never the reverse
        assert!(out[&Outcome::ToBadPass] > 0.50);
        assert!(out[&Outcome::FoulDrawRim] < 0.25 + 1e-9);
    }
}
