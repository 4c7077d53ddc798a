//! Outcome resolution profiles: the ability coefficient vectors that turn
//! a participant and a defensive snapshot into OffScore/DefScore.
//!
//! These are engine constants, not era data. Coefficients per side sum
//! to 1.

use crate::ids::{Ability, Outcome};

use Ability as K;

/// Offense/defense coefficient vectors for one outcome.
#[derive(Debug, Clone, Copy)]
pub struct OutcomeProfile {
    pub offense: &'static [(Ability, f64)],
    pub defense: &'static [(Ability, f64)],
}

/// Coefficient vectors for an outcome. Every outcome that can be sampled
/// from a prior has a profile except the bookkeeping shot-clock turnover.
pub fn outcome_profile(outcome: Outcome) -> Option<OutcomeProfile> {
    let profile = match outcome {
        Outcome::ShotRimLayup => OutcomeProfile {
            offense: &[
                (K::FinRim, 0.55),
                (K::FinContact, 0.15),
                (K::ShotTouch, 0.10),
                (K::HandleSafe, 0.10),
                (K::Endurance, 0.10),
            ],
            defense: &[
                (K::DefRim, 0.45),
                (K::DefHelp, 0.25),
                (K::Physical, 0.15),
                (K::DefPoa, 0.10),
                (K::Endurance, 0.05),
            ],
        },
        Outcome::ShotRimDunk => OutcomeProfile {
            offense: &[
                (K::FinDunk, 0.55),
                (K::FinContact, 0.20),
                (K::FinRim, 0.10),
                (K::HandleSafe, 0.05),
                (K::Endurance, 0.10),
            ],
            defense: &[
                (K::DefRim, 0.50),
                (K::Physical, 0.20),
                (K::DefHelp, 0.20),
                (K::Endurance, 0.10),
            ],
        },
        Outcome::ShotRimContact => OutcomeProfile {
            offense: &[
                (K::FinContact, 0.55),
                (K::FinRim, 0.20),
                (K::ShotTouch, 0.10),
                (K::Physical, 0.10),
                (K::Endurance, 0.05),
            ],
            defense: &[
                (K::DefRim, 0.40),
                (K::Physical, 0.30),
                (K::DefHelp, 0.20),
                (K::DefPost, 0.10),
            ],
        },
        Outcome::ShotTouchFloater => OutcomeProfile {
            offense: &[
                (K::ShotTouch, 0.55),
                (K::FinRim, 0.15),
                (K::FinContact, 0.10),
                (K::DriveCreate, 0.10),
                (K::Endurance, 0.10),
            ],
            defense: &[
                (K::DefRim, 0.30),
                (K::DefHelp, 0.35),
                (K::DefPoa, 0.15),
                (K::Physical, 0.10),
                (K::Endurance, 0.10),
            ],
        },
        Outcome::ShotMidCs => OutcomeProfile {
            offense: &[(K::ShotMidCs, 0.85), (K::Endurance, 0.15)],
            defense: &[
                (K::DefPoa, 0.35),
                (K::DefHelp, 0.35),
                (K::Endurance, 0.20),
                (K::Physical, 0.10),
            ],
        },
        Outcome::Shot3Cs => OutcomeProfile {
            offense: &[(K::Shot3Cs, 0.85), (K::Endurance, 0.15)],
            defense: &[
                (K::DefPoa, 0.35),
                (K::DefHelp, 0.35),
                (K::Endurance, 0.25),
                (K::Physical, 0.05),
            ],
        },
        Outcome::ShotMidPu => OutcomeProfile {
            offense: &[
                (K::ShotMidPu, 0.65),
                (K::HandleSafe, 0.15),
                (K::FirstStep, 0.10),
                (K::Endurance, 0.10),
            ],
            defense: &[
                (K::DefPoa, 0.50),
                (K::DefHelp, 0.25),
                (K::Endurance, 0.15),
                (K::Physical, 0.10),
            ],
        },
        Outcome::Shot3Od => OutcomeProfile {
            offense: &[
                (K::Shot3Od, 0.60),
                (K::HandleSafe, 0.20),
                (K::FirstStep, 0.10),
                (K::Endurance, 0.10),
            ],
            defense: &[
                (K::DefPoa, 0.55),
                (K::DefHelp, 0.20),
                (K::Endurance, 0.20),
                (K::Physical, 0.05),
            ],
        },
        Outcome::ShotPost => OutcomeProfile {
            offense: &[
                (K::PostScore, 0.40),
                (K::PostControl, 0.20),
                (K::FinContact, 0.20),
                (K::ShotTouch, 0.10),
                (K::Physical, 0.10),
            ],
            defense: &[
                (K::DefPost, 0.55),
                (K::DefHelp, 0.20),
                (K::Physical, 0.20),
                (K::DefRim, 0.05),
            ],
        },
        Outcome::PassKickout => OutcomeProfile {
            offense: &[(K::PassCreate, 0.45), (K::PassSafe, 0.35), (K::PnrRead, 0.20)],
            defense: &[(K::DefSteal, 0.55), (K::DefHelp, 0.30), (K::DefPoa, 0.15)],
        },
        Outcome::PassExtra => OutcomeProfile {
            offense: &[(K::PassSafe, 0.55), (K::PassCreate, 0.30), (K::PnrRead, 0.15)],
            defense: &[(K::DefSteal, 0.50), (K::DefHelp, 0.35), (K::Endurance, 0.15)],
        },
        Outcome::PassSkip => OutcomeProfile {
            offense: &[(K::PassCreate, 0.60), (K::PassSafe, 0.25), (K::PnrRead, 0.15)],
            defense: &[(K::DefSteal, 0.55), (K::DefHelp, 0.35), (K::DefPoa, 0.10)],
        },
        Outcome::PassShortroll => OutcomeProfile {
            offense: &[(K::ShortrollPlay, 0.55), (K::PassSafe, 0.25), (K::PassCreate, 0.20)],
            defense: &[(K::DefHelp, 0.45), (K::DefSteal, 0.30), (K::Endurance, 0.25)],
        },
        Outcome::ToHandleLoss => OutcomeProfile {
            offense: &[(K::HandleSafe, 0.60), (K::DriveCreate, 0.20), (K::Endurance, 0.20)],
            defense: &[(K::DefSteal, 0.50), (K::DefPoa, 0.30), (K::DefHelp, 0.20)],
        },
        Outcome::ToBadPass => OutcomeProfile {
            offense: &[(K::PassSafe, 0.55), (K::PassCreate, 0.25), (K::PnrRead, 0.20)],
            defense: &[(K::DefSteal, 0.55), (K::DefHelp, 0.30), (K::DefPoa, 0.15)],
        },
        Outcome::ToCharge => OutcomeProfile {
            offense: &[
                (K::DriveCreate, 0.35),
                (K::Physical, 0.35),
                (K::PnrRead, 0.15),
                (K::Endurance, 0.15),
            ],
            defense: &[(K::DefPoa, 0.40), (K::DefHelp, 0.35), (K::Physical, 0.25)],
        },
        Outcome::ToShotclock => OutcomeProfile {
            offense: &[
                (K::PnrRead, 0.35),
                (K::PassCreate, 0.25),
                (K::DriveCreate, 0.20),
                (K::HandleSafe, 0.10),
                (K::Endurance, 0.10),
            ],
            defense: &[
                (K::DefPoa, 0.35),
                (K::DefHelp, 0.35),
                (K::Endurance, 0.20),
                (K::Physical, 0.10),
            ],
        },
        Outcome::FoulDrawRim => OutcomeProfile {
            offense: &[
                (K::FinContact, 0.60),
                (K::FinRim, 0.15),
                (K::Physical, 0.15),
                (K::Endurance, 0.10),
            ],
            defense: &[
                (K::DefRim, 0.40),
                (K::Physical, 0.25),
                (K::DefHelp, 0.25),
                (K::Endurance, 0.10),
            ],
        },
        Outcome::FoulDrawPost => OutcomeProfile {
            offense: &[
                (K::FinContact, 0.40),
                (K::PostScore, 0.25),
                (K::Physical, 0.20),
                (K::PostControl, 0.15),
            ],
            defense: &[(K::DefPost, 0.45), (K::Physical, 0.35), (K::DefHelp, 0.20)],
        },
        Outcome::FoulDrawJumper => OutcomeProfile {
            offense: &[
                (K::Shot3Od, 0.30),
                (K::ShotMidPu, 0.30),
                (K::HandleSafe, 0.20),
                (K::Endurance, 0.20),
            ],
            defense: &[(K::DefPoa, 0.45), (K::Endurance, 0.35), (K::Physical, 0.20)],
        },
        Outcome::FoulReachTrap => OutcomeProfile {
            offense: &[
                (K::HandleSafe, 0.35),
                (K::PassSafe, 0.35),
                (K::PnrRead, 0.20),
                (K::Endurance, 0.10),
            ],
            defense: &[(K::DefSteal, 0.45), (K::Physical, 0.25), (K::Endurance, 0.30)],
        },
        Outcome::ResetHub => OutcomeProfile {
            offense: &[(K::PassSafe, 0.55), (K::PnrRead, 0.25), (K::Endurance, 0.20)],
            defense: &[(K::DefHelp, 0.45), (K::DefSteal, 0.25), (K::Endurance, 0.30)],
        },
        Outcome::ResetRescreen => OutcomeProfile {
            offense: &[
                (K::PnrRead, 0.35),
                (K::HandleSafe, 0.20),
                (K::Endurance, 0.25),
                (K::PassSafe, 0.20),
            ],
            defense: &[(K::DefPoa, 0.35), (K::DefHelp, 0.35), (K::Endurance, 0.30)],
        },
        Outcome::ResetRedoDho => OutcomeProfile {
            offense: &[
                (K::HandleSafe, 0.30),
                (K::PassSafe, 0.30),
                (K::Endurance, 0.25),
                (K::PnrRead, 0.15),
            ],
            defense: &[(K::DefPoa, 0.40), (K::DefSteal, 0.20), (K::Endurance, 0.40)],
        },
        Outcome::ResetPostOut => OutcomeProfile {
            offense: &[
                (K::PostControl, 0.35),
                (K::PassSafe, 0.40),
                (K::PassCreate, 0.15),
                (K::Physical, 0.10),
            ],
            defense: &[(K::DefPost, 0.40), (K::DefSteal, 0.30), (K::DefHelp, 0.30)],
        },
    };
    Some(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_outcome_has_a_profile() {
        for o in Outcome::ALL {
            assert!(outcome_profile(o).is_some(), "missing profile for {o}");
        }
    }

    #[test]
    fn coefficients_sum_to_one() {
        for o in Outcome::ALL {
            let p = outcome_profile(o).unwrap();
            let off: f64 = p.offense.iter().map(|(_, w)| w).sum();
            let def: f64 = p.defense.iter().map(|(_, w)| w).sum();
            assert!((off - 1.0).abs() < 1e-9, "{o} offense sums to {off}");
            assert!((def - 1.0).abs() < 1e-9, "{o} defense sums to {def}");
        }
    }
}
