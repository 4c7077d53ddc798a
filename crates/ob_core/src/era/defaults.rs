//! Built-in default era: the tuning tables active when no era file is
//! supplied, and the fallback source for any missing era block.

use super::{
    EraConfig, FatigueEffects, FreshnessLoss, FreshnessThresholds, GameRules, LogisticSpec,
    MinuteTargets, ProbModel, VarianceParams,
};
use crate::ids::{Action, DefAction, DefScheme, OffScheme, Outcome, OutcomeKind};
use std::collections::BTreeMap;

use Action as A;
use DefAction as D;
use Outcome as O;

fn outcome_map(pairs: &[(Outcome, f64)]) -> BTreeMap<Outcome, f64> {
    pairs.iter().copied().collect()
}

fn action_map(pairs: &[(Action, f64)]) -> BTreeMap<Action, f64> {
    pairs.iter().copied().collect()
}

fn def_action_map(pairs: &[(DefAction, f64)]) -> BTreeMap<DefAction, f64> {
    pairs.iter().copied().collect()
}

fn scheme_mult(
    pairs: &[(Action, &[(Outcome, f64)])],
) -> BTreeMap<Action, BTreeMap<Outcome, f64>> {
    pairs.iter().map(|(a, outs)| (*a, outcome_map(outs))).collect()
}

pub fn default_prob_model() -> ProbModel {
    ProbModel {
        base_p_min: 0.02,
        base_p_max: 0.98,
        prob_min: 0.03,
        prob_max: 0.97,
        shot_scale: 18.0,
        pass_scale: 20.0,
        rebound_scale: 22.0,
        orb_base: 0.26,
        ft_base: 0.45,
        ft_range: 0.47,
        ft_min: 0.40,
        ft_max: 0.95,
    }
}

pub fn default_logistic() -> BTreeMap<OutcomeKind, LogisticSpec> {
    let spec = |scale: f64| LogisticSpec { scale: Some(scale), sensitivity: Some(1.0 / scale) };
    [
        (OutcomeKind::Default, spec(18.0)),
        (OutcomeKind::Shot3, spec(30.0)),
        (OutcomeKind::ShotMid, spec(24.0)),
        (OutcomeKind::ShotRim, spec(18.0)),
        (OutcomeKind::ShotPost, spec(20.0)),
        (OutcomeKind::Pass, spec(28.0)),
        (OutcomeKind::Rebound, spec(22.0)),
        (OutcomeKind::Turnover, spec(24.0)),
    ]
    .into_iter()
    .collect()
}

pub fn default_variance() -> VarianceParams {
    VarianceParams {
        logit_noise_std: 0.18,
        kind_mult: [
            (OutcomeKind::Shot3, 1.15),
            (OutcomeKind::ShotMid, 1.05),
            (OutcomeKind::ShotRim, 0.95),
            (OutcomeKind::ShotPost, 1.00),
            (OutcomeKind::Pass, 0.85),
            (OutcomeKind::Rebound, 0.60),
        ]
        .into_iter()
        .collect(),
        team_mult_lo: 0.70,
        team_mult_hi: 1.40,
    }
}

pub fn default_shot_base() -> BTreeMap<Outcome, f64> {
    outcome_map(&[
        (O::ShotRimLayup, 0.56),
        (O::ShotRimDunk, 0.70),
        (O::ShotRimContact, 0.47),
        (O::ShotTouchFloater, 0.41),
        (O::ShotMidCs, 0.43),
        (O::ShotMidPu, 0.41),
        (O::Shot3Cs, 0.36),
        (O::Shot3Od, 0.33),
        (O::ShotPost, 0.50),
    ])
}

pub fn default_pass_base_success() -> BTreeMap<Outcome, f64> {
    outcome_map(&[
        (O::PassKickout, 0.92),
        (O::PassExtra, 0.93),
        (O::PassSkip, 0.90),
        (O::PassShortroll, 0.88),
    ])
}

pub fn default_priors() -> BTreeMap<Action, BTreeMap<Outcome, f64>> {
    let mut priors = BTreeMap::new();
    priors.insert(
        A::PnR,
        outcome_map(&[
            (O::PassShortroll, 0.13),
            (O::PassKickout, 0.17),
            (O::Shot3Od, 0.11),
            (O::ShotMidPu, 0.09),
            (O::ShotRimLayup, 0.11),
            (O::ShotRimDunk, 0.04),
            (O::Shot3Cs, 0.10),
            (O::FoulDrawRim, 0.03),
            (O::FoulDrawJumper, 0.01),
            (O::ToHandleLoss, 0.07),
            (O::ToBadPass, 0.05),
            (O::ResetRescreen, 0.09),
        ]),
    );
    priors.insert(
        A::Dho,
        outcome_map(&[
            (O::Shot3Od, 0.13),
            (O::ShotMidPu, 0.09),
            (O::ShotRimLayup, 0.09),
            (O::PassKickout, 0.16),
            (O::PassExtra, 0.12),
            (O::Shot3Cs, 0.14),
            (O::FoulDrawJumper, 0.01),
            (O::FoulDrawRim, 0.02),
            (O::ToHandleLoss, 0.08),
            (O::ToBadPass, 0.06),
            (O::ResetRedoDho, 0.10),
        ]),
    );
    priors.insert(
        A::Drive,
        outcome_map(&[
            (O::ShotRimLayup, 0.20),
            (O::ShotRimDunk, 0.05),
            (O::ShotRimContact, 0.07),
            (O::ShotTouchFloater, 0.08),
            (O::PassKickout, 0.20),
            (O::PassExtra, 0.09),
            (O::FoulDrawRim, 0.08),
            (O::ToCharge, 0.06),
            (O::ToHandleLoss, 0.08),
            (O::ResetHub, 0.09),
        ]),
    );
    priors.insert(
        A::Kickout,
        outcome_map(&[
            (O::Shot3Cs, 0.40),
            (O::ShotMidCs, 0.10),
            (O::PassExtra, 0.24),
            (O::PassSkip, 0.08),
            (O::FoulDrawJumper, 0.02),
            (O::ToBadPass, 0.06),
            (O::ResetHub, 0.10),
        ]),
    );
    priors.insert(
        A::ExtraPass,
        outcome_map(&[
            (O::Shot3Cs, 0.43),
            (O::ShotMidCs, 0.08),
            (O::PassExtra, 0.18),
            (O::PassSkip, 0.12),
            (O::FoulDrawJumper, 0.02),
            (O::ToBadPass, 0.07),
            (O::ResetHub, 0.10),
        ]),
    );
    priors.insert(
        A::PostUp,
        outcome_map(&[
            (O::ShotPost, 0.24),
            (O::ShotRimContact, 0.08),
            (O::PassKickout, 0.25),
            (O::PassExtra, 0.12),
            (O::PassSkip, 0.08),
            (O::FoulDrawPost, 0.07),
            (O::ToBadPass, 0.07),
            (O::ToHandleLoss, 0.03),
            (O::ResetPostOut, 0.06),
        ]),
    );
    priors.insert(
        A::HornsSet,
        outcome_map(&[
            (O::PassKickout, 0.16),
            (O::ShotMidCs, 0.10),
            (O::Shot3Cs, 0.14),
            (O::PassExtra, 0.18),
            (O::FoulDrawJumper, 0.01),
            (O::ToBadPass, 0.06),
            (O::ResetHub, 0.35),
        ]),
    );
    priors.insert(
        A::SpotUp,
        outcome_map(&[
            (O::Shot3Cs, 0.68),
            (O::ShotMidCs, 0.20),
            (O::FoulDrawJumper, 0.02),
            (O::ToBadPass, 0.02),
            (O::ResetHub, 0.08),
        ]),
    );
    priors.insert(
        A::Cut,
        outcome_map(&[
            (O::ShotRimLayup, 0.34),
            (O::ShotRimDunk, 0.07),
            (O::ShotRimContact, 0.09),
            (O::FoulDrawRim, 0.05),
            (O::PassKickout, 0.14),
            (O::ToBadPass, 0.06),
            (O::ToHandleLoss, 0.04),
            (O::ResetHub, 0.21),
        ]),
    );
    priors.insert(
        A::TransitionEarly,
        outcome_map(&[
            (O::ShotRimLayup, 0.18),
            (O::ShotRimDunk, 0.13),
            (O::Shot3Cs, 0.18),
            (O::FoulDrawRim, 0.06),
            (O::PassKickout, 0.18),
            (O::ToHandleLoss, 0.07),
            (O::ToBadPass, 0.05),
            (O::ResetHub, 0.15),
        ]),
    );
    priors
}

pub fn default_aliases() -> BTreeMap<Action, Action> {
    [
        (A::DragScreen, A::PnR),
        (A::DoubleDrag, A::PnR),
        (A::Rescreen, A::PnR),
        (A::SideAnglePnR, A::PnR),
        (A::SlipScreen, A::PnR),
        (A::SpainPnR, A::PnR),
        (A::ShortRollPlay, A::PnR),
        (A::ZoomDho, A::Dho),
        (A::ReDhoHandback, A::Dho),
        (A::Chicago, A::Dho),
        (A::Relocation, A::SpotUp),
        (A::SkipPass, A::ExtraPass),
        (A::Hammer, A::Kickout),
        (A::PostEntry, A::PostUp),
        (A::PostSplit, A::Cut),
        (A::HighLow, A::PostUp),
        (A::ElbowHub, A::HornsSet),
        (A::OffBallScreen, A::Cut),
        (A::ScreenTheScreenerSts, A::Cut),
        (A::SecondaryBreak, A::TransitionEarly),
        (A::QuickPost, A::PostUp),
    ]
    .into_iter()
    .collect()
}

pub fn default_off_scheme_weights() -> BTreeMap<OffScheme, BTreeMap<Action, f64>> {
    let mut w = BTreeMap::new();
    w.insert(
        OffScheme::SpreadHeavyPnr,
        action_map(&[
            (A::PnR, 28.0),
            (A::SideAnglePnR, 10.0),
            (A::DoubleDrag, 8.0),
            (A::Rescreen, 5.0),
            (A::SlipScreen, 4.0),
            (A::SpainPnR, 4.0),
            (A::ShortRollPlay, 6.0),
            (A::Drive, 8.0),
            (A::Kickout, 8.0),
            (A::ExtraPass, 6.0),
            (A::SpotUp, 8.0),
            (A::Cut, 5.0),
        ]),
    );
    w.insert(
        OffScheme::DriveKick,
        action_map(&[
            (A::Drive, 30.0),
            (A::Kickout, 18.0),
            (A::ExtraPass, 12.0),
            (A::Relocation, 8.0),
            (A::SpotUp, 12.0),
            (A::Cut, 6.0),
            (A::SkipPass, 5.0),
            (A::Hammer, 4.0),
            (A::PnR, 3.0),
            (A::Dho, 2.0),
        ]),
    );
    w.insert(
        OffScheme::FiveOut,
        action_map(&[
            (A::Drive, 18.0),
            (A::SpotUp, 16.0),
            (A::Kickout, 14.0),
            (A::ExtraPass, 10.0),
            (A::Relocation, 10.0),
            (A::Cut, 10.0),
            (A::Dho, 8.0),
            (A::ZoomDho, 6.0),
            (A::PnR, 5.0),
            (A::SlipScreen, 3.0),
        ]),
    );
    w.insert(
        OffScheme::MotionSplitCut,
        action_map(&[
            (A::ElbowHub, 12.0),
            (A::OffBallScreen, 14.0),
            (A::ScreenTheScreenerSts, 6.0),
            (A::Cut, 18.0),
            (A::PostSplit, 10.0),
            (A::Dho, 8.0),
            (A::Drive, 10.0),
            (A::Kickout, 6.0),
            (A::ExtraPass, 6.0),
            (A::SpotUp, 6.0),
            (A::PnR, 4.0),
        ]),
    );
    w.insert(
        OffScheme::DhoChicago,
        action_map(&[
            (A::Chicago, 18.0),
            (A::Dho, 16.0),
            (A::ZoomDho, 8.0),
            (A::ReDhoHandback, 6.0),
            (A::Drive, 12.0),
            (A::Kickout, 10.0),
            (A::ExtraPass, 6.0),
            (A::SpotUp, 10.0),
            (A::PnR, 6.0),
            (A::SlipScreen, 4.0),
            (A::OffBallScreen, 4.0),
        ]),
    );
    w.insert(
        OffScheme::PostInsideOut,
        action_map(&[
            (A::PostEntry, 12.0),
            (A::PostUp, 22.0),
            (A::Kickout, 14.0),
            (A::ExtraPass, 8.0),
            (A::SpotUp, 12.0),
            (A::Cut, 8.0),
            (A::PostSplit, 10.0),
            (A::HighLow, 6.0),
            (A::Drive, 4.0),
            (A::Dho, 4.0),
        ]),
    );
    w.insert(
        OffScheme::HornsElbow,
        action_map(&[
            (A::HornsSet, 18.0),
            (A::ElbowHub, 12.0),
            (A::PnR, 12.0),
            (A::Dho, 8.0),
            (A::HighLow, 10.0),
            (A::Drive, 10.0),
            (A::Kickout, 8.0),
            (A::ExtraPass, 6.0),
            (A::SpotUp, 8.0),
            (A::Cut, 6.0),
            (A::SpainPnR, 2.0),
        ]),
    );
    w.insert(
        OffScheme::TransitionEarly,
        action_map(&[
            (A::TransitionEarly, 40.0),
            (A::DragScreen, 14.0),
            (A::DoubleDrag, 8.0),
            (A::SecondaryBreak, 10.0),
            (A::Drive, 8.0),
            (A::Kickout, 8.0),
            (A::SpotUp, 8.0),
            (A::QuickPost, 4.0),
        ]),
    );
    w
}

pub fn default_def_scheme_weights() -> BTreeMap<DefScheme, BTreeMap<DefAction, f64>> {
    let mut w = BTreeMap::new();
    w.insert(
        DefScheme::Drop,
        def_action_map(&[
            (D::DropCoverage, 34.0),
            (D::GoOver, 18.0),
            (D::GoUnder, 6.0),
            (D::ContainOnBall, 10.0),
            (D::LowManTagRoll, 10.0),
            (D::StuntAndRecover, 8.0),
            (D::CloseoutControl, 6.0),
            (D::RimProtectVertical, 6.0),
            (D::BoxOutRebound, 2.0),
        ]),
    );
    w.insert(
        DefScheme::SwitchEverything,
        def_action_map(&[
            (D::Switch, 38.0),
            (D::ContainOnBall, 16.0),
            (D::CloseoutControl, 10.0),
            (D::StuntAndRecover, 8.0),
            (D::XOutRecover, 6.0),
            (D::FrontPost, 8.0),
            (D::PostDouble, 4.0),
            (D::RimProtectVertical, 4.0),
            (D::BoxOutRebound, 6.0),
        ]),
    );
    w.insert(
        DefScheme::HedgeShowRecover,
        def_action_map(&[
            (D::HedgeShow, 26.0),
            (D::XOutRecover, 16.0),
            (D::GoOver, 18.0),
            (D::ContainOnBall, 10.0),
            (D::LowManTagRoll, 10.0),
            (D::StuntAndRecover, 8.0),
            (D::CloseoutControl, 6.0),
            (D::RimProtectVertical, 4.0),
            (D::BoxOutRebound, 2.0),
        ]),
    );
    w.insert(
        DefScheme::BlitzTrapPnr,
        def_action_map(&[
            (D::BlitzTrap, 28.0),
            (D::RotateXOut, 14.0),
            (D::StuntAndRecover, 12.0),
            (D::CloseoutControl, 10.0),
            (D::ContainOnBall, 6.0),
            (D::RimProtectVertical, 6.0),
            (D::LowManTagRoll, 6.0),
            (D::BoxOutRebound, 4.0),
            (D::XOutRecover, 14.0),
        ]),
    );
    w.insert(
        DefScheme::IceSidePnr,
        def_action_map(&[
            (D::IceForceBaseline, 26.0),
            (D::GoOver, 18.0),
            (D::ContainOnBall, 12.0),
            (D::DropCoverage, 10.0),
            (D::NailHelp, 10.0),
            (D::LowManTagRoll, 10.0),
            (D::StuntAndRecover, 6.0),
            (D::CloseoutControl, 6.0),
            (D::RimProtectVertical, 2.0),
        ]),
    );
    w.insert(
        DefScheme::Zone,
        def_action_map(&[
            (D::ZoneShift, 28.0),
            (D::ZoneCloseout, 18.0),
            (D::ZoneBumpCutter, 12.0),
            (D::ProtectPaintFirst, 12.0),
            (D::StuntAndRecover, 8.0),
            (D::RotateXOut, 8.0),
            (D::RimProtectVertical, 6.0),
            (D::BoxOutRebound, 8.0),
        ]),
    );
    w.insert(
        DefScheme::PackLineGapHelp,
        def_action_map(&[
            (D::GapHelp, 24.0),
            (D::ContainOnBall, 16.0),
            (D::StuntAndRecover, 14.0),
            (D::CloseoutControl, 10.0),
            (D::ProtectPaintFirst, 10.0),
            (D::LowManTagRoll, 10.0),
            (D::RimProtectVertical, 6.0),
            (D::FrontPost, 4.0),
            (D::BoxOutRebound, 6.0),
        ]),
    );
    w
}

pub fn default_off_scheme_mult() -> BTreeMap<OffScheme, BTreeMap<Action, BTreeMap<Outcome, f64>>> {
    let mut m = BTreeMap::new();
    m.insert(
        OffScheme::SpreadHeavyPnr,
        scheme_mult(&[(
            A::PnR,
            &[
                (O::PassShortroll, 1.10),
                (O::PassKickout, 1.05),
                (O::Shot3Od, 1.10),
                (O::ShotMidPu, 1.05),
                (O::ResetRescreen, 1.05),
            ],
        )]),
    );
    m.insert(
        OffScheme::DriveKick,
        scheme_mult(&[
            (
                A::Drive,
                &[(O::PassKickout, 1.25), (O::PassExtra, 1.15), (O::ShotRimLayup, 0.90)],
            ),
            (
                A::Kickout,
                &[(O::Shot3Cs, 1.12), (O::PassExtra, 1.08), (O::PassSkip, 1.05)],
            ),
            (A::ExtraPass, &[(O::Shot3Cs, 1.10), (O::PassSkip, 1.08)]),
        ]),
    );
    m.insert(
        OffScheme::FiveOut,
        scheme_mult(&[
            (
                A::Drive,
                &[(O::PassKickout, 1.10), (O::PassExtra, 1.10), (O::ShotRimLayup, 0.95)],
            ),
            (A::Kickout, &[(O::Shot3Cs, 1.15), (O::PassSkip, 1.10)]),
            (A::ExtraPass, &[(O::Shot3Cs, 1.15), (O::PassSkip, 1.12)]),
            (A::Cut, &[(O::ShotRimLayup, 1.08), (O::ResetHub, 0.95)]),
            (A::PostUp, &[(O::ShotPost, 0.80)]),
        ]),
    );
    m.insert(
        OffScheme::MotionSplitCut,
        scheme_mult(&[
            (
                A::Cut,
                &[(O::ShotRimLayup, 1.18), (O::PassKickout, 1.05), (O::ResetHub, 0.95)],
            ),
            (A::ExtraPass, &[(O::PassExtra, 1.10), (O::Shot3Cs, 1.05)]),
            (A::Dho, &[(O::ResetRedoDho, 0.95), (O::PassKickout, 1.05)]),
            (A::PnR, &[(O::Shot3Od, 0.90), (O::ShotMidPu, 0.95)]),
        ]),
    );
    m.insert(
        OffScheme::DhoChicago,
        scheme_mult(&[
            (
                A::Dho,
                &[(O::Shot3Od, 1.10), (O::ShotMidPu, 1.05), (O::ResetRedoDho, 0.95)],
            ),
            (
                A::Chicago,
                &[(O::Shot3Cs, 1.10), (O::Shot3Od, 1.05), (O::PassKickout, 1.05)],
            ),
            (A::Drive, &[(O::ShotRimLayup, 1.05)]),
        ]),
    );
    m.insert(
        OffScheme::PostInsideOut,
        scheme_mult(&[
            (
                A::PostUp,
                &[
                    (O::ShotPost, 1.20),
                    (O::PassKickout, 1.05),
                    (O::FoulDrawPost, 1.10),
                    (O::ResetPostOut, 0.95),
                ],
            ),
            (A::ExtraPass, &[(O::Shot3Cs, 1.05)]),
        ]),
    );
    m.insert(
        OffScheme::HornsElbow,
        scheme_mult(&[
            (
                A::HornsSet,
                &[
                    (O::ResetHub, 0.95),
                    (O::PassExtra, 1.05),
                    (O::ShotMidCs, 1.10),
                    (O::PassKickout, 1.05),
                ],
            ),
            (A::PnR, &[(O::PassShortroll, 1.05)]),
            (A::HighLow, &[(O::ShotPost, 1.05), (O::ShotRimContact, 1.05)]),
        ]),
    );
    m.insert(
        OffScheme::TransitionEarly,
        scheme_mult(&[(
            A::TransitionEarly,
            &[(O::ShotRimDunk, 1.15), (O::Shot3Cs, 1.10), (O::ResetHub, 0.85)],
        )]),
    );
    m
}

pub fn default_def_scheme_mult() -> BTreeMap<DefScheme, BTreeMap<Action, BTreeMap<Outcome, f64>>> {
    let mut m = BTreeMap::new();
    m.insert(
        DefScheme::Drop,
        scheme_mult(&[
            (
                A::PnR,
                &[
                    (O::ShotMidPu, 1.35),
                    (O::Shot3Od, 1.15),
                    (O::PassShortroll, 0.75),
                    (O::ShotRimLayup, 0.85),
                    (O::ShotRimDunk, 0.85),
                    (O::ResetRescreen, 1.05),
                ],
            ),
            (A::Drive, &[(O::ShotRimLayup, 0.90)]),
        ]),
    );
    m.insert(
        DefScheme::SwitchEverything,
        scheme_mult(&[
            (
                A::PnR,
                &[
                    (O::ResetRescreen, 1.25),
                    (O::ToShotclock, 1.15),
                    (O::PassShortroll, 0.85),
                    (O::Shot3Od, 1.10),
                ],
            ),
            (A::Dho, &[(O::ResetRedoDho, 1.15), (O::ToHandleLoss, 1.10)]),
            (A::PostUp, &[(O::ShotPost, 1.35), (O::FoulDrawPost, 1.20)]),
            (A::Drive, &[(O::ToCharge, 1.10)]),
        ]),
    );
    m.insert(
        DefScheme::HedgeShowRecover,
        scheme_mult(&[
            (
                A::PnR,
                &[(O::PassShortroll, 1.25), (O::PassKickout, 1.10), (O::ResetRescreen, 1.10)],
            ),
            (A::Drive, &[(O::ShotTouchFloater, 1.10)]),
        ]),
    );
    m.insert(
        DefScheme::BlitzTrapPnr,
        scheme_mult(&[
            (
                A::PnR,
                &[
                    (O::PassShortroll, 1.55),
                    (O::PassKickout, 1.20),
                    (O::Shot3Od, 0.75),
                    (O::ShotMidPu, 0.75),
                    (O::ToBadPass, 1.35),
                    (O::ToHandleLoss, 1.20),
                    (O::FoulReachTrap, 1.20),
                    (O::ResetHub, 1.15),
                ],
            ),
            (A::Dho, &[(O::ToBadPass, 1.20), (O::ResetRedoDho, 1.10)]),
            (A::Drive, &[(O::ToHandleLoss, 1.10)]),
        ]),
    );
    m.insert(
        DefScheme::IceSidePnr,
        scheme_mult(&[(
            A::PnR,
            &[
                (O::ResetRescreen, 1.10),
                (O::PassKickout, 1.10),
                (O::ShotMidPu, 0.85),
                (O::ShotTouchFloater, 1.15),
            ],
        )]),
    );
    m.insert(
        DefScheme::Zone,
        scheme_mult(&[
            (
                A::Drive,
                &[
                    (O::ShotRimLayup, 0.75),
                    (O::PassExtra, 1.25),
                    (O::PassSkip, 1.30),
                    (O::Shot3Cs, 1.15),
                    (O::ToBadPass, 1.10),
                ],
            ),
            (A::Kickout, &[(O::PassExtra, 1.15), (O::ToBadPass, 1.08)]),
            (A::PostUp, &[(O::ShotPost, 0.85), (O::PassSkip, 1.15)]),
            (A::HornsSet, &[(O::ShotMidCs, 1.15)]),
        ]),
    );
    m.insert(
        DefScheme::PackLineGapHelp,
        scheme_mult(&[
            (
                A::Drive,
                &[
                    (O::ShotRimLayup, 0.65),
                    (O::ShotRimDunk, 0.70),
                    (O::PassKickout, 1.25),
                    (O::PassExtra, 1.20),
                    (O::Shot3Cs, 1.20),
                    (O::ToCharge, 1.15),
                ],
            ),
            (A::PnR, &[(O::PassKickout, 1.15), (O::ShotMidPu, 1.05)]),
            (A::ExtraPass, &[(O::ToBadPass, 1.05)]),
        ]),
    );
    m
}

pub fn default_rules() -> GameRules {
    GameRules {
        quarters: 4,
        quarter_length_sec: 720.0,
        shot_clock_sec: 24.0,
        orb_reset_sec: 14.0,
        foul_out: 6,
        max_steps: 7,
        time_costs: action_map(&[
            (A::PnR, 7.0),
            (A::Dho, 6.0),
            (A::Drive, 5.0),
            (A::PostUp, 7.0),
            (A::HornsSet, 6.0),
            (A::SpotUp, 4.0),
            (A::Cut, 4.0),
            (A::TransitionEarly, 4.0),
            (A::Kickout, 2.0),
            (A::ExtraPass, 2.0),
        ]),
        reset_cost_sec: 4.0,
        setup_cost_sec: 2.0,
        targets: MinuteTargets {
            starter_sec: 32 * 60,
            rotation_sec: 20 * 60,
            bench_high_sec: 12 * 60,
            bench_low_sec: 6 * 60,
        },
        freshness_loss: FreshnessLoss {
            handler: 0.012,
            wing: 0.010,
            big: 0.009,
            transition_emphasis: 0.001,
            heavy_pnr: 0.001,
        },
        freshness_thresholds: FreshnessThresholds { sub_out: 0.35, sub_in: 0.70 },
        fatigue_effects: FatigueEffects { def_mult_min: 0.90, logit_delta_max: -0.25 },
    }
}

/// The complete built-in era.
pub fn default_era() -> EraConfig {
    EraConfig {
        name: "builtin_default".to_string(),
        version: "1.0".to_string(),
        mult_lo: 0.70,
        mult_hi: 1.40,
        prob_model: default_prob_model(),
        logistic: default_logistic(),
        variance: default_variance(),
        role_fit_default_strength: 0.65,
        shot_base: default_shot_base(),
        pass_base_success: default_pass_base_success(),
        priors: default_priors(),
        aliases: default_aliases(),
        off_scheme_weights: default_off_scheme_weights(),
        def_scheme_weights: default_def_scheme_weights(),
        off_scheme_mult: default_off_scheme_mult(),
        def_scheme_mult: default_def_scheme_mult(),
        rules: default_rules(),
    }
}
