//! Closed identifier vocabularies used by the engine.
//!
//! Actions, outcomes, schemes, abilities and roles are closed enums; era
//! data only tunes coefficients on them. String names exist at the JSON
//! boundary and are mapped to enum values when an era or a team record is
//! loaded. Unknown strings are reported by the loader/validator, never
//! carried into the hot path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// On-court position tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Position {
    #[serde(rename = "G")]
    Guard,
    #[serde(rename = "F")]
    Forward,
    #[serde(rename = "C")]
    Center,
}

impl Default for Position {
    fn default() -> Self {
        Position::Guard
    }
}

impl Position {
    pub fn is_big(&self) -> bool {
        matches!(self, Position::Forward | Position::Center)
    }
}

/// Derived ability keys carried by every player (0..=100 scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ability {
    FinRim,
    FinDunk,
    FinContact,
    ShotMidCs,
    Shot3Cs,
    ShotFt,
    ShotMidPu,
    Shot3Od,
    ShotTouch,
    PostScore,
    PostControl,
    SealPower,
    DriveCreate,
    HandleSafe,
    FirstStep,
    PassSafe,
    PassCreate,
    PnrRead,
    ShortrollPlay,
    DefPoa,
    DefHelp,
    DefSteal,
    DefRim,
    DefPost,
    RebOr,
    RebDr,
    Physical,
    Endurance,
}

impl Ability {
    pub const COUNT: usize = 28;

    pub const ALL: [Ability; Ability::COUNT] = [
        Ability::FinRim,
        Ability::FinDunk,
        Ability::FinContact,
        Ability::ShotMidCs,
        Ability::Shot3Cs,
        Ability::ShotFt,
        Ability::ShotMidPu,
        Ability::Shot3Od,
        Ability::ShotTouch,
        Ability::PostScore,
        Ability::PostControl,
        Ability::SealPower,
        Ability::DriveCreate,
        Ability::HandleSafe,
        Ability::FirstStep,
        Ability::PassSafe,
        Ability::PassCreate,
        Ability::PnrRead,
        Ability::ShortrollPlay,
        Ability::DefPoa,
        Ability::DefHelp,
        Ability::DefSteal,
        Ability::DefRim,
        Ability::DefPost,
        Ability::RebOr,
        Ability::RebDr,
        Ability::Physical,
        Ability::Endurance,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ability::FinRim => "FIN_RIM",
            Ability::FinDunk => "FIN_DUNK",
            Ability::FinContact => "FIN_CONTACT",
            Ability::ShotMidCs => "SHOT_MID_CS",
            Ability::Shot3Cs => "SHOT_3_CS",
            Ability::ShotFt => "SHOT_FT",
            Ability::ShotMidPu => "SHOT_MID_PU",
            Ability::Shot3Od => "SHOT_3_OD",
            Ability::ShotTouch => "SHOT_TOUCH",
            Ability::PostScore => "POST_SCORE",
            Ability::PostControl => "POST_CONTROL",
            Ability::SealPower => "SEAL_POWER",
            Ability::DriveCreate => "DRIVE_CREATE",
            Ability::HandleSafe => "HANDLE_SAFE",
            Ability::FirstStep => "FIRST_STEP",
            Ability::PassSafe => "PASS_SAFE",
            Ability::PassCreate => "PASS_CREATE",
            Ability::PnrRead => "PNR_READ",
            Ability::ShortrollPlay => "SHORTROLL_PLAY",
            Ability::DefPoa => "DEF_POA",
            Ability::DefHelp => "DEF_HELP",
            Ability::DefSteal => "DEF_STEAL",
            Ability::DefRim => "DEF_RIM",
            Ability::DefPost => "DEF_POST",
            Ability::RebOr => "REB_OR",
            Ability::RebDr => "REB_DR",
            Ability::Physical => "PHYSICAL",
            Ability::Endurance => "ENDURANCE",
        }
    }

    pub fn from_key(s: &str) -> Option<Ability> {
        Ability::ALL.iter().copied().find(|a| a.as_str() == s)
    }

    /// Keys every player must carry. SEAL_POWER only feeds one role-fit
    /// profile and may be absent.
    pub fn required() -> impl Iterator<Item = Ability> {
        Ability::ALL.iter().copied().filter(|a| *a != Ability::SealPower)
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offensive action primitives, including aliased short names that fold
/// onto base actions through the era alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    PnR,
    SideAnglePnR,
    DoubleDrag,
    Rescreen,
    SlipScreen,
    SpainPnR,
    ShortRollPlay,
    DragScreen,
    Dho,
    ZoomDho,
    Chicago,
    ReDhoHandback,
    Drive,
    Kickout,
    ExtraPass,
    SkipPass,
    Hammer,
    SpotUp,
    Relocation,
    Cut,
    PostSplit,
    OffBallScreen,
    ScreenTheScreenerSts,
    PostUp,
    PostEntry,
    HighLow,
    QuickPost,
    HornsSet,
    ElbowHub,
    TransitionEarly,
    SecondaryBreak,
}

impl Action {
    pub const COUNT: usize = 31;

    pub const ALL: [Action; Action::COUNT] = [
        Action::PnR,
        Action::SideAnglePnR,
        Action::DoubleDrag,
        Action::Rescreen,
        Action::SlipScreen,
        Action::SpainPnR,
        Action::ShortRollPlay,
        Action::DragScreen,
        Action::Dho,
        Action::ZoomDho,
        Action::Chicago,
        Action::ReDhoHandback,
        Action::Drive,
        Action::Kickout,
        Action::ExtraPass,
        Action::SkipPass,
        Action::Hammer,
        Action::SpotUp,
        Action::Relocation,
        Action::Cut,
        Action::PostSplit,
        Action::OffBallScreen,
        Action::ScreenTheScreenerSts,
        Action::PostUp,
        Action::PostEntry,
        Action::HighLow,
        Action::QuickPost,
        Action::HornsSet,
        Action::ElbowHub,
        Action::TransitionEarly,
        Action::SecondaryBreak,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::PnR => "PnR",
            Action::SideAnglePnR => "SideAnglePnR",
            Action::DoubleDrag => "DoubleDrag",
            Action::Rescreen => "Rescreen",
            Action::SlipScreen => "SlipScreen",
            Action::SpainPnR => "SpainPnR",
            Action::ShortRollPlay => "ShortRollPlay",
            Action::DragScreen => "DragScreen",
            Action::Dho => "DHO",
            Action::ZoomDho => "ZoomDHO",
            Action::Chicago => "Chicago",
            Action::ReDhoHandback => "ReDHO_Handback",
            Action::Drive => "Drive",
            Action::Kickout => "Kickout",
            Action::ExtraPass => "ExtraPass",
            Action::SkipPass => "SkipPass",
            Action::Hammer => "Hammer",
            Action::SpotUp => "SpotUp",
            Action::Relocation => "Relocation",
            Action::Cut => "Cut",
            Action::PostSplit => "PostSplit",
            Action::OffBallScreen => "OffBallScreen",
            Action::ScreenTheScreenerSts => "ScreenTheScreener_STS",
            Action::PostUp => "PostUp",
            Action::PostEntry => "PostEntry",
            Action::HighLow => "HighLow",
            Action::QuickPost => "QuickPost",
            Action::HornsSet => "HornsSet",
            Action::ElbowHub => "ElbowHub",
            Action::TransitionEarly => "TransitionEarly",
            Action::SecondaryBreak => "SecondaryBreak",
        }
    }

    pub fn from_key(s: &str) -> Option<Action> {
        Action::ALL.iter().copied().find(|a| a.as_str() == s)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defensive action primitives (logged per possession; they flavor the
/// defensive histogram rather than gating outcomes directly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefAction {
    DropCoverage,
    GoOver,
    GoUnder,
    ContainOnBall,
    LowManTagRoll,
    StuntAndRecover,
    CloseoutControl,
    RimProtectVertical,
    BoxOutRebound,
    Switch,
    XOutRecover,
    FrontPost,
    PostDouble,
    HedgeShow,
    BlitzTrap,
    RotateXOut,
    IceForceBaseline,
    NailHelp,
    ZoneShift,
    ZoneCloseout,
    ZoneBumpCutter,
    ProtectPaintFirst,
    GapHelp,
}

impl DefAction {
    pub const COUNT: usize = 23;

    pub const ALL: [DefAction; DefAction::COUNT] = [
        DefAction::DropCoverage,
        DefAction::GoOver,
        DefAction::GoUnder,
        DefAction::ContainOnBall,
        DefAction::LowManTagRoll,
        DefAction::StuntAndRecover,
        DefAction::CloseoutControl,
        DefAction::RimProtectVertical,
        DefAction::BoxOutRebound,
        DefAction::Switch,
        DefAction::XOutRecover,
        DefAction::FrontPost,
        DefAction::PostDouble,
        DefAction::HedgeShow,
        DefAction::BlitzTrap,
        DefAction::RotateXOut,
        DefAction::IceForceBaseline,
        DefAction::NailHelp,
        DefAction::ZoneShift,
        DefAction::ZoneCloseout,
        DefAction::ZoneBumpCutter,
        DefAction::ProtectPaintFirst,
        DefAction::GapHelp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DefAction::DropCoverage => "DropCoverage",
            DefAction::GoOver => "GoOver",
            DefAction::GoUnder => "GoUnder",
            DefAction::ContainOnBall => "ContainOnBall",
            DefAction::LowManTagRoll => "LowManTagRoll",
            DefAction::StuntAndRecover => "StuntAndRecover",
            DefAction::CloseoutControl => "CloseoutControl",
            DefAction::RimProtectVertical => "RimProtectVertical",
            DefAction::BoxOutRebound => "BoxOutRebound",
            DefAction::Switch => "Switch",
            DefAction::XOutRecover => "XOutRecover",
            DefAction::FrontPost => "FrontPost",
            DefAction::PostDouble => "PostDouble",
            DefAction::HedgeShow => "HedgeShow",
            DefAction::BlitzTrap => "BlitzTrap",
            DefAction::RotateXOut => "RotateXOut",
            DefAction::IceForceBaseline => "ICEForceBaseline",
            DefAction::NailHelp => "NailHelp",
            DefAction::ZoneShift => "ZoneShift",
            DefAction::ZoneCloseout => "ZoneCloseout",
            DefAction::ZoneBumpCutter => "ZoneBumpCutter",
            DefAction::ProtectPaintFirst => "ProtectPaintFirst",
            DefAction::GapHelp => "GapHelp",
        }
    }

    pub fn from_key(s: &str) -> Option<DefAction> {
        DefAction::ALL.iter().copied().find(|a| a.as_str() == s)
    }
}

impl fmt::Display for DefAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete result sampled within an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    ShotRimLayup,
    ShotRimDunk,
    ShotRimContact,
    ShotTouchFloater,
    ShotMidCs,
    ShotMidPu,
    Shot3Cs,
    Shot3Od,
    ShotPost,
    PassKickout,
    PassExtra,
    PassSkip,
    PassShortroll,
    ToHandleLoss,
    ToBadPass,
    ToCharge,
    ToShotclock,
    FoulDrawRim,
    FoulDrawPost,
    FoulDrawJumper,
    FoulReachTrap,
    ResetHub,
    ResetRescreen,
    ResetRedoDho,
    ResetPostOut,
}

impl Outcome {
    pub const COUNT: usize = 25;

    pub const ALL: [Outcome; Outcome::COUNT] = [
        Outcome::ShotRimLayup,
        Outcome::ShotRimDunk,
        Outcome::ShotRimContact,
        Outcome::ShotTouchFloater,
        Outcome::ShotMidCs,
        Outcome::ShotMidPu,
        Outcome::Shot3Cs,
        Outcome::Shot3Od,
        Outcome::ShotPost,
        Outcome::PassKickout,
        Outcome::PassExtra,
        Outcome::PassSkip,
        Outcome::PassShortroll,
        Outcome::ToHandleLoss,
        Outcome::ToBadPass,
        Outcome::ToCharge,
        Outcome::ToShotclock,
        Outcome::FoulDrawRim,
        Outcome::FoulDrawPost,
        Outcome::FoulDrawJumper,
        Outcome::FoulReachTrap,
        Outcome::ResetHub,
        Outcome::ResetRescreen,
        Outcome::ResetRedoDho,
        Outcome::ResetPostOut,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::ShotRimLayup => "SHOT_RIM_LAYUP",
            Outcome::ShotRimDunk => "SHOT_RIM_DUNK",
            Outcome::ShotRimContact => "SHOT_RIM_CONTACT",
            Outcome::ShotTouchFloater => "SHOT_TOUCH_FLOATER",
            Outcome::ShotMidCs => "SHOT_MID_CS",
            Outcome::ShotMidPu => "SHOT_MID_PU",
            Outcome::Shot3Cs => "SHOT_3_CS",
            Outcome::Shot3Od => "SHOT_3_OD",
            Outcome::ShotPost => "SHOT_POST",
            Outcome::PassKickout => "PASS_KICKOUT",
            Outcome::PassExtra => "PASS_EXTRA",
            Outcome::PassSkip => "PASS_SKIP",
            Outcome::PassShortroll => "PASS_SHORTROLL",
            Outcome::ToHandleLoss => "TO_HANDLE_LOSS",
            Outcome::ToBadPass => "TO_BAD_PASS",
            Outcome::ToCharge => "TO_CHARGE",
            Outcome::ToShotclock => "TO_SHOTCLOCK",
            Outcome::FoulDrawRim => "FOUL_DRAW_RIM",
            Outcome::FoulDrawPost => "FOUL_DRAW_POST",
            Outcome::FoulDrawJumper => "FOUL_DRAW_JUMPER",
            Outcome::FoulReachTrap => "FOUL_REACH_TRAP",
            Outcome::ResetHub => "RESET_HUB",
            Outcome::ResetRescreen => "RESET_RESREEN",
            Outcome::ResetRedoDho => "RESET_REDO_DHO",
            Outcome::ResetPostOut => "RESET_POST_OUT",
        }
    }

    pub fn from_key(s: &str) -> Option<Outcome> {
        // Early era revisions spelled the shot-clock turnover with an
        // underscore; accept both at the boundary.
        if s == "TO_SHOT_CLOCK" {
            return Some(Outcome::ToShotclock);
        }
        Outcome::ALL.iter().copied().find(|o| o.as_str() == s)
    }

    pub fn is_shot(self) -> bool {
        matches!(
            self,
            Outcome::ShotRimLayup
                | Outcome::ShotRimDunk
                | Outcome::ShotRimContact
                | Outcome::ShotTouchFloater
                | Outcome::ShotMidCs
                | Outcome::ShotMidPu
                | Outcome::Shot3Cs
                | Outcome::Shot3Od
                | Outcome::ShotPost
        )
    }

    pub fn is_pass(self) -> bool {
        matches!(
            self,
            Outcome::PassKickout | Outcome::PassExtra | Outcome::PassSkip | Outcome::PassShortroll
        )
    }

    pub fn is_turnover(self) -> bool {
        matches!(
            self,
            Outcome::ToHandleLoss | Outcome::ToBadPass | Outcome::ToCharge | Outcome::ToShotclock
        )
    }

    pub fn is_foul(self) -> bool {
        matches!(
            self,
            Outcome::FoulDrawRim
                | Outcome::FoulDrawPost
                | Outcome::FoulDrawJumper
                | Outcome::FoulReachTrap
        )
    }

    pub fn is_reset(self) -> bool {
        matches!(
            self,
            Outcome::ResetHub | Outcome::ResetRescreen | Outcome::ResetRedoDho | Outcome::ResetPostOut
        )
    }

    /// Points awarded when this shot outcome hits.
    pub fn points(self) -> i64 {
        if matches!(self, Outcome::Shot3Cs | Outcome::Shot3Od) {
            3
        } else if self.is_shot() {
            2
        } else {
            0
        }
    }

    pub fn shot_zone(self) -> Option<ShotZone> {
        match self {
            Outcome::ShotRimLayup
            | Outcome::ShotRimDunk
            | Outcome::ShotRimContact
            | Outcome::ShotTouchFloater => Some(ShotZone::Rim),
            Outcome::ShotMidCs | Outcome::ShotMidPu => Some(ShotZone::Mid),
            Outcome::Shot3Cs | Outcome::Shot3Od => Some(ShotZone::Three),
            Outcome::ShotPost => Some(ShotZone::Post),
            _ => None,
        }
    }

    /// Logistic-parameter kind used by the probability kernel.
    pub fn kernel_kind(self) -> OutcomeKind {
        match self {
            Outcome::Shot3Cs | Outcome::Shot3Od => OutcomeKind::Shot3,
            Outcome::ShotMidCs | Outcome::ShotMidPu => OutcomeKind::ShotMid,
            Outcome::ShotPost => OutcomeKind::ShotPost,
            o if o.is_shot() => OutcomeKind::ShotRim,
            o if o.is_pass() => OutcomeKind::Pass,
            o if o.is_turnover() => OutcomeKind::Turnover,
            _ => OutcomeKind::Default,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shot-zone histogram buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShotZone {
    Rim,
    Mid,
    Three,
    Post,
}

impl ShotZone {
    pub const ALL: [ShotZone; 4] = [ShotZone::Rim, ShotZone::Mid, ShotZone::Three, ShotZone::Post];

    pub fn as_str(self) -> &'static str {
        match self {
            ShotZone::Rim => "rim",
            ShotZone::Mid => "mid",
            ShotZone::Three => "3",
            ShotZone::Post => "post",
        }
    }
}

/// Outcome kind keys for the logistic/variance parameter tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeKind {
    Shot3,
    ShotMid,
    ShotRim,
    ShotPost,
    Pass,
    Rebound,
    Turnover,
    Default,
}

impl OutcomeKind {
    pub const ALL: [OutcomeKind; 8] = [
        OutcomeKind::Shot3,
        OutcomeKind::ShotMid,
        OutcomeKind::ShotRim,
        OutcomeKind::ShotPost,
        OutcomeKind::Pass,
        OutcomeKind::Rebound,
        OutcomeKind::Turnover,
        OutcomeKind::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Shot3 => "shot_3",
            OutcomeKind::ShotMid => "shot_mid",
            OutcomeKind::ShotRim => "shot_rim",
            OutcomeKind::ShotPost => "shot_post",
            OutcomeKind::Pass => "pass",
            OutcomeKind::Rebound => "rebound",
            OutcomeKind::Turnover => "turnover",
            OutcomeKind::Default => "default",
        }
    }

    pub fn from_key(s: &str) -> Option<OutcomeKind> {
        OutcomeKind::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    pub fn is_shot(self) -> bool {
        matches!(
            self,
            OutcomeKind::Shot3 | OutcomeKind::ShotMid | OutcomeKind::ShotRim | OutcomeKind::ShotPost
        )
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offensive scheme identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OffScheme {
    SpreadHeavyPnr,
    DriveKick,
    FiveOut,
    MotionSplitCut,
    DhoChicago,
    PostInsideOut,
    HornsElbow,
    TransitionEarly,
}

impl OffScheme {
    pub const ALL: [OffScheme; 8] = [
        OffScheme::SpreadHeavyPnr,
        OffScheme::DriveKick,
        OffScheme::FiveOut,
        OffScheme::MotionSplitCut,
        OffScheme::DhoChicago,
        OffScheme::PostInsideOut,
        OffScheme::HornsElbow,
        OffScheme::TransitionEarly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OffScheme::SpreadHeavyPnr => "Spread_HeavyPnR",
            OffScheme::DriveKick => "Drive_Kick",
            OffScheme::FiveOut => "FiveOut",
            OffScheme::MotionSplitCut => "Motion_SplitCut",
            OffScheme::DhoChicago => "DHO_Chicago",
            OffScheme::PostInsideOut => "Post_InsideOut",
            OffScheme::HornsElbow => "Horns_Elbow",
            OffScheme::TransitionEarly => "Transition_Early",
        }
    }

    pub fn from_key(s: &str) -> Option<OffScheme> {
        OffScheme::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for OffScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defensive scheme identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefScheme {
    Drop,
    SwitchEverything,
    HedgeShowRecover,
    BlitzTrapPnr,
    IceSidePnr,
    Zone,
    PackLineGapHelp,
}

impl DefScheme {
    pub const ALL: [DefScheme; 7] = [
        DefScheme::Drop,
        DefScheme::SwitchEverything,
        DefScheme::HedgeShowRecover,
        DefScheme::BlitzTrapPnr,
        DefScheme::IceSidePnr,
        DefScheme::Zone,
        DefScheme::PackLineGapHelp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DefScheme::Drop => "Drop",
            DefScheme::SwitchEverything => "Switch_Everything",
            DefScheme::HedgeShowRecover => "Hedge_ShowRecover",
            DefScheme::BlitzTrapPnr => "Blitz_TrapPnR",
            DefScheme::IceSidePnr => "ICE_SidePnR",
            DefScheme::Zone => "Zone",
            DefScheme::PackLineGapHelp => "PackLine_GapHelp",
        }
    }

    pub fn from_key(s: &str) -> Option<DefScheme> {
        DefScheme::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for DefScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lineup slot roles used for participant selection fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotRole {
    BallHandler,
    SecondaryHandler,
    Screener,
    Post,
    Shooter,
    Cutter,
    RimRunner,
}

impl SlotRole {
    pub const ALL: [SlotRole; 7] = [
        SlotRole::BallHandler,
        SlotRole::SecondaryHandler,
        SlotRole::Screener,
        SlotRole::Post,
        SlotRole::Shooter,
        SlotRole::Cutter,
        SlotRole::RimRunner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotRole::BallHandler => "ball_handler",
            SlotRole::SecondaryHandler => "secondary_handler",
            SlotRole::Screener => "screener",
            SlotRole::Post => "post",
            SlotRole::Shooter => "shooter",
            SlotRole::Cutter => "cutter",
            SlotRole::RimRunner => "rim_runner",
        }
    }

    pub fn from_key(s: &str) -> Option<SlotRole> {
        SlotRole::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// Ability used to rank a replacement when the role points nowhere.
    pub fn fallback_rank(self) -> Ability {
        match self {
            SlotRole::BallHandler => Ability::PnrRead,
            SlotRole::SecondaryHandler => Ability::PassCreate,
            SlotRole::Screener => Ability::ShortrollPlay,
            SlotRole::Post => Ability::PostScore,
            SlotRole::Shooter => Ability::Shot3Cs,
            SlotRole::Cutter => Ability::FirstStep,
            SlotRole::RimRunner => Ability::FinDunk,
        }
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheme participant roles graded by the role-fit engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FitRole {
    PnrPrimaryHandler,
    PnrSecondaryHandler,
    DhoPrimaryHandler,
    ElbowHub,
    PointForward,
    TransitionPusher,
    ThreeOffDribbleScorer,
    MidPullUpScorer,
    SpotUpWing,
    CornerSpecialist,
    MovementShooter,
    RelocationShooter,
    RollMan,
    ShortRollPlaymaker,
    PopBig,
    DhoHubBig,
    HornsBigA,
    HornsBigB,
    PostScorer,
    PostFacilitator,
    SealFinisher,
    PrimaryCutter,
    DunkerSpot,
    BackdoorThreat,
    RimRunner,
    ExtraPassConnector,
    KickoutTrigger,
}

impl FitRole {
    pub const COUNT: usize = 27;

    pub const ALL: [FitRole; FitRole::COUNT] = [
        FitRole::PnrPrimaryHandler,
        FitRole::PnrSecondaryHandler,
        FitRole::DhoPrimaryHandler,
        FitRole::ElbowHub,
        FitRole::PointForward,
        FitRole::TransitionPusher,
        FitRole::ThreeOffDribbleScorer,
        FitRole::MidPullUpScorer,
        FitRole::SpotUpWing,
        FitRole::CornerSpecialist,
        FitRole::MovementShooter,
        FitRole::RelocationShooter,
        FitRole::RollMan,
        FitRole::ShortRollPlaymaker,
        FitRole::PopBig,
        FitRole::DhoHubBig,
        FitRole::HornsBigA,
        FitRole::HornsBigB,
        FitRole::PostScorer,
        FitRole::PostFacilitator,
        FitRole::SealFinisher,
        FitRole::PrimaryCutter,
        FitRole::DunkerSpot,
        FitRole::BackdoorThreat,
        FitRole::RimRunner,
        FitRole::ExtraPassConnector,
        FitRole::KickoutTrigger,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FitRole::PnrPrimaryHandler => "PnR_PrimaryHandler",
            FitRole::PnrSecondaryHandler => "PnR_SecondaryHandler",
            FitRole::DhoPrimaryHandler => "DHO_PrimaryHandler",
            FitRole::ElbowHub => "Elbow_Hub",
            FitRole::PointForward => "Point_Forward",
            FitRole::TransitionPusher => "Transition_Pusher",
            FitRole::ThreeOffDribbleScorer => "3pt_OffDribble_Scorer",
            FitRole::MidPullUpScorer => "Mid_PullUp_Scorer",
            FitRole::SpotUpWing => "SpotUp_Wing",
            FitRole::CornerSpecialist => "Corner_Specialist",
            FitRole::MovementShooter => "Movement_Shooter",
            FitRole::RelocationShooter => "Relocation_Shooter",
            FitRole::RollMan => "Roll_Man",
            FitRole::ShortRollPlaymaker => "ShortRoll_Playmaker",
            FitRole::PopBig => "Pop_Big",
            FitRole::DhoHubBig => "DHO_Hub_Big",
            FitRole::HornsBigA => "Horns_Big_A",
            FitRole::HornsBigB => "Horns_Big_B",
            FitRole::PostScorer => "Post_Scorer",
            FitRole::PostFacilitator => "Post_Facilitator",
            FitRole::SealFinisher => "Seal_Finisher",
            FitRole::PrimaryCutter => "Primary_Cutter",
            FitRole::DunkerSpot => "Dunker_Spot",
            FitRole::BackdoorThreat => "Backdoor_Threat",
            FitRole::RimRunner => "Rim_Runner",
            FitRole::ExtraPassConnector => "ExtraPass_Connector",
            FitRole::KickoutTrigger => "Kickout_Trigger",
        }
    }

    pub fn from_key(s: &str) -> Option<FitRole> {
        FitRole::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for FitRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role-fit letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    /// Higher value means a worse grade.
    pub fn severity(self) -> u8 {
        match self {
            Grade::S => 0,
            Grade::A => 1,
            Grade::B => 2,
            Grade::C => 3,
            Grade::D => 4,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ability_round_trip() {
        for a in Ability::ALL {
            assert_eq!(Ability::from_key(a.as_str()), Some(a));
        }
        assert_eq!(Ability::from_key("NOT_A_KEY"), None);
    }

    #[test]
    fn action_round_trip() {
        for a in Action::ALL {
            assert_eq!(Action::from_key(a.as_str()), Some(a));
        }
    }

    #[test]
    fn outcome_round_trip_and_legacy_spelling() {
        for o in Outcome::ALL {
            assert_eq!(Outcome::from_key(o.as_str()), Some(o));
        }
        assert_eq!(Outcome::from_key("TO_SHOT_CLOCK"), Some(Outcome::ToShotclock));
    }

    #[test]
    fn outcome_families_are_disjoint() {
        for o in Outcome::ALL {
            let flags = [o.is_shot(), o.is_pass(), o.is_turnover(), o.is_foul(), o.is_reset()];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{o} in exactly one family");
        }
    }

    #[test]
    fn shot_points_and_zones() {
        assert_eq!(Outcome::Shot3Cs.points(), 3);
        assert_eq!(Outcome::ShotPost.points(), 2);
        assert_eq!(Outcome::ToBadPass.points(), 0);
        assert_eq!(Outcome::ShotPost.shot_zone(), Some(ShotZone::Post));
        assert_eq!(Outcome::PassSkip.shot_zone(), None);
    }

    #[test]
    fn required_abilities_exclude_seal_power() {
        let req: Vec<Ability> = Ability::required().collect();
        assert_eq!(req.len(), Ability::COUNT - 1);
        assert!(!req.contains(&Ability::SealPower));
    }
}
