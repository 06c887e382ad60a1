//! Mini-game state machines.
//!
//! Every game is a small finite-state loop (`Idle -> Active -> Ended`) advanced by
//! explicit input events plus the shared scheduler tick. Timeouts are stored as
//! absolute deadlines (milliseconds on the `performance.now()` clock) and compared
//! when the tick runs, so no game ever holds a live timer callback. An ended or
//! idle game ignores ticks and input.
//!
//! - `reaction`: green / red light transaction race (cash view)
//! - `challenge`: four input challenges with a shared attempt budget (investments view)
//! - `steps`: weighted-random savings steps (savings view)
//! - `dialogue`: branching Front Man conversation (advisory view)

pub mod challenge;
pub mod dialogue;
pub mod reaction;
pub mod steps;

pub use challenge::{ChallengeGame, ChallengeKind, ChallengeUpdate};
pub use dialogue::DialogueGame;
pub use reaction::{Light, ReactionGame, TransactResult};
pub use steps::{StepResult, StepsGame, SAVINGS_STEPS};

/// Identifies one of the mini-games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameId {
    Reaction,
    Challenge,
    Steps,
    Dialogue,
}

impl GameId {
    pub fn label(self) -> &'static str {
        match self {
            GameId::Reaction => "Red Light, Green Light",
            GameId::Challenge => "Investment Trials",
            GameId::Steps => "Savings Steps",
            GameId::Dialogue => "Front Man Council",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Idle,
    Active,
    Ended(Outcome),
}

impl GameStatus {
    pub fn is_active(self) -> bool {
        matches!(self, GameStatus::Active)
    }
}

/// Emitted exactly once when a run ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub game: GameId,
    pub outcome: Outcome,
    /// Points earned by the run; zero for losses.
    pub points: u64,
}

impl Resolution {
    pub fn won(game: GameId, points: u64) -> Self {
        Self { game, outcome: Outcome::Won, points }
    }

    pub fn lost(game: GameId) -> Self {
        Self { game, outcome: Outcome::Lost, points: 0 }
    }
}

/// Whole-second countdown measured against the `performance.now()` clock.
#[derive(Clone, Copy, Debug)]
pub struct Countdown {
    start_ms: f64,
    duration_secs: u32,
}

impl Countdown {
    pub fn new(duration_secs: u32, now: f64) -> Self {
        Self { start_ms: now, duration_secs }
    }

    /// Seconds left, rounded down to the whole seconds that have fully elapsed.
    pub fn secs_left(&self, now: f64) -> u32 {
        let elapsed = ((now - self.start_ms).max(0.0) / 1000.0).floor() as u32;
        self.duration_secs.saturating_sub(elapsed)
    }

    pub fn expired(&self, now: f64) -> bool {
        self.secs_left(now) == 0
    }
}
