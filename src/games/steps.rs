//! Savings steps: each deposit attempt succeeds with a fixed probability.

use rand::Rng;

use super::{GameId, GameStatus, Outcome, Resolution};
use crate::config::StepsConfig;

/// (name, deposit) for each step, in display order.
pub const SAVINGS_STEPS: [(&str, u64); 4] = [
    ("Honeycomb", 100),
    ("Tug of War", 200),
    ("Marbles", 300),
    ("Glass Bridge", 400),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    Ignored,
    Failed { step: usize },
    Saved { step: usize, deposit: u64 },
    Resolved { step: usize, deposit: u64, resolution: Resolution },
}

pub struct StepsGame {
    cfg: StepsConfig,
    status: GameStatus,
    total: u64,
    completed: [bool; SAVINGS_STEPS.len()],
    attempts: u32,
}

impl StepsGame {
    pub fn new(cfg: StepsConfig) -> Self {
        Self {
            cfg,
            status: GameStatus::Idle,
            total: 0,
            completed: [false; SAVINGS_STEPS.len()],
            attempts: 0,
        }
    }

    pub fn start(&mut self) -> bool {
        if self.status.is_active() {
            return false;
        }
        self.status = GameStatus::Active;
        self.total = 0;
        self.completed = [false; SAVINGS_STEPS.len()];
        self.attempts = 0;
        true
    }

    pub fn attempt_random<R: Rng + ?Sized>(&mut self, step: usize, rng: &mut R) -> StepResult {
        let roll = rng.gen_range(0.0..1.0);
        self.attempt(step, roll)
    }

    /// Resolves `step` with `roll` drawn from `[0, 1)`; the step succeeds when
    /// `roll` is below the configured success probability.
    pub fn attempt(&mut self, step: usize, roll: f64) -> StepResult {
        if !self.status.is_active() || step >= SAVINGS_STEPS.len() || self.completed[step] {
            return StepResult::Ignored;
        }
        self.attempts += 1;
        if roll >= self.cfg.success_probability {
            log::debug!("savings step {} failed (roll {:.2})", step, roll);
            return StepResult::Failed { step };
        }
        let deposit = SAVINGS_STEPS[step].1;
        self.total += deposit;
        self.completed[step] = true;
        if self.completed.iter().all(|c| *c) {
            self.status = GameStatus::Ended(Outcome::Won);
            log::info!("savings game won: {} saved in {} attempts", self.total, self.attempts);
            let resolution = Resolution::won(GameId::Steps, self.total);
            return StepResult::Resolved { step, deposit, resolution };
        }
        StepResult::Saved { step, deposit }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_completed(&self, step: usize) -> bool {
        self.completed.get(step).copied().unwrap_or(false)
    }

    /// Share of the full savings goal reached so far, 0..=100.
    pub fn percent(&self) -> u32 {
        let goal: u64 = SAVINGS_STEPS.iter().map(|(_, d)| d).sum();
        (self.total * 100 / goal) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn active() -> StepsGame {
        let mut g = StepsGame::new(StepsConfig::default());
        g.start();
        g
    }

    #[test]
    fn roll_below_threshold_saves() {
        let mut g = active();
        assert_eq!(g.attempt(1, 0.69), StepResult::Saved { step: 1, deposit: 200 });
        assert_eq!(g.total(), 200);
        assert!(g.is_completed(1));
        assert_eq!(g.percent(), 20);
    }

    #[test]
    fn failed_step_keeps_total() {
        let mut g = active();
        g.attempt(0, 0.1);
        assert_eq!(g.attempt(2, 0.7), StepResult::Failed { step: 2 });
        assert_eq!(g.total(), 100);
        assert!(g.is_active());
        assert!(!g.is_completed(2));
    }

    #[test]
    fn total_never_decreases_under_random_rolls() {
        let mut g = active();
        let mut rng = StdRng::seed_from_u64(7);
        let mut last = 0;
        for i in 0..200 {
            g.attempt_random(i % 4, &mut rng);
            assert!(g.total() >= last);
            last = g.total();
        }
    }

    #[test]
    fn completed_or_unknown_steps_are_ignored() {
        let mut g = active();
        g.attempt(0, 0.0);
        assert_eq!(g.attempt(0, 0.0), StepResult::Ignored);
        assert_eq!(g.attempt(9, 0.0), StepResult::Ignored);
        assert_eq!(g.attempts(), 1);
    }

    #[test]
    fn all_steps_win_with_savings_as_points() {
        let mut g = active();
        for step in 0..3 {
            g.attempt(step, 0.0);
        }
        let res = g.attempt(3, 0.0);
        assert_eq!(
            res,
            StepResult::Resolved {
                step: 3,
                deposit: 400,
                resolution: Resolution::won(GameId::Steps, 1_000)
            }
        );
        assert_eq!(g.status(), GameStatus::Ended(Outcome::Won));
        assert_eq!(g.attempt(0, 0.0), StepResult::Ignored);
    }

    #[test]
    fn idle_game_ignores_attempts() {
        let mut g = StepsGame::new(StepsConfig::default());
        assert_eq!(g.attempt(0, 0.0), StepResult::Ignored);
    }
}
