//! Red Light, Green Light: transactions only count while the light is green.

use rand::Rng;

use super::{Countdown, GameId, GameStatus, Outcome, Resolution};
use crate::config::ReactionConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Light {
    Green,
    Red,
}

impl Light {
    fn flipped(self) -> Self {
        match self {
            Light::Green => Light::Red,
            Light::Red => Light::Green,
        }
    }
}

/// What a single transaction did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactResult {
    /// Game not running.
    Ignored,
    /// Counted during green.
    Counted { transactions: u32 },
    /// Taken during red; one life lost.
    Caught { lives: u32 },
    Resolved(Resolution),
}

pub struct ReactionGame {
    cfg: ReactionConfig,
    status: GameStatus,
    light: Light,
    next_flip_ms: f64,
    clock: Countdown,
    score: u64,
    transactions: u32,
    lives: u32,
}

impl ReactionGame {
    pub fn new(cfg: ReactionConfig) -> Self {
        let lives = cfg.lives;
        let countdown = cfg.countdown_secs;
        Self {
            cfg,
            status: GameStatus::Idle,
            light: Light::Green,
            next_flip_ms: 0.0,
            clock: Countdown::new(countdown, 0.0),
            score: 0,
            transactions: 0,
            lives,
        }
    }

    /// Begins a run. Returns false (and changes nothing) if a run is already active.
    pub fn start<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> bool {
        if self.status.is_active() {
            return false;
        }
        self.status = GameStatus::Active;
        self.light = Light::Green;
        self.next_flip_ms = now + self.phase_ms(rng);
        self.clock = Countdown::new(self.cfg.countdown_secs, now);
        self.score = 0;
        self.transactions = 0;
        self.lives = self.cfg.lives;
        log::debug!("reaction game started, goal {}", self.cfg.goal);
        true
    }

    /// Advances the light and the countdown. Returns the resolution if time ran out.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Option<Resolution> {
        if !self.status.is_active() {
            return None;
        }
        if self.clock.expired(now) {
            return Some(self.end(Outcome::Lost));
        }
        self.advance(now, rng);
        None
    }

    /// Applies every flip that fell due up to `now`.
    fn advance<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) {
        while now >= self.next_flip_ms {
            self.light = self.light.flipped();
            self.next_flip_ms += self.phase_ms(rng);
        }
    }

    /// One transaction at `now`. The light is brought up to date first, so a
    /// late frame never lets an action land on a stale green.
    pub fn transact<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> TransactResult {
        if !self.status.is_active() {
            return TransactResult::Ignored;
        }
        if self.clock.expired(now) {
            return TransactResult::Resolved(self.end(Outcome::Lost));
        }
        self.advance(now, rng);
        match self.light {
            Light::Green => {
                self.transactions += 1;
                self.score += self.cfg.points_per_transaction;
                if self.transactions >= self.cfg.goal {
                    TransactResult::Resolved(self.end(Outcome::Won))
                } else {
                    TransactResult::Counted { transactions: self.transactions }
                }
            }
            Light::Red => {
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    TransactResult::Resolved(self.end(Outcome::Lost))
                } else {
                    TransactResult::Caught { lives: self.lives }
                }
            }
        }
    }

    fn end(&mut self, outcome: Outcome) -> Resolution {
        self.status = GameStatus::Ended(outcome);
        log::info!(
            "reaction game {:?}: {} transactions, {} points",
            outcome,
            self.transactions,
            self.score
        );
        match outcome {
            Outcome::Won => Resolution::won(GameId::Reaction, self.score),
            Outcome::Lost => Resolution::lost(GameId::Reaction),
        }
    }

    fn phase_ms<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let lo = self.cfg.phase_min_ms.min(self.cfg.phase_max_ms);
        let hi = self.cfg.phase_min_ms.max(self.cfg.phase_max_ms);
        rng.gen_range(lo..=hi).max(1) as f64
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn light(&self) -> Light {
        self.light
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn transactions(&self) -> u32 {
        self.transactions
    }

    pub fn goal(&self) -> u32 {
        self.cfg.goal
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn secs_left(&self, now: f64) -> u32 {
        match self.status {
            GameStatus::Idle => self.cfg.countdown_secs,
            _ => self.clock.secs_left(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // Fixed 3 s phases: flips land exactly at 3000, 6000, ...
    fn game() -> (ReactionGame, StdRng) {
        let cfg = ReactionConfig { phase_min_ms: 3_000, phase_max_ms: 3_000, ..ReactionConfig::default() };
        (ReactionGame::new(cfg), StdRng::seed_from_u64(456))
    }

    #[test]
    fn five_green_transactions_win() {
        let (mut g, mut rng) = game();
        assert!(g.start(0.0, &mut rng));
        for i in 1..5 {
            assert_eq!(g.transact(100.0 * i as f64, &mut rng), TransactResult::Counted { transactions: i });
        }
        let res = g.transact(500.0, &mut rng);
        assert_eq!(res, TransactResult::Resolved(Resolution::won(GameId::Reaction, 500)));
        assert_eq!(g.status(), GameStatus::Ended(Outcome::Won));
        assert!(!g.is_active());
    }

    #[test]
    fn light_alternates_on_phase_boundaries() {
        let (mut g, mut rng) = game();
        g.start(0.0, &mut rng);
        assert_eq!(g.tick(2_999.0, &mut rng), None);
        assert_eq!(g.light(), Light::Green);
        g.tick(3_000.0, &mut rng);
        assert_eq!(g.light(), Light::Red);
        // A late tick catches up on both missed flips (6000 and 9000).
        g.tick(9_500.0, &mut rng);
        assert_eq!(g.light(), Light::Red);
    }

    #[test]
    fn random_phases_stay_within_bounds() {
        let mut g = ReactionGame::new(ReactionConfig::default());
        let mut rng = StdRng::seed_from_u64(9);
        g.start(0.0, &mut rng);
        g.tick(1_999.0, &mut rng);
        assert_eq!(g.light(), Light::Green);
        // The first phase is at most 4000 ms and the second at least 2000 ms.
        g.tick(4_000.0, &mut rng);
        assert_eq!(g.light(), Light::Red);
        assert!(g.is_active());
    }

    #[test]
    fn first_flip_lands_inside_interval_for_many_seeds() {
        for seed in 0..50 {
            let mut g = ReactionGame::new(ReactionConfig::default());
            let mut rng = StdRng::seed_from_u64(seed);
            g.start(0.0, &mut rng);
            g.tick(1_999.0, &mut rng);
            assert_eq!(g.light(), Light::Green, "seed {seed}");
            g.tick(4_000.0, &mut rng);
            assert_eq!(g.light(), Light::Red, "seed {seed}");
        }
    }

    #[test]
    fn transaction_after_missed_flip_is_caught() {
        let (mut g, mut rng) = game();
        g.start(0.0, &mut rng);
        // No tick between start and the action: the flip at 3000 still applies.
        assert_eq!(g.transact(3_500.0, &mut rng), TransactResult::Caught { lives: 2 });
        assert_eq!(g.light(), Light::Red);
        assert_eq!(g.transactions(), 0);
        assert_eq!(g.transact(6_100.0, &mut rng), TransactResult::Counted { transactions: 1 });
    }

    #[test]
    fn inverted_phase_bounds_do_not_panic() {
        let cfg = ReactionConfig { phase_min_ms: 4_000, phase_max_ms: 3_000, ..ReactionConfig::default() };
        let mut g = ReactionGame::new(cfg);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(g.start(0.0, &mut rng));
        g.tick(2_999.0, &mut rng);
        assert_eq!(g.light(), Light::Green);
        g.tick(4_000.0, &mut rng);
        assert_eq!(g.light(), Light::Red);
    }

    #[test]
    fn red_light_costs_lives_until_lost() {
        let (mut g, mut rng) = game();
        g.start(0.0, &mut rng);
        g.tick(4_000.0, &mut rng);
        assert_eq!(g.light(), Light::Red);
        // Next flip is at 6000, so three actions all land on red.
        assert_eq!(g.transact(4_001.0, &mut rng), TransactResult::Caught { lives: 2 });
        assert_eq!(g.transact(4_002.0, &mut rng), TransactResult::Caught { lives: 1 });
        assert_eq!(
            g.transact(4_003.0, &mut rng),
            TransactResult::Resolved(Resolution::lost(GameId::Reaction))
        );
        assert_eq!(g.transact(4_004.0, &mut rng), TransactResult::Ignored);
    }

    #[test]
    fn countdown_expiry_loses() {
        let (mut g, mut rng) = game();
        g.start(0.0, &mut rng);
        assert_eq!(g.tick(29_999.0, &mut rng), None);
        assert_eq!(g.tick(30_000.0, &mut rng), Some(Resolution::lost(GameId::Reaction)));
        assert_eq!(g.status(), GameStatus::Ended(Outcome::Lost));
        assert_eq!(g.tick(31_000.0, &mut rng), None);
    }

    #[test]
    fn start_while_active_is_rejected() {
        let (mut g, mut rng) = game();
        assert!(g.start(0.0, &mut rng));
        g.transact(10.0, &mut rng);
        assert!(!g.start(20.0, &mut rng));
        assert_eq!(g.transactions(), 1);
    }

    #[test]
    fn restart_resets_score() {
        let (mut g, mut rng) = game();
        g.start(0.0, &mut rng);
        for i in 0..5 {
            g.transact(i as f64, &mut rng);
        }
        assert_eq!(g.score(), 500);
        assert!(g.start(1_000.0, &mut rng));
        assert_eq!(g.score(), 0);
        assert_eq!(g.lives(), 3);
        assert_eq!(g.secs_left(1_000.0), 30);
    }

    #[test]
    fn idle_game_ignores_input() {
        let (mut g, mut rng) = game();
        assert_eq!(g.transact(0.0, &mut rng), TransactResult::Ignored);
        assert_eq!(g.tick(100_000.0, &mut rng), None);
        assert_eq!(g.status(), GameStatus::Idle);
    }
}
