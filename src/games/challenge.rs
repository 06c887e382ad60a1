//! Investment trials: four input challenges sharing one attempt budget.
//!
//! Only one attempt is open at a time. An attempt succeeds the moment its target
//! is reached and fails when its deadline passes; the deadline is checked on
//! `tick`. Every `begin` consumes an attempt whether or not it succeeds.

use super::{GameId, GameStatus, Outcome, Resolution};
use crate::config::ChallengeConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChallengeKind {
    RapidClick,
    Hold,
    DoubleClick,
    Hover,
}

impl ChallengeKind {
    pub const ALL: [ChallengeKind; 4] = [
        ChallengeKind::RapidClick,
        ChallengeKind::Hold,
        ChallengeKind::DoubleClick,
        ChallengeKind::Hover,
    ];

    pub fn index(self) -> usize {
        match self {
            ChallengeKind::RapidClick => 0,
            ChallengeKind::Hold => 1,
            ChallengeKind::DoubleClick => 2,
            ChallengeKind::Hover => 3,
        }
    }

    /// Value of the `data-challenge` attribute on the page.
    pub fn key(self) -> &'static str {
        match self {
            ChallengeKind::RapidClick => "click",
            ChallengeKind::Hold => "hold",
            ChallengeKind::DoubleClick => "double",
            ChallengeKind::Hover => "hover",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            ChallengeKind::RapidClick => "● Circle: rapid trades",
            ChallengeKind::Hold => "▲ Triangle: hold your position",
            ChallengeKind::DoubleClick => "★ Star: double down",
            ChallengeKind::Hover => "☂ Umbrella: steady hand",
        }
    }
}

/// Result of a resolved attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChallengeUpdate {
    pub kind: ChallengeKind,
    pub success: bool,
    /// Present when this attempt also ended the run.
    pub resolution: Option<Resolution>,
}

#[derive(Clone, Debug)]
struct Attempt {
    kind: ChallengeKind,
    deadline_ms: f64,
    count: u32,
    /// Start of the current press / hover, if one is in progress.
    since_ms: Option<f64>,
}

pub struct ChallengeGame {
    cfg: ChallengeConfig,
    status: GameStatus,
    completed: [bool; 4],
    attempts_used: u32,
    attempt: Option<Attempt>,
}

impl ChallengeGame {
    pub fn new(cfg: ChallengeConfig) -> Self {
        Self { cfg, status: GameStatus::Idle, completed: [false; 4], attempts_used: 0, attempt: None }
    }

    pub fn start(&mut self) -> bool {
        if self.status.is_active() {
            return false;
        }
        self.status = GameStatus::Active;
        self.completed = [false; 4];
        self.attempts_used = 0;
        self.attempt = None;
        true
    }

    /// Opens an attempt at `kind`. Ignored unless the run is active, no other
    /// attempt is open, the challenge is not yet completed and attempts remain.
    pub fn begin(&mut self, kind: ChallengeKind, now: f64) -> bool {
        if !self.status.is_active()
            || self.attempt.is_some()
            || self.completed[kind.index()]
            || self.attempts_left() == 0
        {
            log::debug!("challenge {:?} not started", kind);
            return false;
        }
        self.attempts_used += 1;
        self.attempt = Some(Attempt {
            kind,
            deadline_ms: now + self.limit_ms(kind) as f64,
            count: 0,
            since_ms: None,
        });
        true
    }

    pub fn click(&mut self, now: f64) -> Option<ChallengeUpdate> {
        let target = self.cfg.rapid_clicks;
        self.count_event(ChallengeKind::RapidClick, target, now)
    }

    pub fn double_click(&mut self, now: f64) -> Option<ChallengeUpdate> {
        let target = self.cfg.double_clicks;
        self.count_event(ChallengeKind::DoubleClick, target, now)
    }

    pub fn press(&mut self, now: f64) {
        self.open_span(ChallengeKind::Hold, now);
    }

    pub fn release(&mut self, now: f64) -> Option<ChallengeUpdate> {
        self.close_span(ChallengeKind::Hold, now)
    }

    pub fn hover_enter(&mut self, now: f64) {
        self.open_span(ChallengeKind::Hover, now);
    }

    pub fn hover_leave(&mut self, now: f64) -> Option<ChallengeUpdate> {
        self.close_span(ChallengeKind::Hover, now)
    }

    /// Resolves sustained spans that reached their target and attempts past their deadline.
    pub fn tick(&mut self, now: f64) -> Option<ChallengeUpdate> {
        if !self.status.is_active() {
            return None;
        }
        let attempt = self.attempt.as_ref()?;
        let kind = attempt.kind;
        if let Some(since) = attempt.since_ms {
            let reached = since + self.span_target_ms(kind) as f64;
            if reached <= attempt.deadline_ms && now >= reached {
                return Some(self.resolve(kind, true));
            }
        }
        if now >= attempt.deadline_ms {
            return Some(self.resolve(kind, false));
        }
        None
    }

    fn count_event(&mut self, kind: ChallengeKind, target: u32, now: f64) -> Option<ChallengeUpdate> {
        if !self.status.is_active() {
            return None;
        }
        let attempt = self.attempt.as_mut().filter(|a| a.kind == kind)?;
        if now >= attempt.deadline_ms {
            return Some(self.resolve(kind, false));
        }
        attempt.count += 1;
        if attempt.count >= target {
            return Some(self.resolve(kind, true));
        }
        None
    }

    fn open_span(&mut self, kind: ChallengeKind, now: f64) {
        if !self.status.is_active() {
            return;
        }
        if let Some(attempt) = self.attempt.as_mut().filter(|a| a.kind == kind) {
            if attempt.since_ms.is_none() && now < attempt.deadline_ms {
                attempt.since_ms = Some(now);
            }
        }
    }

    fn close_span(&mut self, kind: ChallengeKind, now: f64) -> Option<ChallengeUpdate> {
        if !self.status.is_active() {
            return None;
        }
        let target = self.span_target_ms(kind) as f64;
        let attempt = self.attempt.as_mut().filter(|a| a.kind == kind)?;
        let since = attempt.since_ms.take()?;
        if now - since >= target && since + target <= attempt.deadline_ms {
            return Some(self.resolve(kind, true));
        }
        None
    }

    fn resolve(&mut self, kind: ChallengeKind, success: bool) -> ChallengeUpdate {
        self.attempt = None;
        if success {
            self.completed[kind.index()] = true;
        }
        log::debug!("challenge {:?} resolved, success = {}", kind, success);
        let resolution = if self.completed.iter().all(|c| *c) {
            Some(self.end(Outcome::Won))
        } else if self.attempts_left() == 0 {
            Some(self.end(Outcome::Lost))
        } else {
            None
        };
        ChallengeUpdate { kind, success, resolution }
    }

    fn end(&mut self, outcome: Outcome) -> Resolution {
        self.status = GameStatus::Ended(outcome);
        match outcome {
            Outcome::Won => {
                let points = self.cfg.points_per_challenge * self.completed_count() as u64
                    + self.cfg.points_per_spare_attempt * self.attempts_left() as u64;
                log::info!("challenge game won with {} attempts left", self.attempts_left());
                Resolution::won(GameId::Challenge, points)
            }
            Outcome::Lost => {
                log::info!("challenge game lost, {} of 4 completed", self.completed_count());
                Resolution::lost(GameId::Challenge)
            }
        }
    }

    fn limit_ms(&self, kind: ChallengeKind) -> u32 {
        match kind {
            ChallengeKind::RapidClick => self.cfg.rapid_click_ms,
            ChallengeKind::Hold => self.cfg.hold_limit_ms,
            ChallengeKind::DoubleClick => self.cfg.double_click_ms,
            ChallengeKind::Hover => self.cfg.hover_limit_ms,
        }
    }

    fn span_target_ms(&self, kind: ChallengeKind) -> u32 {
        match kind {
            ChallengeKind::Hold => self.cfg.hold_ms,
            ChallengeKind::Hover => self.cfg.hover_ms,
            // counted challenges never open a span
            ChallengeKind::RapidClick | ChallengeKind::DoubleClick => u32::MAX,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_completed(&self, kind: ChallengeKind) -> bool {
        self.completed[kind.index()]
    }

    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|c| **c).count()
    }

    pub fn attempts_left(&self) -> u32 {
        self.cfg.max_attempts.saturating_sub(self.attempts_used)
    }

    pub fn current(&self) -> Option<ChallengeKind> {
        self.attempt.as_ref().map(|a| a.kind)
    }

    /// Progress of the open attempt: clicks so far, or whole milliseconds held.
    pub fn progress(&self, now: f64) -> Option<(ChallengeKind, u32)> {
        self.attempt.as_ref().map(|a| {
            let value = match a.since_ms {
                Some(since) => (now - since).max(0.0) as u32,
                None => a.count,
            };
            (a.kind, value)
        })
    }

    pub fn target(&self, kind: ChallengeKind) -> u32 {
        match kind {
            ChallengeKind::RapidClick => self.cfg.rapid_clicks,
            ChallengeKind::DoubleClick => self.cfg.double_clicks,
            ChallengeKind::Hold => self.cfg.hold_ms,
            ChallengeKind::Hover => self.cfg.hover_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> ChallengeGame {
        let mut g = ChallengeGame::new(ChallengeConfig::default());
        assert!(g.start());
        g
    }

    #[test]
    fn rapid_click_succeeds_on_target() {
        let mut g = active();
        assert!(g.begin(ChallengeKind::RapidClick, 0.0));
        for i in 0..9 {
            assert_eq!(g.click(i as f64 * 100.0), None);
        }
        let upd = g.click(950.0).unwrap();
        assert!(upd.success);
        assert_eq!(upd.resolution, None);
        assert!(g.is_completed(ChallengeKind::RapidClick));
        assert_eq!(g.current(), None);
    }

    #[test]
    fn clicks_after_deadline_fail() {
        let mut g = active();
        g.begin(ChallengeKind::RapidClick, 0.0);
        let upd = g.click(5_000.0).unwrap();
        assert!(!upd.success);
        assert!(!g.is_completed(ChallengeKind::RapidClick));
    }

    #[test]
    fn hold_resolves_on_tick_once_long_enough() {
        let mut g = active();
        g.begin(ChallengeKind::Hold, 0.0);
        g.press(500.0);
        assert_eq!(g.tick(3_499.0), None);
        let upd = g.tick(3_500.0).unwrap();
        assert!(upd.success);
        assert_eq!(upd.kind, ChallengeKind::Hold);
    }

    #[test]
    fn short_hold_then_timeout_fails() {
        let mut g = active();
        g.begin(ChallengeKind::Hold, 0.0);
        g.press(100.0);
        assert_eq!(g.release(1_000.0), None);
        let upd = g.tick(6_000.0).unwrap();
        assert!(!upd.success);
        assert_eq!(g.attempts_left(), 5);
    }

    #[test]
    fn hover_counts_only_continuous_time() {
        let mut g = active();
        g.begin(ChallengeKind::Hover, 0.0);
        g.hover_enter(0.0);
        g.hover_leave(2_000.0);
        g.hover_enter(2_500.0);
        assert_eq!(g.tick(5_000.0), None);
        assert!(g.hover_leave(5_600.0).unwrap().success);
    }

    #[test]
    fn hold_started_too_late_cannot_succeed() {
        let mut g = active();
        g.begin(ChallengeKind::Hold, 0.0);
        g.press(4_000.0);
        let upd = g.tick(7_000.0).unwrap();
        assert!(!upd.success);
    }

    #[test]
    fn input_for_other_challenge_is_ignored() {
        let mut g = active();
        g.begin(ChallengeKind::DoubleClick, 0.0);
        assert_eq!(g.click(10.0), None);
        g.press(10.0);
        assert_eq!(g.tick(4_000.0), None);
        assert!(!g.begin(ChallengeKind::Hover, 20.0));
    }

    #[test]
    fn completing_all_four_wins() {
        let mut g = active();
        g.begin(ChallengeKind::RapidClick, 0.0);
        for _ in 0..10 {
            g.click(1.0);
        }
        g.begin(ChallengeKind::Hold, 10.0);
        g.press(10.0);
        g.tick(3_010.0);
        g.begin(ChallengeKind::DoubleClick, 4_000.0);
        for _ in 0..3 {
            g.double_click(4_100.0);
        }
        g.begin(ChallengeKind::Hover, 5_000.0);
        g.hover_enter(5_000.0);
        let upd = g.tick(8_000.0).unwrap();
        assert!(upd.success);
        // 4 * 250 + 2 spare attempts * 50
        assert_eq!(upd.resolution, Some(Resolution::won(GameId::Challenge, 1_100)));
        assert_eq!(g.status(), GameStatus::Ended(Outcome::Won));
    }

    #[test]
    fn exhausting_attempts_loses() {
        let mut g = active();
        let mut last = None;
        for i in 0..6 {
            let t = i as f64 * 10_000.0;
            assert!(g.begin(ChallengeKind::Hover, t));
            last = g.tick(t + 6_000.0);
        }
        let upd = last.unwrap();
        assert!(!upd.success);
        assert_eq!(upd.resolution, Some(Resolution::lost(GameId::Challenge)));
        assert!(!g.is_active());
        assert!(!g.begin(ChallengeKind::Hover, 100_000.0));
    }

    #[test]
    fn completed_challenge_cannot_be_repeated() {
        let mut g = active();
        g.begin(ChallengeKind::DoubleClick, 0.0);
        for _ in 0..3 {
            g.double_click(1.0);
        }
        assert!(!g.begin(ChallengeKind::DoubleClick, 2.0));
        assert_eq!(g.attempts_left(), 5);
    }

    #[test]
    fn keys_round_trip() {
        for kind in ChallengeKind::ALL {
            assert_eq!(ChallengeKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(ChallengeKind::from_key("spin"), None);
    }
}
