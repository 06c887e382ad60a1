//! The dashboard controller: owns all session state and turns input events and
//! scheduler ticks into state transitions plus `Surface` updates.

use rand::rngs::StdRng;

use crate::config::DashboardConfig;
use crate::error::ConfigError;
use crate::games::{
    ChallengeGame, ChallengeKind, ChallengeUpdate, DialogueGame, GameId, ReactionGame, Resolution,
    StepResult, StepsGame, TransactResult,
};
use crate::keys::{DEBUG_KEY, EASTER_EGG_MESSAGE, KeySequence};
use crate::market::{MarketTicker, drift};
use crate::messages;
use crate::stats::{PlayerStats, wealth_text};
use crate::surface::{Capability, Surface};
use crate::view::{AppState, View};

/// Raw pointer input on the challenge pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChallengeInput {
    Click,
    DoubleClick,
    Press,
    Release,
    HoverEnter,
    HoverLeave,
}

pub struct Dashboard<S: Surface> {
    cfg: DashboardConfig,
    surface: S,
    state: AppState,
    stats: PlayerStats,
    reaction: ReactionGame,
    challenge: ChallengeGame,
    steps: StepsGame,
    dialogue: DialogueGame,
    keys: KeySequence,
    market: MarketTicker,
    rng: StdRng,
}

impl<S: Surface> Dashboard<S> {
    /// Builds the controller and renders the initial balance and stats.
    /// Fails if `cfg` does not pass `DashboardConfig::validate`.
    pub fn new(cfg: DashboardConfig, surface: S, rng: StdRng, now: f64) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mut dash = Self {
            reaction: ReactionGame::new(cfg.reaction.clone()),
            challenge: ChallengeGame::new(cfg.challenge.clone()),
            steps: StepsGame::new(cfg.steps.clone()),
            dialogue: DialogueGame::new(),
            keys: KeySequence::default(),
            market: MarketTicker::new(cfg.market.interval_ms, now),
            state: AppState::default(),
            stats: PlayerStats::default(),
            surface,
            rng,
            cfg,
        };
        dash.refresh_wealth();
        dash.refresh_stats();
        Ok(dash)
    }

    // --- Navigation ----------------------------------------------------------

    /// Switches by view name. Unknown names are logged and ignored.
    pub fn navigate(&mut self, name: &str) -> bool {
        match name.parse::<View>() {
            Ok(view) => self.switch_view(view),
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    pub fn switch_view(&mut self, view: View) -> bool {
        if !self.surface.supports(Capability::Navigation) {
            return false;
        }
        let Some(change) = self.state.switch_view(view) else {
            return false;
        };
        self.surface.show_view(change.to);
        if self.surface.supports(Capability::Title) {
            self.surface.set_title(change.to.title());
        }
        self.surface.highlight_nav(change.to);
        self.surface.play_entrance(change.to);
        if let Some(game) = change.game.filter(|_| change.first_visit) {
            log::debug!("initializing {:?} on first visit to {}", game, change.to);
            self.render_game(game, 0.0);
        }
        true
    }

    // --- Wealth --------------------------------------------------------------

    /// Flips balance visibility. `None` if the page has no balance widget.
    pub fn toggle_visibility(&mut self) -> Option<bool> {
        if !self.surface.supports(Capability::Wealth) {
            return None;
        }
        let visible = self.state.toggle_visibility();
        self.refresh_wealth();
        self.surface.pulse_wealth();
        Some(visible)
    }

    pub fn wealth_text(&self) -> String {
        wealth_text(self.state.wealth_visible(), &self.stats, &self.cfg.wealth)
    }

    fn refresh_wealth(&mut self) {
        if self.surface.supports(Capability::Wealth) {
            let text = self.wealth_text();
            self.surface.set_wealth(&text, self.state.wealth_visible());
        }
    }

    fn refresh_stats(&mut self) {
        if self.surface.supports(Capability::Stats) {
            self.surface.render_stats(&self.stats);
        }
    }

    // --- Scheduler -----------------------------------------------------------

    /// Advances every time-driven piece of state to `now`.
    pub fn tick(&mut self, now: f64) {
        if self.reaction.is_active() {
            let res = self.reaction.tick(now, &mut self.rng);
            self.render_game(GameId::Reaction, now);
            if let Some(res) = res {
                self.resolve(res);
            }
        }
        if self.challenge.is_active() {
            let upd = self.challenge.tick(now);
            self.render_game(GameId::Challenge, now);
            if let Some(upd) = upd {
                self.challenge_resolved(upd);
            }
        }
        let due = self.market.due(now);
        if due > 0 && self.surface.supports(Capability::Market) {
            for _ in 0..due {
                let labels = self.surface.return_labels();
                for mv in drift(&labels, &self.cfg.market, &mut self.rng) {
                    self.surface.set_return(&mv);
                }
            }
        }
    }

    // --- Reaction (cash) -----------------------------------------------------

    pub fn start_reaction(&mut self, now: f64) -> bool {
        if !self.surface.supports(Capability::Game(GameId::Reaction)) {
            return false;
        }
        let started = self.reaction.start(now, &mut self.rng);
        self.render_game(GameId::Reaction, now);
        started
    }

    pub fn transact(&mut self, now: f64) -> TransactResult {
        let result = self.reaction.transact(now, &mut self.rng);
        if result != TransactResult::Ignored {
            self.render_game(GameId::Reaction, now);
        }
        if let TransactResult::Resolved(res) = result {
            self.resolve(res);
        }
        result
    }

    // --- Challenge (investments) ---------------------------------------------

    pub fn start_challenge(&mut self, now: f64) -> bool {
        if !self.surface.supports(Capability::Game(GameId::Challenge)) {
            return false;
        }
        let started = self.challenge.start();
        self.render_game(GameId::Challenge, now);
        started
    }

    pub fn begin_challenge(&mut self, kind: ChallengeKind, now: f64) -> bool {
        let begun = self.challenge.begin(kind, now);
        if begun {
            self.render_game(GameId::Challenge, now);
        }
        begun
    }

    pub fn challenge_input(&mut self, input: ChallengeInput, now: f64) -> Option<ChallengeUpdate> {
        let upd = match input {
            ChallengeInput::Click => self.challenge.click(now),
            ChallengeInput::DoubleClick => self.challenge.double_click(now),
            ChallengeInput::Press => {
                self.challenge.press(now);
                None
            }
            ChallengeInput::Release => self.challenge.release(now),
            ChallengeInput::HoverEnter => {
                self.challenge.hover_enter(now);
                None
            }
            ChallengeInput::HoverLeave => self.challenge.hover_leave(now),
        };
        if self.challenge.current().is_some() || upd.is_some() {
            self.render_game(GameId::Challenge, now);
        }
        if let Some(upd) = upd {
            self.challenge_resolved(upd);
        }
        upd
    }

    fn challenge_resolved(&mut self, upd: ChallengeUpdate) {
        match upd.resolution {
            Some(res) => self.resolve(res),
            None if upd.success => {
                self.surface.present(&format!("✅ {} cleared!", upd.kind.title()));
            }
            None => {
                let left = self.challenge.attempts_left();
                self.surface.present(&format!(
                    "❌ {} failed.\n\n{left} attempts left.",
                    upd.kind.title()
                ));
            }
        }
    }

    // --- Savings steps -------------------------------------------------------

    pub fn start_savings(&mut self) -> bool {
        if !self.surface.supports(Capability::Game(GameId::Steps)) {
            return false;
        }
        let started = self.steps.start();
        self.render_game(GameId::Steps, 0.0);
        started
    }

    pub fn attempt_step(&mut self, step: usize) -> StepResult {
        let result = self.steps.attempt_random(step, &mut self.rng);
        self.step_result(result)
    }

    /// Same as `attempt_step` with a caller-supplied roll in `[0, 1)`.
    pub fn attempt_step_with(&mut self, step: usize, roll: f64) -> StepResult {
        let result = self.steps.attempt(step, roll);
        self.step_result(result)
    }

    fn step_result(&mut self, result: StepResult) -> StepResult {
        match result {
            StepResult::Ignored => {}
            StepResult::Failed { step } => {
                self.surface.flash_step(step, false);
                self.render_game(GameId::Steps, 0.0);
            }
            StepResult::Saved { step, .. } => {
                self.surface.flash_step(step, true);
                self.render_game(GameId::Steps, 0.0);
            }
            StepResult::Resolved { step, resolution, .. } => {
                self.surface.flash_step(step, true);
                self.render_game(GameId::Steps, 0.0);
                self.resolve(resolution);
            }
        }
        result
    }

    // --- Dialogue (advisory) -------------------------------------------------

    pub fn start_dialogue(&mut self) -> bool {
        if !self.surface.supports(Capability::Game(GameId::Dialogue)) {
            return false;
        }
        let started = self.dialogue.start();
        self.surface.render_dialogue(&self.dialogue, None);
        started
    }

    pub fn choose(&mut self, choice: usize) -> Option<&'static str> {
        let response = self.dialogue.choose(choice)?;
        self.surface.render_dialogue(&self.dialogue, Some(response));
        Some(response)
    }

    // --- Alerts & keys -------------------------------------------------------

    pub fn show_investment(&mut self, shape: &str, name: &str, return_rate: &str) {
        let text = messages::investment_detail(shape, name, return_rate);
        self.surface.present(&text);
    }

    pub fn account_action(&mut self, deposit: bool) {
        self.surface.present(if deposit { messages::DEPOSIT } else { messages::WITHDRAW });
    }

    pub fn contact_advisor(&mut self) {
        self.surface.present(messages::CONTACT_ADVISOR);
    }

    pub fn help(&mut self) {
        self.surface.present(messages::HELP);
    }

    /// Handles a `KeyboardEvent.code`. Returns true if it fired the easter egg.
    pub fn on_key(&mut self, code: &str) -> bool {
        if code == DEBUG_KEY {
            let summary = self.stats.summary();
            self.surface.present(&summary);
        }
        if self.keys.push(code) {
            log::info!("easter egg sequence entered");
            self.surface.present(EASTER_EGG_MESSAGE);
            return true;
        }
        false
    }

    // --- Internals -----------------------------------------------------------

    fn resolve(&mut self, res: Resolution) {
        if self.stats.record(&res) {
            log::info!(
                "{:?} won for {} points, level {}",
                res.game,
                res.points,
                self.stats.level()
            );
            self.refresh_stats();
            self.refresh_wealth();
        }
        self.surface.present(&messages::resolution(&res));
    }

    fn render_game(&mut self, game: GameId, now: f64) {
        if !self.surface.supports(Capability::Game(game)) {
            return;
        }
        match game {
            GameId::Reaction => self.surface.render_reaction(&self.reaction, now),
            GameId::Challenge => self.surface.render_challenge(&self.challenge, now),
            GameId::Steps => self.surface.render_steps(&self.steps),
            GameId::Dialogue => self.surface.render_dialogue(&self.dialogue, None),
        }
    }

    // --- Accessors -----------------------------------------------------------

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn reaction(&self) -> &ReactionGame {
        &self.reaction
    }

    pub fn challenge(&self) -> &ChallengeGame {
        &self.challenge
    }

    pub fn steps(&self) -> &StepsGame {
        &self.steps
    }

    pub fn dialogue(&self) -> &DialogueGame {
        &self.dialogue
    }
}
