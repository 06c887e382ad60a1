//! Presentation interface the dashboard renders through.
//!
//! The browser implementation lives in `dom`; tests use a recording one. A page
//! that lacks the markup for a feature reports it through `supports`, and the
//! controller then skips that feature entirely.

use crate::games::{ChallengeGame, DialogueGame, GameId, ReactionGame, StepsGame};
use crate::market::ReturnMove;
use crate::stats::PlayerStats;
use crate::view::View;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Navigation,
    Title,
    Wealth,
    Stats,
    Market,
    Game(GameId),
}

pub trait Surface {
    fn supports(&self, cap: Capability) -> bool {
        let _ = cap;
        true
    }

    /// Deactivates every panel and activates `view`'s.
    fn show_view(&mut self, view: View);
    fn set_title(&mut self, title: &str);
    fn highlight_nav(&mut self, view: View);
    /// Per-view entrance animation, replayed on every visit.
    fn play_entrance(&mut self, view: View);

    fn set_wealth(&mut self, text: &str, visible: bool);
    fn pulse_wealth(&mut self);
    fn render_stats(&mut self, stats: &PlayerStats);

    fn render_reaction(&mut self, game: &ReactionGame, now: f64);
    fn render_challenge(&mut self, game: &ChallengeGame, now: f64);
    fn render_steps(&mut self, game: &StepsGame);
    /// `response` is the reply to the choice just made, if any.
    fn render_dialogue(&mut self, game: &DialogueGame, response: Option<&str>);
    fn flash_step(&mut self, step: usize, success: bool);

    /// Current text of every investment return label, in page order.
    fn return_labels(&self) -> Vec<String>;
    fn set_return(&mut self, mv: &ReturnMove);

    /// Shows a dismissable overlay with `message`.
    fn present(&mut self, message: &str);
}
