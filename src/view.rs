//! Views and session state: which panel is showing, whether the balance is
//! masked, and which games have been set up on this page load.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::games::GameId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    Cash,
    Investments,
    Savings,
    Advisory,
}

impl View {
    pub const ALL: [View; 5] = [View::Home, View::Cash, View::Investments, View::Savings, View::Advisory];

    /// Name used in `data-view` attributes and panel ids.
    pub fn name(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Cash => "cash",
            View::Investments => "investments",
            View::Savings => "savings",
            View::Advisory => "advisory",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Cash => "Cash",
            View::Investments => "Investments",
            View::Savings => "Savings",
            View::Advisory => "Advisory",
        }
    }

    /// Id of the panel element, e.g. `cash-view`.
    pub fn panel_id(self) -> String {
        format!("{}-view", self.name())
    }

    /// The mini-game hosted on this view, if any.
    pub fn game(self) -> Option<GameId> {
        match self {
            View::Home => None,
            View::Cash => Some(GameId::Reaction),
            View::Investments => Some(GameId::Challenge),
            View::Savings => Some(GameId::Steps),
            View::Advisory => Some(GameId::Dialogue),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl fmt::Display for UnknownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view '{}'", self.0)
    }
}

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// What changed on a successful view switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewChange {
    pub from: View,
    pub to: View,
    pub game: Option<GameId>,
    /// True the first time the target view's game is shown this session.
    pub first_visit: bool,
}

#[derive(Clone, Debug)]
pub struct AppState {
    current_view: View,
    wealth_visible: bool,
    initialized_games: BTreeSet<GameId>,
}

impl Default for AppState {
    fn default() -> Self {
        Self { current_view: View::Home, wealth_visible: true, initialized_games: BTreeSet::new() }
    }
}

impl AppState {
    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn wealth_visible(&self) -> bool {
        self.wealth_visible
    }

    pub fn is_initialized(&self, game: GameId) -> bool {
        self.initialized_games.contains(&game)
    }

    /// Returns `None` when `to` is already showing.
    pub fn switch_view(&mut self, to: View) -> Option<ViewChange> {
        if to == self.current_view {
            return None;
        }
        let from = std::mem::replace(&mut self.current_view, to);
        let game = to.game();
        let first_visit = game.is_some_and(|g| self.initialized_games.insert(g));
        Some(ViewChange { from, to, game, first_visit })
    }

    /// Flips balance visibility and returns the new flag.
    pub fn toggle_visibility(&mut self) -> bool {
        self.wealth_visible = !self.wealth_visible;
        self.wealth_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for v in View::ALL {
            assert_eq!(v.name().parse::<View>(), Ok(v));
        }
        assert_eq!("vault".parse::<View>(), Err(UnknownView("vault".into())));
        assert_eq!("Cash".parse::<View>(), Err(UnknownView("Cash".into())));
    }

    #[test]
    fn switching_to_current_view_is_noop() {
        let mut s = AppState::default();
        assert_eq!(s.switch_view(View::Home), None);
        assert_eq!(s.current_view(), View::Home);
    }

    #[test]
    fn first_visit_reported_once() {
        let mut s = AppState::default();
        let c = s.switch_view(View::Cash).unwrap();
        assert_eq!(c.from, View::Home);
        assert_eq!(c.game, Some(GameId::Reaction));
        assert!(c.first_visit);
        s.switch_view(View::Home);
        let again = s.switch_view(View::Cash).unwrap();
        assert!(!again.first_visit);
        assert!(s.is_initialized(GameId::Reaction));
        assert!(!s.is_initialized(GameId::Steps));
    }

    #[test]
    fn home_has_no_game() {
        let mut s = AppState::default();
        s.switch_view(View::Savings);
        let c = s.switch_view(View::Home).unwrap();
        assert_eq!(c.game, None);
        assert!(!c.first_visit);
    }

    #[test]
    fn toggle_flips() {
        let mut s = AppState::default();
        assert!(s.wealth_visible());
        assert!(!s.toggle_visibility());
        assert!(s.toggle_visibility());
    }

    #[test]
    fn panel_ids() {
        assert_eq!(View::Investments.panel_id(), "investments-view");
    }
}
