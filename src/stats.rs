//! Cross-game player progress and the balance text derived from it.

use crate::config::WealthConfig;
use crate::games::{Outcome, Resolution};

pub const POINTS_PER_LEVEL: u64 = 1_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub survivor_points: u64,
    pub games_won: u32,
    /// Winnings in cents of the displayed currency.
    pub total_earnings: u64,
}

impl PlayerStats {
    pub fn level(&self) -> u64 {
        self.survivor_points / POINTS_PER_LEVEL + 1
    }

    /// Applies a finished run. Losses change nothing; returns true if stats moved.
    pub fn record(&mut self, res: &Resolution) -> bool {
        if res.outcome != Outcome::Won {
            return false;
        }
        self.games_won += 1;
        self.survivor_points += res.points;
        self.total_earnings += res.points;
        true
    }

    pub fn summary(&self) -> String {
        format!(
            "📊 Player 456 status\n\nLevel: {}\nSurvivor points: {}\nGames won: {}\nTotal earnings: {}",
            self.level(),
            self.survivor_points,
            self.games_won,
            format_amount(self.total_earnings as f64 / 100.0),
        )
    }
}

/// Text shown in the balance slot: the amount, or the mask while hidden.
pub fn wealth_text(visible: bool, stats: &PlayerStats, cfg: &WealthConfig) -> String {
    if visible {
        format_amount(cfg.base_amount + stats.total_earnings as f64 / 100.0)
    } else {
        cfg.masked.clone()
    }
}

/// Two decimals with comma thousands separators: `1234.5` -> `1,234.50`.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::GameId;

    #[test]
    fn level_tracks_points() {
        let mut s = PlayerStats::default();
        assert_eq!(s.level(), 1);
        s.record(&Resolution::won(GameId::Reaction, 999));
        assert_eq!(s.level(), 1);
        s.record(&Resolution::won(GameId::Steps, 1));
        assert_eq!(s.level(), 2);
        s.record(&Resolution::won(GameId::Challenge, 2_500));
        assert_eq!(s.level(), s.survivor_points / 1000 + 1);
        assert_eq!(s.level(), 4);
    }

    #[test]
    fn losses_do_not_count() {
        let mut s = PlayerStats::default();
        assert!(!s.record(&Resolution::lost(GameId::Reaction)));
        assert_eq!(s, PlayerStats::default());
    }

    #[test]
    fn wins_accumulate() {
        let mut s = PlayerStats::default();
        s.record(&Resolution::won(GameId::Reaction, 500));
        s.record(&Resolution::won(GameId::Reaction, 500));
        assert_eq!(s.games_won, 2);
        assert_eq!(s.survivor_points, 1_000);
        assert_eq!(s.total_earnings, 1_000);
    }

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(format_amount(456.0), "456.00");
        assert_eq!(format_amount(1_234.5), "1,234.50");
        assert_eq!(format_amount(1_000_000.0), "1,000,000.00");
        assert_eq!(format_amount(-12.0), "-12.00");
    }

    #[test]
    fn wealth_is_projection_of_earnings() {
        let cfg = WealthConfig::default();
        let mut s = PlayerStats::default();
        assert_eq!(wealth_text(true, &s, &cfg), "456.00");
        s.record(&Resolution::won(GameId::Reaction, 500));
        assert_eq!(wealth_text(true, &s, &cfg), "461.00");
        assert_eq!(wealth_text(false, &s, &cfg), "•••••");
    }
}
