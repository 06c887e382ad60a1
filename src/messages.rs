//! Alert copy shown through the modal presenter.

use crate::games::{GameId, Outcome, Resolution};

pub const CONTACT_ADVISOR: &str = "🎭 Front Man says: \"The games have begun. Your financial strategy will determine your survival.\"";

pub const HELP: &str = "❓ Welcome to the Financial Games! Navigate wisely, invest strategically, and remember - every decision has consequences.";

pub const DEPOSIT: &str = "💰 Player deposit successful! Your survival fund grows stronger.";

pub const WITHDRAW: &str = "🔴 Withdrawal initiated. Remember: In the games, every won counts.";

/// Flavour text for an investment card, keyed by its shape glyph.
pub fn shape_blurb(shape: &str) -> &'static str {
    match shape {
        "●" => "Circle game: Safe but steady. Like hiding behind others in Red Light, Green Light.",
        "▲" => "Triangle game: Moderate risk. Guards in training - powerful but unpredictable.",
        "★" => "Star game: High reward potential. VIP level access to exclusive opportunities.",
        "☂" => "Umbrella game: Maximum risk. Only for those brave enough to face the final challenges.",
        _ => "Strategic investment choice.",
    }
}

pub fn investment_detail(shape: &str, name: &str, return_rate: &str) -> String {
    format!("{shape} {name}\nReturn: {return_rate}\n\n{}", shape_blurb(shape))
}

pub fn resolution(res: &Resolution) -> String {
    match (res.game, res.outcome) {
        (GameId::Reaction, Outcome::Won) => format!(
            "🟢 You made it across the line!\n\n+{} survivor points",
            res.points
        ),
        (GameId::Reaction, Outcome::Lost) => {
            "🔴 Red light! The doll saw you move.\n\nPlayer eliminated from this round.".to_string()
        }
        (GameId::Challenge, Outcome::Won) => format!(
            "🔺 All four trials cleared. The guards are impressed.\n\n+{} survivor points",
            res.points
        ),
        (GameId::Challenge, Outcome::Lost) => {
            "☂ Out of attempts. The trials are over for you.".to_string()
        }
        (GameId::Steps, Outcome::Won) => format!(
            "🌉 Every savings step is secure!\n\n+{} survivor points",
            res.points
        ),
        (GameId::Steps, Outcome::Lost) | (GameId::Dialogue, _) => {
            format!("{} is over.", res.game.label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_shape_falls_back() {
        assert_eq!(shape_blurb("■"), "Strategic investment choice.");
    }

    #[test]
    fn detail_layout() {
        let text = investment_detail("●", "Safe Bonds", "+4.2%");
        assert!(text.starts_with("● Safe Bonds\nReturn: +4.2%\n\nCircle game"));
    }

    #[test]
    fn win_message_mentions_points() {
        let text = resolution(&Resolution::won(GameId::Reaction, 500));
        assert!(text.contains("+500 survivor points"));
    }
}
