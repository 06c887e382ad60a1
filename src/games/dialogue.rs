//! Advisory conversation with the Front Man. Linear prompts, canned replies, no scoring.

use super::{GameStatus, Outcome};

pub struct Prompt {
    pub text: &'static str,
    /// (choice label, response)
    pub choices: &'static [(&'static str, &'static str)],
}

pub static PROMPTS: [Prompt; 4] = [
    Prompt {
        text: "🎭 Welcome, Player 456. How do you intend to survive the markets?",
        choices: &[
            ("Play it safe", "Caution keeps players alive. For a while."),
            ("Take big risks", "Bold. The Glass Bridge rewards the brave, and buries the reckless."),
            ("Follow the crowd", "Hiding behind others works, until the doll turns around."),
        ],
    },
    Prompt {
        text: "A rival offers you a shortcut with guaranteed returns. Your answer?",
        choices: &[
            ("Refuse", "Wise. Nothing in these games is guaranteed."),
            ("Accept", "Then you have already lost the marble. Read the fine print, player."),
        ],
    },
    Prompt {
        text: "Your savings sit idle. What now?",
        choices: &[
            ("Build an emergency fund", "Three to six months of expenses. Even the Front Man keeps reserves."),
            ("Invest in the index", "Steady compounding. The slowest player often reaches the finish line."),
            ("Spend it tonight", "The VIPs thank you for your contribution."),
        ],
    },
    Prompt {
        text: "Final question. Why do you play?",
        choices: &[
            ("For my family", "Then play carefully. Your choices carry more than your own number."),
            ("For the prize", "Many have said the same. Few have collected."),
        ],
    },
];

pub struct DialogueGame {
    status: GameStatus,
    index: usize,
    /// Choice index picked at each prompt so far.
    picks: Vec<usize>,
}

impl Default for DialogueGame {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueGame {
    pub fn new() -> Self {
        Self { status: GameStatus::Idle, index: 0, picks: Vec::new() }
    }

    pub fn start(&mut self) -> bool {
        if self.status.is_active() {
            return false;
        }
        self.status = GameStatus::Active;
        self.index = 0;
        self.picks.clear();
        true
    }

    pub fn prompt(&self) -> Option<&'static Prompt> {
        if self.status.is_active() { PROMPTS.get(self.index) } else { None }
    }

    /// Picks a branch of the current prompt and returns its response.
    /// Out-of-range choices and choices outside a run return `None`.
    pub fn choose(&mut self, choice: usize) -> Option<&'static str> {
        let prompt = self.prompt()?;
        let &(_, response) = prompt.choices.get(choice)?;
        self.picks.push(choice);
        self.index += 1;
        if self.index >= PROMPTS.len() {
            self.status = GameStatus::Ended(Outcome::Won);
            log::info!("advisory dialogue finished, picks {:?}", self.picks);
        }
        Some(response)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn picks(&self) -> &[usize] {
        &self.picks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_prompt_has_two_or_three_choices() {
        for p in PROMPTS.iter() {
            assert!((2..=3).contains(&p.choices.len()), "{}", p.text);
        }
    }

    #[test]
    fn choices_map_to_fixed_responses() {
        let mut a = DialogueGame::new();
        let mut b = DialogueGame::new();
        a.start();
        b.start();
        assert_eq!(a.choose(1), b.choose(1));
        assert_eq!(a.choose(0), Some("Wise. Nothing in these games is guaranteed."));
    }

    #[test]
    fn walks_to_the_end() {
        let mut g = DialogueGame::new();
        assert_eq!(g.choose(0), None);
        g.start();
        for _ in 0..PROMPTS.len() {
            assert!(g.is_active());
            assert!(g.choose(0).is_some());
        }
        assert_eq!(g.status(), GameStatus::Ended(Outcome::Won));
        assert_eq!(g.prompt().map(|p| p.text), None);
        assert_eq!(g.picks(), &[0, 0, 0, 0]);
    }

    #[test]
    fn invalid_choice_does_not_advance() {
        let mut g = DialogueGame::new();
        g.start();
        assert_eq!(g.choose(5), None);
        assert_eq!(g.prompt().map(|p| p.text), Some(PROMPTS[0].text));
    }
}
