//! Global key handling: the Konami easter egg and the stats debug key.

pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "KeyB",
    "KeyA",
];

/// Shows the player stats overlay.
pub const DEBUG_KEY: &str = "Backquote";

pub const EASTER_EGG_MESSAGE: &str = "🎮 EASTER EGG ACTIVATED!\n\n🔺🔴🟢 You found the secret Squid Game code!\n\nPlayer #456 status: UNLOCKED\nSpecial privileges granted!\n\n\"The games never truly end... they just evolve.\"";

/// Matches a fixed sequence of `KeyboardEvent.code` values.
///
/// The buffer only ever holds a prefix of the target. A key that breaks the
/// prefix clears it; the key is kept only if it starts the target afresh.
pub struct KeySequence {
    target: &'static [&'static str],
    buffer: Vec<&'static str>,
}

impl Default for KeySequence {
    fn default() -> Self {
        Self::new(&KONAMI_CODE)
    }
}

impl KeySequence {
    pub fn new(target: &'static [&'static str]) -> Self {
        Self { target, buffer: Vec::with_capacity(target.len()) }
    }

    /// Feeds one key code. Returns true exactly when it completes the sequence.
    pub fn push(&mut self, code: &str) -> bool {
        if self.target.is_empty() {
            return false;
        }
        match self.target.get(self.buffer.len()) {
            Some(expected) if *expected == code => self.buffer.push(*expected),
            _ => {
                self.buffer.clear();
                if self.target[0] == code {
                    self.buffer.push(self.target[0]);
                }
            }
        }
        if self.buffer.len() == self.target.len() {
            self.buffer.clear();
            return true;
        }
        false
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}
