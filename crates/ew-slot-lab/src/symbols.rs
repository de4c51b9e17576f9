//! Symbol alphabet and reel line classification

use serde::{Deserialize, Serialize};

/// Number of reels on the machine
pub const REEL_COUNT: usize = 3;

/// A reel symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Symbol {
    Cherry = 0,
    Lemon = 1,
    Bell = 2,
}

impl Symbol {
    /// Full alphabet, ordered by index
    pub const ALL: [Symbol; 3] = [Symbol::Cherry, Symbol::Lemon, Symbol::Bell];

    /// Alphabet size
    pub const COUNT: usize = Self::ALL.len();

    /// Symbol for a draw index. Indices wrap around the alphabet.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Display glyph
    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Cherry => "🍒",
            Symbol::Lemon => "🍋",
            Symbol::Bell => "🔔",
        }
    }
}

/// Result of matching the three symbols on the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineOutcome {
    /// All three symbols equal
    Win,
    /// Exactly two symbols equal
    NearMiss,
    /// All symbols distinct
    Loss,
}

impl LineOutcome {
    /// Classify a drawn line
    pub fn classify(line: &[Symbol; REEL_COUNT]) -> Self {
        let [a, b, c] = *line;
        if a == b && b == c {
            LineOutcome::Win
        } else if a == b || b == c || a == c {
            LineOutcome::NearMiss
        } else {
            LineOutcome::Loss
        }
    }

    pub fn is_win(self) -> bool {
        self == LineOutcome::Win
    }

    pub fn is_near_miss(self) -> bool {
        self == LineOutcome::NearMiss
    }
}

/// Render a line as glyphs separated by spaces
pub fn render_line(line: &[Symbol; REEL_COUNT]) -> String {
    line.iter().map(|s| s.glyph()).collect::<Vec<_>>().join(" ")
}
