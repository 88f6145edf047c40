//! Puzzle difficulty levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty selects the shape subset, transform families, and candidate count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Single-axis right-angle rotations, Z-plane mirror, 3 candidates.
    Easy,
    /// Composed Euler rotations, random-axis mirror, 4 candidates.
    Complex,
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Difficulty::Easy, Difficulty::Complex];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Complex => "complex",
        }
    }

    /// Number of answer options shown for this difficulty.
    #[inline]
    pub fn candidate_count(self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Complex => 4,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDifficultyError {
    pub input: String,
}

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown difficulty {:?} (expected \"easy\" or \"complex\")",
            self.input
        )
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "complex" => Ok(Difficulty::Complex),
            _ => Err(ParseDifficultyError {
                input: s.to_string(),
            }),
        }
    }
}
