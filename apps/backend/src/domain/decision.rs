//! Player decisions and the cyclic dominance rule between them

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// A move in the canonical three-way cycle. Each variant beats the one
/// declared right before it, and the first beats the last.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Rock,
    Paper,
    Scissors,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::Rock, Decision::Paper, Decision::Scissors];

    fn index(self) -> u8 {
        match self {
            Decision::Rock => 0,
            Decision::Paper => 1,
            Decision::Scissors => 2,
        }
    }

    /// True iff `self` defeats `other`.
    pub fn beats(self, other: Decision) -> bool {
        let n = Self::ALL.len() as u8;
        (self.index() + n - other.index()) % n == 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Rock => "ROCK",
            Decision::Paper => "PAPER",
            Decision::Scissors => "SCISSORS",
        }
    }
}

/// Decision rule as a free function, for callers holding two values.
pub fn decision_beats(a: Decision, b: Decision) -> bool {
    a.beats(b)
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ROCK" => Ok(Decision::Rock),
            "PAPER" => Ok(Decision::Paper),
            "SCISSORS" => Ok(Decision::Scissors),
            _ => Err(DomainError::validation(
                ValidationKind::ParseDecision,
                format!("Parse decision: {s}"),
            )),
        }
    }
}
