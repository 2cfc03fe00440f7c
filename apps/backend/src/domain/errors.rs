use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use uuid::Uuid;

use super::game::GameStatus;

/// Rejections raised by the game aggregate. A rejected operation never
/// leaves the game partially mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidState {
        operation: &'static str,
        status: GameStatus,
    },
    /// Finishing a turn needs exactly two players that have both decided.
    TurnNotReady,
    AlreadyDecided {
        user_id: Uuid,
    },
    NotAParticipant {
        user_id: Uuid,
    },
    /// A user can hold only one seat per game.
    AlreadyJoined {
        user_id: Uuid,
    },
    InvalidTurnsCount(u32),
    CorruptState(String),
}

impl Display for GameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            GameError::InvalidState { operation, status } => {
                write!(f, "cannot {operation} while game is {status}")
            }
            GameError::TurnNotReady => {
                write!(f, "both players must have a decision to finish the turn")
            }
            GameError::AlreadyDecided { user_id } => {
                write!(f, "player {user_id} already decided this turn")
            }
            GameError::NotAParticipant { user_id } => {
                write!(f, "user {user_id} is not playing this game")
            }
            GameError::AlreadyJoined { user_id } => {
                write!(f, "user {user_id} already sits in this game")
            }
            GameError::InvalidTurnsCount(n) => write!(f, "turns count must be positive, got {n}"),
            GameError::CorruptState(s) => write!(f, "corrupt game state: {s}"),
        }
    }
}

impl Error for GameError {}
