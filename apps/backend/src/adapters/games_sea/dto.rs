//! DTOs for games_sea adapter.

use sea_orm::prelude::{Json, Uuid};
use sea_orm::Set;

use crate::entities::games::{self, GameStatus};

/// Full document written on insert or replace. Every column is rewritten;
/// there are no partial updates of a game row.
#[derive(Debug, Clone)]
pub struct GameWrite {
    pub id: Uuid,
    pub status: GameStatus,
    pub turns_count: i32,
    pub current_turn_number: i32,
    pub players: Json,
}

impl GameWrite {
    pub(super) fn into_active_model(self) -> games::ActiveModel {
        games::ActiveModel {
            id: Set(self.id),
            status: Set(self.status),
            turns_count: Set(self.turns_count),
            current_turn_number: Set(self.current_turn_number),
            players: Set(self.players),
        }
    }
}

/// Extra conditions a stored row must still meet for a guarded replace
/// to go through. An empty guard matches on id alone.
#[derive(Debug, Clone, Default)]
pub struct ReplaceGuard {
    pub status: Option<GameStatus>,
    pub current_turn_number: Option<i32>,
}

impl ReplaceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_current_turn_number(mut self, turn_number: i32) -> Self {
        self.current_turn_number = Some(turn_number);
        self
    }
}
