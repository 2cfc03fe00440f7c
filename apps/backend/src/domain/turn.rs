//! Turn records: immutable snapshots produced each time a turn finishes

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::decision::Decision;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TurnOutcome {
    Won,
    Lost,
    Draw,
}

impl TurnOutcome {
    /// Outcome for `user_id` given the turn winner (`None` on a draw).
    pub fn for_player(user_id: Uuid, winner_id: Option<Uuid>) -> Self {
        match winner_id {
            None => TurnOutcome::Draw,
            Some(w) if w == user_id => TurnOutcome::Won,
            Some(_) => TurnOutcome::Lost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTurnResult {
    pub user_id: Uuid,
    pub name: String,
    pub decision: Decision,
    pub outcome: TurnOutcome,
}

/// One completed turn. Owned by the history store, never by the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTurn {
    pub id: Uuid,
    pub game_id: Uuid,
    pub turn_number: u32,
    pub finished_at: OffsetDateTime,
    pub winner_id: Option<Uuid>,
    /// In seat order: player 1 then player 2.
    pub players: [PlayerTurnResult; 2],
}

impl GameTurn {
    pub fn is_draw(&self) -> bool {
        self.winner_id.is_none()
    }

    pub fn winner(&self) -> Option<&PlayerTurnResult> {
        self.players
            .iter()
            .find(|p| p.outcome == TurnOutcome::Won)
    }

    pub fn result_for(&self, user_id: Uuid) -> Option<&PlayerTurnResult> {
        self.players.iter().find(|p| p.user_id == user_id)
    }
}
