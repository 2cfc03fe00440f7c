//! Turn history repository: append-only, independent of the game row.

use sea_orm::prelude::Uuid;
use sea_orm::ConnectionTrait;
use tracing::debug;

use super::{corrupt_document, from_db_int, to_db_int};
use crate::adapters::game_turns_sea::{self as turns_adapter, TurnCreate};
use crate::domain::{GameTurn, PlayerTurnResult};
use crate::entities::game_turns;
use crate::errors::domain::DomainError;

/// Append a finished turn. Recording the same turn number twice for a game
/// fails with `Conflict(OptimisticLock)`.
pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn: &GameTurn,
) -> Result<(), DomainError> {
    let players =
        serde_json::to_value(&turn.players).map_err(|e| corrupt_document("turn players", e))?;
    let dto = TurnCreate {
        id: turn.id,
        game_id: turn.game_id,
        turn_number: to_db_int(turn.turn_number, "turn_number")?,
        finished_at: turn.finished_at,
        winner_id: turn.winner_id,
        players,
    };
    turns_adapter::insert_turn(conn, dto).await?;
    debug!(
        game_id = %turn.game_id,
        turn_number = turn.turn_number,
        draw = turn.is_draw(),
        "Turn recorded"
    );
    Ok(())
}

/// All recorded turns of a game, in turn order.
pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Vec<GameTurn>, DomainError> {
    turns_adapter::find_by_game(conn, game_id)
        .await?
        .into_iter()
        .map(GameTurn::try_from)
        .collect()
}

impl TryFrom<game_turns::Model> for GameTurn {
    type Error = DomainError;

    fn try_from(model: game_turns::Model) -> Result<Self, Self::Error> {
        let players: [PlayerTurnResult; 2] = serde_json::from_value(model.players)
            .map_err(|e| corrupt_document("turn players", e))?;
        Ok(GameTurn {
            id: model.id,
            game_id: model.game_id,
            turn_number: from_db_int(model.turn_number, "turn_number")?,
            finished_at: model.finished_at,
            winner_id: model.winner_id,
            players,
        })
    }
}
