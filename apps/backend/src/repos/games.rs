//! Game repository functions for domain layer.
//!
//! Games are stored whole: every write replaces the complete document.
//! `try_update_waiting_to_start` and `try_update_at_turn` are the
//! compare-and-swap primitives used when several writers may race on the
//! same game; they report a lost race as `Ok(false)`, not as an error.

use sea_orm::prelude::Uuid;
use sea_orm::ConnectionTrait;
use tracing::debug;

use super::{corrupt_document, from_db_int, to_db_int};
use crate::adapters::games_sea::{self as games_adapter, GameWrite, ReplaceGuard};
use crate::domain::{Game, GameStatus, Player};
use crate::entities::games;
use crate::entities::games::GameStatus as DbGameStatus;
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
) -> Result<(), DomainError> {
    games_adapter::insert_game(conn, to_write(game)?).await?;
    debug!(game_id = %game.id(), turns_count = game.turns_count(), "Game inserted");
    Ok(())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Option<Game>, DomainError> {
    games_adapter::find_by_id(conn, game_id)
        .await?
        .map(Game::try_from)
        .transpose()
}

/// Find game by ID or return a `NotFound(Game)` error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    })
}

/// Unconditional full replace.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
) -> Result<(), DomainError> {
    if !games_adapter::replace_game(conn, to_write(game)?).await? {
        return Err(DomainError::not_found(
            NotFoundKind::Game,
            format!("Game {} not found", game.id()),
        ));
    }
    Ok(())
}

pub async fn find_waiting_to_start<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<Game>, DomainError> {
    games_adapter::find_by_status(conn, DbGameStatus::WaitingToStart, limit)
        .await?
        .into_iter()
        .map(Game::try_from)
        .collect()
}

/// Replace the stored game only if it is still waiting to start.
///
/// Of two writers that both loaded the same waiting game and seated a
/// second player, exactly one gets `true`. The other must re-read.
pub async fn try_update_waiting_to_start<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
) -> Result<bool, DomainError> {
    let guard = ReplaceGuard::new().with_status(DbGameStatus::WaitingToStart);
    let written = games_adapter::replace_game_if(conn, to_write(game)?, guard).await?;
    debug!(game_id = %game.id(), written, "Conditional update of waiting game");
    Ok(written)
}

/// Replace the stored game only if it is still playing at
/// `expected_turn_number`, so a turn can only be applied once.
pub async fn try_update_at_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
    expected_turn_number: u32,
) -> Result<bool, DomainError> {
    let guard = ReplaceGuard::new()
        .with_status(DbGameStatus::Playing)
        .with_current_turn_number(to_db_int(expected_turn_number, "current_turn_number")?);
    let written = games_adapter::replace_game_if(conn, to_write(game)?, guard).await?;
    debug!(
        game_id = %game.id(),
        expected_turn_number,
        written,
        "Conditional update of playing game"
    );
    Ok(written)
}

/// Replace the stored game only if it still has the status and turn
/// number the caller read, so a stale copy never overwrites newer progress.
pub async fn try_update_from<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
    expected_status: GameStatus,
    expected_turn_number: u32,
) -> Result<bool, DomainError> {
    let guard = ReplaceGuard::new()
        .with_status(expected_status.into())
        .with_current_turn_number(to_db_int(expected_turn_number, "current_turn_number")?);
    let written = games_adapter::replace_game_if(conn, to_write(game)?, guard).await?;
    debug!(
        game_id = %game.id(),
        expected_status = %expected_status,
        expected_turn_number,
        written,
        "Conditional update from read state"
    );
    Ok(written)
}

fn to_write(game: &Game) -> Result<GameWrite, DomainError> {
    let players = serde_json::to_value(game.players())
        .map_err(|e| corrupt_document("players", e))?;
    Ok(GameWrite {
        id: game.id(),
        status: game.status().into(),
        turns_count: to_db_int(game.turns_count(), "turns_count")?,
        current_turn_number: to_db_int(game.current_turn_number(), "current_turn_number")?,
        players,
    })
}

// Conversions between SeaORM models and domain models

impl From<GameStatus> for DbGameStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::WaitingToStart => DbGameStatus::WaitingToStart,
            GameStatus::Playing => DbGameStatus::Playing,
            GameStatus::Finished => DbGameStatus::Finished,
            GameStatus::Canceled => DbGameStatus::Canceled,
        }
    }
}

impl From<DbGameStatus> for GameStatus {
    fn from(status: DbGameStatus) -> Self {
        match status {
            DbGameStatus::WaitingToStart => GameStatus::WaitingToStart,
            DbGameStatus::Playing => GameStatus::Playing,
            DbGameStatus::Finished => GameStatus::Finished,
            DbGameStatus::Canceled => GameStatus::Canceled,
        }
    }
}

impl TryFrom<games::Model> for Game {
    type Error = DomainError;

    fn try_from(model: games::Model) -> Result<Self, Self::Error> {
        let players: Vec<Player> =
            serde_json::from_value(model.players).map_err(|e| corrupt_document("players", e))?;
        let game = Game::restore(
            model.id,
            model.status.into(),
            from_db_int(model.turns_count, "turns_count")?,
            from_db_int(model.current_turn_number, "current_turn_number")?,
            players,
        )?;
        Ok(game)
    }
}
