//! SeaORM adapter for game repository - generic over ConnectionTrait.

use sea_orm::prelude::Uuid;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entities::games::{self, GameStatus};

pub mod dto;

pub use dto::{GameWrite, ReplaceGuard};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn insert_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameWrite,
) -> Result<games::Model, sea_orm::DbErr> {
    dto.into_active_model().insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Games in `status`, at most `limit` of them, ordered by id so repeated
/// calls see a stable order.
pub async fn find_by_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: GameStatus,
    limit: u64,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Status.eq(status))
        .order_by_asc(games::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

/// Replace the whole row for `dto.id` as long as it still satisfies `guard`.
///
/// This is a single `UPDATE ... WHERE id = ? [AND status = ?] [AND current_turn_number = ?]`,
/// so the check and the write are atomic in the store. Returns `true`
/// only if exactly one row was written.
pub async fn replace_game_if<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameWrite,
    guard: ReplaceGuard,
) -> Result<bool, sea_orm::DbErr> {
    let id = dto.id;
    let mut update = games::Entity::update_many()
        .set(dto.into_active_model())
        .filter(games::Column::Id.eq(id));

    if let Some(status) = guard.status {
        update = update.filter(games::Column::Status.eq(status));
    }
    if let Some(turn_number) = guard.current_turn_number {
        update = update.filter(games::Column::CurrentTurnNumber.eq(turn_number));
    }

    let result = update.exec(conn).await?;
    Ok(result.rows_affected == 1)
}

/// Unconditional replace by id.
pub async fn replace_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameWrite,
) -> Result<bool, sea_orm::DbErr> {
    replace_game_if(conn, dto, ReplaceGuard::new()).await
}
