//! SeaORM adapter for the append-only turn history.

use sea_orm::prelude::{Json, Uuid};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::game_turns;

#[derive(Debug, Clone)]
pub struct TurnCreate {
    pub id: Uuid,
    pub game_id: Uuid,
    pub turn_number: i32,
    pub finished_at: OffsetDateTime,
    pub winner_id: Option<Uuid>,
    pub players: Json,
}

pub async fn insert_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TurnCreate,
) -> Result<game_turns::Model, sea_orm::DbErr> {
    let turn_active = game_turns::ActiveModel {
        id: Set(dto.id),
        game_id: Set(dto.game_id),
        turn_number: Set(dto.turn_number),
        finished_at: Set(dto.finished_at),
        winner_id: Set(dto.winner_id),
        players: Set(dto.players),
    };

    turn_active.insert(conn).await
}

pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Vec<game_turns::Model>, sea_orm::DbErr> {
    game_turns::Entity::find()
        .filter(game_turns::Column::GameId.eq(game_id))
        .order_by_asc(game_turns::Column::TurnNumber)
        .all(conn)
        .await
}
