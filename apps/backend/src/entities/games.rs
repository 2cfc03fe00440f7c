use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(24))")]
pub enum GameStatus {
    #[sea_orm(string_value = "WAITING_TO_START")]
    WaitingToStart,
    #[sea_orm(string_value = "PLAYING")]
    Playing,
    #[sea_orm(string_value = "FINISHED")]
    Finished,
    #[sea_orm(string_value = "CANCELED")]
    Canceled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub status: GameStatus,
    #[sea_orm(column_name = "turns_count")]
    pub turns_count: i32,
    #[sea_orm(column_name = "current_turn_number")]
    pub current_turn_number: i32,
    /// `[{userId, name, decision, score}]` in seat order
    #[sea_orm(column_type = "Json")]
    pub players: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_turns::Entity")]
    GameTurns,
}

impl Related<super::game_turns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameTurns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
