use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_turns")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_name = "game_id")]
    pub game_id: Uuid,
    #[sea_orm(column_name = "turn_number")]
    pub turn_number: i32,
    #[sea_orm(column_name = "finished_at")]
    pub finished_at: OffsetDateTime,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: Option<Uuid>,
    /// `[{userId, name, decision, outcome}]`, always two entries
    #[sea_orm(column_type = "Json")]
    pub players: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id"
    )]
    Game,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
