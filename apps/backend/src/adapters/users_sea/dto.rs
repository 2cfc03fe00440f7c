//! DTOs for users_sea adapter.

use sea_orm::prelude::Uuid;

/// Full user row written by `replace_user`.
#[derive(Debug, Clone)]
pub struct UserWrite {
    pub id: Uuid,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub games_played: i32,
    pub current_game_id: Option<Uuid>,
}
