//! SeaORM adapter for user repository.

use sea_orm::prelude::Uuid;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::UserWrite;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Insert a blank user for `login` unless one exists, then read it back.
/// The unique index on `login` settles concurrent callers; the flag tells
/// whether this call created the row.
pub async fn ensure_by_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    login: &str,
) -> Result<(users::Model, bool), sea_orm::DbErr> {
    let user_active = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        login: Set(login.to_string()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        games_played: Set(0),
        current_game_id: Set(None),
    };

    let rows = users::Entity::insert(user_active)
        .on_conflict(
            OnConflict::column(users::Column::Login)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    let inserted = rows == 1;
    let user = find_by_login(conn, login)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("users.login not found".to_string()))?;

    Ok((user, inserted))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_by_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    login: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Login.eq(login))
        .one(conn)
        .await
}

/// Replace every column of an existing user. Returns `false` when no row
/// has that id.
pub async fn replace_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserWrite,
) -> Result<bool, sea_orm::DbErr> {
    let user_active = users::ActiveModel {
        id: Set(dto.id),
        login: Set(dto.login),
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        games_played: Set(dto.games_played),
        current_game_id: Set(dto.current_game_id),
    };

    let result = users::Entity::update_many()
        .set(user_active)
        .filter(users::Column::Id.eq(dto.id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = users::Entity::delete_by_id(user_id).exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn count_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    users::Entity::find().count(conn).await
}

/// One page of users ordered by login.
pub async fn find_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    offset: u64,
    limit: u64,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .order_by_asc(users::Column::Login)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await
}
