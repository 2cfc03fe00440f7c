//! User repository functions for domain layer (generic over ConnectionTrait).
//!
//! Users are an outside collaborator of the game core: games only read a
//! user's id and login when seating a player.

use sea_orm::prelude::Uuid;
use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use super::{from_db_int, to_db_int};
use crate::adapters::users_sea::{self as users_adapter, UserWrite};
use crate::entities::users;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// User domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub games_played: u32,
    pub current_game_id: Option<Uuid>,
}

/// One page of a listing plus what's needed to navigate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageList<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    /// 1-based
    pub page_number: u64,
    pub page_size: u64,
}

impl<T> PageList<T> {
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages()
    }
}

/// Idempotent upsert keyed by the unique login.
pub async fn get_or_create_by_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    login: &str,
) -> Result<User, DomainError> {
    let (user, inserted) = users_adapter::ensure_by_login(conn, login).await?;
    if inserted {
        info!(user_id = %user.id, "User created");
    }
    User::try_from(user)
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<User>, DomainError> {
    users_adapter::find_by_id(conn, user_id)
        .await?
        .map(User::try_from)
        .transpose()
}

pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<User, DomainError> {
    find_by_id(conn, user_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
    })
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: &User,
) -> Result<(), DomainError> {
    let dto = UserWrite {
        id: user.id,
        login: user.login.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        games_played: to_db_int(user.games_played, "games_played")?,
        current_game_id: user.current_game_id,
    };
    if !users_adapter::replace_user(conn, dto).await? {
        return Err(DomainError::not_found(
            NotFoundKind::User,
            format!("User {} not found", user.id),
        ));
    }
    Ok(())
}

/// Delete is idempotent: removing a missing user is not an error.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<(), DomainError> {
    let removed = users_adapter::delete_user(conn, user_id).await?;
    debug!(user_id = %user_id, removed, "User delete");
    Ok(())
}

/// Users sorted by login. `page_number` is 1-based.
pub async fn get_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page_number: u64,
    page_size: u64,
) -> Result<PageList<User>, DomainError> {
    if page_number == 0 || page_size == 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidPage,
            format!("page {page_number} of size {page_size} is not valid"),
        ));
    }
    // SQL OFFSET and LIMIT are signed 64-bit
    let offset = (page_number - 1)
        .checked_mul(page_size)
        .filter(|offset| i64::try_from(*offset).is_ok() && i64::try_from(page_size).is_ok())
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidPage,
                format!("page {page_number} of size {page_size} is out of range"),
            )
        })?;
    let total_count = users_adapter::count_users(conn).await?;
    let items = users_adapter::find_page(conn, offset, page_size)
        .await?
        .into_iter()
        .map(User::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PageList {
        items,
        total_count,
        page_number,
        page_size,
    })
}

impl TryFrom<users::Model> for User {
    type Error = DomainError;

    fn try_from(model: users::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            login: model.login,
            first_name: model.first_name,
            last_name: model.last_name,
            games_played: from_db_int(model.games_played, "games_played")?,
            current_game_id: model.current_game_id,
        })
    }
}
