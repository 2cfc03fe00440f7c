use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::users::{self, User};

/// Ensures a user exists for `login`, creating one if necessary.
/// Calling it again with the same login returns the same user.
pub async fn ensure_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    login: &str,
) -> Result<User, DomainError> {
    let login = login.trim();
    if login.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Other("EmptyLogin".into()),
            "Login must not be empty",
        ));
    }
    let user = users::get_or_create_by_login(conn, login).await?;
    debug!(user_id = %user.id, games_played = user.games_played, "Player ready");
    Ok(user)
}
