use backend_test_support::unique_login;
use roshambo::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use roshambo::repos::users::{self, User};
use roshambo::AppError;
use sea_orm::prelude::Uuid;

use crate::support::test_db;

#[tokio::test]
async fn test_get_or_create_by_login_is_idempotent() -> Result<(), AppError> {
    let db = test_db().await?;
    let login = unique_login("alice");

    let first = users::get_or_create_by_login(&db, &login).await?;
    let second = users::get_or_create_by_login(&db, &login).await?;

    assert_eq!(first, second);
    assert_eq!(first.login, login);
    assert_eq!(first.games_played, 0);
    assert_eq!(first.current_game_id, None);
    assert_eq!(users::get_page(&db, 1, 10).await?.total_count, 1);
    Ok(())
}

#[tokio::test]
async fn test_update_persists_every_field() -> Result<(), AppError> {
    let db = test_db().await?;
    let mut user = users::get_or_create_by_login(&db, &unique_login("bob")).await?;

    user.first_name = "Bob".into();
    user.last_name = "Stone".into();
    user.games_played = 4;
    user.current_game_id = Some(Uuid::new_v4());
    users::update(&db, &user).await?;

    assert_eq!(users::require_user(&db, user.id).await?, user);
    Ok(())
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() -> Result<(), AppError> {
    let db = test_db().await?;
    let ghost = User {
        id: Uuid::new_v4(),
        login: unique_login("ghost"),
        first_name: String::new(),
        last_name: String::new(),
        games_played: 0,
        current_game_id: None,
    };

    let err = users::update(&db, &ghost).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));
    Ok(())
}

#[tokio::test]
async fn test_renaming_onto_taken_login_is_conflict() -> Result<(), AppError> {
    let db = test_db().await?;
    let alice = users::get_or_create_by_login(&db, &unique_login("alice")).await?;
    let mut bob = users::get_or_create_by_login(&db, &unique_login("bob")).await?;

    bob.login = alice.login.clone();
    let err = users::update(&db, &bob).await.unwrap_err();
    assert!(err.is_conflict(&ConflictKind::UniqueLogin), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_delete_removes_and_tolerates_missing() -> Result<(), AppError> {
    let db = test_db().await?;
    let user = users::get_or_create_by_login(&db, &unique_login("carol")).await?;

    users::delete(&db, user.id).await?;
    assert!(users::find_by_id(&db, user.id).await?.is_none());
    users::delete(&db, user.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_get_page_sorts_by_login() -> Result<(), AppError> {
    let db = test_db().await?;
    for login in ["mallory", "alice", "trent", "bob", "eve"] {
        users::get_or_create_by_login(&db, login).await?;
    }

    let first = users::get_page(&db, 1, 2).await?;
    let logins: Vec<&str> = first.items.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, ["alice", "bob"]);
    assert_eq!(first.total_count, 5);
    assert_eq!(first.total_pages(), 3);
    assert!(first.has_next());
    assert!(!first.has_previous());

    let last = users::get_page(&db, 3, 2).await?;
    let logins: Vec<&str> = last.items.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, ["trent"]);
    assert!(!last.has_next());
    assert!(last.has_previous());

    let past_end = users::get_page(&db, 4, 2).await?;
    assert!(past_end.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_get_page_rejects_zero_page_or_size() -> Result<(), AppError> {
    let db = test_db().await?;
    for (page, size) in [(0, 10), (1, 0)] {
        let err = users::get_page(&db, page, size).await.unwrap_err();
        assert!(
            matches!(err, DomainError::Validation(ValidationKind::InvalidPage, _)),
            "got {err:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_get_page_rejects_offsets_out_of_range() -> Result<(), AppError> {
    let db = test_db().await?;
    users::get_or_create_by_login(&db, &unique_login("alice")).await?;

    let huge_page = i64::MAX as u64;
    for (page, size) in [(u64::MAX / 2, 4), (huge_page, 2), (1, u64::MAX)] {
        let err = users::get_page(&db, page, size).await.unwrap_err();
        assert!(
            matches!(err, DomainError::Validation(ValidationKind::InvalidPage, _)),
            "page {page} size {size}: got {err:?}"
        );
    }

    let first = users::get_page(&db, 1, 4).await?;
    assert_eq!(first.items.len(), 1);
    Ok(())
}
