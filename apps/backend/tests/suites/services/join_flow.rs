use roshambo::domain::{Decision, GameStatus};
use roshambo::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use roshambo::repos::{games as games_repo, users as users_repo};
use roshambo::services::games::{self, JoinPolicy};
use roshambo::AppError;
use sea_orm::prelude::Uuid;

use crate::support::factory::{seed_started_game, seed_user};
use crate::support::test_db;

#[tokio::test]
async fn test_second_join_starts_game_and_tracks_current_game() -> Result<(), AppError> {
    let db = test_db().await?;
    let alice = seed_user(&db, "alice").await?;
    let bob = seed_user(&db, "bob").await?;
    let game = games::create_game(&db, 3).await?;

    let after_first = games::join_game(&db, game.id(), &alice, JoinPolicy::default()).await?;
    assert_eq!(after_first.status(), GameStatus::WaitingToStart);

    let after_second = games::join_game(&db, game.id(), &bob, JoinPolicy::default()).await?;
    assert_eq!(after_second.status(), GameStatus::Playing);
    assert_eq!(after_second.players()[0].name, alice.login);
    assert_eq!(after_second.players()[1].name, bob.login);

    for user in [&alice, &bob] {
        let stored = users_repo::require_user(&db, user.id).await?;
        assert_eq!(stored.current_game_id, Some(game.id()));
    }
    Ok(())
}

#[tokio::test]
async fn test_join_full_game_is_not_joinable() -> Result<(), AppError> {
    let db = test_db().await?;
    let (game, _, _) = seed_started_game(&db, 3).await?;
    let carol = seed_user(&db, "carol").await?;

    let err = games::join_game(&db, game.id(), &carol, JoinPolicy::default())
        .await
        .unwrap_err();
    assert!(err.is_conflict(&ConflictKind::GameNotJoinable), "got {err:?}");

    let stored = games_repo::require_game(&db, game.id()).await?;
    assert!(!stored.has_player(carol.id));
    Ok(())
}

#[tokio::test]
async fn test_join_missing_game_is_not_found() -> Result<(), AppError> {
    let db = test_db().await?;
    let alice = seed_user(&db, "alice").await?;

    let err = games::join_game(&db, Uuid::new_v4(), &alice, JoinPolicy::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_joins_seat_exactly_one() -> Result<(), AppError> {
    let db = test_db().await?;
    let alice = seed_user(&db, "alice").await?;
    let bob = seed_user(&db, "bob").await?;
    let carol = seed_user(&db, "carol").await?;
    let game = games::create_game(&db, 3).await?;
    games::join_game(&db, game.id(), &alice, JoinPolicy::default()).await?;

    let (by_bob, by_carol) = tokio::join!(
        games::join_game(&db, game.id(), &bob, JoinPolicy::default()),
        games::join_game(&db, game.id(), &carol, JoinPolicy::default()),
    );

    let (winner, loser_err) = match (by_bob, by_carol) {
        (Ok(_), Err(e)) => (bob.id, e),
        (Err(e), Ok(_)) => (carol.id, e),
        other => panic!("expected exactly one join to succeed, got {other:?}"),
    };
    assert!(
        loser_err.is_conflict(&ConflictKind::GameNotJoinable),
        "got {loser_err:?}"
    );

    let stored = games_repo::require_game(&db, game.id()).await?;
    assert_eq!(stored.status(), GameStatus::Playing);
    assert_eq!(stored.players().len(), 2);
    assert!(stored.has_player(winner));
    Ok(())
}

#[tokio::test]
async fn test_join_or_create_reuses_waiting_game() -> Result<(), AppError> {
    let db = test_db().await?;
    let alice = seed_user(&db, "alice").await?;
    let bob = seed_user(&db, "bob").await?;

    let opened = games::join_or_create(&db, &alice, 3).await?;
    assert_eq!(opened.status(), GameStatus::WaitingToStart);

    let joined = games::join_or_create(&db, &bob, 5).await?;
    assert_eq!(joined.id(), opened.id());
    assert_eq!(joined.status(), GameStatus::Playing);
    assert_eq!(joined.turns_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_join_or_create_skips_games_user_already_sits_in() -> Result<(), AppError> {
    let db = test_db().await?;
    let alice = seed_user(&db, "alice").await?;

    let first = games::join_or_create(&db, &alice, 3).await?;
    let second = games::join_or_create(&db, &alice, 3).await?;

    assert_ne!(first.id(), second.id());
    assert_eq!(games_repo::find_waiting_to_start(&db, 10).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_create_game_rejects_zero_turns() -> Result<(), AppError> {
    let db = test_db().await?;
    let err = games::create_game(&db, 0).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_, _)), "got {err:?}");
    assert!(games_repo::find_waiting_to_start(&db, 10).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_join_keeps_stored_user_fields() -> Result<(), AppError> {
    let db = test_db().await?;
    let (finished, alice, bob) = seed_started_game(&db, 1).await?;
    games::submit_decision(&db, finished.id(), alice.id, Decision::Rock).await?;
    games::submit_decision(&db, finished.id(), bob.id, Decision::Scissors).await?;
    assert_eq!(users_repo::require_user(&db, alice.id).await?.games_played, 1);

    // `alice` still holds the values from before the finished game
    let next = games::create_game(&db, 3).await?;
    games::join_game(&db, next.id(), &alice, JoinPolicy::default()).await?;

    let stored = users_repo::require_user(&db, alice.id).await?;
    assert_eq!(stored.games_played, 1);
    assert_eq!(stored.current_game_id, Some(next.id()));
    Ok(())
}

#[tokio::test]
async fn test_same_user_cannot_join_twice() -> Result<(), AppError> {
    let db = test_db().await?;
    let alice = seed_user(&db, "alice").await?;
    let game = games::create_game(&db, 3).await?;
    games::join_game(&db, game.id(), &alice, JoinPolicy::default()).await?;

    let err = games::join_game(&db, game.id(), &alice, JoinPolicy::default())
        .await
        .unwrap_err();
    assert!(
        matches!(err, DomainError::Validation(ValidationKind::AlreadyJoined, _)),
        "got {err:?}"
    );

    let stored = games_repo::require_game(&db, game.id()).await?;
    assert_eq!(stored.status(), GameStatus::WaitingToStart);
    assert_eq!(stored.players().len(), 1);
    Ok(())
}
