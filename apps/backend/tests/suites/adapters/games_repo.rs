use roshambo::adapters::games_sea::{self, GameWrite, ReplaceGuard};
use roshambo::domain::{Decision, Game, GameStatus};
use roshambo::entities::games::GameStatus as DbGameStatus;
use roshambo::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use roshambo::repos::games;
use roshambo::AppError;
use sea_orm::prelude::Uuid;

use crate::support::test_db;

fn started(turns: u32) -> Game {
    let mut game = Game::new(turns).expect("positive turns");
    game.add_player(Uuid::new_v4(), "alice").expect("seat 1");
    game.add_player(Uuid::new_v4(), "bob").expect("seat 2");
    game
}

#[tokio::test]
async fn test_insert_then_find_keeps_whole_document() -> Result<(), AppError> {
    let db = test_db().await?;
    let mut game = started(3);
    let alice = game.players()[0].user_id;
    game.set_player_decision(alice, Decision::Scissors)?;

    games::insert(&db, &game).await?;
    let loaded = games::require_game(&db, game.id()).await?;

    assert_eq!(loaded, game);
    assert_eq!(loaded.players()[0].decision, Some(Decision::Scissors));
    assert_eq!(loaded.players()[1].decision, None);
    Ok(())
}

#[tokio::test]
async fn test_missing_game_is_none_or_not_found() -> Result<(), AppError> {
    let db = test_db().await?;
    let missing = Uuid::new_v4();

    assert!(games::find_by_id(&db, missing).await?.is_none());

    let err = games::require_game(&db, missing).await.unwrap_err();
    assert!(
        matches!(err, DomainError::NotFound(NotFoundKind::Game, _)),
        "got {err:?}"
    );
    Ok(())
}

#[tokio::test]
async fn test_update_replaces_and_reports_missing_rows() -> Result<(), AppError> {
    let db = test_db().await?;
    let mut game = started(3);
    games::insert(&db, &game).await?;

    game.cancel();
    games::update(&db, &game).await?;
    assert_eq!(
        games::require_game(&db, game.id()).await?.status(),
        GameStatus::Canceled
    );

    let never_stored = started(1);
    let err = games::update(&db, &never_stored).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    Ok(())
}

#[tokio::test]
async fn test_insert_same_id_twice_is_conflict() -> Result<(), AppError> {
    let db = test_db().await?;
    let game = Game::new(3)?;
    games::insert(&db, &game).await?;

    let err = games::insert(&db, &game).await.unwrap_err();
    assert!(err.is_conflict(&ConflictKind::DuplicateId), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_find_waiting_to_start_filters_and_limits() -> Result<(), AppError> {
    let db = test_db().await?;

    let mut waiting_ids = Vec::new();
    for _ in 0..3 {
        let mut game = Game::new(3)?;
        game.add_player(Uuid::new_v4(), "solo")?;
        games::insert(&db, &game).await?;
        waiting_ids.push(game.id());
    }
    games::insert(&db, &started(3)).await?;
    let mut canceled = Game::new(3)?;
    canceled.cancel();
    games::insert(&db, &canceled).await?;

    let all = games::find_waiting_to_start(&db, 10).await?;
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|g| g.status() == GameStatus::WaitingToStart));
    assert!(all.iter().all(|g| waiting_ids.contains(&g.id())));

    let two = games::find_waiting_to_start(&db, 2).await?;
    assert_eq!(two.len(), 2);
    assert_eq!(two, all[..2].to_vec());
    Ok(())
}

#[tokio::test]
async fn test_try_update_waiting_to_start_refuses_started_game() -> Result<(), AppError> {
    let db = test_db().await?;
    let game = started(3);
    games::insert(&db, &game).await?;

    let mut stale = game.clone();
    stale.cancel();
    assert!(!games::try_update_waiting_to_start(&db, &stale).await?);
    assert_eq!(
        games::require_game(&db, game.id()).await?.status(),
        GameStatus::Playing
    );
    Ok(())
}

#[tokio::test]
async fn test_try_update_waiting_to_start_on_missing_game_is_false() -> Result<(), AppError> {
    let db = test_db().await?;
    let game = Game::new(2)?;
    assert!(!games::try_update_waiting_to_start(&db, &game).await?);
    Ok(())
}

#[tokio::test]
async fn test_try_update_at_turn_applies_once() -> Result<(), AppError> {
    let db = test_db().await?;
    let mut game = started(3);
    games::insert(&db, &game).await?;
    let (alice, bob) = (game.players()[0].user_id, game.players()[1].user_id);

    game.set_player_decision(alice, Decision::Rock)?;
    game.set_player_decision(bob, Decision::Scissors)?;
    let replay = game.clone();
    game.finish_turn()?;

    assert!(games::try_update_at_turn(&db, &game, 0).await?);

    let mut replay = replay;
    replay.finish_turn()?;
    assert!(!games::try_update_at_turn(&db, &replay, 0).await?);

    let stored = games::require_game(&db, game.id()).await?;
    assert_eq!(stored.current_turn_number(), 1);
    assert_eq!(stored.player(alice).map(|p| p.score), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_replace_game_if_guards_on_turn_number() -> Result<(), sea_orm::DbErr> {
    let db = test_db().await.expect("test db");
    let id = Uuid::new_v4();
    let write = |turn: i32| GameWrite {
        id,
        status: DbGameStatus::Playing,
        turns_count: 5,
        current_turn_number: turn,
        players: serde_json::json!([]),
    };
    games_sea::insert_game(&db, write(2)).await?;

    let wrong_turn = ReplaceGuard::new().with_current_turn_number(1);
    assert!(!games_sea::replace_game_if(&db, write(3), wrong_turn).await?);

    let right_turn = ReplaceGuard::new()
        .with_status(DbGameStatus::Playing)
        .with_current_turn_number(2);
    assert!(games_sea::replace_game_if(&db, write(3), right_turn).await?);

    let row = games_sea::find_by_id(&db, id).await?.expect("row");
    assert_eq!(row.current_turn_number, 3);
    Ok(())
}

#[tokio::test]
async fn test_corrupt_players_document_is_data_corruption() -> Result<(), AppError> {
    let db = test_db().await?;
    let id = Uuid::new_v4();
    games_sea::insert_game(
        &db,
        GameWrite {
            id,
            status: DbGameStatus::Playing,
            turns_count: 3,
            current_turn_number: 0,
            players: serde_json::json!([{"userId": "not-a-uuid"}]),
        },
    )
    .await?;

    let err = games::find_by_id(&db, id).await.unwrap_err();
    assert!(
        matches!(
            err,
            DomainError::Infra(InfraErrorKind::DataCorruption, _)
        ),
        "got {err:?}"
    );
    Ok(())
}
