//! Game flows: create, join, decide, cancel.
//!
//! Every flow re-reads the game, applies one domain operation, and writes
//! it back with a conditional update on the status and turn number it read.
//! That settles races for the second seat, for finishing a turn and for
//! cancel. Two first seats or two non-finishing decisions written at the same
//! instant both match the guard, and the later write replaces the earlier one.

use sea_orm::prelude::Uuid;
use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::{debug, info, warn};

use crate::domain::{Decision, Game, GameStatus, GameTurn};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::users::User;
use crate::repos::{game_turns, games, users};

/// How many times a join is retried against fresh state after losing a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinPolicy {
    pub max_attempts: u32,
}

impl Default for JoinPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Result of a submitted decision. `turn` is set when the decision
/// completed the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub game: Game,
    pub turn: Option<GameTurn>,
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turns_count: u32,
) -> Result<Game, DomainError> {
    let game = Game::new(turns_count)?;
    games::insert(conn, &game).await?;
    info!(game_id = %game.id(), turns_count, "Game created");
    Ok(game)
}

/// Seat `user` in a waiting game. The seat and the user's `current_game_id`
/// commit together.
///
/// Fails with `Conflict(GameNotJoinable)` once the game is no longer
/// waiting, and with `Conflict(OptimisticLock)` if every attempt lost a race.
pub async fn join_game<C>(
    conn: &C,
    game_id: Uuid,
    user: &User,
    policy: JoinPolicy,
) -> Result<Game, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    for attempt in 1..=policy.max_attempts.max(1) {
        let mut game = games::require_game(conn, game_id).await?;
        if game.status() != GameStatus::WaitingToStart {
            return Err(DomainError::conflict(
                ConflictKind::GameNotJoinable,
                format!("Game {game_id} is {}", game.status()),
            ));
        }
        game.add_player(user.id, user.login.as_str())?;

        let txn = conn.begin().await?;
        if games::try_update_waiting_to_start(&txn, &game).await? {
            // Only current_game_id changes; the rest comes from the stored row
            let mut seated = users::require_user(&txn, user.id).await?;
            seated.current_game_id = Some(game_id);
            users::update(&txn, &seated).await?;
            txn.commit().await?;
            info!(
                game_id = %game_id,
                user_id = %user.id,
                status = %game.status(),
                "Player joined"
            );
            return Ok(game);
        }
        txn.rollback().await?;
        warn!(game_id = %game_id, user_id = %user.id, attempt, "Join lost a race, retrying");
    }

    Err(DomainError::conflict(
        ConflictKind::OptimisticLock,
        format!("Game {game_id} kept changing while joining"),
    ))
}

/// Join the first listed joinable game, or create one when none is waiting.
pub async fn join_or_create<C>(
    conn: &C,
    user: &User,
    turns_count: u32,
) -> Result<Game, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    const CANDIDATES: u64 = 16;

    let waiting = games::find_waiting_to_start(conn, CANDIDATES).await?;
    for candidate in waiting.iter().filter(|g| !g.has_player(user.id)) {
        match join_game(conn, candidate.id(), user, JoinPolicy { max_attempts: 1 }).await {
            Ok(game) => return Ok(game),
            Err(e)
                if e.is_conflict(&ConflictKind::GameNotJoinable)
                    || e.is_conflict(&ConflictKind::OptimisticLock) =>
            {
                debug!(game_id = %candidate.id(), "Candidate taken, trying next");
            }
            Err(e) => return Err(e),
        }
    }

    let game = create_game(conn, turns_count).await?;
    join_game(conn, game.id(), user, JoinPolicy::default()).await
}

/// Record `user_id`'s decision. When both players have decided, the turn
/// is resolved: the game write and the turn record commit together.
pub async fn submit_decision<C>(
    conn: &C,
    game_id: Uuid,
    user_id: Uuid,
    decision: Decision,
) -> Result<DecisionOutcome, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let mut game = games::require_game(conn, game_id).await?;
    let turn_number = game.current_turn_number();
    game.set_player_decision(user_id, decision)?;
    debug!(game_id = %game_id, user_id = %user_id, turn_number, "Decision accepted");

    if !game.have_decision_of_every_player() {
        if !games::try_update_at_turn(conn, &game, turn_number).await? {
            return Err(stale_turn(game_id, turn_number));
        }
        return Ok(DecisionOutcome { game, turn: None });
    }

    let turn = game.finish_turn()?;

    let txn = conn.begin().await?;
    if !games::try_update_at_turn(&txn, &game, turn_number).await? {
        txn.rollback().await?;
        return Err(stale_turn(game_id, turn_number));
    }
    game_turns::insert(&txn, &turn).await?;
    if game.status() == GameStatus::Finished {
        for player in game.players() {
            let Some(mut user) = users::find_by_id(&txn, player.user_id).await? else {
                warn!(user_id = %player.user_id, "Finished game references a missing user");
                continue;
            };
            user.games_played += 1;
            if user.current_game_id == Some(game_id) {
                user.current_game_id = None;
            }
            users::update(&txn, &user).await?;
        }
    }
    txn.commit().await?;

    info!(
        game_id = %game_id,
        turn_number = turn.turn_number,
        winner_id = ?turn.winner_id,
        status = %game.status(),
        "Turn finished"
    );
    Ok(DecisionOutcome {
        game,
        turn: Some(turn),
    })
}

/// Cancel a waiting or playing game. Finished and canceled games are left
/// as they are.
///
/// Fails with `Conflict(OptimisticLock)` if the game moved on between the
/// read and the write, e.g. its last turn finished.
pub async fn cancel_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Game, DomainError> {
    let mut game = games::require_game(conn, game_id).await?;
    let before = game.status();
    let turn_number = game.current_turn_number();
    game.cancel();
    if game.status() == before {
        return Ok(game);
    }

    if !games::try_update_from(conn, &game, before, turn_number).await? {
        warn!(game_id = %game_id, from = %before, turn_number, "Cancel lost a race");
        return Err(DomainError::conflict(
            ConflictKind::OptimisticLock,
            format!("Game {game_id} changed while canceling"),
        ));
    }
    info!(game_id = %game_id, from = %before, "Game canceled");
    Ok(game)
}

fn stale_turn(game_id: Uuid, turn_number: u32) -> DomainError {
    DomainError::conflict(
        ConflictKind::OptimisticLock,
        format!("Game {game_id} moved past turn {turn_number}"),
    )
}
