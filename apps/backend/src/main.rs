use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roshambo::config::db::{DbKind, DbProfile};
use roshambo::domain::Decision;
use roshambo::error::AppError;
use roshambo::infra::db::bootstrap_db;
use roshambo::services::games::{self, JoinPolicy};
use roshambo::services::users;
use roshambo::telemetry;
use tracing::{error, info};

const DEFAULT_TURNS: u32 = 3;

fn turns_from_env() -> Result<u32, AppError> {
    match std::env::var("ROSHAMBO_TURNS") {
        Err(_) => Ok(DEFAULT_TURNS),
        Ok(raw) => raw.trim().parse::<u32>().map_err(|_| {
            AppError::config(format!("ROSHAMBO_TURNS must be a positive integer, got '{raw}'"))
        }),
    }
}

fn rng_from_env() -> StdRng {
    match std::env::var("ROSHAMBO_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
    {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn pick(rng: &mut StdRng) -> Decision {
    Decision::ALL[rng.random_range(0..Decision::ALL.len())]
}

/// Two bots play one full match against the configured store.
async fn run() -> Result<(), AppError> {
    let turns = turns_from_env()?;
    let kind = DbKind::from_env()?;
    let conn = bootstrap_db(DbProfile::Prod, kind).await?;
    let mut rng = rng_from_env();

    let first = users::ensure_player(&conn, "bot-rock").await?;
    let second = users::ensure_player(&conn, "bot-paper").await?;

    let game = games::create_game(&conn, turns).await?;
    games::join_game(&conn, game.id(), &first, JoinPolicy::default()).await?;
    let mut game = games::join_game(&conn, game.id(), &second, JoinPolicy::default()).await?;

    while !game.is_finished() {
        games::submit_decision(&conn, game.id(), first.id, pick(&mut rng)).await?;
        let outcome = games::submit_decision(&conn, game.id(), second.id, pick(&mut rng)).await?;
        if let Some(turn) = &outcome.turn {
            info!(
                turn_number = turn.turn_number,
                first = %turn.players[0].decision,
                second = %turn.players[1].decision,
                winner = turn.winner().map(|w| w.name.as_str()).unwrap_or("draw"),
                "Turn played"
            );
        }
        game = outcome.game;
    }

    let scores: Vec<String> = game
        .players()
        .iter()
        .map(|p| format!("{}={}", p.name, p.score))
        .collect();
    info!(game_id = %game.id(), status = %game.status(), scores = %scores.join(" "), "Match over");
    Ok(())
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    if let Err(e) = run().await {
        error!(code = e.code(), error = %e, "Self-play failed");
        std::process::exit(1);
    }
}
