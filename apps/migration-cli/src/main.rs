use clap::{Parser, ValueEnum};
use migration::MigrationCommand;
use roshambo::config::db::{DbKind, DbProfile};
use roshambo::infra::db::connect_db;

#[derive(Clone, ValueEnum)]
enum Env {
    Prod,
    Test,
}

/// In-memory SQLite is left out: the schema would vanish with the process.
#[derive(Clone, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Roshambo database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | refresh | status
    command: String,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,roshambo=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let Some(command) = MigrationCommand::parse(&args.command) else {
        eprintln!(
            "Unknown command: {}. Use: up | down | fresh | reset | refresh | status",
            args.command
        );
        std::process::exit(2);
    };

    let profile = match args.env {
        Env::Prod => DbProfile::Prod,
        Env::Test => DbProfile::Test,
    };
    let kind = match args.db {
        Db::Postgres => DbKind::Postgres,
        Db::SqliteFile => DbKind::SqliteFile,
    };

    let conn = match connect_db(profile, kind).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Connection failed: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        command = %args.command,
        db = ?kind,
        profile = ?profile,
        "migration-cli starting"
    );
    if let Err(e) = migration::migrate(&conn, command).await {
        tracing::error!(command = %args.command, error = %e, "migration-cli failed");
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
    tracing::info!(command = %args.command, "migration-cli done");
}
