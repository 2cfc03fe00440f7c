use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Login,
    FirstName,
    LastName,
    GamesPlayed,
    CurrentGameId,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Status,
    TurnsCount,
    CurrentTurnNumber,
    Players,
}

#[derive(Iden)]
enum GameTurns {
    Table,
    Id,
    GameId,
    TurnNumber,
    FinishedAt,
    WinnerId,
    Players,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Login).string().not_null())
                    .col(
                        ColumnDef::new(Users::FirstName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::LastName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::GamesPlayed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::CurrentGameId).uuid().null())
                    .to_owned(),
            )
            .await?;

        // Login uniqueness lives in the store, not in application code
        manager
            .create_index(
                Index::create()
                    .name("idx_users_login_unique")
                    .table(Users::Table)
                    .col(Users::Login)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // games: one row per aggregate, players kept as a JSON document array
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::Status).string_len(24).not_null())
                    .col(ColumnDef::new(Games::TurnsCount).integer().not_null())
                    .col(
                        ColumnDef::new(Games::CurrentTurnNumber)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Games::Players).json().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_status")
                    .table(Games::Table)
                    .col(Games::Status)
                    .to_owned(),
            )
            .await?;

        // game_turns: append-only history, independent of the games row
        manager
            .create_table(
                Table::create()
                    .table(GameTurns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameTurns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameTurns::GameId).uuid().not_null())
                    .col(ColumnDef::new(GameTurns::TurnNumber).integer().not_null())
                    .col(
                        ColumnDef::new(GameTurns::FinishedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameTurns::WinnerId).uuid().null())
                    .col(ColumnDef::new(GameTurns::Players).json().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_turns_game_turn")
                    .table(GameTurns::Table)
                    .col(GameTurns::GameId)
                    .col(GameTurns::TurnNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameTurns::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
