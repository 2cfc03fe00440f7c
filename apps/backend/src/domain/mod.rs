//! Domain layer: pure game logic types and helpers.

pub mod decision;
pub mod errors;
pub mod game;
pub mod turn;

#[cfg(test)]
mod tests_props_turns;

// Re-exports for ergonomics
pub use decision::{decision_beats, Decision};
pub use errors::GameError;
pub use game::{Game, GameStatus, Player, MAX_PLAYERS};
pub use turn::{GameTurn, PlayerTurnResult, TurnOutcome};
