pub mod game_turns;
pub mod games;
pub mod users;

pub use game_turns::Entity as GameTurns;
pub use game_turns::Model as GameTurnRow;
pub use games::Entity as Games;
pub use games::Model as GameRow;
pub use users::Entity as Users;
pub use users::Model as UserRow;
