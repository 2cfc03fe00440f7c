//! Game aggregate: status machine, seats, and turn resolution.
//!
//! A `Game` is not shared between tasks. Callers load it, apply one
//! operation, and write it back through `repos::games`; races between
//! writers are settled by the conditional writes there.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::decision::Decision;
use super::errors::GameError;
use super::turn::{GameTurn, PlayerTurnResult, TurnOutcome};

pub const MAX_PLAYERS: usize = 2;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GameStatus {
    WaitingToStart,
    Playing,
    Finished,
    Canceled,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Finished | GameStatus::Canceled)
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            GameStatus::WaitingToStart => "waiting to start",
            GameStatus::Playing => "playing",
            GameStatus::Finished => "finished",
            GameStatus::Canceled => "canceled",
        };
        f.write_str(s)
    }
}

/// A seat in the game. `name` is copied from the user when they join and
/// does not follow later profile edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub user_id: Uuid,
    pub name: String,
    pub decision: Option<Decision>,
    pub score: u32,
}

impl Player {
    pub fn new(user_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            decision: None,
            score: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: Uuid,
    status: GameStatus,
    turns_count: u32,
    current_turn_number: u32,
    players: Vec<Player>,
}

impl Game {
    /// New game waiting for players, with a fresh random id.
    pub fn new(turns_count: u32) -> Result<Self, GameError> {
        if turns_count == 0 {
            return Err(GameError::InvalidTurnsCount(turns_count));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            status: GameStatus::WaitingToStart,
            turns_count,
            current_turn_number: 0,
            players: Vec::with_capacity(MAX_PLAYERS),
        })
    }

    /// Rebuild a game from stored parts, rejecting documents that break
    /// the aggregate invariants.
    pub fn restore(
        id: Uuid,
        status: GameStatus,
        turns_count: u32,
        current_turn_number: u32,
        players: Vec<Player>,
    ) -> Result<Self, GameError> {
        if turns_count == 0 {
            return Err(GameError::InvalidTurnsCount(turns_count));
        }
        if players.len() > MAX_PLAYERS {
            return Err(GameError::CorruptState(format!(
                "game {id} has {} players",
                players.len()
            )));
        }
        if current_turn_number > turns_count {
            return Err(GameError::CorruptState(format!(
                "game {id} is at turn {current_turn_number} of {turns_count}"
            )));
        }
        if current_turn_number == turns_count && status != GameStatus::Finished {
            return Err(GameError::CorruptState(format!(
                "game {id} played all turns but is {status}"
            )));
        }
        if let [first, second] = players.as_slice() {
            if first.user_id == second.user_id {
                return Err(GameError::CorruptState(format!(
                    "game {id} seats user {} twice",
                    first.user_id
                )));
            }
        }
        let seated_ok = match status {
            GameStatus::WaitingToStart => players.len() < MAX_PLAYERS,
            GameStatus::Playing | GameStatus::Finished => players.len() == MAX_PLAYERS,
            GameStatus::Canceled => true,
        };
        if !seated_ok {
            return Err(GameError::CorruptState(format!(
                "game {id} is {status} with {} players",
                players.len()
            )));
        }

        Ok(Self {
            id,
            status,
            turns_count,
            current_turn_number,
            players,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turns_count(&self) -> u32 {
        self.turns_count
    }

    pub fn current_turn_number(&self) -> u32 {
        self.current_turn_number
    }

    /// Players in join order: index 0 is player 1.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, user_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn has_player(&self, user_id: Uuid) -> bool {
        self.player(user_id).is_some()
    }

    /// Seat a user. The second player to join starts the game.
    pub fn add_player(&mut self, user_id: Uuid, name: impl Into<String>) -> Result<(), GameError> {
        if self.status != GameStatus::WaitingToStart {
            return Err(GameError::InvalidState {
                operation: "add player",
                status: self.status,
            });
        }
        if self.has_player(user_id) {
            return Err(GameError::AlreadyJoined { user_id });
        }
        self.players.push(Player::new(user_id, name));
        if self.players.len() == MAX_PLAYERS {
            self.status = GameStatus::Playing;
        }
        Ok(())
    }

    pub fn set_player_decision(
        &mut self,
        user_id: Uuid,
        decision: Decision,
    ) -> Result<(), GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::InvalidState {
                operation: "set decision",
                status: self.status,
            });
        }
        let player = self
            .players
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or(GameError::NotAParticipant { user_id })?;
        if player.decision.is_some() {
            return Err(GameError::AlreadyDecided { user_id });
        }
        player.decision = Some(decision);
        Ok(())
    }

    pub fn have_decision_of_every_player(&self) -> bool {
        self.players.iter().all(|p| p.decision.is_some())
    }

    /// Resolve the current turn and return its record for the caller to
    /// store. Scores, decisions, the turn counter and the status are
    /// updated here; the record itself is not kept on the game.
    pub fn finish_turn(&mut self) -> Result<GameTurn, GameError> {
        let (first, second) = match self.players.as_slice() {
            [first, second] => (first, second),
            _ => return Err(GameError::TurnNotReady),
        };
        let (Some(first_decision), Some(second_decision)) = (first.decision, second.decision)
        else {
            return Err(GameError::TurnNotReady);
        };
        // Decisions survive a cancel, the turn does not
        if self.status != GameStatus::Playing {
            return Err(GameError::InvalidState {
                operation: "finish turn",
                status: self.status,
            });
        }

        let winner_seat: Option<usize> = if first_decision.beats(second_decision) {
            Some(0)
        } else if second_decision.beats(first_decision) {
            Some(1)
        } else {
            None
        };
        let winner_id = winner_seat.map(|seat| self.players[seat].user_id);

        let results = [
            PlayerTurnResult {
                user_id: first.user_id,
                name: first.name.clone(),
                decision: first_decision,
                outcome: TurnOutcome::for_player(first.user_id, winner_id),
            },
            PlayerTurnResult {
                user_id: second.user_id,
                name: second.name.clone(),
                decision: second_decision,
                outcome: TurnOutcome::for_player(second.user_id, winner_id),
            },
        ];

        let turn = GameTurn {
            id: Uuid::new_v4(),
            game_id: self.id,
            turn_number: self.current_turn_number + 1,
            finished_at: OffsetDateTime::now_utc(),
            winner_id,
            players: results,
        };

        if let Some(seat) = winner_seat {
            self.players[seat].score += 1;
        }
        for player in &mut self.players {
            player.decision = None;
        }
        self.current_turn_number += 1;
        if self.current_turn_number >= self.turns_count {
            self.status = GameStatus::Finished;
        }

        Ok(turn)
    }

    pub fn is_finished(&self) -> bool {
        self.current_turn_number >= self.turns_count || self.status.is_terminal()
    }

    /// Cancel a game that is still waiting or playing. No-op otherwise.
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            self.status = GameStatus::Canceled;
        }
    }
}
