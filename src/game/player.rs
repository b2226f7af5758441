//! Players and zero-sum outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two players of a zero-sum game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

/// Value of a position for each player.
///
/// Leaf evaluations and terminal utilities are both turned into an `Outcome`
/// before backup, so every edge can read the value from the perspective of
/// the player who chose it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub player_one: f64,
    pub player_two: f64,
}

impl Outcome {
    pub fn new(player_one: f64, player_two: f64) -> Self {
        Self {
            player_one,
            player_two,
        }
    }

    /// Builds the zero-sum outcome where `player` receives `value` and the
    /// opponent receives `-value`.
    pub fn zero_sum(player: Player, value: f64) -> Self {
        match player {
            Player::One => Self::new(value, -value),
            Player::Two => Self::new(-value, value),
        }
    }

    pub fn win(winner: Player) -> Self {
        Self::zero_sum(winner, 1.0)
    }

    pub fn draw() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn value_for(&self, player: Player) -> f64 {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }
}
