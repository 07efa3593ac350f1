//! Player seat value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Player {
    /// Always takes the first turn of a round
    #[default]
    A,
    B,
}

impl Player {
    /// The seat whose turn comes next
    pub fn other(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::A => "A",
            Player::B => "B",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Player {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Player::A),
            "B" => Ok(Player::B),
            _ => Err(DomainError::invalid_player(s)),
        }
    }
}
