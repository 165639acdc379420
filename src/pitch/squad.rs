//! Sides, roles, and kickoff formations.
//!
//! Each match has exactly two sides of six agents. Agent roles are fixed by
//! index: 0 goalkeeper, 1-2 defenders, 3-4 midfielders, 5 forward.

use serde::{Deserialize, Serialize};

use super::geometry::Position;

/// Number of agents per side.
pub const SQUAD_SIZE: usize = 6;

/// Agent index of the goalkeeper.
pub const GOALKEEPER: u8 = 0;

/// Agent index of the forward.
pub const FORWARD: u8 = 5;

/// One of the two sides in a match. Home defends the west goal (column 0),
/// Away defends the east goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

/// Both sides in index order.
pub const ALL_SIDES: [Side; 2] = [Side::Home, Side::Away];

impl Side {
    /// Returns the opposing side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// The fixed role of an agent, determined by its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

/// Returns the role for an agent index (0-5).
///
/// # Panics
/// Panics if `agent >= 6`; agent indices are validated at the API boundary.
pub fn role_of(agent: u8) -> Role {
    match agent {
        0 => Role::Goalkeeper,
        1 | 2 => Role::Defender,
        3 | 4 => Role::Midfielder,
        5 => Role::Forward,
        _ => panic!("agent index out of range: {}", agent),
    }
}

/// The kickoff formation cells for a side, indexed by agent id.
pub const fn formation(side: Side) -> [Position; SQUAD_SIZE] {
    match side {
        Side::Home => [
            Position::new(1, 5),
            Position::new(3, 3),
            Position::new(3, 7),
            Position::new(5, 3),
            Position::new(5, 7),
            Position::new(6, 5),
        ],
        Side::Away => [
            Position::new(13, 5),
            Position::new(11, 3),
            Position::new(11, 7),
            Position::new(9, 3),
            Position::new(9, 7),
            Position::new(8, 5),
        ],
    }
}
