//! Field geometry.
//!
//! Defines grid positions, the playable interior, the goal-mouth bands at
//! the extreme columns, and the eight compass directions used for movement.

use serde::{Deserialize, Serialize};

use super::squad::Side;

/// Number of grid columns, including the two goal columns.
pub const FIELD_COLS: i16 = 15;

/// Number of grid rows.
pub const FIELD_ROWS: i16 = 11;

/// Column of the goal defended by [`Side::Home`].
pub const WEST_GOAL_COL: i16 = 0;

/// Column of the goal defended by [`Side::Away`].
pub const EAST_GOAL_COL: i16 = FIELD_COLS - 1;

/// First row of each goal mouth (inclusive).
pub const GOAL_MOUTH_TOP: i16 = 3;

/// Last row of each goal mouth (inclusive).
pub const GOAL_MOUTH_BOTTOM: i16 = 7;

/// The center cell where the kicking side's forward starts with the ball.
pub const CENTER: Position = Position { x: 7, y: 5 };

/// The eight compass/diagonal step directions, clockwise from north.
pub const DIRECTIONS: [(i16, i16); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// An integer grid coordinate on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }

    /// Returns true if the cell is inside the playable interior.
    ///
    /// The interior excludes the two goal columns; those are reachable only
    /// through [`in_goal_mouth`](Self::in_goal_mouth).
    pub fn in_interior(self) -> bool {
        self.x > WEST_GOAL_COL && self.x < EAST_GOAL_COL && self.y >= 0 && self.y < FIELD_ROWS
    }

    /// Returns true if the cell lies inside either goal-mouth band.
    pub fn in_goal_mouth(self) -> bool {
        (self.x == WEST_GOAL_COL || self.x == EAST_GOAL_COL)
            && (GOAL_MOUTH_TOP..=GOAL_MOUTH_BOTTOM).contains(&self.y)
    }

    /// Returns the side whose goal this cell belongs to (the defender),
    /// or `None` if the cell is not inside a goal mouth.
    pub fn goal_mouth_of(self) -> Option<Side> {
        if !self.in_goal_mouth() {
            return None;
        }
        if self.x == WEST_GOAL_COL {
            Some(Side::Home)
        } else {
            Some(Side::Away)
        }
    }

    /// Chebyshev distance: diagonal steps cost the same as orthogonal ones.
    pub fn chebyshev(self, other: Position) -> i16 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Per-axis unit step direction from `self` toward `other`.
    pub fn step_toward(self, other: Position) -> (i16, i16) {
        ((other.x - self.x).signum(), (other.y - self.y).signum())
    }

    /// The cell one step away in the given direction.
    pub fn offset(self, dx: i16, dy: i16) -> Position {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}
