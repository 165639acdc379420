//! Field representation and game-state types.
//!
//! Contains the core data structures for positions, sides, moves, and the
//! committed snapshot model the resolver operates on.

pub mod action;
pub mod geometry;
pub mod snapshot;
pub mod squad;

pub use action::{Move, MoveKind, Mover};
pub use geometry::{
    Position, CENTER, DIRECTIONS, EAST_GOAL_COL, FIELD_COLS, FIELD_ROWS, GOAL_MOUTH_BOTTOM,
    GOAL_MOUTH_TOP, WEST_GOAL_COL,
};
pub use snapshot::{Holder, Snapshot, SnapshotKind};
pub use squad::{formation, role_of, Role, Side, ALL_SIDES, FORWARD, GOALKEEPER, SQUAD_SIZE};
