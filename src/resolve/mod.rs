//! Turn resolution.
//!
//! Validates a committed batch of simultaneous moves, arbitrates possession
//! clashes, and resolves the batch into the next authoritative snapshot
//! plus an ordered frame sequence.

pub mod clash;
pub mod turn;
pub mod validate;

pub use clash::{draw_winner, resolve_possession, PossessionOutcome, RandomSource};
pub use turn::{resolve_turn, ResolveError, TurnOutcome};
pub use validate::{validate_batch, validate_move, ValidationError, ValidationReason};
