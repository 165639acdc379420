//! Batch move validation.
//!
//! Recomputes each queued move's legal path and checks the whole batch for
//! composite destination-key collisions. Failures are attributable: they
//! name the offending side, agent, and move so the caller can penalize
//! exactly the responsible party. Validation never mutates state.

use std::collections::HashSet;

use crate::movegen::move_path;
use crate::pitch::{Move, MoveKind, Snapshot, SQUAD_SIZE};

/// Why a queued move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationReason {
    #[error("agent index out of range")]
    UnknownAgent,
    #[error("declared origin does not match the agent's position")]
    OriginMismatch,
    #[error("agent does not hold the ball")]
    NotHoldingBall,
    #[error("destination is not on the move's legal path")]
    IllegalDestination,
    #[error("agent already has a queued move")]
    DuplicateAgentMove,
    #[error("destination already targeted for the same entity")]
    DestinationConflict,
}

/// An attributable validation failure for one move in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{side} agent {agent}: {reason}")]
pub struct ValidationError {
    pub side: crate::pitch::Side,
    pub agent: u8,
    pub mv: Move,
    pub reason: ValidationReason,
}

impl ValidationError {
    fn new(mv: Move, reason: ValidationReason) -> Self {
        ValidationError {
            side: mv.side,
            agent: mv.agent,
            mv,
            reason,
        }
    }
}

/// Validates a single move against the last committed snapshot.
///
/// Checks agent identity, declared origin, possession for ball-moving
/// kinds, and that the destination lies on the move's own legal path.
/// TACKLE additionally accepts the origin cell itself (stay and intercept).
pub fn validate_move(snapshot: &Snapshot, mv: &Move) -> Result<(), ValidationError> {
    if mv.agent as usize >= SQUAD_SIZE {
        return Err(ValidationError::new(*mv, ValidationReason::UnknownAgent));
    }
    if snapshot.agent_position(mv.side, mv.agent) != mv.from {
        return Err(ValidationError::new(*mv, ValidationReason::OriginMismatch));
    }
    if mv.kind.moves_ball() && !snapshot.holds_ball(mv.side, mv.agent) {
        return Err(ValidationError::new(*mv, ValidationReason::NotHoldingBall));
    }

    if mv.kind == MoveKind::Tackle && mv.to == mv.from {
        return Ok(());
    }
    if !move_path(mv.from, mv.to, mv.kind).contains(&mv.to) {
        return Err(ValidationError::new(
            *mv,
            ValidationReason::IllegalDestination,
        ));
    }
    Ok(())
}

/// Validates a whole queued batch from both sides.
///
/// Beyond per-move checks, enforces one queued move per agent and rejects
/// any duplicated (destination, mover) composite key. Two distinct agents
/// may deliberately target the same cell; that is the clash trigger, not a
/// collision.
pub fn validate_batch(snapshot: &Snapshot, moves: &[Move]) -> Result<(), ValidationError> {
    let mut agents = HashSet::new();
    let mut destinations = HashSet::new();

    for mv in moves {
        validate_move(snapshot, mv)?;

        if !agents.insert((mv.side, mv.agent)) {
            return Err(ValidationError::new(
                *mv,
                ValidationReason::DuplicateAgentMove,
            ));
        }
        if !destinations.insert((mv.to, mv.mover())) {
            return Err(ValidationError::new(
                *mv,
                ValidationReason::DestinationConflict,
            ));
        }
    }
    Ok(())
}
