//! Match state management.
//!
//! Wraps the pure turn resolver with the bookkeeping a live match needs:
//! the append-only snapshot history, the queued-move list, per-side commit
//! flags, running scores, and lifecycle status. The caller must serialize
//! resolution attempts per match; distinct matches share no state.

use serde::{Deserialize, Serialize};

use crate::pitch::{Move, Side, Snapshot};
use crate::resolve::clash::RandomSource;
use crate::resolve::turn::{resolve_turn, ResolveError, TurnOutcome};
use crate::resolve::validate::{validate_move, ValidationError};

/// Integration and validation failures surfaced by [`Match`] operations.
///
/// Validation failures ([`MatchError::Rejected`]) are expected, attributable
/// conditions the caller maps to a penalty for the responsible side. All
/// other variants signal caller misuse; they abort the operation without
/// mutating the match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Rejected(#[from] ValidationError),
    #[error("match is no longer in play")]
    NotInPlay,
    #[error("{0} has already committed this turn")]
    AlreadyCommitted(Side),
    #[error("cannot queue a move for {0} after it committed")]
    QueueAfterCommit(Side),
    #[error("no queued move for {side} agent {agent}")]
    MoveNotQueued { side: Side, agent: u8 },
    #[error("{0} cannot commit with no queued moves")]
    EmptyCommit(Side),
    #[error("both sides must commit before resolving")]
    NotCommitted,
    #[error("scripted randomness exhausted during clash resolution")]
    RandomnessExhausted,
}

impl From<ResolveError> for MatchError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Rejected(v) => MatchError::Rejected(v),
            ResolveError::RandomnessExhausted => MatchError::RandomnessExhausted,
        }
    }
}

/// Lifecycle status. Terminal states are decided by an external
/// collaborator; the engine only records them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    InPlay,
    Finished,
    TimedOut,
}

/// Per-side match bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub score: u8,
    committed: bool,
}

/// A running match: two teams, an append-only history, and the queue of
/// not-yet-resolved moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: u64,
    home: Team,
    away: Team,
    history: Vec<Snapshot>,
    queue: Vec<Move>,
    status: MatchStatus,
}

impl Match {
    /// Creates a match seeded with the kickoff formation for `kicking`.
    pub fn new(id: u64, kicking: Side) -> Self {
        Match {
            id,
            home: Team::default(),
            away: Team::default(),
            history: vec![Snapshot::kickoff(kicking)],
            queue: Vec::new(),
            status: MatchStatus::InPlay,
        }
    }

    /// The last committed snapshot. History is never empty.
    pub fn latest(&self) -> &Snapshot {
        self.history.last().expect("history is seeded at creation")
    }

    /// The full append-only snapshot history.
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Moves queued for the current turn, both sides.
    pub fn queued(&self) -> &[Move] {
        &self.queue
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn score(&self, side: Side) -> u8 {
        self.team(side).score
    }

    pub fn committed(&self, side: Side) -> bool {
        self.team(side).committed
    }

    fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// Queues a move for the current turn after validating it against the
    /// last committed snapshot.
    ///
    /// One queued move per agent: replacing a move requires
    /// [`undo_move`](Self::undo_move) first. Queuing for a side that has
    /// already committed is refused.
    pub fn queue_move(&mut self, mv: Move) -> Result<(), MatchError> {
        if self.status != MatchStatus::InPlay {
            return Err(MatchError::NotInPlay);
        }
        if self.team(mv.side).committed {
            return Err(MatchError::QueueAfterCommit(mv.side));
        }
        validate_move(self.latest(), &mv)?;
        if self
            .queue
            .iter()
            .any(|m| m.side == mv.side && m.agent == mv.agent)
        {
            return Err(ValidationError {
                side: mv.side,
                agent: mv.agent,
                mv,
                reason: crate::resolve::validate::ValidationReason::DuplicateAgentMove,
            }
            .into());
        }
        self.queue.push(mv);
        Ok(())
    }

    /// Removes and returns the queued move for (side, agent).
    ///
    /// Undoing a move that was never queued is an integration error.
    pub fn undo_move(&mut self, side: Side, agent: u8) -> Result<Move, MatchError> {
        if self.status != MatchStatus::InPlay {
            return Err(MatchError::NotInPlay);
        }
        if self.team(side).committed {
            return Err(MatchError::QueueAfterCommit(side));
        }
        let idx = self
            .queue
            .iter()
            .position(|m| m.side == side && m.agent == agent)
            .ok_or(MatchError::MoveNotQueued { side, agent })?;
        Ok(self.queue.remove(idx))
    }

    /// Marks a side's batch as final. Requires at least one queued move for
    /// that side; committing twice is an integration error.
    pub fn commit(&mut self, side: Side) -> Result<(), MatchError> {
        if self.status != MatchStatus::InPlay {
            return Err(MatchError::NotInPlay);
        }
        if self.team(side).committed {
            return Err(MatchError::AlreadyCommitted(side));
        }
        if !self.queue.iter().any(|m| m.side == side) {
            return Err(MatchError::EmptyCommit(side));
        }
        self.team_mut(side).committed = true;
        Ok(())
    }

    pub fn both_committed(&self) -> bool {
        self.home.committed && self.away.committed
    }

    /// Resolves the committed turn and appends exactly one history entry.
    ///
    /// On a validation failure the match is left untouched, so the caller
    /// can penalize the responsible side and retry with a corrected batch.
    /// On success the queue and commit flags are cleared, the scoring
    /// side's total is bumped if a goal fired, and the final snapshot is
    /// appended to history.
    pub fn resolve_turn(&mut self, rng: &mut RandomSource) -> Result<TurnOutcome, MatchError> {
        if self.status != MatchStatus::InPlay {
            return Err(MatchError::NotInPlay);
        }
        if !self.both_committed() {
            return Err(MatchError::NotCommitted);
        }
        if self.queue.is_empty() {
            return Err(MatchError::NotCommitted);
        }

        let home_moves: Vec<Move> = self.queue.iter().filter(|m| m.side == Side::Home).copied().collect();
        let away_moves: Vec<Move> = self.queue.iter().filter(|m| m.side == Side::Away).copied().collect();

        let outcome = resolve_turn(self.latest(), &home_moves, &away_moves, rng)?;

        if let Some(scorer) = outcome.goal {
            self.team_mut(scorer).score += 1;
        }
        self.queue.clear();
        self.home.committed = false;
        self.away.committed = false;
        self.history.push(outcome.snapshot.clone());
        Ok(outcome)
    }

    /// Records a terminal status decided outside the engine. Further
    /// queue/commit/resolve calls are refused.
    pub fn finish(&mut self, status: MatchStatus) {
        self.status = status;
    }
}
