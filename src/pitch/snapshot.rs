//! Committed game-state snapshots.
//!
//! A snapshot holds everything an observer needs to re-derive a turn: both
//! squads' positions, the ball, the single possession record, the randomness
//! consumed while producing it, and the move batches that produced it.

use serde::{Deserialize, Serialize};

use super::action::Move;
use super::geometry::{Position, CENTER};
use super::squad::{formation, Side, FORWARD, SQUAD_SIZE};

/// What a snapshot represents in the match timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotKind {
    /// The fixed starting layout, at match start or after a goal.
    Kickoff,
    /// An intermediate or final frame of normal play.
    InProgress,
    /// The ball just crossed into a goal mouth; the payload is the scorer.
    Goal(Side),
}

/// The single source of truth for possession: which agent holds the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    pub side: Side,
    pub agent: u8,
}

impl Holder {
    pub fn new(side: Side, agent: u8) -> Self {
        Holder { side, agent }
    }
}

/// Complete game state at one point in time.
///
/// Snapshots are plain values: the resolver takes the previous snapshot and
/// returns new ones, never mutating shared entities. Agent positions are
/// indexed by agent id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub kind: SnapshotKind,
    pub home: [Position; SQUAD_SIZE],
    pub away: [Position; SQUAD_SIZE],
    pub ball: Position,
    pub holder: Option<Holder>,
    /// Random values consumed during clash resolution, in consumption order.
    pub randomness: Vec<u32>,
    /// The committed move batches that produced this snapshot, for audit.
    pub home_moves: Vec<Move>,
    pub away_moves: Vec<Move>,
}

impl Snapshot {
    /// Builds the kickoff layout with the given side kicking off.
    ///
    /// The kicking side's forward is moved from its formation cell to the
    /// center cell and holds the ball.
    pub fn kickoff(kicking: Side) -> Self {
        let mut home = formation(Side::Home);
        let mut away = formation(Side::Away);
        match kicking {
            Side::Home => home[FORWARD as usize] = CENTER,
            Side::Away => away[FORWARD as usize] = CENTER,
        }
        Snapshot {
            kind: SnapshotKind::Kickoff,
            home,
            away,
            ball: CENTER,
            holder: Some(Holder::new(kicking, FORWARD)),
            randomness: Vec::new(),
            home_moves: Vec::new(),
            away_moves: Vec::new(),
        }
    }

    /// Positions of one side's agents, indexed by agent id.
    pub fn positions(&self, side: Side) -> &[Position; SQUAD_SIZE] {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Position of a single agent.
    pub fn agent_position(&self, side: Side, agent: u8) -> Position {
        self.positions(side)[agent as usize]
    }

    /// Agent ids of `side` currently occupying `cell`, in id order.
    pub fn agents_at(&self, side: Side, cell: Position) -> Vec<u8> {
        self.positions(side)
            .iter()
            .enumerate()
            .filter(|(_, pos)| **pos == cell)
            .map(|(id, _)| id as u8)
            .collect()
    }

    /// Returns true if the given agent is the current ball holder.
    pub fn holds_ball(&self, side: Side, agent: u8) -> bool {
        self.holder == Some(Holder::new(side, agent))
    }

    /// Checks the single-holder invariant: if an agent holds the ball, the
    /// ball sits on that agent's cell.
    pub fn holder_is_consistent(&self) -> bool {
        match self.holder {
            None => true,
            Some(h) => {
                (h.agent as usize) < SQUAD_SIZE && self.agent_position(h.side, h.agent) == self.ball
            }
        }
    }
}
