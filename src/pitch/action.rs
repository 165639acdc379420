//! Move declarations.
//!
//! A move names the acting agent, its kind, and the declared origin and
//! destination cells. RUN and TACKLE relocate the agent itself; PASS and
//! SHOT relocate the ball while the agent stays put.

use serde::{Deserialize, Serialize};

use super::geometry::Position;
use super::squad::Side;

/// The kind of a declared move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Run,
    Pass,
    Tackle,
    Shot,
}

impl MoveKind {
    /// Maximum number of cells this kind may travel.
    pub const fn range(self) -> i16 {
        match self {
            MoveKind::Run => 2,
            MoveKind::Pass => 3,
            MoveKind::Tackle => 1,
            MoveKind::Shot => 4,
        }
    }

    /// Returns true if the kind moves the ball rather than the agent.
    /// Ball-moving kinds are the only ones allowed into the goal mouths.
    pub const fn moves_ball(self) -> bool {
        matches!(self, MoveKind::Pass | MoveKind::Shot)
    }
}

/// A single declared move for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub side: Side,
    pub agent: u8,
    pub kind: MoveKind,
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(side: Side, agent: u8, kind: MoveKind, from: Position, to: Position) -> Self {
        Move {
            side,
            agent,
            kind,
            from,
            to,
        }
    }

    /// The entity this move relocates, used as the path-table and
    /// destination-collision key.
    pub fn mover(&self) -> Mover {
        if self.kind.moves_ball() {
            Mover::Ball
        } else {
            Mover::Agent(self.side, self.agent)
        }
    }
}

/// A moving entity: one specific agent, or the ball.
///
/// Plain value-type composite key usable in hashed and ordered containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mover {
    Agent(Side, u8),
    Ball,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_match_the_rules() {
        assert_eq!(MoveKind::Run.range(), 2);
        assert_eq!(MoveKind::Pass.range(), 3);
        assert_eq!(MoveKind::Tackle.range(), 1);
        assert_eq!(MoveKind::Shot.range(), 4);
    }

    #[test]
    fn only_ball_kinds_move_the_ball() {
        assert!(MoveKind::Pass.moves_ball());
        assert!(MoveKind::Shot.moves_ball());
        assert!(!MoveKind::Run.moves_ball());
        assert!(!MoveKind::Tackle.moves_ball());
    }

    #[test]
    fn mover_key_separates_ball_from_agent() {
        let from = Position::new(5, 5);
        let run = Move::new(Side::Home, 3, MoveKind::Run, from, Position::new(6, 5));
        let pass = Move::new(Side::Home, 3, MoveKind::Pass, from, Position::new(7, 5));
        assert_eq!(run.mover(), Mover::Agent(Side::Home, 3));
        assert_eq!(pass.mover(), Mover::Ball);
    }

    #[test]
    fn same_agent_different_sides_are_distinct_movers() {
        assert_ne!(Mover::Agent(Side::Home, 2), Mover::Agent(Side::Away, 2));
    }
}
