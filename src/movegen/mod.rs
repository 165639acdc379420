//! Path and destination computation.
//!
//! The path resolver walks a move's cell sequence under field-bound and
//! goal-mouth rules; the availability calculator enumerates legal
//! destinations by probing every direction with the same rules.

pub mod availability;
pub mod path;

pub use availability::available_destinations;
pub use path::{cell_reachable, move_path};

use rand::Rng;

use crate::pitch::{Move, MoveKind, Side, Snapshot, SQUAD_SIZE};

/// Picks one random legal move for each of the side's agents.
///
/// The ball holder picks among RUN/PASS/SHOT, everyone else among
/// RUN/TACKLE. A batch built this way always validates: destinations come
/// from the availability calculator and each agent contributes exactly one
/// move, so no composite destination key can repeat.
pub fn random_moves(side: Side, snapshot: &Snapshot, rng: &mut impl Rng) -> Vec<Move> {
    let mut moves = Vec::with_capacity(SQUAD_SIZE);

    for agent in 0..SQUAD_SIZE as u8 {
        let kinds: &[MoveKind] = if snapshot.holds_ball(side, agent) {
            &[MoveKind::Run, MoveKind::Pass, MoveKind::Shot]
        } else {
            &[MoveKind::Run, MoveKind::Tackle]
        };
        let kind = kinds[rng.gen_range(0..kinds.len())];

        let from = snapshot.agent_position(side, agent);
        let cells = available_destinations(snapshot, side, agent, kind);
        let to = if cells.is_empty() {
            // Boxed in: stay and contest. Always legal for a non-holder;
            // a holder always has at least one pass cell on this field.
            if snapshot.holds_ball(side, agent) {
                continue;
            }
            moves.push(Move::new(side, agent, MoveKind::Tackle, from, from));
            continue;
        } else {
            cells[rng.gen_range(0..cells.len())]
        };

        moves.push(Move::new(side, agent, kind, from, to));
    }

    moves
}
