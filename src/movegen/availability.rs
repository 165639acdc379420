//! Legal destination enumeration.
//!
//! Probes the eight compass directions at the move kind's full range,
//! running the path resolver in each direction and concatenating the legal
//! cells. Used by callers for hinting; the validator applies the same path
//! rules, so the two always agree.

use super::path::move_path;
use crate::pitch::{MoveKind, Position, Side, Snapshot, DIRECTIONS};

/// Enumerates the legal destination cells for an agent and move kind.
///
/// For RUN and TACKLE, cells occupied by a same-side agent are filtered out;
/// opposing-side occupancy is allowed, which is how a clash is deliberately
/// engineered. TACKLE additionally includes the agent's own current cell as
/// a stay-and-intercept destination.
pub fn available_destinations(
    snapshot: &Snapshot,
    side: Side,
    agent: u8,
    kind: MoveKind,
) -> Vec<Position> {
    let from = snapshot.agent_position(side, agent);
    let mut cells = Vec::new();

    if kind == MoveKind::Tackle {
        cells.push(from);
    }

    for (dx, dy) in DIRECTIONS {
        let probe = from.offset(dx * kind.range(), dy * kind.range());
        for cell in move_path(from, probe, kind) {
            if !kind.moves_ball() && !snapshot.agents_at(side, cell).is_empty() {
                continue;
            }
            cells.push(cell);
        }
    }

    cells
}
