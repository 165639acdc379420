//! Path computation.
//!
//! Computes the ordered cell sequence a move travels between its origin and
//! destination: Chebyshev stepping along per-axis unit directions, clamped
//! to the move kind's range, truncated at the first cell that is neither in
//! the field interior nor a goal-mouth cell legal for ball-moving kinds.

use crate::pitch::{MoveKind, Position};

/// Returns true if a path of the given kind may pass through `cell`.
///
/// PASS and SHOT may additionally enter the goal-mouth bands; general
/// movement is confined to the interior.
pub fn cell_reachable(cell: Position, kind: MoveKind) -> bool {
    cell.in_interior() || (kind.moves_ball() && cell.in_goal_mouth())
}

/// Computes the ordered path from `from` toward `to` for the given kind.
///
/// One cell is emitted per step, starting one step away from the origin.
/// The step count is the Chebyshev distance clamped to the kind's range.
/// The path truncates at the first unreachable cell: a shot aimed past the
/// boundary stops at the goal line rather than erroring, and later cells
/// are not emitted even if they would individually be legal.
pub fn move_path(from: Position, to: Position, kind: MoveKind) -> Vec<Position> {
    let (dx, dy) = from.step_toward(to);
    let steps = from.chebyshev(to).min(kind.range());

    let mut path = Vec::with_capacity(steps as usize);
    let mut cur = from;
    for _ in 0..steps {
        cur = cur.offset(dx, dy);
        if !cell_reachable(cur, kind) {
            break;
        }
        path.push(cur);
    }
    path
}
