//! Turn resolution.
//!
//! The core state machine: validates a committed batch, builds one path per
//! moving entity, then advances every entity in lockstep frame by frame,
//! arbitrating possession and detecting goals. Pure: takes the previous
//! snapshot and the two move lists, returns the new authoritative snapshot
//! plus the ordered frame sequence, and mutates nothing.

use std::collections::HashMap;

use super::clash::{resolve_possession, RandomSource};
use super::validate::{validate_batch, ValidationError};
use crate::movegen::move_path;
use crate::pitch::{
    Holder, Move, MoveKind, Mover, Position, Side, Snapshot, SnapshotKind, SQUAD_SIZE,
};

/// Errors from a turn resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A move in the batch was illegal; carries the responsible side/agent.
    #[error(transparent)]
    Rejected(#[from] ValidationError),
    /// A scripted random source ran out of values mid-resolution.
    #[error("scripted randomness exhausted during clash resolution")]
    RandomnessExhausted,
}

/// The result of resolving one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The new authoritative snapshot, with the submitted move lists and
    /// all consumed randomness attached.
    pub snapshot: Snapshot,
    /// Every snapshot produced this turn, in order, for animation playback.
    pub frames: Vec<Snapshot>,
    /// The scoring side, if a goal ended the turn early.
    pub goal: Option<Side>,
}

/// A planned movement for one agent: its declared kind and computed path.
struct AgentPlan {
    side: Side,
    agent: u8,
    path: Vec<Position>,
}

/// Resolves one committed turn against the last committed snapshot.
///
/// Two-pass design: the whole batch is validated before any position is
/// touched, so a rejected turn leaves nothing half-applied. The frame count
/// is the longest path among all moving entities; each frame advances every
/// entity with a cell at that index, the holder dragging the ball along.
pub fn resolve_turn(
    prev: &Snapshot,
    home_moves: &[Move],
    away_moves: &[Move],
    rng: &mut RandomSource,
) -> Result<TurnOutcome, ResolveError> {
    let mut batch: Vec<Move> = Vec::with_capacity(home_moves.len() + away_moves.len());
    batch.extend_from_slice(home_moves);
    batch.extend_from_slice(away_moves);
    validate_batch(prev, &batch)?;

    // Working state, restored from the last committed snapshot.
    let mut home = prev.home;
    let mut away = prev.away;
    let mut ball = prev.ball;
    let mut holder = prev.holder;

    // One path per moving entity, keyed by plain value movers. RUN/TACKLE
    // move the agent; PASS/SHOT move the ball along the issuer's aim.
    let mut agent_plans: Vec<AgentPlan> = Vec::new();
    let mut ball_path: Vec<Position> = Vec::new();
    let mut kinds: HashMap<Mover, MoveKind> = HashMap::new();
    for mv in &batch {
        kinds.insert(Mover::Agent(mv.side, mv.agent), mv.kind);
        let path = move_path(mv.from, mv.to, mv.kind);
        if mv.kind.moves_ball() {
            ball_path = path;
        } else {
            agent_plans.push(AgentPlan {
                side: mv.side,
                agent: mv.agent,
                path,
            });
        }
    }
    let mut ball_in_flight = !ball_path.is_empty();

    let frame_count = agent_plans
        .iter()
        .map(|p| p.path.len())
        .chain(std::iter::once(ball_path.len()))
        .max()
        .unwrap_or(0);

    let kind_for = |side: Side, agent: u8| kinds.get(&Mover::Agent(side, agent)).copied();

    let mut frames: Vec<Snapshot> = Vec::with_capacity(frame_count + 1);
    let mut all_draws: Vec<u32> = Vec::new();
    let mut goal: Option<Side> = None;

    for frame in 0..frame_count {
        let prev_ball = ball;

        for plan in &agent_plans {
            if let Some(&cell) = plan.path.get(frame) {
                set_position(&mut home, &mut away, plan.side, plan.agent, cell);
                if holder == Some(Holder::new(plan.side, plan.agent)) {
                    ball = cell;
                }
            }
        }
        if ball_in_flight {
            if let Some(&cell) = ball_path.get(frame) {
                ball = cell;
                holder = None;
            }
        }

        let mut frame_snap = Snapshot {
            kind: SnapshotKind::InProgress,
            home,
            away,
            ball,
            holder,
            randomness: Vec::new(),
            home_moves: Vec::new(),
            away_moves: Vec::new(),
        };

        // A ball inside a goal mouth ends the turn: credit the defender's
        // opponent, record the goal frame, and reset to kickoff with the
        // conceding side in possession. Remaining movement is discarded.
        if let Some(conceding) = ball.goal_mouth_of() {
            let scorer = conceding.opponent();
            frame_snap.kind = SnapshotKind::Goal(scorer);
            frame_snap.holder = None;
            frames.push(frame_snap);
            frames.push(Snapshot::kickoff(conceding));
            goal = Some(scorer);
            break;
        }

        if ball != prev_ball {
            let outcome = resolve_possession(&frame_snap, ball, holder, kind_for, rng)
                .ok_or(ResolveError::RandomnessExhausted)?;
            if let Some(value) = outcome.drawn {
                frame_snap.randomness.push(value);
                all_draws.push(value);
            }
            // A collection or steal during a pass/shot flight abandons the
            // ball's remaining planned path.
            if ball_in_flight && outcome.holder.is_some() {
                ball_in_flight = false;
            }
            holder = outcome.holder;
            frame_snap.holder = holder;
        }

        frames.push(frame_snap);
    }

    let mut snapshot = frames
        .last()
        .cloned()
        .unwrap_or_else(|| frame_from(prev));
    snapshot.randomness = all_draws;
    snapshot.home_moves = home_moves.to_vec();
    snapshot.away_moves = away_moves.to_vec();

    Ok(TurnOutcome {
        snapshot,
        frames,
        goal,
    })
}

/// A zero-movement turn still commits a frame identical to the previous
/// positions (every queued move was a tackle-stay).
fn frame_from(prev: &Snapshot) -> Snapshot {
    Snapshot {
        kind: SnapshotKind::InProgress,
        home: prev.home,
        away: prev.away,
        ball: prev.ball,
        holder: prev.holder,
        randomness: Vec::new(),
        home_moves: Vec::new(),
        away_moves: Vec::new(),
    }
}

fn set_position(
    home: &mut [Position; SQUAD_SIZE],
    away: &mut [Position; SQUAD_SIZE],
    side: Side,
    agent: u8,
    cell: Position,
) {
    match side {
        Side::Home => home[agent as usize] = cell,
        Side::Away => away[agent as usize] = cell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::FORWARD;
    use crate::resolve::validate::ValidationReason;

    fn scripted(values: Vec<u32>) -> RandomSource {
        RandomSource::scripted(values)
    }

    #[test]
    fn simple_run_carries_the_ball() {
        let prev = Snapshot::kickoff(Side::Home);
        let from = prev.agent_position(Side::Home, FORWARD);
        let to = from.offset(1, 1);
        let mv = Move::new(Side::Home, FORWARD, MoveKind::Run, from, to);
        let out = resolve_turn(&prev, &[mv], &[], &mut scripted(Vec::new())).unwrap();

        assert_eq!(out.snapshot.agent_position(Side::Home, FORWARD), to);
        assert_eq!(out.snapshot.ball, to);
        assert_eq!(out.snapshot.holder, Some(Holder::new(Side::Home, FORWARD)));
        assert!(out.snapshot.randomness.is_empty());
        assert_eq!(out.frames.len(), 1);
        assert!(out.goal.is_none());
        assert!(out.snapshot.holder_is_consistent());
    }

    #[test]
    fn rejected_batch_resolves_nothing() {
        let prev = Snapshot::kickoff(Side::Home);
        let mv = Move::new(
            Side::Home,
            2,
            MoveKind::Run,
            Position::new(0, 0),
            Position::new(1, 0),
        );
        let err = resolve_turn(&prev, &[mv], &[], &mut scripted(Vec::new())).unwrap_err();
        match err {
            ResolveError::Rejected(v) => {
                assert_eq!(v.side, Side::Home);
                assert_eq!(v.agent, 2);
                assert_eq!(v.reason, ValidationReason::OriginMismatch);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn frame_count_is_longest_path() {
        let prev = Snapshot::kickoff(Side::Home);
        // Forward passes 3 cells back while a defender runs 1 cell.
        let fw = prev.agent_position(Side::Home, FORWARD);
        let df = prev.agent_position(Side::Home, 1);
        let moves = [
            Move::new(Side::Home, FORWARD, MoveKind::Pass, fw, fw.offset(-3, 0)),
            Move::new(Side::Home, 1, MoveKind::Run, df, df.offset(0, 1)),
        ];
        let out = resolve_turn(&prev, &moves, &[], &mut scripted(Vec::new())).unwrap();
        assert_eq!(out.frames.len(), 3);
        // The defender stops after its single step.
        assert_eq!(
            out.frames[2].agent_position(Side::Home, 1),
            df.offset(0, 1)
        );
    }

    #[test]
    fn pass_releases_the_holder_until_collection() {
        let prev = Snapshot::kickoff(Side::Home);
        let fw = prev.agent_position(Side::Home, FORWARD);
        let mv = Move::new(Side::Home, FORWARD, MoveKind::Pass, fw, fw.offset(0, -3));
        let out = resolve_turn(&prev, &[mv], &[], &mut scripted(Vec::new())).unwrap();
        // Nobody stands along the flight: the ball ends loose.
        assert_eq!(out.snapshot.ball, fw.offset(0, -3));
        assert_eq!(out.snapshot.holder, None);
        for frame in &out.frames {
            assert_eq!(frame.holder, None);
        }
    }

    #[test]
    fn tackle_steal_consumes_no_randomness() {
        let mut prev = Snapshot::kickoff(Side::Home);
        // Holder runs to (8,8); an away agent tackles into the same cell.
        prev.home[FORWARD as usize] = Position::new(7, 8);
        prev.ball = Position::new(7, 8);
        prev.away[2] = Position::new(8, 7);
        let target = Position::new(8, 8);
        let home_mv = Move::new(Side::Home, FORWARD, MoveKind::Run, Position::new(7, 8), target);
        let away_mv = Move::new(Side::Away, 2, MoveKind::Tackle, Position::new(8, 7), target);
        let out = resolve_turn(&prev, &[home_mv], &[away_mv], &mut scripted(Vec::new())).unwrap();

        assert_eq!(out.snapshot.holder, Some(Holder::new(Side::Away, 2)));
        assert!(out.snapshot.randomness.is_empty());
        assert!(out.frames[0].randomness.is_empty());
    }

    #[test]
    fn contested_convergence_uses_the_injected_draw() {
        let mut prev = Snapshot::kickoff(Side::Home);
        prev.home[FORWARD as usize] = Position::new(7, 8);
        prev.ball = Position::new(7, 8);
        prev.away[2] = Position::new(9, 8);
        let target = Position::new(8, 8);
        let home_mv = Move::new(Side::Home, FORWARD, MoveKind::Run, Position::new(7, 8), target);
        let away_mv = Move::new(Side::Away, 2, MoveKind::Run, Position::new(9, 8), target);

        let out = resolve_turn(&prev, &[home_mv], &[away_mv], &mut scripted(vec![7])).unwrap();
        assert_eq!(out.snapshot.holder, Some(Holder::new(Side::Away, 2)));
        assert_eq!(out.snapshot.randomness, vec![7]);
        assert_eq!(out.frames[0].randomness, vec![7]);

        let out = resolve_turn(&prev, &[home_mv], &[away_mv], &mut scripted(vec![4])).unwrap();
        assert_eq!(out.snapshot.holder, Some(Holder::new(Side::Home, FORWARD)));
    }

    #[test]
    fn exhausted_script_fails_the_resolution() {
        let mut prev = Snapshot::kickoff(Side::Home);
        prev.home[FORWARD as usize] = Position::new(7, 8);
        prev.ball = Position::new(7, 8);
        prev.away[2] = Position::new(9, 8);
        let target = Position::new(8, 8);
        let home_mv = Move::new(Side::Home, FORWARD, MoveKind::Run, Position::new(7, 8), target);
        let away_mv = Move::new(Side::Away, 2, MoveKind::Run, Position::new(9, 8), target);
        let err = resolve_turn(&prev, &[home_mv], &[away_mv], &mut scripted(Vec::new()));
        assert_eq!(err.unwrap_err(), ResolveError::RandomnessExhausted);
    }

    #[test]
    fn interception_abandons_the_flight() {
        let mut prev = Snapshot::kickoff(Side::Home);
        // Pass east from (4,9); an away agent already stands two cells along.
        prev.home[FORWARD as usize] = Position::new(4, 9);
        prev.ball = Position::new(4, 9);
        prev.away[3] = Position::new(6, 9);
        let mv = Move::new(
            Side::Home,
            FORWARD,
            MoveKind::Pass,
            Position::new(4, 9),
            Position::new(7, 9),
        );
        let out = resolve_turn(&prev, &[mv], &[], &mut scripted(Vec::new())).unwrap();

        assert_eq!(out.snapshot.holder, Some(Holder::new(Side::Away, 3)));
        assert_eq!(out.snapshot.ball, Position::new(6, 9));
        // Frame 2 exists (frame count 3) but the ball no longer advances.
        assert_eq!(out.frames.len(), 3);
        assert_eq!(out.frames[2].ball, Position::new(6, 9));
    }

    #[test]
    fn goal_resets_to_kickoff_for_the_conceder() {
        let mut prev = Snapshot::kickoff(Side::Home);
        // Row 4 keeps the flight clear of the away goalkeeper on (13,5).
        prev.home[FORWARD as usize] = Position::new(12, 4);
        prev.ball = Position::new(12, 4);
        let mv = Move::new(
            Side::Home,
            FORWARD,
            MoveKind::Shot,
            Position::new(12, 4),
            Position::new(14, 4),
        );
        let out = resolve_turn(&prev, &[mv], &[], &mut scripted(Vec::new())).unwrap();

        assert_eq!(out.goal, Some(Side::Home));
        let n = out.frames.len();
        assert_eq!(out.frames[n - 2].kind, SnapshotKind::Goal(Side::Home));
        assert_eq!(out.frames[n - 1].kind, SnapshotKind::Kickoff);
        // The conceding side kicks off holding the ball.
        assert_eq!(
            out.snapshot.holder,
            Some(Holder::new(Side::Away, FORWARD))
        );
        assert_eq!(out.snapshot.kind, SnapshotKind::Kickoff);
        assert_eq!(out.snapshot.home_moves.len(), 1);
    }

    #[test]
    fn movement_after_goal_is_discarded() {
        let mut prev = Snapshot::kickoff(Side::Home);
        prev.home[FORWARD as usize] = Position::new(13, 4);
        prev.ball = Position::new(13, 4);
        prev.away[4] = Position::new(5, 9);
        let shot = Move::new(
            Side::Home,
            FORWARD,
            MoveKind::Shot,
            Position::new(13, 4),
            Position::new(14, 4),
        );
        // A two-step away run that would finish on frame 1.
        let run = Move::new(
            Side::Away,
            4,
            MoveKind::Run,
            Position::new(5, 9),
            Position::new(7, 9),
        );
        let out = resolve_turn(&prev, &[shot], &[run], &mut scripted(Vec::new())).unwrap();
        assert_eq!(out.goal, Some(Side::Home));
        // The goal fired on frame 0, so only goal + kickoff frames exist.
        assert_eq!(out.frames.len(), 2);
        assert_eq!(out.snapshot.kind, SnapshotKind::Kickoff);
    }

    #[test]
    fn all_stay_turn_produces_one_unchanged_frame() {
        let prev = Snapshot::kickoff(Side::Home);
        let df = prev.agent_position(Side::Away, 1);
        let mv = Move::new(Side::Away, 1, MoveKind::Tackle, df, df);
        let out = resolve_turn(&prev, &[], &[mv], &mut scripted(Vec::new())).unwrap();
        assert!(out.frames.is_empty());
        assert_eq!(out.snapshot.home, prev.home);
        assert_eq!(out.snapshot.away, prev.away);
        assert_eq!(out.snapshot.ball, prev.ball);
        assert_eq!(out.snapshot.holder, prev.holder);
        assert_eq!(out.snapshot.away_moves, vec![mv]);
    }

    #[test]
    fn determinism_same_inputs_same_output() {
        let prev = Snapshot::kickoff(Side::Away);
        let fw = prev.agent_position(Side::Away, FORWARD);
        let df = prev.agent_position(Side::Home, 2);
        let moves_away = [Move::new(Side::Away, FORWARD, MoveKind::Run, fw, fw.offset(-2, 0))];
        let moves_home = [Move::new(Side::Home, 2, MoveKind::Run, df, df.offset(1, 0))];

        let a = resolve_turn(&prev, &moves_home, &moves_away, &mut scripted(vec![3, 8])).unwrap();
        let b = resolve_turn(&prev, &moves_home, &moves_away, &mut scripted(vec![3, 8])).unwrap();
        assert_eq!(a, b);
    }
}
