//! Possession arbitration.
//!
//! Decides who holds the ball after a frame in which its cell is occupied.
//! A tackle against the current holder wins unconditionally; a contested
//! cell without that pattern is decided by a uniform draw from an injected
//! random source, so every resolution is reproducible by a verifier handed
//! the same value sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::pitch::{Holder, MoveKind, Position, Side, Snapshot};

/// The randomness supply for clash resolution.
///
/// `Seeded` generates values from a persisted seed; `Scripted` replays an
/// externally supplied sequence. Either way the consumed values end up on
/// the produced snapshots in consumption order.
#[derive(Debug, Clone)]
pub enum RandomSource {
    Seeded(SmallRng),
    Scripted(std::vec::IntoIter<u32>),
}

impl RandomSource {
    /// A generating source from a seed the caller persists.
    pub fn from_seed(seed: u64) -> Self {
        RandomSource::Seeded(SmallRng::seed_from_u64(seed))
    }

    /// A replaying source fed the randomness list of a prior resolution.
    pub fn scripted(values: Vec<u32>) -> Self {
        RandomSource::Scripted(values.into_iter())
    }

    /// Draws the next value. `None` means a scripted source ran dry, which
    /// is a caller integration error, not a game condition.
    pub fn draw(&mut self) -> Option<u32> {
        match self {
            RandomSource::Seeded(rng) => Some(rng.gen()),
            RandomSource::Scripted(values) => values.next(),
        }
    }
}

/// The side a drawn value awards possession to: even Home, odd Away.
pub fn draw_winner(value: u32) -> Side {
    if value % 2 == 0 {
        Side::Home
    } else {
        Side::Away
    }
}

/// The outcome of one possession check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PossessionOutcome {
    pub holder: Option<Holder>,
    /// The random value consumed, if the resolution needed one.
    pub drawn: Option<u32>,
}

/// Arbitrates possession of the ball at `cell` after a frame advance.
///
/// `kind_for` reports the move kind an agent declared for this turn, used
/// for the tackle-beats-holder rule. Returns `None` when a scripted random
/// source is exhausted.
pub fn resolve_possession(
    snapshot: &Snapshot,
    cell: Position,
    holder: Option<Holder>,
    kind_for: impl Fn(Side, u8) -> Option<MoveKind>,
    rng: &mut RandomSource,
) -> Option<PossessionOutcome> {
    let home_at = snapshot.agents_at(Side::Home, cell);
    let away_at = snapshot.agents_at(Side::Away, cell);

    let outcome = match (home_at.is_empty(), away_at.is_empty()) {
        // Nobody there: a ball in flight stays loose.
        (true, true) => PossessionOutcome {
            holder,
            drawn: None,
        },
        // One side present: pickup, no randomness.
        (false, true) => PossessionOutcome {
            holder: Some(pickup(Side::Home, &home_at, holder)),
            drawn: None,
        },
        (true, false) => PossessionOutcome {
            holder: Some(pickup(Side::Away, &away_at, holder)),
            drawn: None,
        },
        // Clash: one agent from each side on the ball's cell.
        (false, false) => {
            if let Some(winner) = tackle_winner(holder, &home_at, &away_at, &kind_for) {
                PossessionOutcome {
                    holder: Some(winner),
                    drawn: None,
                }
            } else {
                let value = rng.draw()?;
                let side = draw_winner(value);
                let agents = match side {
                    Side::Home => &home_at,
                    Side::Away => &away_at,
                };
                PossessionOutcome {
                    holder: Some(pickup(side, agents, holder)),
                    drawn: Some(value),
                }
            }
        }
    };
    Some(outcome)
}

/// The holder keeps the ball if it is among the side's agents at the cell;
/// otherwise the lowest agent id collects it.
fn pickup(side: Side, agents_at_cell: &[u8], holder: Option<Holder>) -> Holder {
    if let Some(h) = holder {
        if h.side == side && agents_at_cell.contains(&h.agent) {
            return h;
        }
    }
    Holder::new(side, agents_at_cell[0])
}

/// The tackle-beats-holder rule: if the current holder is at the cell and
/// an opposing agent declared TACKLE, the tackler wins unconditionally.
fn tackle_winner(
    holder: Option<Holder>,
    home_at: &[u8],
    away_at: &[u8],
    kind_for: &impl Fn(Side, u8) -> Option<MoveKind>,
) -> Option<Holder> {
    let h = holder?;
    let (own_at, opp_at) = match h.side {
        Side::Home => (home_at, away_at),
        Side::Away => (away_at, home_at),
    };
    if !own_at.contains(&h.agent) {
        return None;
    }
    let opp = h.side.opponent();
    opp_at
        .iter()
        .find(|&&agent| kind_for(opp, agent) == Some(MoveKind::Tackle))
        .map(|&agent| Holder::new(opp, agent))
}
