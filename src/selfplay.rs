//! Self-play match generation.
//!
//! Plays full matches by queuing random legal moves for both sides each
//! turn, exercising availability, validation, and resolution end to end.
//! Records per-turn snapshots for replay verification. Matches are
//! independent, so they run in parallel; each is seeded from the base seed
//! and its match id, keeping the whole batch reproducible.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game::{Match, MatchStatus};
use crate::movegen::random_moves;
use crate::pitch::{Side, Snapshot};
use crate::resolve::clash::RandomSource;

/// Configuration for self-play match generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of matches to play.
    pub num_matches: usize,
    /// Turns per match before the external timekeeper would call it.
    pub max_turns: usize,
    /// Base random seed; match `i` uses `seed + i`.
    pub seed: u64,
    /// Suppress per-match progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_matches: 10,
            max_turns: 60,
            seed: 1,
            quiet: false,
        }
    }
}

/// One resolved turn in a match record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    /// The authoritative snapshot appended to history for this turn,
    /// including move lists and consumed randomness.
    pub snapshot: Snapshot,
    /// Number of animation frames the turn produced.
    pub frame_count: usize,
}

/// A complete self-play match record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: u64,
    pub seed: u64,
    pub turns: Vec<TurnRecord>,
    pub home_score: u8,
    pub away_score: u8,
}

/// Plays `config.num_matches` matches in parallel and returns their records.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<MatchRecord> {
    (0..config.num_matches as u64)
        .into_par_iter()
        .map(|id| {
            let record = play_match(id, config.seed.wrapping_add(id), config.max_turns);
            if !config.quiet {
                eprintln!(
                    "match {}: {} turns, {}-{}",
                    record.match_id,
                    record.turns.len(),
                    record.home_score,
                    record.away_score
                );
            }
            record
        })
        .collect()
}

/// Plays a single match to `max_turns` with random legal moves.
fn play_match(id: u64, seed: u64, max_turns: usize) -> MatchRecord {
    let mut game = Match::new(id, Side::Home);
    let mut picker = SmallRng::seed_from_u64(seed);
    let mut clashes = RandomSource::from_seed(seed ^ 0x9e37_79b9_7f4a_7c15);
    let mut turns = Vec::with_capacity(max_turns);

    for _ in 0..max_turns {
        for side in [Side::Home, Side::Away] {
            for mv in random_moves(side, game.latest(), &mut picker) {
                // Random batches from one snapshot are collision-free.
                game.queue_move(mv).expect("random move batch must be legal");
            }
            game.commit(side).expect("side has queued moves");
        }
        let outcome = game
            .resolve_turn(&mut clashes)
            .expect("seeded source never exhausts");
        turns.push(TurnRecord {
            frame_count: outcome.frames.len(),
            snapshot: outcome.snapshot,
        });
    }
    game.finish(MatchStatus::Finished);

    MatchRecord {
        match_id: id,
        seed,
        home_score: game.score(Side::Home),
        away_score: game.score(Side::Away),
        turns,
    }
}
