//! Counterpress engine library.
//!
//! A deterministic, replayable resolution engine for a turn-based grid
//! football match: both sides submit a batch of moves privately, and once
//! both have committed, the resolver arbitrates all simultaneous movement
//! into one authoritative snapshot plus an animation-friendly frame list.

pub mod game;
pub mod movegen;
pub mod pitch;
pub mod resolve;
pub mod selfplay;
