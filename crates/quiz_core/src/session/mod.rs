//! Randomized quiz play.
//!
//! # Responsibility
//! - Ask every stored quiz once, in a uniformly random order.
//! - Keep a running score and stop at the first wrong answer.
//!
//! # Invariants
//! - Session state lives only in memory and is dropped at session end.
//! - No retries, skips or backtracking: each turn advances or finishes.

mod play;

pub use play::{check_single, play, Answerer, PlayEnd, PlayOutcome, PlaySession, Turn};
