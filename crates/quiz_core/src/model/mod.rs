//! Quiz record model.
//!
//! # Invariants
//! - Every persisted record is identified by a stable `QuizId`.
//! - Question and answer text is trimmed and non-empty.

pub mod quiz;
