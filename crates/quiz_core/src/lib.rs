//! Core logic for the quiz trainer.
//! Storage, record invariants and play sessions live here; the CLI only
//! parses commands and renders results.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::quiz::{Quiz, QuizDraft, QuizId, QuizValidationError};
pub use repo::quiz_repo::{QuizRepository, RepoError, RepoResult, SqliteQuizRepository};
pub use service::quiz_service::{QuizService, SeedOutcome, UpdateOutcome};
pub use service::seed::SEED_QUIZZES;
pub use session::{check_single, play, Answerer, PlayEnd, PlayOutcome, PlaySession, Turn};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
