//! Quiz store use-case service.
//!
//! # Responsibility
//! - Expose the record store operations (initialize, list, get, add,
//!   update, delete, count) on top of a repository.
//! - Seed an empty store exactly once.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - `initialize` never inserts into a non-empty store.
//! - User-entered text is never written to logs; only ids and counts are.

use crate::model::quiz::{Quiz, QuizDraft, QuizId};
use crate::repo::quiz_repo::{QuizRepository, RepoError, RepoResult};
use crate::service::seed::SEED_QUIZZES;
use log::{info, warn};

/// Result of `QuizService::initialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and received this many seed records.
    Seeded(usize),
    /// The store already held this many records; nothing was inserted.
    AlreadyPopulated(u64),
}

/// Confirmation returned by a successful update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub id: QuizId,
    pub rows_affected: usize,
}

/// Use-case service wrapper for quiz CRUD operations.
pub struct QuizService<R: QuizRepository> {
    repo: R,
}

impl<R: QuizRepository> QuizService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Seeds the store when it holds no records. Safe to call on every start.
    pub fn initialize(&self) -> RepoResult<SeedOutcome> {
        let existing = self.repo.count_quizzes()?;
        if existing > 0 {
            info!(
                "event=store_init module=service status=ok seeded=false count={}",
                existing
            );
            return Ok(SeedOutcome::AlreadyPopulated(existing));
        }

        let drafts = SEED_QUIZZES
            .iter()
            .map(|(question, answer)| QuizDraft::new(question, answer))
            .collect::<Result<Vec<_>, _>>()?;
        let created = self.repo.create_many(&drafts)?;
        info!(
            "event=store_init module=service status=ok seeded=true count={}",
            created.len()
        );
        Ok(SeedOutcome::Seeded(created.len()))
    }

    /// Lists every record in insertion order.
    pub fn list_all(&self) -> RepoResult<Vec<Quiz>> {
        self.repo.list_quizzes()
    }

    /// Returns the record with `id`, or `None` when no record matches.
    pub fn get_by_id(&self, id: QuizId) -> RepoResult<Option<Quiz>> {
        self.repo.get_quiz(id)
    }

    /// Trims and validates input, rejects duplicate questions, then persists.
    pub fn add(&self, question: &str, answer: &str) -> RepoResult<Quiz> {
        let draft = QuizDraft::new(question, answer)?;
        if self.repo.find_by_question(draft.question())?.is_some() {
            warn!("event=quiz_add module=service status=rejected reason=duplicate");
            return Err(RepoError::Duplicate(draft.question().to_string()));
        }

        let quiz = self.repo.create_quiz(&draft)?;
        info!("event=quiz_add module=service status=ok id={}", quiz.id);
        Ok(quiz)
    }

    /// Replaces question and answer of an existing record.
    ///
    /// Fails with `NotFound` when `id` is absent, before any input checks,
    /// and with `Duplicate` when the new question already belongs to a
    /// different record.
    pub fn update(&self, id: QuizId, question: &str, answer: &str) -> RepoResult<UpdateOutcome> {
        if self.repo.get_quiz(id)?.is_none() {
            warn!(
                "event=quiz_update module=service status=rejected reason=not_found id={}",
                id
            );
            return Err(RepoError::NotFound(id));
        }

        let draft = QuizDraft::new(question, answer)?;
        if let Some(other) = self.repo.find_by_question(draft.question())? {
            if other.id != id {
                warn!(
                    "event=quiz_update module=service status=rejected reason=duplicate id={}",
                    id
                );
                return Err(RepoError::Duplicate(draft.question().to_string()));
            }
        }

        let rows_affected = self.repo.update_quiz(id, &draft)?;
        info!("event=quiz_update module=service status=ok id={}", id);
        Ok(UpdateOutcome { id, rows_affected })
    }

    /// Deletes the record with `id`, returning rows removed (0 when absent).
    pub fn delete_by_id(&self, id: QuizId) -> RepoResult<usize> {
        let removed = self.repo.delete_quiz(id)?;
        info!(
            "event=quiz_delete module=service status=ok id={} removed={}",
            id, removed
        );
        Ok(removed)
    }

    /// Returns the number of stored records.
    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count_quizzes()
    }
}
