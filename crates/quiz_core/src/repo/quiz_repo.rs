//! Quiz repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `quizzes` table.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Read paths reject invalid persisted rows instead of masking them.
//! - `update_quiz` fails with `NotFound` on a missing id, while
//!   `delete_quiz` reports zero removed rows instead.
//! - Each call commits on its own; nothing is batched across calls.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::quiz::{Quiz, QuizDraft, QuizId, QuizValidationError};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const QUIZ_SELECT_SQL: &str = "SELECT id, question, answer FROM quizzes";
const QUIZZES_TABLE: &str = "quizzes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for quiz persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Question or answer text is empty.
    Validation(QuizValidationError),
    /// Another record already uses this question text.
    Duplicate(String),
    /// The operation required an existing record.
    NotFound(QuizId),
    /// Storage medium failure.
    Db(DbError),
    /// A persisted row violates record invariants.
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl RepoError {
    /// Whether this error comes from the storage medium rather than input.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Db(_)
                | Self::InvalidData(_)
                | Self::UninitializedConnection { .. }
                | Self::MissingRequiredTable(_)
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate(question) => write!(f, "question already exists: `{question}`"),
            Self::NotFound(id) => write!(f, "quiz not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted quiz data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with `open_db`"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<QuizValidationError> for RepoError {
    fn from(value: QuizValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for quiz CRUD operations.
pub trait QuizRepository {
    fn create_quiz(&self, draft: &QuizDraft) -> RepoResult<Quiz>;
    /// Inserts all drafts in one transaction; either every row lands or none.
    fn create_many(&self, drafts: &[QuizDraft]) -> RepoResult<Vec<Quiz>>;
    /// Replaces question and answer in place, returning rows affected.
    fn update_quiz(&self, id: QuizId, draft: &QuizDraft) -> RepoResult<usize>;
    fn get_quiz(&self, id: QuizId) -> RepoResult<Option<Quiz>>;
    fn find_by_question(&self, question: &str) -> RepoResult<Option<Quiz>>;
    /// Lists every record in insertion order.
    fn list_quizzes(&self) -> RepoResult<Vec<Quiz>>;
    /// Removes one record, returning rows removed (0 or 1).
    fn delete_quiz(&self, id: QuizId) -> RepoResult<usize>;
    fn count_quizzes(&self) -> RepoResult<u64>;
}

/// SQLite-backed quiz repository.
pub struct SqliteQuizRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuizRepository<'conn> {
    /// Wraps a connection after checking it was bootstrapped by `open_db`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_table: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [QUIZZES_TABLE],
            |row| row.get(0),
        )?;
        if !has_table {
            return Err(RepoError::MissingRequiredTable(QUIZZES_TABLE));
        }

        Ok(Self { conn })
    }
}

impl QuizRepository for SqliteQuizRepository<'_> {
    fn create_quiz(&self, draft: &QuizDraft) -> RepoResult<Quiz> {
        insert_draft(self.conn, draft)
    }

    fn create_many(&self, drafts: &[QuizDraft]) -> RepoResult<Vec<Quiz>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            created.push(insert_draft(&tx, draft)?);
        }
        tx.commit()?;
        Ok(created)
    }

    fn update_quiz(&self, id: QuizId, draft: &QuizDraft) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute(
                "UPDATE quizzes
                 SET
                    question = ?1,
                    answer = ?2,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?3;",
                params![draft.question(), draft.answer(), id.0],
            )
            .map_err(|err| map_write_error(err, draft))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(changed)
    }

    fn get_quiz(&self, id: QuizId) -> RepoResult<Option<Quiz>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUIZ_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.0])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_quiz_row(row)?));
        }

        Ok(None)
    }

    fn find_by_question(&self, question: &str) -> RepoResult<Option<Quiz>> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM quizzes WHERE question = ?1;",
                [question.trim()],
                |row| row.get(0),
            )
            .optional()?;

        match id {
            Some(id) => self.get_quiz(QuizId(id)),
            None => Ok(None),
        }
    }

    fn list_quizzes(&self) -> RepoResult<Vec<Quiz>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUIZ_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut quizzes = Vec::new();

        while let Some(row) = rows.next()? {
            quizzes.push(parse_quiz_row(row)?);
        }

        Ok(quizzes)
    }

    fn delete_quiz(&self, id: QuizId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM quizzes WHERE id = ?1;", [id.0])?;
        Ok(removed)
    }

    fn count_quizzes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM quizzes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

fn insert_draft(conn: &Connection, draft: &QuizDraft) -> RepoResult<Quiz> {
    conn.execute(
        "INSERT INTO quizzes (question, answer) VALUES (?1, ?2);",
        params![draft.question(), draft.answer()],
    )
    .map_err(|err| map_write_error(err, draft))?;

    Ok(draft.clone().into_quiz(QuizId(conn.last_insert_rowid())))
}

fn map_write_error(err: rusqlite::Error, draft: &QuizDraft) -> RepoError {
    match err.sqlite_error() {
        Some(sqlite_err)
            if sqlite_err.code == ErrorCode::ConstraintViolation
                && sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::Duplicate(draft.question().to_string())
        }
        _ => err.into(),
    }
}

fn parse_quiz_row(row: &Row<'_>) -> RepoResult<Quiz> {
    let quiz = Quiz {
        id: QuizId(row.get("id")?),
        question: row.get("question")?,
        answer: row.get("answer")?,
    };
    quiz.validate().map_err(|err| {
        RepoError::InvalidData(format!("row {} in quizzes: {err}", quiz.id))
    })?;
    Ok(quiz)
}
