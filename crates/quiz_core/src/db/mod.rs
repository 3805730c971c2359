//! Quiz store file lifecycle.
//!
//! # Responsibility
//! - Open the `quizzes` SQLite file (or an in-memory store for tests),
//!   bring its schema up to date and close it at process end.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`; a file written by a
//!   newer binary is refused rather than downgraded.
//! - Nothing touches the `quizzes` table before migrations succeed.
//! - A `DbError` at open time is the one failure that stops the process.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{close_db, open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure of the storage medium itself.
#[derive(Debug)]
pub enum DbError {
    /// SQLite could not open, read or write the quiz store.
    Sqlite(rusqlite::Error),
    /// The quiz store was created by a newer release of this program.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "quiz store error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "quiz store schema version {db_version} is newer than supported {latest_supported}; upgrade the program"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
