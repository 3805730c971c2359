//! Interactive quiz trainer.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Bootstrap logging and the quiz store, then hand over to the prompt.
//!
//! # Invariants
//! - Only startup failures (logging, opening the store) exit non-zero.

mod command;
mod repl;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::info;
use quiz_core::db::{close_db, open_db};
use quiz_core::{default_log_level, init_logging, QuizService, SeedOutcome, SqliteQuizRepository};
use rand::rngs::StdRng;
use rand::SeedableRng;
use repl::Repl;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "quiz", version, about = "Interactive question/answer trainer")]
struct Cli {
    /// SQLite file holding the quizzes (created when missing)
    #[arg(long, env = "QUIZ_DB", default_value = "quizzes.sqlite")]
    db: PathBuf,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "QUIZ_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, env = "QUIZ_LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_dir = absolute(&cli.log_dir)?;
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &log_dir).map_err(|err| anyhow!(err))?;

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open quiz store `{}`", cli.db.display()))?;
    {
        let repo = SqliteQuizRepository::try_new(&conn)?;
        let service = QuizService::new(repo);
        match service.initialize()? {
            SeedOutcome::Seeded(count) => println!("  Store created with {count} quizzes"),
            SeedOutcome::AlreadyPopulated(count) => println!("  Store has {count} quizzes"),
        }

        let stdin = io::stdin();
        let stdout = io::stdout();
        Repl::new(&service, stdin.lock(), stdout.lock(), StdRng::from_entropy()).run()?;
    }

    close_db(conn)?;
    info!("event=app_exit module=cli status=ok");
    Ok(())
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(path))
}
