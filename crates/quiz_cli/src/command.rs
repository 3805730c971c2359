//! Command-line parsing for the interactive prompt.
//!
//! # Invariants
//! - Command words are matched case-insensitively.
//! - Commands that target a record always carry a parsed `QuizId`.

use quiz_core::QuizId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One parsed prompt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    List,
    Show(QuizId),
    Add,
    Delete(QuizId),
    Edit(QuizId),
    Test(QuizId),
    Play,
    Credits,
    Quit,
}

/// Reason a prompt line could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    MissingId(&'static str),
    InvalidId(String),
    Unknown(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId(command) => write!(f, "missing id parameter for `{command}`"),
            Self::InvalidId(value) => write!(f, "invalid id `{value}`; expected an integer"),
            Self::Unknown(word) => write!(f, "unknown command `{word}`; use `help`"),
        }
    }
}

impl Error for CommandError {}

impl Command {
    /// Parses `<command> [id]`; extra words after the id are ignored.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(Self::Empty);
        };
        let id_arg = words.next();

        match word.to_lowercase().as_str() {
            "h" | "help" => Ok(Self::Help),
            "list" => Ok(Self::List),
            "show" => parse_id("show", id_arg).map(Self::Show),
            "add" => Ok(Self::Add),
            "delete" => parse_id("delete", id_arg).map(Self::Delete),
            "edit" => parse_id("edit", id_arg).map(Self::Edit),
            "test" => parse_id("test", id_arg).map(Self::Test),
            "p" | "play" => Ok(Self::Play),
            "credits" => Ok(Self::Credits),
            "q" | "quit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

fn parse_id(command: &'static str, value: Option<&str>) -> Result<QuizId, CommandError> {
    let value = value.ok_or(CommandError::MissingId(command))?;
    value
        .parse()
        .map_err(|_| CommandError::InvalidId(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{Command, CommandError};
    use quiz_core::QuizId;

    #[test]
    fn parses_aliases_and_case() {
        assert_eq!(Command::parse("H"), Ok(Command::Help));
        assert_eq!(Command::parse("  Play "), Ok(Command::Play));
        assert_eq!(Command::parse("p"), Ok(Command::Play));
        assert_eq!(Command::parse("QUIT"), Ok(Command::Quit));
        assert_eq!(Command::parse("   "), Ok(Command::Empty));
    }

    #[test]
    fn parses_id_arguments() {
        assert_eq!(Command::parse("show 3"), Ok(Command::Show(QuizId(3))));
        assert_eq!(Command::parse("edit  12 extra"), Ok(Command::Edit(QuizId(12))));
        assert_eq!(
            Command::parse("delete"),
            Err(CommandError::MissingId("delete"))
        );
        assert_eq!(
            Command::parse("test uno"),
            Err(CommandError::InvalidId("uno".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_words() {
        assert_eq!(
            Command::parse("jugar"),
            Err(CommandError::Unknown("jugar".to_string()))
        );
    }
}
