//! Interactive read-eval-print loop over the quiz store.
//!
//! # Responsibility
//! - Read one command per line, dispatch it to the core and render results.
//! - Keep the loop alive after any command error.
//!
//! # Invariants
//! - Only I/O failures on the terminal itself end the loop early.
//! - End of input behaves like `quit`.

use crate::command::{Command, CommandError};
use log::warn;
use quiz_core::{
    check_single, play, Answerer, PlayEnd, PlayOutcome, Quiz, QuizId, QuizRepository,
    QuizService, RepoError, Turn,
};
use rand::Rng;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "quiz > ";

const HELP_LINES: &[&str] = &[
    "Commands:",
    "  h|help - Show this help.",
    "  list - List existing quizzes.",
    "  show <id> - Show the question and answer of a quiz.",
    "  add - Add a new quiz interactively.",
    "  delete <id> - Delete a quiz.",
    "  edit <id> - Edit a quiz.",
    "  test <id> - Answer a single quiz.",
    "  p|play - Answer every quiz in random order.",
    "  credits - Credits.",
    "  q|quit - Quit.",
];

/// Line-oriented terminal bound to a quiz service.
pub struct Repl<'s, R: QuizRepository, I, O, G> {
    service: &'s QuizService<R>,
    input: I,
    output: O,
    rng: G,
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

impl<'s, R, I, O, G> Repl<'s, R, I, O, G>
where
    R: QuizRepository,
    I: BufRead,
    O: Write,
    G: Rng,
{
    pub fn new(service: &'s QuizService<R>, input: I, output: O, rng: G) -> Self {
        Self {
            service,
            input,
            output,
            rng,
        }
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(line) = read_line(&mut self.input, &mut self.output, PROMPT)? else {
                writeln!(self.output)?;
                return Ok(());
            };

            let flow = match Command::parse(&line) {
                Ok(command) => self.dispatch(command)?,
                Err(err) => {
                    self.report_command_error(&err)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Empty => {}
            Command::Help => {
                for line in HELP_LINES {
                    writeln!(self.output, "{line}")?;
                }
            }
            Command::List => self.list()?,
            Command::Show(id) => self.show(id)?,
            Command::Add => self.add()?,
            Command::Delete(id) => self.delete(id)?,
            Command::Edit(id) => self.edit(id)?,
            Command::Test(id) => self.test(id)?,
            Command::Play => self.play()?,
            Command::Credits => {
                writeln!(self.output, "Authors:")?;
                for author in env!("CARGO_PKG_AUTHORS").split(':') {
                    writeln!(self.output, "  {author}")?;
                }
                writeln!(self.output, "Quiz trainer {}", quiz_core::core_version())?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> io::Result<()> {
        match self.service.list_all() {
            Ok(quizzes) => {
                for quiz in &quizzes {
                    writeln!(self.output, " [{}]:  {}", quiz.id, quiz.question)?;
                }
                Ok(())
            }
            Err(err) => self.report_store_error(&err),
        }
    }

    fn show(&mut self, id: QuizId) -> io::Result<()> {
        let Some(quiz) = self.require_quiz(id)? else {
            return Ok(());
        };
        writeln!(
            self.output,
            " [{}]:  {} => {}",
            quiz.id, quiz.question, quiz.answer
        )
    }

    fn add(&mut self) -> io::Result<()> {
        let Some(question) = read_line(&mut self.input, &mut self.output, " Question: ")? else {
            return Ok(());
        };
        let Some(answer) = read_line(&mut self.input, &mut self.output, " Answer: ")? else {
            return Ok(());
        };

        match self.service.add(&question, &answer) {
            Ok(quiz) => writeln!(self.output, " Added quiz with id => {}", quiz.id),
            Err(err) => self.report_store_error(&err),
        }
    }

    fn delete(&mut self, id: QuizId) -> io::Result<()> {
        match self.service.delete_by_id(id) {
            Ok(0) => writeln!(self.output, "Error: no quiz found with id = {id}"),
            Ok(removed) => writeln!(self.output, " Deleted {removed} quiz(zes)"),
            Err(err) => self.report_store_error(&err),
        }
    }

    fn edit(&mut self, id: QuizId) -> io::Result<()> {
        let Some(current) = self.require_quiz(id)? else {
            return Ok(());
        };

        let question_prompt = format!(" Question [{}]: ", current.question);
        let Some(question) = read_line(&mut self.input, &mut self.output, &question_prompt)?
        else {
            return Ok(());
        };
        let answer_prompt = format!(" Answer [{}]: ", current.answer);
        let Some(answer) = read_line(&mut self.input, &mut self.output, &answer_prompt)? else {
            return Ok(());
        };

        let question = keep_if_blank(&question, &current.question);
        let answer = keep_if_blank(&answer, &current.answer);
        match self.service.update(id, question, answer) {
            Ok(outcome) => writeln!(
                self.output,
                " Updated {} quiz(zes)",
                outcome.rows_affected
            ),
            Err(err) => self.report_store_error(&err),
        }
    }

    fn test(&mut self, id: QuizId) -> io::Result<()> {
        let Some(quiz) = self.require_quiz(id)? else {
            return Ok(());
        };
        let prompt = format!("{} > ", quiz.question);
        let Some(answer) = read_line(&mut self.input, &mut self.output, &prompt)? else {
            return Ok(());
        };

        if check_single(&quiz, &answer) {
            writeln!(self.output, "Your answer is correct!")
        } else {
            writeln!(self.output, "Your answer is incorrect!")
        }
    }

    fn play(&mut self) -> io::Result<()> {
        let mut answerer = TerminalAnswerer {
            input: &mut self.input,
            output: &mut self.output,
            io_error: None,
        };
        let result = play(self.service, &mut self.rng, &mut answerer);
        if let Some(err) = answerer.io_error {
            return Err(err);
        }

        match result {
            Ok(outcome) => render_outcome(&mut self.output, &outcome),
            Err(err) => self.report_store_error(&err),
        }
    }

    /// Loads a record, reporting "not found" and store errors itself.
    fn require_quiz(&mut self, id: QuizId) -> io::Result<Option<Quiz>> {
        match self.service.get_by_id(id) {
            Ok(Some(quiz)) => Ok(Some(quiz)),
            Ok(None) => {
                writeln!(self.output, "Error: no quiz found with id = {id}")?;
                Ok(None)
            }
            Err(err) => {
                self.report_store_error(&err)?;
                Ok(None)
            }
        }
    }

    fn report_command_error(&mut self, err: &CommandError) -> io::Result<()> {
        writeln!(self.output, "Error: {err}")
    }

    fn report_store_error(&mut self, err: &RepoError) -> io::Result<()> {
        if err.is_storage() {
            warn!("event=command module=cli status=error error={err}");
        }
        writeln!(self.output, "Error: {err}")
    }
}

/// Feeds a play session from the terminal.
struct TerminalAnswerer<'a, I, O> {
    input: &'a mut I,
    output: &'a mut O,
    io_error: Option<io::Error>,
}

impl<I: BufRead, O: Write> Answerer for TerminalAnswerer<'_, I, O> {
    fn ask(&mut self, quiz: &Quiz) -> Option<String> {
        let prompt = format!("{} > ", quiz.question);
        match read_line(&mut *self.input, &mut *self.output, &prompt) {
            Ok(line) => line,
            Err(err) => {
                self.io_error = Some(err);
                None
            }
        }
    }

    fn on_turn(&mut self, turn: &Turn) {
        let written = match turn {
            Turn::Correct { score } | Turn::Won { score } => {
                writeln!(self.output, "CORRECT: {score} right so far.")
            }
            Turn::Incorrect { .. } => writeln!(self.output, "INCORRECT!"),
        };
        if let Err(err) = written {
            if self.io_error.is_none() {
                self.io_error = Some(err);
            }
        }
    }
}

fn render_outcome(output: &mut impl Write, outcome: &PlayOutcome) -> io::Result<()> {
    match outcome.end {
        PlayEnd::Empty => writeln!(output, "There are no quizzes to play."),
        PlayEnd::Won => writeln!(
            output,
            "Game over. You answered all {} quizzes! Score: {}",
            outcome.total, outcome.score
        ),
        PlayEnd::WrongAnswer | PlayEnd::Abandoned => {
            writeln!(output, "Game over. Score: {}", outcome.score)
        }
    }
}

fn keep_if_blank<'a>(entered: &'a str, current: &'a str) -> &'a str {
    if entered.trim().is_empty() {
        current
    } else {
        entered
    }
}

/// Writes `prompt` and reads one line without its line ending.
///
/// Returns `None` at end of input. Invalid UTF-8 is replaced rather than
/// rejected, so a garbled line becomes an ordinary bad command or answer.
fn read_line<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut bytes = Vec::new();
    if input.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&bytes);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::Repl;
    use quiz_core::db::open_db_in_memory;
    use quiz_core::{QuizService, SqliteQuizRepository};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn run_script(service: &QuizService<SqliteQuizRepository<'_>>, script: &str) -> String {
        let mut output = Vec::new();
        Repl::new(
            service,
            Cursor::new(script.as_bytes()),
            &mut output,
            StdRng::seed_from_u64(1),
        )
        .run()
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn add_show_delete_cycle() {
        let conn = open_db_in_memory().unwrap();
        let service = QuizService::new(SqliteQuizRepository::try_new(&conn).unwrap());

        let out = run_script(
            &service,
            "add\n  Capital de España  \n Madrid \nshow 1\ndelete 1\ndelete 1\nq\n",
        );
        assert!(out.contains("Added quiz with id => 1"));
        assert!(out.contains(" [1]:  Capital de España => Madrid"));
        assert!(out.contains("Deleted 1 quiz(zes)"));
        assert!(out.contains("no quiz found with id = 1"));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        let conn = open_db_in_memory().unwrap();
        let service = QuizService::new(SqliteQuizRepository::try_new(&conn).unwrap());

        let out = run_script(&service, "show\nbogus\nadd\n\nRoma\nlist\n");
        assert!(out.contains("missing id parameter for `show`"));
        assert!(out.contains("unknown command `bogus`"));
        assert!(out.contains("question cannot be empty"));
        assert!(out.ends_with("quiz > \n"));
    }

    #[test]
    fn edit_keeps_current_values_on_blank_input() {
        let conn = open_db_in_memory().unwrap();
        let service = QuizService::new(SqliteQuizRepository::try_new(&conn).unwrap());
        let quiz = service.add("Capital de Portugal", "Oporto").unwrap();

        let out = run_script(&service, &format!("edit {}\n\nLisboa\nq\n", quiz.id));
        assert!(out.contains("Updated 1 quiz(zes)"));
        let loaded = service.get_by_id(quiz.id).unwrap().unwrap();
        assert_eq!(loaded.question, "Capital de Portugal");
        assert_eq!(loaded.answer, "Lisboa");
    }

    #[test]
    fn test_command_checks_one_answer() {
        let conn = open_db_in_memory().unwrap();
        let service = QuizService::new(SqliteQuizRepository::try_new(&conn).unwrap());
        let quiz = service.add("Capital de Italia", "Roma").unwrap();

        let out = run_script(&service, &format!("test {0}\nROMA\ntest {0}\nMilano\n", quiz.id));
        assert!(out.contains("Your answer is correct!"));
        assert!(out.contains("Your answer is incorrect!"));
    }

    #[test]
    fn play_stops_at_first_wrong_answer() {
        let conn = open_db_in_memory().unwrap();
        let service = QuizService::new(SqliteQuizRepository::try_new(&conn).unwrap());
        service.add("Uno", "1").unwrap();
        service.add("Dos", "1").unwrap();

        let out = run_script(&service, "play\n1\nwrong\nq\n");
        assert!(out.contains("CORRECT: 1 right so far."));
        assert!(out.contains("INCORRECT!"));
        assert!(out.contains("Game over. Score: 1"));
    }

    #[test]
    fn invalid_utf8_line_is_reported_and_loop_continues() {
        let conn = open_db_in_memory().unwrap();
        let service = QuizService::new(SqliteQuizRepository::try_new(&conn).unwrap());

        let mut output = Vec::new();
        Repl::new(
            &service,
            Cursor::new(&b"show \xff\nhelp\nq\n"[..]),
            &mut output,
            StdRng::seed_from_u64(1),
        )
        .run()
        .unwrap();

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Error: invalid id"));
        assert!(out.contains("p|play - Answer every quiz in random order."));
    }

    #[test]
    fn credits_lists_authors() {
        let conn = open_db_in_memory().unwrap();
        let service = QuizService::new(SqliteQuizRepository::try_new(&conn).unwrap());

        let out = run_script(&service, "credits\n");
        assert!(out.contains("Authors:"));
        assert!(out.contains(env!("CARGO_PKG_AUTHORS").split(':').next().unwrap()));
    }

    #[test]
    fn play_on_empty_store_reports_nothing_to_play() {
        let conn = open_db_in_memory().unwrap();
        let service = QuizService::new(SqliteQuizRepository::try_new(&conn).unwrap());

        let out = run_script(&service, "p\n");
        assert!(out.contains("There are no quizzes to play."));
    }
}
