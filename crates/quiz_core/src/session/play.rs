//! Play session state machine and its driver.

use crate::model::quiz::Quiz;
use crate::repo::quiz_repo::{QuizRepository, RepoResult};
use crate::service::quiz_service::QuizService;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

/// Result of answering one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Answer matched; the session moves to the next question.
    Correct { score: usize },
    /// Answer did not match; the session is finished.
    Incorrect { score: usize },
    /// Last question answered correctly; the session is finished.
    Won { score: usize },
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayEnd {
    /// The store had no records to ask.
    Empty,
    /// Every question was answered correctly.
    Won,
    /// A wrong answer ended the session.
    WrongAnswer,
    /// Input ran out before the session finished.
    Abandoned,
}

/// Final report of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    pub score: usize,
    pub total: usize,
    pub end: PlayEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Asking(usize),
    Finished(PlayEnd),
}

/// One randomized pass over a set of quizzes.
#[derive(Debug, Clone)]
pub struct PlaySession {
    order: Vec<Quiz>,
    score: usize,
    state: State,
}

impl PlaySession {
    /// Starts a session over `quizzes`, shuffled with `rng`.
    pub fn start<G: Rng + ?Sized>(mut quizzes: Vec<Quiz>, rng: &mut G) -> Self {
        quizzes.shuffle(rng);
        let state = if quizzes.is_empty() {
            State::Finished(PlayEnd::Empty)
        } else {
            State::Asking(0)
        };

        Self {
            order: quizzes,
            score: 0,
            state,
        }
    }

    /// The quiz waiting for an answer, or `None` once finished.
    pub fn current_question(&self) -> Option<&Quiz> {
        match self.state {
            State::Asking(index) => self.order.get(index),
            State::Finished(_) => None,
        }
    }

    /// Scores `given` against the current question and advances.
    ///
    /// Returns `None` when the session is already finished.
    pub fn answer(&mut self, given: &str) -> Option<Turn> {
        let State::Asking(index) = self.state else {
            return None;
        };
        let quiz = self.order.get(index)?;

        if !quiz.is_correct_answer(given) {
            self.state = State::Finished(PlayEnd::WrongAnswer);
            return Some(Turn::Incorrect { score: self.score });
        }

        self.score += 1;
        if index + 1 == self.order.len() {
            self.state = State::Finished(PlayEnd::Won);
            Some(Turn::Won { score: self.score })
        } else {
            self.state = State::Asking(index + 1);
            Some(Turn::Correct { score: self.score })
        }
    }

    /// Ends an unfinished session because no more input will arrive.
    pub fn abandon(&mut self) {
        if let State::Asking(_) = self.state {
            self.state = State::Finished(PlayEnd::Abandoned);
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Finished(_))
    }

    /// Final report; `None` while questions remain.
    pub fn outcome(&self) -> Option<PlayOutcome> {
        match self.state {
            State::Finished(end) => Some(PlayOutcome {
                score: self.score,
                total: self.order.len(),
                end,
            }),
            State::Asking(_) => None,
        }
    }
}

/// Supplies answers to a running session.
///
/// Any `FnMut(&Quiz) -> Option<String>` closure is an answerer that ignores
/// turn results.
pub trait Answerer {
    /// Returns the answer to `quiz`, or `None` when input is exhausted.
    fn ask(&mut self, quiz: &Quiz) -> Option<String>;

    /// Called after every scored answer.
    fn on_turn(&mut self, _turn: &Turn) {}
}

impl<F> Answerer for F
where
    F: FnMut(&Quiz) -> Option<String>,
{
    fn ask(&mut self, quiz: &Quiz) -> Option<String> {
        self(quiz)
    }
}

/// Runs a full session over every stored quiz.
pub fn play<R, G, A>(
    service: &QuizService<R>,
    rng: &mut G,
    answerer: &mut A,
) -> RepoResult<PlayOutcome>
where
    R: QuizRepository,
    G: Rng + ?Sized,
    A: Answerer + ?Sized,
{
    let mut session = PlaySession::start(service.list_all()?, rng);
    info!(
        "event=play_start module=session status=ok total={}",
        session.total()
    );

    loop {
        if let Some(outcome) = session.outcome() {
            info!(
                "event=play_end module=session status=ok end={:?} score={} total={}",
                outcome.end, outcome.score, outcome.total
            );
            return Ok(outcome);
        }

        let answer = match session.current_question() {
            Some(quiz) => answerer.ask(quiz),
            None => None,
        };
        match answer.and_then(|answer| session.answer(&answer)) {
            Some(turn) => answerer.on_turn(&turn),
            None => session.abandon(),
        }
    }
}

/// Checks one answer for a single quiz outside a session.
pub fn check_single(quiz: &Quiz, given: &str) -> bool {
    quiz.is_correct_answer(given)
}
