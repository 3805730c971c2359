use quiz_core::db::open_db_in_memory;
use quiz_core::{play, Answerer, PlayEnd, Quiz, QuizService, SqliteQuizRepository, Turn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;

/// Answers every question correctly and records what happened.
#[derive(Default)]
struct Recorder {
    asked: Vec<Quiz>,
    turns: Vec<Turn>,
}

impl Answerer for Recorder {
    fn ask(&mut self, quiz: &Quiz) -> Option<String> {
        self.asked.push(quiz.clone());
        Some(quiz.answer.to_lowercase())
    }

    fn on_turn(&mut self, turn: &Turn) {
        self.turns.push(turn.clone());
    }
}

fn seeded_service(conn: &Connection) -> QuizService<SqliteQuizRepository<'_>> {
    let service = QuizService::new(SqliteQuizRepository::try_new(conn).unwrap());
    service.initialize().unwrap();
    service
}

#[test]
fn all_correct_answers_win_with_full_score() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);
    let total = service.count().unwrap() as usize;

    let mut recorder = Recorder::default();
    let outcome = play(&service, &mut StdRng::seed_from_u64(42), &mut recorder).unwrap();

    assert_eq!(outcome.end, PlayEnd::Won);
    assert_eq!(outcome.score, total);
    assert_eq!(outcome.total, total);
    assert_eq!(recorder.asked.len(), total);
    assert_eq!(recorder.turns.last(), Some(&Turn::Won { score: total }));
    assert!(recorder.turns[..total - 1]
        .iter()
        .all(|turn| matches!(turn, Turn::Correct { .. })));
}

#[test]
fn kth_wrong_answer_stops_with_score_k_minus_one() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    for k in 1..=3usize {
        let mut asked = 0usize;
        let outcome = play(
            &service,
            &mut StdRng::seed_from_u64(k as u64),
            &mut |quiz: &Quiz| {
                asked += 1;
                if asked == k {
                    Some("respuesta equivocada".to_string())
                } else {
                    Some(quiz.answer.clone())
                }
            },
        )
        .unwrap();

        assert_eq!(outcome.end, PlayEnd::WrongAnswer);
        assert_eq!(outcome.score, k - 1);
        assert_eq!(asked, k, "no question may follow the wrong answer");
    }
}

#[test]
fn empty_store_ends_immediately() {
    let conn = open_db_in_memory().unwrap();
    let service = QuizService::new(SqliteQuizRepository::try_new(&conn).unwrap());

    let outcome = play(
        &service,
        &mut StdRng::seed_from_u64(0),
        &mut |_: &Quiz| -> Option<String> { panic!("nothing should be asked") },
    )
    .unwrap();

    assert_eq!(outcome.end, PlayEnd::Empty);
    assert_eq!(outcome.score, 0);
}

#[test]
fn accent_mismatch_counts_as_wrong() {
    let conn = open_db_in_memory().unwrap();
    let service = QuizService::new(SqliteQuizRepository::try_new(&conn).unwrap());
    service.add("Capital de Italia", "Roma").unwrap();
    service.add("Capital de Francia", "París").unwrap();

    let outcome = play(
        &service,
        &mut StdRng::seed_from_u64(11),
        &mut |quiz: &Quiz| {
            if quiz.answer == "París" {
                Some("PARIS".to_string())
            } else {
                Some("roma".to_string())
            }
        },
    )
    .unwrap();

    assert_eq!(outcome.end, PlayEnd::WrongAnswer);
    assert!(outcome.score <= 1);
}

#[test]
fn running_out_of_input_abandons_session() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let mut remaining = 2usize;
    let outcome = play(
        &service,
        &mut StdRng::seed_from_u64(3),
        &mut |quiz: &Quiz| {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            Some(quiz.answer.clone())
        },
    )
    .unwrap();

    assert_eq!(outcome.end, PlayEnd::Abandoned);
    assert_eq!(outcome.score, 2);
}
