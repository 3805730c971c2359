use quiz_core::{check_single, QuizDraft, QuizId};

#[test]
fn quiz_serializes_with_plain_id() {
    let quiz = QuizDraft::new("Capital de Italia", "Roma")
        .unwrap()
        .into_quiz(QuizId(3));

    let json = serde_json::to_value(&quiz).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["question"], "Capital de Italia");
    assert_eq!(json["answer"], "Roma");
}

#[test]
fn single_check_uses_case_insensitive_match() {
    let quiz = QuizDraft::new("Oro parece, Plata no es, que es?", "Plátano")
        .unwrap()
        .into_quiz(QuizId(5));

    assert!(check_single(&quiz, "PLÁTANO"));
    assert!(!check_single(&quiz, "platano"));
}
