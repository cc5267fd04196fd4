use quiz_store::error::Error;
use quiz_store::model::{AnswerKind, AnswerSubmission, MediaUpload, PhoneRegistration};
use quiz_store::store::QuizStore;

/// Seed every collection, attempt a reset with the wrong password and check
/// nothing was touched, then reset with the right password and check the
/// stats report every count at zero
#[test]
fn bulk_reset_lifecycle() {
    let mut store = QuizStore::new("RESET_ALL_DATA");

    let first = store
        .create_question("What is the capital of France?".into(), None)
        .unwrap();
    let second = store
        .create_question("What is the capital of Spain?".into(), Some("Paris".into()))
        .unwrap();

    // Posting the second question revealed the first one's answer.
    assert_eq!(store.question(first.id).unwrap().answer.as_deref(), Some("Paris"));
    assert!(store.question(second.id).unwrap().answer.is_none());

    store
        .submit_answer(AnswerSubmission {
            question_id: second.id,
            student_pin: "1234".into(),
            student_name: "Asha".into(),
            answer: "Madrid".into(),
            kind: AnswerKind::Question,
        })
        .unwrap();
    store
        .upload_media(MediaUpload {
            kind: "audio".into(),
            data: "c29tZSBhdWRpbw==".into(),
            file_name: "recording.mp3".into(),
            opinion: "Worth a listen".into(),
        })
        .unwrap();
    store
        .register_phone(PhoneRegistration {
            pin: "1234".into(),
            name: "Asha".into(),
            phone: "9876543210".into(),
        })
        .unwrap();

    let stats = store.stats();
    assert_eq!(stats.total_questions, 2);
    assert_eq!(stats.total_answers, 1);
    assert_eq!(stats.total_media, 1);
    assert_eq!(stats.total_students, 1);

    let err = store.reset_all("RESET_SOME_DATA").unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let stats = store.stats();
    assert_eq!(stats.total_questions, 2);
    assert_eq!(stats.total_answers, 1);
    assert_eq!(stats.total_media, 1);
    assert_eq!(stats.total_students, 1);

    store.reset_all("RESET_ALL_DATA").unwrap();

    let stats = store.stats();
    assert_eq!(stats.total_questions, 0);
    assert_eq!(stats.total_answers, 0);
    assert_eq!(stats.total_media, 0);
    assert_eq!(stats.total_students, 0);
    assert_eq!(stats.unique_students, 0);
    assert_eq!(stats.question_answers, 0);
    assert_eq!(stats.media_answers, 0);
    assert!(stats.latest_question_date.is_none());
    assert!(stats.latest_media_date.is_none());

    // The store is usable again after a reset.
    store
        .create_question("What is the capital of Italy?".into(), None)
        .unwrap();
    assert_eq!(store.questions().len(), 1);
}
