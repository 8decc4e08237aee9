use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use services::{
    Endpoint, InMemoryTutorApi, Notice, NoticeLevel, Notifier, QuizService, QuizServiceError,
    QuizSession, RecordingNotifier,
};
use tutor_core::model::{Difficulty, Quiz, QuizQuestion, Topic, TopicId};
use tutor_core::quiz::{Grading, QuizFlow, QuizFlowError};

fn topic() -> Topic {
    Topic {
        id: TopicId::new(3),
        name: "Functions".into(),
        category: "Python".into(),
        difficulty: Difficulty::Beginner,
        description: "Defining and calling functions".into(),
    }
}

fn quiz(count: usize) -> Quiz {
    let questions = (0..count)
        .map(|i| QuizQuestion {
            question: format!("Question {i}?"),
            options: ["A", "B", "C", "D"]
                .into_iter()
                .map(|letter| (letter.to_string(), format!("Option {letter}")))
                .collect::<BTreeMap<_, _>>(),
            correct_answer: "A".into(),
            explanation: format!("Because of rule {i}."),
            difficulty: Some("easy".into()),
            topic_area: None,
        })
        .collect();
    Quiz {
        topic_id: TopicId::new(3),
        topic_name: "Functions".into(),
        difficulty: "adaptive".into(),
        questions,
    }
}

fn setup(count: usize) -> (InMemoryTutorApi, Arc<RecordingNotifier>, QuizService) {
    let api = InMemoryTutorApi::new().with_topics(vec![topic()]);
    api.set_quiz(quiz(count));
    let notifier = Arc::new(RecordingNotifier::new());
    let service = QuizService::new(Arc::new(api.clone()), notifier.clone());
    (api, notifier, service)
}

#[tokio::test]
async fn full_quiz_scores_locally() {
    let (api, notifier, service) = setup(4);
    let mut session = QuizSession::new();
    service.start(&mut session, topic()).await.unwrap();

    for (index, choice) in ["A", "A", "A", "B"].into_iter().enumerate() {
        service.answer(&mut session, index, choice).unwrap();
    }
    let results = service.submit(&mut session).await.unwrap();

    assert_eq!(results.correct, 3);
    assert_eq!(results.total, 4);
    assert_eq!(results.score, 75.0);
    assert!(matches!(session.flow(), QuizFlow::Submitted { .. }));
    assert_eq!(api.submissions().len(), 4);
    assert!(notifier.errors().is_empty());
}

#[tokio::test]
async fn answers_stay_pending_until_graded() {
    let (api, _notifier, service) = setup(2);
    let mut session = QuizSession::new();
    service.start(&mut session, topic()).await.unwrap();

    api.pause_gradings();
    service.answer(&mut session, 0, "B").unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    session.apply_arrived();

    let attempt = session.flow().attempt().unwrap();
    assert_eq!(attempt.answer(0).unwrap().grading(), &Grading::Pending);
    assert_eq!(attempt.answer(0).unwrap().is_correct(), None);

    let err = service.answer(&mut session, 0, "A").unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Flow(QuizFlowError::AlreadyAnswered { index: 0 })
    ));

    api.release_gradings();
    service.wait_for_gradings(&mut session).await;
    let record = session.flow().attempt().unwrap().answer(0).unwrap().clone();
    assert_eq!(record.is_correct(), Some(false));
    assert_eq!(record.user_answer, "B");
}

#[tokio::test]
async fn submit_with_unanswered_questions_is_refused() {
    let (_api, notifier, service) = setup(3);
    let mut session = QuizSession::new();
    service.start(&mut session, topic()).await.unwrap();
    service.answer(&mut session, 0, "A").unwrap();

    let err = service.submit(&mut session).await.unwrap_err();

    assert!(matches!(
        err,
        QuizServiceError::Flow(QuizFlowError::NotAllAnswered {
            answered: 1,
            total: 3
        })
    ));
    assert_eq!(
        notifier.errors(),
        vec!["Please answer all questions (1/3)".to_string()]
    );
    assert!(matches!(session.flow(), QuizFlow::InProgress { .. }));
}

#[tokio::test]
async fn failed_submission_counts_as_incorrect() {
    let (api, notifier, service) = setup(2);
    let mut session = QuizSession::new();
    service.start(&mut session, topic()).await.unwrap();

    api.fail(Endpoint::SubmitAnswer, StatusCode::INTERNAL_SERVER_ERROR, "Grader crashed");
    service.answer(&mut session, 0, "A").unwrap();
    service.wait_for_gradings(&mut session).await;
    api.clear_failure(Endpoint::SubmitAnswer);
    service.answer(&mut session, 1, "A").unwrap();

    let results = service.submit(&mut session).await.unwrap();

    assert_eq!(results.correct, 1);
    assert_eq!(results.score, 50.0);
    assert_eq!(notifier.errors(), vec!["Grader crashed".to_string()]);
}

struct PanicOnError;

impl Notifier for PanicOnError {
    fn notify(&self, notice: Notice) {
        if notice.level == NoticeLevel::Error {
            panic!("notifier broke on: {}", notice.message);
        }
    }
}

#[tokio::test]
async fn crashed_grading_task_does_not_block_submit() {
    let api = InMemoryTutorApi::new().with_topics(vec![topic()]);
    api.set_quiz(quiz(2));
    let service = QuizService::new(Arc::new(api.clone()), Arc::new(PanicOnError));
    let mut session = QuizSession::new();
    service.start(&mut session, topic()).await.unwrap();

    service.answer(&mut session, 0, "A").unwrap();
    service.wait_for_gradings(&mut session).await;
    api.fail(Endpoint::SubmitAnswer, StatusCode::INTERNAL_SERVER_ERROR, "Grader crashed");
    service.answer(&mut session, 1, "A").unwrap();

    let results = tokio::time::timeout(Duration::from_secs(5), service.submit(&mut session))
        .await
        .expect("submit should not hang")
        .unwrap();

    assert_eq!(results.correct, 1);
    assert_eq!(results.total, 2);
    assert!(matches!(session.flow(), QuizFlow::Submitted { .. }));
}

#[tokio::test]
async fn retake_generates_a_fresh_quiz() {
    let (api, _notifier, service) = setup(1);
    let mut session = QuizSession::new();
    service.start(&mut session, topic()).await.unwrap();
    service.answer(&mut session, 0, "A").unwrap();
    service.submit(&mut session).await.unwrap();

    service.retake(&mut session).await.unwrap();

    let attempt = session.flow().attempt().unwrap();
    assert_eq!(attempt.answered_count(), 0);
    assert_eq!(api.calls(Endpoint::GenerateQuiz), 2);
}

#[tokio::test]
async fn leaving_mid_quiz_drops_late_gradings() {
    let (api, _notifier, service) = setup(1);
    let mut session = QuizSession::new();
    service.start(&mut session, topic()).await.unwrap();

    api.pause_gradings();
    service.answer(&mut session, 0, "A").unwrap();
    service.back_to_topics(&mut session);
    service.start(&mut session, topic()).await.unwrap();
    api.release_gradings();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(session.apply_arrived(), 0);
    assert!(session.flow().attempt().unwrap().answer(0).is_none());
}
