use std::sync::Arc;

use reqwest::StatusCode;
use services::{Endpoint, InMemoryTutorApi, ProgressService, RecordingNotifier};
use tutor_core::model::{Difficulty, KnowledgeState, StateSource, Topic, TopicId};
use tutor_core::time::fixed_now;

fn topic(id: u64, name: &str) -> Topic {
    Topic {
        id: TopicId::new(id),
        name: name.into(),
        category: "Python Basics".into(),
        difficulty: Difficulty::Beginner,
        description: String::new(),
    }
}

#[tokio::test]
async fn failing_knowledge_state_is_absorbed() {
    let api = InMemoryTutorApi::new().with_topics(vec![topic(1, "Variables"), topic(2, "Loops")]);
    api.set_knowledge_state(
        TopicId::new(1),
        KnowledgeState {
            knowledge_level: 0.8,
            confidence: 0.6,
            practice_count: 4,
            last_practiced: Some(fixed_now()),
        },
    );
    api.fail_knowledge_state(TopicId::new(2));
    let notifier = Arc::new(RecordingNotifier::new());
    let service = ProgressService::new(Arc::new(api.clone()), notifier.clone());

    let report = service.load().await.unwrap();

    assert_eq!(report.topics.len(), 2);
    assert_eq!(report.topics[0].name(), "Variables");
    assert_eq!(report.topics[0].knowledge_level(), 0.8);
    assert_eq!(report.topics[0].source(), StateSource::Fetched);
    assert_eq!(report.topics[1].name(), "Loops");
    assert_eq!(report.topics[1].knowledge_level(), 0.0);
    assert_eq!(report.topics[1].practice_count(), 0);
    assert_eq!(report.topics[1].source(), StateSource::Defaulted);
    assert!(notifier.notices().is_empty());
    assert_eq!(api.calls(Endpoint::KnowledgeState), 2);
}

#[tokio::test]
async fn topic_list_failure_is_fatal_and_notified_once() {
    let api = InMemoryTutorApi::new().with_topics(vec![topic(1, "Variables")]);
    api.fail(Endpoint::Topics, StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    let notifier = Arc::new(RecordingNotifier::new());
    let service = ProgressService::new(Arc::new(api.clone()), notifier.clone());

    let err = service.load().await.unwrap_err();

    assert_eq!(err.user_message(), "Database unavailable");
    assert_eq!(notifier.errors(), vec!["Database unavailable".to_string()]);
    assert_eq!(api.calls(Endpoint::KnowledgeState), 0);
}
