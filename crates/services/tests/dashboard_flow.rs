use std::sync::Arc;

use reqwest::StatusCode;
use services::{DashboardService, Endpoint, Fetched, InMemoryTutorApi, RecordingNotifier};
use tutor_core::model::{Difficulty, ProgressSummary, Topic, TopicId};

fn topics() -> Vec<Topic> {
    (1..=3)
        .map(|id| Topic {
            id: TopicId::new(id),
            name: format!("Topic {id}"),
            category: "Python".into(),
            difficulty: Difficulty::Intermediate,
            description: String::new(),
        })
        .collect()
}

#[tokio::test]
async fn optional_panels_degrade_without_notices() {
    let api = InMemoryTutorApi::new().with_topics(topics());
    api.set_study_tips("<p>Practice daily</p>");
    api.set_summary(ProgressSummary {
        topics_mastered: 1,
        topics_in_progress: 2,
        ..ProgressSummary::default()
    });
    api.fail(Endpoint::AgentStatus, StatusCode::INTERNAL_SERVER_ERROR, "Agents offline");
    let notifier = Arc::new(RecordingNotifier::new());
    let service = DashboardService::new(Arc::new(api.clone()), notifier.clone());

    let dashboard = service.load().await.unwrap();

    assert_eq!(dashboard.topics.len(), 3);
    assert_eq!(dashboard.summary.topics_mastered, 1);
    assert_eq!(dashboard.tips.as_option().unwrap().tips, "<p>Practice daily</p>");
    assert_eq!(dashboard.next_topic, Fetched::Absent);
    assert_eq!(dashboard.agent_status, Fetched::Errored("Agents offline".into()));
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn recommendation_is_present_when_available() {
    let api = InMemoryTutorApi::new().with_topics(topics());
    api.set_next_topic(topics().into_iter().nth(1));
    let service = DashboardService::new(Arc::new(api), Arc::new(RecordingNotifier::new()));

    let dashboard = service.load().await.unwrap();

    let next = dashboard.next_topic.as_option().unwrap();
    assert_eq!(next.name, "Topic 2");
}

#[tokio::test]
async fn study_tips_failure_is_absorbed() {
    let api = InMemoryTutorApi::new().with_topics(topics());
    api.fail(Endpoint::StudyTips, StatusCode::SERVICE_UNAVAILABLE, "Tips unavailable");
    let notifier = Arc::new(RecordingNotifier::new());
    let service = DashboardService::new(Arc::new(api), notifier.clone());

    let dashboard = service.load().await.unwrap();

    assert_eq!(dashboard.tips, Fetched::Errored("Tips unavailable".into()));
    assert_eq!(dashboard.topics.len(), 3);
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn required_failure_notifies_once() {
    let api = InMemoryTutorApi::new().with_topics(topics());
    api.fail(Endpoint::ProgressSummary, StatusCode::SERVICE_UNAVAILABLE, "Summary unavailable");
    let notifier = Arc::new(RecordingNotifier::new());
    let service = DashboardService::new(Arc::new(api.clone()), notifier.clone());

    assert!(service.load().await.is_err());
    assert_eq!(notifier.errors(), vec!["Summary unavailable".to_string()]);
    assert_eq!(api.calls(Endpoint::NextTopic), 0);
}
