use std::sync::Arc;

use chrono::Duration;
use services::{InMemoryTutorApi, ProgressService, RecordingNotifier};
use tutor_core::model::{Difficulty, KnowledgeState, Topic, TopicId};
use tutor_core::time::fixed_now;
use ui::vm::{MasteryBand, ProgressVm};

fn topic(id: u64, name: &str) -> Topic {
    Topic {
        id: TopicId::new(id),
        name: name.into(),
        category: "Python".into(),
        difficulty: Difficulty::Beginner,
        description: String::new(),
    }
}

fn state(level: f64, count: u32, days_ago: i64) -> KnowledgeState {
    KnowledgeState {
        knowledge_level: level,
        confidence: 0.7,
        practice_count: count,
        last_practiced: Some(fixed_now() - Duration::days(days_ago)),
    }
}

#[tokio::test]
async fn progress_page_from_backend_data() {
    let api = InMemoryTutorApi::new().with_topics(vec![
        topic(1, "Variables"),
        topic(2, "Loops"),
        topic(3, "Functions"),
        topic(4, "Classes"),
    ]);
    api.set_knowledge_state(TopicId::new(1), state(0.85, 6, 0));
    api.set_knowledge_state(TopicId::new(3), state(0.55, 2, 3));
    api.fail_knowledge_state(TopicId::new(4));
    let service = ProgressService::new(Arc::new(api), Arc::new(RecordingNotifier::new()));

    let report = service.load().await.unwrap();
    let vm = ProgressVm::new(&report, fixed_now());

    let chart: Vec<_> = vm.chart.iter().map(|r| (r.full_name.as_str(), r.band)).collect();
    assert_eq!(
        chart,
        vec![
            ("Variables", MasteryBand::Mastered),
            ("Functions", MasteryBand::Learning),
        ]
    );

    let timeline: Vec<_> = vm
        .timeline
        .iter()
        .map(|e| (e.name.as_str(), e.last_practiced.clone()))
        .collect();
    assert_eq!(
        timeline,
        vec![
            ("Variables", Some("Today".to_string())),
            ("Functions", Some("3 days ago".to_string())),
        ]
    );
}
