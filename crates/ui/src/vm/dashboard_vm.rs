use serde::Serialize;

use services::Dashboard;
use tutor_core::model::ProgressSummary;

use crate::vm::agent_vm::AgentPanelVm;
use crate::vm::content_vm::{html_to_text, level_percent, percentage};
use crate::vm::topic_vm::TopicCardVm;

/// Topic cards shown on the dashboard.
pub const DASHBOARD_TOPICS: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatCardVm {
    pub label: &'static str,
    pub value: u32,
    pub suffix: &'static str,
    /// `(total, percentage)` for "x / total" cards.
    pub out_of: Option<(u32, u32)>,
}

impl StatCardVm {
    fn count(label: &'static str, value: u32) -> Self {
        Self {
            label,
            value,
            suffix: "",
            out_of: None,
        }
    }

    fn out_of(label: &'static str, value: u32, total: u32) -> Self {
        Self {
            out_of: Some((total, percentage(value, total))),
            ..Self::count(label, value)
        }
    }
}

#[must_use]
pub fn map_stat_cards(summary: &ProgressSummary, topic_count: usize) -> Vec<StatCardVm> {
    let total = u32::try_from(topic_count).unwrap_or(u32::MAX);
    vec![
        StatCardVm::out_of("Topics Mastered", summary.topics_mastered, total),
        StatCardVm::out_of("In Progress", summary.topics_in_progress, total),
        StatCardVm {
            suffix: "%",
            ..StatCardVm::count("Avg Knowledge", level_percent(summary.average_knowledge))
        },
        StatCardVm::count("Practice Sessions", summary.total_practice_count),
    ]
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardVm {
    pub stats: Vec<StatCardVm>,
    pub topics: Vec<TopicCardVm>,
    pub more_topics: usize,
    pub study_tips: String,
    pub recommendation: Option<TopicCardVm>,
    pub agents: Option<AgentPanelVm>,
}

impl From<&Dashboard> for DashboardVm {
    fn from(dashboard: &Dashboard) -> Self {
        Self {
            stats: map_stat_cards(&dashboard.summary, dashboard.topics.len()),
            topics: dashboard
                .topics
                .iter()
                .take(DASHBOARD_TOPICS)
                .map(TopicCardVm::from)
                .collect(),
            more_topics: dashboard.topics.len().saturating_sub(DASHBOARD_TOPICS),
            study_tips: dashboard
                .tips
                .as_option()
                .map(|tips| html_to_text(&tips.tips))
                .unwrap_or_default(),
            recommendation: dashboard.next_topic.as_option().map(TopicCardVm::from),
            agents: dashboard.agent_status.as_option().map(AgentPanelVm::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::Fetched;
    use tutor_core::model::{StudyTips, Topic, TopicId};

    fn topics(count: u64) -> Vec<Topic> {
        (1..=count)
            .map(|id| Topic {
                id: TopicId::new(id),
                name: format!("Topic {id}"),
                category: "Python".into(),
                difficulty: Default::default(),
                description: "d".repeat(150),
            })
            .collect()
    }

    #[test]
    fn shows_first_six_topics() {
        let dashboard = Dashboard {
            topics: topics(8),
            summary: ProgressSummary {
                topics_mastered: 2,
                topics_in_progress: 3,
                average_knowledge: 0.456,
                total_practice_count: 21,
                ..ProgressSummary::default()
            },
            tips: Fetched::Present(StudyTips {
                tips: "<ul><li>Review loops</li></ul>".into(),
            }),
            next_topic: Fetched::Absent,
            agent_status: Fetched::Errored("down".into()),
        };

        let vm = DashboardVm::from(&dashboard);

        assert_eq!(vm.topics.len(), 6);
        assert_eq!(vm.more_topics, 2);
        assert_eq!(vm.topics[0].description.chars().count(), 103);
        assert_eq!(vm.stats[0].out_of, Some((8, 25)));
        assert_eq!(vm.stats[2].value, 46);
        assert_eq!(vm.stats[2].suffix, "%");
        assert_eq!(vm.stats[3].value, 21);
        assert!(vm.study_tips.contains("Review loops"));
        assert!(vm.recommendation.is_none());
        assert!(vm.agents.is_none());
    }

    #[test]
    fn zero_topics_give_zero_percent() {
        let cards = map_stat_cards(&ProgressSummary::default(), 0);
        assert_eq!(cards[0].out_of, Some((0, 0)));
    }
}
