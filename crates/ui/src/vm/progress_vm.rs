use chrono::{DateTime, Utc};
use serde::Serialize;

use services::ProgressReport;
use tutor_core::model::{RankedTopic, TopicId};

use crate::vm::chart_vm::{ChartRowVm, map_chart_rows};
use crate::vm::content_vm::level_percent;
use crate::vm::dashboard_vm::{StatCardVm, map_stat_cards};
use crate::vm::timeline_vm::{TimelineEntryVm, map_timeline};

pub const NO_WEAK_TOPICS: &str = "No weak topics - great job!";
pub const NO_STRONG_TOPICS: &str = "Start learning to build strong topics";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankedTopicVm {
    pub id: TopicId,
    pub name: String,
    pub level: u32,
}

impl From<&RankedTopic> for RankedTopicVm {
    fn from(topic: &RankedTopic) -> Self {
        Self {
            id: topic.id,
            name: topic.name.clone(),
            level: level_percent(topic.level),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgressVm {
    pub stats: Vec<StatCardVm>,
    pub chart: Vec<ChartRowVm>,
    pub weak_topics: Vec<RankedTopicVm>,
    pub strong_topics: Vec<RankedTopicVm>,
    pub timeline: Vec<TimelineEntryVm>,
}

impl ProgressVm {
    /// Rankings are shown exactly as the backend ordered them.
    #[must_use]
    pub fn new(report: &ProgressReport, now: DateTime<Utc>) -> Self {
        let summary = &report.summary;
        Self {
            stats: map_stat_cards(summary, report.topics.len()),
            chart: map_chart_rows(&report.topics),
            weak_topics: summary.weak_topics.iter().map(RankedTopicVm::from).collect(),
            strong_topics: summary
                .strong_topics
                .iter()
                .map(RankedTopicVm::from)
                .collect(),
            timeline: map_timeline(&report.topics, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::model::ProgressSummary;
    use tutor_core::time::fixed_now;

    #[test]
    fn rankings_keep_backend_order() {
        let report = ProgressReport {
            summary: ProgressSummary {
                weak_topics: vec![
                    RankedTopic {
                        id: TopicId::new(4),
                        name: "Recursion".into(),
                        level: 0.214,
                    },
                    RankedTopic {
                        id: TopicId::new(2),
                        name: "Loops".into(),
                        level: 0.1,
                    },
                ],
                ..ProgressSummary::default()
            },
            topics: Vec::new(),
        };

        let vm = ProgressVm::new(&report, fixed_now());

        assert_eq!(vm.weak_topics[0].name, "Recursion");
        assert_eq!(vm.weak_topics[0].level, 21);
        assert_eq!(vm.weak_topics[1].level, 10);
        assert!(vm.strong_topics.is_empty());
        assert!(vm.chart.is_empty());
        assert!(vm.timeline.is_empty());
    }
}
