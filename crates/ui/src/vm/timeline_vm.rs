use chrono::{DateTime, Utc};
use serde::Serialize;

use tutor_core::model::{MergedTopicProgress, TopicId};

use crate::vm::badge::MasteryBand;
use crate::vm::content_vm::level_percent;
use crate::vm::time_fmt::relative_time;

pub const TIMELINE_LEN: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineEntryVm {
    pub topic_id: TopicId,
    pub name: String,
    pub category: String,
    pub knowledge: u32,
    pub practice_count: u32,
    pub last_practiced: Option<String>,
    pub band: MasteryBand,
}

/// The most recently practiced topics, newest first.
///
/// Practiced topics without a timestamp sort after all dated ones.
#[must_use]
pub fn map_timeline(progress: &[MergedTopicProgress], now: DateTime<Utc>) -> Vec<TimelineEntryVm> {
    let mut practiced: Vec<&MergedTopicProgress> = progress
        .iter()
        .filter(|topic| topic.practice_count() > 0)
        .collect();
    // `None < Some(_)`, so reversing puts undated entries last.
    practiced.sort_by(|a, b| b.last_practiced().cmp(&a.last_practiced()));

    practiced
        .into_iter()
        .take(TIMELINE_LEN)
        .map(|topic| {
            let knowledge = level_percent(topic.knowledge_level());
            TimelineEntryVm {
                topic_id: topic.topic_id(),
                name: topic.name().to_string(),
                category: topic.topic().category.clone(),
                knowledge,
                practice_count: topic.practice_count(),
                last_practiced: topic.last_practiced().map(|then| relative_time(now, then)),
                band: MasteryBand::from_level(topic.knowledge_level()),
            }
        })
        .collect()
}
