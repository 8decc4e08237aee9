use serde::Serialize;

use tutor_core::model::{Topic, TopicId};

use crate::vm::badge::DifficultyBadgeVm;
use crate::vm::content_vm::{DEFAULT_TRUNCATE_LEN, truncate_text};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopicCardVm {
    pub id: TopicId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub difficulty: DifficultyBadgeVm,
}

impl From<&Topic> for TopicCardVm {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id,
            name: topic.name.clone(),
            category: topic.category.clone(),
            description: truncate_text(&topic.description, DEFAULT_TRUNCATE_LEN),
            difficulty: DifficultyBadgeVm::from(topic.difficulty),
        }
    }
}

#[must_use]
pub fn map_topic_cards(topics: &[Topic]) -> Vec<TopicCardVm> {
    topics.iter().map(TopicCardVm::from).collect()
}
