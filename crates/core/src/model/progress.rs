use serde::{Deserialize, Serialize};

use crate::model::ids::TopicId;
use crate::model::serde_ext::{count_or_zero, unit_interval};

/// A topic entry in the backend's weak/strong rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTopic {
    pub id: TopicId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "unit_interval")]
    pub level: f64,
}

/// Aggregate progress computed server-side.
///
/// The rankings are displayed as-is; the client never recomputes them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressSummary {
    #[serde(default, deserialize_with = "count_or_zero")]
    pub topics_mastered: u32,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub topics_in_progress: u32,
    #[serde(default, deserialize_with = "unit_interval")]
    pub average_knowledge: f64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub total_practice_count: u32,
    #[serde(default)]
    pub weak_topics: Vec<RankedTopic>,
    #[serde(default)]
    pub strong_topics: Vec<RankedTopic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_zero() {
        let summary: ProgressSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary, ProgressSummary::default());
    }

    #[test]
    fn deserializes_rankings_in_backend_order() {
        let json = r#"{
            "average_knowledge": 0.42,
            "topics_mastered": 1,
            "topics_in_progress": 2,
            "total_practice_count": 17,
            "weak_topics": [{"id": 3, "name": "Recursion", "level": 0.1},
                            {"id": 5, "name": "Classes", "level": 0.0}],
            "strong_topics": [{"id": 1, "name": "Variables", "level": 0.91}]
        }"#;
        let summary: ProgressSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.topics_in_progress, 2);
        assert_eq!(summary.weak_topics.len(), 2);
        assert_eq!(summary.weak_topics[0].name, "Recursion");
        assert_eq!(summary.strong_topics[0].id, TopicId::new(1));
    }
}
