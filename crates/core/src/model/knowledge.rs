use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::TopicId;
use crate::model::serde_ext::{count_or_zero, optional_timestamp, unit_interval};
use crate::model::topic::Topic;

//
// ─── KNOWLEDGE STATE ──────────────────────────────────────────────────────────
//

/// Backend estimate of how well the current user knows one topic.
///
/// The client never writes this; it only changes through quiz/practice
/// submissions handled by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeState {
    #[serde(default, deserialize_with = "unit_interval")]
    pub knowledge_level: f64,
    #[serde(default, deserialize_with = "unit_interval")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub practice_count: u32,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub last_practiced: Option<DateTime<Utc>>,
}

impl KnowledgeState {
    /// Stand-in used when a topic's state could not be fetched.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            knowledge_level: 0.0,
            confidence: 0.0,
            practice_count: 0,
            last_practiced: None,
        }
    }

    #[must_use]
    pub fn is_practiced(&self) -> bool {
        self.practice_count > 0
    }
}

impl Default for KnowledgeState {
    fn default() -> Self {
        Self::zero()
    }
}

//
// ─── MERGED VIEW ──────────────────────────────────────────────────────────────
//

/// Where a merged entry's knowledge state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSource {
    Fetched,
    /// The per-topic fetch failed and zeros were substituted.
    Defaulted,
}

/// Client-side join of a topic and its knowledge state.
///
/// Rebuilt on every load; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTopicProgress {
    topic: Topic,
    state: KnowledgeState,
    source: StateSource,
}

impl MergedTopicProgress {
    #[must_use]
    pub fn fetched(topic: Topic, state: KnowledgeState) -> Self {
        Self {
            topic,
            state,
            source: StateSource::Fetched,
        }
    }

    #[must_use]
    pub fn defaulted(topic: Topic) -> Self {
        Self {
            topic,
            state: KnowledgeState::zero(),
            source: StateSource::Defaulted,
        }
    }

    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    #[must_use]
    pub fn topic_id(&self) -> TopicId {
        self.topic.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.topic.name
    }

    #[must_use]
    pub fn state(&self) -> &KnowledgeState {
        &self.state
    }

    #[must_use]
    pub fn source(&self) -> StateSource {
        self.source
    }

    #[must_use]
    pub fn knowledge_level(&self) -> f64 {
        self.state.knowledge_level
    }

    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.state.confidence
    }

    #[must_use]
    pub fn practice_count(&self) -> u32 {
        self.state.practice_count
    }

    #[must_use]
    pub fn last_practiced(&self) -> Option<DateTime<Utc>> {
        self.state.last_practiced
    }
}
