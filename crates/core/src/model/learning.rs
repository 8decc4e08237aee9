use serde::{Deserialize, Serialize};

use crate::model::serde_ext::unit_interval;

/// A generated lesson. `content` is backend-rendered HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub content: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "unit_interval")]
    pub knowledge_level: f64,
    #[serde(default)]
    pub topic_name: String,
    #[serde(default)]
    pub agent_metadata: serde_json::Value,
}

/// Outcome of running practice code on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCheck {
    pub success: bool,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error: bool,
}

impl CodeCheck {
    /// Ran without the backend flagging an error.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.success && !self.error
    }
}

/// Body of `POST /api/ask-challenge-hint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintRequest {
    pub question: String,
    pub challenge: String,
    pub attempt_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub hint_level: Option<serde_json::Value>,
    #[serde(default)]
    pub agent: Option<String>,
}

/// Personalized study tips; `tips` is backend-rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudyTips {
    #[serde(default)]
    pub tips: String,
}
