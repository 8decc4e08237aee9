use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::TopicId;
use crate::model::serde_ext::unit_interval;

/// One multiple-choice question generated by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    /// Option letter ("A".."D") to option text, ordered by letter.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub topic_area: Option<String>,
}

impl QuizQuestion {
    #[must_use]
    pub fn has_option(&self, letter: &str) -> bool {
        self.options.is_empty() || self.options.contains_key(letter)
    }
}

/// A generated quiz for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub topic_id: TopicId,
    #[serde(default)]
    pub topic_name: String,
    /// Difficulty label forwarded with every answer (the backend uses "adaptive").
    #[serde(default = "default_quiz_difficulty")]
    pub difficulty: String,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

fn default_quiz_difficulty() -> String {
    "adaptive".to_string()
}

/// Body of `POST /api/submit-answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSubmission {
    pub topic_id: TopicId,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub difficulty: String,
}

/// Authoritative grading returned for one submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, deserialize_with = "unit_interval")]
    pub new_knowledge_level: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
}
