use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::TopicId;

/// Difficulty tier of a topic as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    /// Any tier string this client does not know about.
    #[serde(other)]
    Unknown,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Unknown => "unknown",
        }
    }

    /// Tier used for display styling; unknown tiers are shown as beginner.
    #[must_use]
    pub fn display_tier(self) -> Self {
        match self {
            Difficulty::Unknown => Difficulty::Beginner,
            other => other,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of learnable subject matter. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: String,
}
