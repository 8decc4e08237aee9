use serde::Serialize;

use tutor_core::model::Difficulty;

/// Palette shared by badges, bars and grades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
    Slate,
}

impl Tone {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Green => "green",
            Tone::Blue => "blue",
            Tone::Yellow => "yellow",
            Tone::Orange => "orange",
            Tone::Red => "red",
            Tone::Slate => "slate",
        }
    }
}

/// Mastery band of a knowledge percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryBand {
    Mastered,
    Good,
    Learning,
    Beginner,
}

impl MasteryBand {
    #[must_use]
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            80.. => MasteryBand::Mastered,
            60..=79 => MasteryBand::Good,
            40..=59 => MasteryBand::Learning,
            _ => MasteryBand::Beginner,
        }
    }

    /// Band for an unrounded knowledge level in `[0, 1]`.
    #[must_use]
    pub fn from_level(level: f64) -> Self {
        if level >= 0.8 {
            MasteryBand::Mastered
        } else if level >= 0.6 {
            MasteryBand::Good
        } else if level >= 0.4 {
            MasteryBand::Learning
        } else {
            MasteryBand::Beginner
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MasteryBand::Mastered => "Mastered",
            MasteryBand::Good => "Good",
            MasteryBand::Learning => "Learning",
            MasteryBand::Beginner => "Beginner",
        }
    }

    #[must_use]
    pub fn tone(self) -> Tone {
        match self {
            MasteryBand::Mastered => Tone::Green,
            MasteryBand::Good => Tone::Blue,
            MasteryBand::Learning => Tone::Orange,
            MasteryBand::Beginner => Tone::Red,
        }
    }

    /// Bar fill used by the knowledge chart.
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            MasteryBand::Mastered => "#10b981",
            MasteryBand::Good => "#0ea5e9",
            MasteryBand::Learning => "#f59e0b",
            MasteryBand::Beginner => "#ef4444",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DifficultyBadgeVm {
    pub label: &'static str,
    pub tone: Tone,
}

impl From<Difficulty> for DifficultyBadgeVm {
    fn from(difficulty: Difficulty) -> Self {
        let tier = difficulty.display_tier();
        let tone = match tier {
            Difficulty::Intermediate => Tone::Yellow,
            Difficulty::Advanced => Tone::Red,
            _ => Tone::Green,
        };
        Self {
            label: tier.as_str(),
            tone,
        }
    }
}
