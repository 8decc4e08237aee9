use serde::Serialize;

use tutor_core::quiz::{AnswerRecord, QuizResults};

use crate::vm::badge::Tone;

/// Minimum score that counts as a pass.
pub const PASS_SCORE: f64 = 70.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub letter: &'static str,
    pub message: &'static str,
    pub tone: Tone,
}

#[must_use]
pub fn grade_for(score: f64) -> Grade {
    let (letter, message, tone) = if score >= 90.0 {
        ("A+", "Outstanding!", Tone::Green)
    } else if score >= 80.0 {
        ("A", "Excellent!", Tone::Green)
    } else if score >= 70.0 {
        ("B", "Good Job!", Tone::Blue)
    } else if score >= 60.0 {
        ("C", "Keep Practicing!", Tone::Yellow)
    } else {
        ("F", "Try Again!", Tone::Red)
    };
    Grade {
        letter,
        message,
        tone,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerReviewVm {
    pub number: usize,
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub correct: bool,
    pub explanation: String,
}

impl AnswerReviewVm {
    fn new(index: usize, record: &AnswerRecord) -> Self {
        Self {
            number: index + 1,
            question: record.question.clone(),
            your_answer: record.user_answer.clone(),
            correct_answer: record.correct_answer.clone(),
            correct: record.is_correct() == Some(true),
            explanation: record.explanation().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultsVm {
    pub topic_name: String,
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    pub score: u32,
    pub passed: bool,
    pub grade: Grade,
    pub summary_line: String,
    pub review: Vec<AnswerReviewVm>,
}

impl From<&QuizResults> for ResultsVm {
    fn from(results: &QuizResults) -> Self {
        Self {
            topic_name: results.topic_name.clone(),
            correct: results.correct,
            incorrect: results.incorrect(),
            total: results.total,
            score: results.score.round() as u32,
            passed: results.score >= PASS_SCORE,
            grade: grade_for(results.score),
            summary_line: format!(
                "You scored {} out of {} questions correctly",
                results.correct, results.total
            ),
            review: results
                .answers
                .iter()
                .map(|(index, record)| AnswerReviewVm::new(*index, record))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tutor_core::model::{AnswerResult, Quiz, QuizQuestion, TopicId};
    use tutor_core::quiz::{GradingOutcome, QuizAttempt};

    #[test]
    fn grade_boundaries() {
        assert_eq!(grade_for(100.0).letter, "A+");
        assert_eq!(grade_for(90.0).letter, "A+");
        assert_eq!(grade_for(89.9).letter, "A");
        assert_eq!(grade_for(80.0).message, "Excellent!");
        assert_eq!(grade_for(70.0).letter, "B");
        assert_eq!(grade_for(69.0).letter, "C");
        assert_eq!(grade_for(60.0).message, "Keep Practicing!");
        assert_eq!(grade_for(59.0).letter, "F");
        assert_eq!(grade_for(0.0).message, "Try Again!");
    }

    fn quiz(count: usize) -> Quiz {
        Quiz {
            topic_id: TopicId::new(1),
            topic_name: "Built-ins".into(),
            difficulty: "adaptive".into(),
            questions: (0..count)
                .map(|i| QuizQuestion {
                    question: format!("Question {i}"),
                    options: BTreeMap::new(),
                    correct_answer: "B".into(),
                    explanation: "It returns the length.".into(),
                    difficulty: None,
                    topic_area: None,
                })
                .collect(),
        }
    }

    fn graded(is_correct: bool) -> GradingOutcome {
        GradingOutcome::Graded(AnswerResult {
            is_correct,
            explanation: String::new(),
            new_knowledge_level: 0.5,
            confidence: None,
        })
    }

    #[test]
    fn seven_of_ten_passes() {
        let mut attempt = QuizAttempt::new(quiz(10)).unwrap();
        for index in 0..10 {
            attempt.record_answer(index, "B").unwrap();
            let outcome = match index {
                0..=6 => graded(true),
                7 => GradingOutcome::Failed,
                _ => graded(false),
            };
            attempt.apply_grading(index, outcome);
        }
        let results = attempt.results().unwrap();

        let vm = ResultsVm::from(&results);

        assert_eq!(vm.score, 70);
        assert!(vm.passed);
        assert_eq!(vm.grade.letter, "B");
        assert_eq!(vm.incorrect, 3);
        assert_eq!(vm.summary_line, "You scored 7 out of 10 questions correctly");
        assert_eq!(vm.review[0].number, 1);
        assert!(vm.review[0].correct);
        assert!(!vm.review[7].correct);
        assert_eq!(vm.review[7].explanation, "It returns the length.");
    }
}
