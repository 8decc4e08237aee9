use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{AnswerResult, AnswerSubmission, Quiz, QuizQuestion, TopicId};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Rejected quiz actions. None of these change the attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizFlowError {
    #[error("quiz has no questions")]
    EmptyQuiz,

    #[error("question {index} is out of range ({total} questions)")]
    QuestionOutOfRange { index: usize, total: usize },

    #[error("question {index} has already been answered")]
    AlreadyAnswered { index: usize },

    #[error("'{option}' is not one of the answer options")]
    UnknownOption { option: String },

    #[error("Please answer all questions ({answered}/{total})")]
    NotAllAnswered { answered: usize, total: usize },

    #[error("still waiting for {pending} answer(s) to be graded")]
    GradingPending { pending: usize },

    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

//
// ─── ANSWERS ──────────────────────────────────────────────────────────────────
//

/// Grading status of a locally recorded answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Grading {
    /// Submitted; the backend has not answered yet. No correctness is shown.
    Pending,
    Graded(AnswerResult),
    /// The submission failed; the answer counts as incorrect.
    Ungraded,
}

/// The user's choice for one question plus whatever grading has arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    local_explanation: String,
    grading: Grading,
}

impl AnswerRecord {
    #[must_use]
    pub fn grading(&self) -> &Grading {
        &self.grading
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.grading, Grading::Pending)
    }

    /// `None` until the backend grade arrives.
    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        match &self.grading {
            Grading::Graded(result) => Some(result.is_correct),
            Grading::Ungraded => Some(false),
            Grading::Pending => None,
        }
    }

    /// Backend explanation when graded, otherwise the one shipped with the question.
    #[must_use]
    pub fn explanation(&self) -> &str {
        match &self.grading {
            Grading::Graded(result) if !result.explanation.is_empty() => &result.explanation,
            _ => &self.local_explanation,
        }
    }

    #[must_use]
    pub fn new_knowledge_level(&self) -> Option<f64> {
        match &self.grading {
            Grading::Graded(result) => Some(result.new_knowledge_level),
            _ => None,
        }
    }
}

/// What came back for one fire-and-forget submission.
#[derive(Debug, Clone, PartialEq)]
pub enum GradingOutcome {
    Graded(AnswerResult),
    Failed,
}

//
// ─── RESULTS ──────────────────────────────────────────────────────────────────
//

/// Final tally of a submitted quiz, computed locally from per-answer grades.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResults {
    pub topic_id: TopicId,
    pub topic_name: String,
    pub correct: usize,
    pub total: usize,
    /// Percentage in `[0, 100]`.
    pub score: f64,
    pub answers: Vec<(usize, AnswerRecord)>,
}

impl QuizResults {
    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.total - self.correct
    }
}

/// `correct / total * 100`, or 0 for an empty quiz.
#[must_use]
pub fn score_percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let score = (correct as f64 * 100.0) / total as f64;
    score
}

//
// ─── ATTEMPT ──────────────────────────────────────────────────────────────────
//

/// One pass through a generated quiz.
///
/// Answers are locked as soon as they are recorded; gradings arrive later and
/// only ever fill in a `Pending` answer.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAttempt {
    quiz: Quiz,
    current: usize,
    answers: BTreeMap<usize, AnswerRecord>,
}

impl QuizAttempt {
    /// # Errors
    ///
    /// Returns `QuizFlowError::EmptyQuiz` if the quiz has no questions.
    pub fn new(quiz: Quiz) -> Result<Self, QuizFlowError> {
        if quiz.questions.is_empty() {
            return Err(QuizFlowError::EmptyQuiz);
        }
        Ok(Self {
            quiz,
            current: 0,
            answers: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.quiz.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &QuizQuestion {
        &self.quiz.questions[self.current]
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.total()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.answers.values().filter(|a| a.is_pending()).count()
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&AnswerRecord> {
        self.answers.get(&index)
    }

    /// Move to the next question. Returns false on the last one.
    pub fn next(&mut self) -> bool {
        if self.is_last_question() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move to the previous question. Returns false on the first one.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Lock in `choice` for question `index` and build the backend submission.
    ///
    /// # Errors
    ///
    /// Returns `QuestionOutOfRange`, `AlreadyAnswered` or `UnknownOption`.
    pub fn record_answer(
        &mut self,
        index: usize,
        choice: &str,
    ) -> Result<AnswerSubmission, QuizFlowError> {
        let total = self.total();
        let question = self
            .quiz
            .questions
            .get(index)
            .ok_or(QuizFlowError::QuestionOutOfRange { index, total })?;
        if self.answers.contains_key(&index) {
            return Err(QuizFlowError::AlreadyAnswered { index });
        }
        if !question.has_option(choice) {
            return Err(QuizFlowError::UnknownOption {
                option: choice.to_string(),
            });
        }

        let record = AnswerRecord {
            question: question.question.clone(),
            user_answer: choice.to_string(),
            correct_answer: question.correct_answer.clone(),
            local_explanation: question.explanation.clone(),
            grading: Grading::Pending,
        };
        let submission = AnswerSubmission {
            topic_id: self.quiz.topic_id,
            question: record.question.clone(),
            user_answer: record.user_answer.clone(),
            correct_answer: record.correct_answer.clone(),
            difficulty: self.quiz.difficulty.clone(),
        };
        self.answers.insert(index, record);
        Ok(submission)
    }

    /// Attach a backend grading. Ignored unless the answer is still pending.
    pub fn apply_grading(&mut self, index: usize, outcome: GradingOutcome) -> bool {
        let Some(record) = self.answers.get_mut(&index) else {
            return false;
        };
        if !record.is_pending() {
            return false;
        }
        record.grading = match outcome {
            GradingOutcome::Graded(result) => Grading::Graded(result),
            GradingOutcome::Failed => Grading::Ungraded,
        };
        true
    }

    /// Tally the attempt.
    ///
    /// # Errors
    ///
    /// Returns `NotAllAnswered` when a question has no answer and
    /// `GradingPending` while gradings are still in flight.
    pub fn results(&self) -> Result<QuizResults, QuizFlowError> {
        let total = self.total();
        let answered = self.answered_count();
        if answered < total {
            return Err(QuizFlowError::NotAllAnswered { answered, total });
        }
        let pending = self.pending_count();
        if pending > 0 {
            return Err(QuizFlowError::GradingPending { pending });
        }

        let correct = self
            .answers
            .values()
            .filter(|a| a.is_correct() == Some(true))
            .count();

        Ok(QuizResults {
            topic_id: self.quiz.topic_id,
            topic_name: self.quiz.topic_name.clone(),
            correct,
            total,
            score: score_percent(correct, total),
            answers: self
                .answers
                .iter()
                .map(|(index, record)| (*index, record.clone()))
                .collect(),
        })
    }
}
