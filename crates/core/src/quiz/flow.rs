use std::mem;

use crate::model::{AnswerSubmission, Quiz, Topic};

use super::attempt::{GradingOutcome, QuizAttempt, QuizFlowError, QuizResults};

/// Client-held quiz state.
///
/// ```text
/// TopicSelection -> Generating -> InProgress -> Submitted
///                        ^                          |
///                        +--------- retake ---------+
/// ```
///
/// Nothing here survives the value being dropped: abandoning a quiz discards
/// the attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QuizFlow {
    #[default]
    TopicSelection,
    /// Topic chosen; a quiz has been (or is about to be) requested.
    Generating { topic: Topic },
    InProgress { topic: Topic, attempt: QuizAttempt },
    Submitted { topic: Topic, results: QuizResults },
}

impl QuizFlow {
    #[must_use]
    pub fn state_name(&self) -> &'static str {
        match self {
            QuizFlow::TopicSelection => "selecting a topic",
            QuizFlow::Generating { .. } => "generating a quiz",
            QuizFlow::InProgress { .. } => "a quiz is in progress",
            QuizFlow::Submitted { .. } => "showing results",
        }
    }

    #[must_use]
    pub fn topic(&self) -> Option<&Topic> {
        match self {
            QuizFlow::TopicSelection => None,
            QuizFlow::Generating { topic }
            | QuizFlow::InProgress { topic, .. }
            | QuizFlow::Submitted { topic, .. } => Some(topic),
        }
    }

    #[must_use]
    pub fn attempt(&self) -> Option<&QuizAttempt> {
        match self {
            QuizFlow::InProgress { attempt, .. } => Some(attempt),
            _ => None,
        }
    }

    pub fn attempt_mut(&mut self) -> Option<&mut QuizAttempt> {
        match self {
            QuizFlow::InProgress { attempt, .. } => Some(attempt),
            _ => None,
        }
    }

    #[must_use]
    pub fn results(&self) -> Option<&QuizResults> {
        match self {
            QuizFlow::Submitted { results, .. } => Some(results),
            _ => None,
        }
    }

    /// Pick a topic. Any in-flight attempt for another topic is discarded.
    pub fn select_topic(&mut self, topic: Topic) {
        *self = QuizFlow::Generating { topic };
    }

    /// Drop whatever is going on and go back to topic selection.
    pub fn back_to_topics(&mut self) {
        *self = QuizFlow::TopicSelection;
    }

    /// A generated quiz arrived.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless generating, or `EmptyQuiz`.
    pub fn quiz_ready(&mut self, quiz: Quiz) -> Result<(), QuizFlowError> {
        let QuizFlow::Generating { topic } = self else {
            return Err(self.invalid("start a quiz"));
        };
        let attempt = QuizAttempt::new(quiz)?;
        let topic = topic.clone();
        *self = QuizFlow::InProgress { topic, attempt };
        Ok(())
    }

    /// Record an answer for `index`; the returned submission goes to the backend.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless a quiz is in progress, plus any
    /// `QuizAttempt::record_answer` error.
    pub fn answer(&mut self, index: usize, choice: &str) -> Result<AnswerSubmission, QuizFlowError> {
        let invalid = self.invalid("answer");
        let attempt = self.attempt_mut().ok_or(invalid)?;
        attempt.record_answer(index, choice)
    }

    /// Apply a grading. Late gradings (after submit or abandon) are dropped.
    pub fn apply_grading(&mut self, index: usize, outcome: GradingOutcome) -> bool {
        self.attempt_mut()
            .is_some_and(|attempt| attempt.apply_grading(index, outcome))
    }

    /// Finish the attempt.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless in progress, or the attempt's tally
    /// error; the state is unchanged on error.
    pub fn submit(&mut self) -> Result<QuizResults, QuizFlowError> {
        let QuizFlow::InProgress { topic, attempt } = self else {
            return Err(self.invalid("submit"));
        };
        let results = attempt.results()?;
        let topic = topic.clone();
        *self = QuizFlow::Submitted {
            topic,
            results: results.clone(),
        };
        Ok(results)
    }

    /// Start over on the same topic; a fresh quiz must be generated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless results are showing.
    pub fn retake(&mut self) -> Result<(), QuizFlowError> {
        match mem::take(self) {
            QuizFlow::Submitted { topic, .. } => {
                *self = QuizFlow::Generating { topic };
                Ok(())
            }
            other => {
                *self = other;
                Err(self.invalid("retake"))
            }
        }
    }

    fn invalid(&self, action: &'static str) -> QuizFlowError {
        QuizFlowError::InvalidTransition {
            action,
            state: self.state_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerResult, Difficulty, TopicId};
    use crate::quiz::attempt::tests::quiz_with;

    fn topic() -> Topic {
        Topic {
            id: TopicId::new(1),
            name: "Loops".into(),
            category: "Python".into(),
            difficulty: Difficulty::Beginner,
            description: String::new(),
        }
    }

    fn correct() -> GradingOutcome {
        GradingOutcome::Graded(AnswerResult {
            is_correct: true,
            explanation: String::new(),
            new_knowledge_level: 0.4,
            confidence: None,
        })
    }

    #[test]
    fn full_pass_through_the_flow() {
        let mut flow = QuizFlow::default();
        flow.select_topic(topic());
        flow.quiz_ready(quiz_with(2)).unwrap();

        for i in 0..2 {
            flow.answer(i, "A").unwrap();
            assert!(flow.apply_grading(i, correct()));
        }
        let results = flow.submit().unwrap();
        assert_eq!(results.correct, 2);
        assert!((results.score - 100.0).abs() < f64::EPSILON);
        assert!(flow.results().is_some());
    }

    #[test]
    fn submit_with_unanswered_questions_keeps_state() {
        let mut flow = QuizFlow::default();
        flow.select_topic(topic());
        flow.quiz_ready(quiz_with(3)).unwrap();
        flow.answer(0, "A").unwrap();
        flow.apply_grading(0, correct());

        let err = flow.submit().unwrap_err();
        assert_eq!(err, QuizFlowError::NotAllAnswered { answered: 1, total: 3 });
        assert_eq!(flow.attempt().unwrap().answered_count(), 1);
    }

    #[test]
    fn quiz_ready_requires_generating_state() {
        let mut flow = QuizFlow::default();
        let err = flow.quiz_ready(quiz_with(1)).unwrap_err();
        assert_eq!(
            err,
            QuizFlowError::InvalidTransition {
                action: "start a quiz",
                state: "selecting a topic",
            }
        );
    }

    #[test]
    fn answering_outside_a_quiz_is_rejected() {
        let mut flow = QuizFlow::default();
        flow.select_topic(topic());
        assert!(matches!(
            flow.answer(0, "A"),
            Err(QuizFlowError::InvalidTransition { action: "answer", .. })
        ));
    }

    #[test]
    fn retake_returns_to_generating_same_topic() {
        let mut flow = QuizFlow::default();
        flow.select_topic(topic());
        flow.quiz_ready(quiz_with(1)).unwrap();
        flow.answer(0, "A").unwrap();
        flow.apply_grading(0, correct());
        flow.submit().unwrap();

        flow.retake().unwrap();
        assert!(matches!(flow, QuizFlow::Generating { .. }));
        assert_eq!(flow.topic().unwrap().id, TopicId::new(1));
        assert!(flow.retake().is_err());
    }

    #[test]
    fn late_grading_after_abandon_is_dropped() {
        let mut flow = QuizFlow::default();
        flow.select_topic(topic());
        flow.quiz_ready(quiz_with(1)).unwrap();
        flow.answer(0, "A").unwrap();
        flow.back_to_topics();

        assert!(!flow.apply_grading(0, correct()));
        assert_eq!(flow, QuizFlow::TopicSelection);
    }
}
