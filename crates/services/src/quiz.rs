//! Quiz page orchestration around the `QuizFlow` state machine.

use std::sync::Arc;

use tokio::sync::mpsc;

use tutor_core::model::{Topic, TopicId};
use tutor_core::quiz::{GradingOutcome, QuizFlow, QuizFlowError, QuizResults};

use crate::api::TutorApi;
use crate::error::{ApiError, QuizServiceError};
use crate::notify::{Notice, Notifier, report};

struct GradingMessage {
    generation: u64,
    index: usize,
    outcome: GradingOutcome,
}

/// Delivers the grading for one submitted answer.
///
/// Dropped without a result, for instance when the task unwinds, it delivers
/// `Failed` so nobody waits on the answer forever.
struct GradingReply {
    gradings: mpsc::UnboundedSender<GradingMessage>,
    generation: u64,
    index: usize,
    delivered: bool,
}

impl GradingReply {
    fn deliver(&mut self, outcome: GradingOutcome) {
        self.delivered = true;
        // The receiver is gone once the session is dropped; nothing to apply then.
        let _ = self.gradings.send(GradingMessage {
            generation: self.generation,
            index: self.index,
            outcome,
        });
    }
}

impl Drop for GradingReply {
    fn drop(&mut self) {
        if !self.delivered {
            tracing::warn!(index = self.index, "grading task ended without a result");
            self.deliver(GradingOutcome::Failed);
        }
    }
}

/// One learner's pass through the quiz page.
///
/// Gradings from submissions that were still in flight when the learner left
/// or restarted the quiz are dropped when they arrive.
pub struct QuizSession {
    flow: QuizFlow,
    generation: u64,
    gradings_tx: mpsc::UnboundedSender<GradingMessage>,
    gradings_rx: mpsc::UnboundedReceiver<GradingMessage>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        let (gradings_tx, gradings_rx) = mpsc::unbounded_channel();
        Self {
            flow: QuizFlow::default(),
            generation: 0,
            gradings_tx,
            gradings_rx,
        }
    }

    #[must_use]
    pub fn flow(&self) -> &QuizFlow {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut QuizFlow {
        &mut self.flow
    }

    /// Apply every grading that has already arrived. Returns how many applied.
    pub fn apply_arrived(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.gradings_rx.try_recv() {
            if self.apply(message) {
                applied += 1;
            }
        }
        applied
    }

    fn apply(&mut self, message: GradingMessage) -> bool {
        if message.generation != self.generation {
            tracing::debug!(index = message.index, "dropping grading from an earlier quiz");
            return false;
        }
        self.flow.apply_grading(message.index, message.outcome)
    }

    fn pending(&self) -> usize {
        self.flow
            .attempt()
            .map_or(0, |attempt| attempt.pending_count())
    }

    fn leave(&mut self) {
        self.generation += 1;
        self.flow.back_to_topics();
    }
}

#[derive(Clone)]
pub struct QuizService {
    api: Arc<dyn TutorApi>,
    notifier: Arc<dyn Notifier>,
}

impl QuizService {
    #[must_use]
    pub fn new(api: Arc<dyn TutorApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the topic list cannot be loaded.
    pub async fn list_topics(&self) -> Result<Vec<Topic>, ApiError> {
        self.api
            .topics()
            .await
            .map_err(|err| report(self.notifier.as_ref(), "topics", err))
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the topic cannot be loaded.
    pub async fn load_topic(&self, id: TopicId) -> Result<Topic, ApiError> {
        self.api
            .topic(id)
            .await
            .map_err(|err| report(self.notifier.as_ref(), "topic", err))
    }

    /// Select `topic` and generate a quiz for it.
    ///
    /// On failure the session returns to topic selection.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Api` if generation fails and
    /// `QuizServiceError::Flow` if the generated quiz has no questions.
    pub async fn start(
        &self,
        session: &mut QuizSession,
        topic: Topic,
    ) -> Result<(), QuizServiceError> {
        session.flow.select_topic(topic);
        self.generate(session).await
    }

    /// Start over on the same topic with a freshly generated quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::InvalidTransition` unless the quiz was submitted,
    /// otherwise the same errors as `start`.
    pub async fn retake(&self, session: &mut QuizSession) -> Result<(), QuizServiceError> {
        session.flow.retake()?;
        self.generate(session).await
    }

    /// Leave the quiz and go back to topic selection.
    pub fn back_to_topics(&self, session: &mut QuizSession) {
        session.leave();
    }

    async fn generate(&self, session: &mut QuizSession) -> Result<(), QuizServiceError> {
        let Some(topic_id) = session.flow.topic().map(|topic| topic.id) else {
            return Err(QuizFlowError::InvalidTransition {
                action: "generate a quiz",
                state: session.flow.state_name(),
            }
            .into());
        };

        let quiz = match self.api.generate_quiz(topic_id).await {
            Ok(quiz) => quiz,
            Err(err) => {
                session.leave();
                return Err(report(self.notifier.as_ref(), "generate quiz", err).into());
            }
        };

        session.generation += 1;
        if let Err(err) = session.flow.quiz_ready(quiz) {
            tracing::warn!(%topic_id, error = %err, "generated quiz is unusable");
            self.notifier.notify(Notice::error(err.to_string()));
            session.leave();
            return Err(err.into());
        }
        Ok(())
    }

    /// Lock in an answer and send it for grading without waiting.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError` if the answer cannot be recorded.
    pub fn answer(
        &self,
        session: &mut QuizSession,
        index: usize,
        choice: &str,
    ) -> Result<(), QuizServiceError> {
        let submission = session.flow.answer(index, choice)?;

        let api = Arc::clone(&self.api);
        let notifier = Arc::clone(&self.notifier);
        let mut reply = GradingReply {
            gradings: session.gradings_tx.clone(),
            generation: session.generation,
            index,
            delivered: false,
        };
        tokio::spawn(async move {
            let outcome = match api.submit_answer(&submission).await {
                Ok(result) => GradingOutcome::Graded(result),
                Err(err) => {
                    report(notifier.as_ref(), "submit answer", err);
                    GradingOutcome::Failed
                }
            };
            reply.deliver(outcome);
        });
        Ok(())
    }

    /// Wait until no answer of the current attempt is waiting for a grade.
    pub async fn wait_for_gradings(&self, session: &mut QuizSession) {
        session.apply_arrived();
        while session.pending() > 0 {
            let Some(message) = session.gradings_rx.recv().await else {
                break;
            };
            session.apply(message);
        }
    }

    /// Finish the quiz and compute the score locally.
    ///
    /// Outstanding gradings are awaited first so every answer is counted.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::NotAllAnswered` (also shown to the learner)
    /// when a question is unanswered, or `InvalidTransition` outside a quiz.
    pub async fn submit(&self, session: &mut QuizSession) -> Result<QuizResults, QuizServiceError> {
        if let Some(attempt) = session.flow.attempt() {
            let (answered, total) = (attempt.answered_count(), attempt.total());
            if answered < total {
                let err = QuizFlowError::NotAllAnswered { answered, total };
                self.notifier.notify(Notice::error(err.to_string()));
                return Err(err.into());
            }
        }

        self.wait_for_gradings(session).await;
        let results = session.flow.submit()?;
        tracing::info!(
            topic_id = %results.topic_id,
            correct = results.correct,
            total = results.total,
            "quiz submitted"
        );
        Ok(results)
    }
}
