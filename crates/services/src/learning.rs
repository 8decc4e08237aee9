use std::sync::Arc;

use tutor_core::model::{CodeCheck, Hint, HintRequest, Lesson, Topic, TopicId};

use crate::api::TutorApi;
use crate::error::ApiError;
use crate::fetched::Fetched;
use crate::notify::{Notice, Notifier, report};

pub const STARTER_CODE: &str = "# Write your Python code here\nprint(\"Hello, World!\")";

/// Shown in place of output when the code could not be checked at all.
pub const CODE_CHECK_FAILED: &str = "Failed to execute code";

/// Code editor state for one topic's practice panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playground {
    topic_name: String,
    code: String,
    attempt_count: u32,
}

impl Playground {
    #[must_use]
    pub fn new(topic_name: impl Into<String>) -> Self {
        Self {
            topic_name: topic_name.into(),
            code: STARTER_CODE.to_string(),
            attempt_count: 0,
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    #[must_use]
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// Back to the starter code with the attempt counter reset.
    pub fn clear(&mut self) {
        self.code = STARTER_CODE.to_string();
        self.attempt_count = 0;
    }

    #[must_use]
    pub fn hint_request(&self) -> HintRequest {
        HintRequest {
            question: format!("I'm trying to practice {}", self.topic_name),
            challenge: self.code.clone(),
            attempt_count: self.attempt_count,
        }
    }
}

/// Lesson and practice page operations.
#[derive(Clone)]
pub struct LearningService {
    api: Arc<dyn TutorApi>,
    notifier: Arc<dyn Notifier>,
}

impl LearningService {
    #[must_use]
    pub fn new(api: Arc<dyn TutorApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
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

    /// # Errors
    ///
    /// Returns `ApiError` if lesson generation fails.
    pub async fn lesson(&self, topic_id: TopicId) -> Result<Lesson, ApiError> {
        self.api
            .generate_lesson(topic_id)
            .await
            .map_err(|err| report(self.notifier.as_ref(), "generate lesson", err))
    }

    /// Run the playground code. Every run counts as an attempt, failed or not.
    ///
    /// A call failure is notified and comes back as an errored check.
    pub async fn run_code(&self, playground: &mut Playground) -> CodeCheck {
        playground.attempt_count += 1;
        match self.api.check_code(&playground.code).await {
            Ok(check) => {
                if check.is_clean() {
                    self.notifier
                        .notify(Notice::success("Code executed successfully!"));
                }
                check
            }
            Err(err) => {
                report(self.notifier.as_ref(), "check code", err);
                CodeCheck {
                    success: false,
                    output: CODE_CHECK_FAILED.to_string(),
                    error: true,
                }
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if no hint could be produced.
    pub async fn hint(&self, playground: &Playground) -> Result<Hint, ApiError> {
        self.api
            .ask_hint(&playground.hint_request())
            .await
            .map_err(|err| report(self.notifier.as_ref(), "hint", err))
    }

    /// Suggested topic after `current`; never fails the page.
    pub async fn next_topic(&self, current: TopicId) -> Fetched<Topic> {
        Fetched::from_result("next topic", self.api.next_topic(Some(current)).await)
    }
}
