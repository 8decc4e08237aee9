//! Per-topic progress: merges the topic list with knowledge states.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;

use tutor_core::model::{KnowledgeState, MergedTopicProgress, ProgressSummary, Topic, TopicId};

use crate::api::TutorApi;
use crate::error::ApiError;
use crate::notify::{Notifier, report};

/// Fetch every topic's knowledge state concurrently and pair it with its topic.
///
/// The output has one entry per input topic, in input order. A failed fetch
/// never fails the batch: that topic gets a zero state marked as defaulted.
pub async fn merge_progress<F, Fut, E>(topics: Vec<Topic>, fetch: F) -> Vec<MergedTopicProgress>
where
    F: Fn(TopicId) -> Fut,
    Fut: Future<Output = Result<KnowledgeState, E>>,
    E: Display,
{
    let states = join_all(topics.iter().map(|topic| fetch(topic.id))).await;

    topics
        .into_iter()
        .zip(states)
        .map(|(topic, state)| match state {
            Ok(state) => MergedTopicProgress::fetched(topic, state),
            Err(err) => {
                tracing::debug!(topic_id = %topic.id, error = %err, "knowledge state defaulted");
                MergedTopicProgress::defaulted(topic)
            }
        })
        .collect()
}

/// Everything the progress page shows.
#[derive(Debug, Clone)]
pub struct ProgressReport {
    pub summary: ProgressSummary,
    pub topics: Vec<MergedTopicProgress>,
}

#[derive(Clone)]
pub struct ProgressService {
    api: Arc<dyn TutorApi>,
    notifier: Arc<dyn Notifier>,
}

impl ProgressService {
    #[must_use]
    pub fn new(api: Arc<dyn TutorApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Load the summary and topic list together, then merge in knowledge states.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the summary or the topic list cannot be loaded.
    pub async fn load(&self) -> Result<ProgressReport, ApiError> {
        let (summary, topics) = futures::join!(self.api.progress_summary(), self.api.topics());
        let notifier = self.notifier.as_ref();
        let summary = summary.map_err(|err| report(notifier, "progress summary", err));
        let topics = topics.map_err(|err| report(notifier, "topics", err));
        let (summary, topics) = (summary?, topics?);

        let topics = self.merge(topics).await;
        Ok(ProgressReport { summary, topics })
    }

    /// Merge knowledge states into an already loaded topic list.
    pub async fn merge(&self, topics: Vec<Topic>) -> Vec<MergedTopicProgress> {
        merge_progress(topics, |id| self.api.knowledge_state(id)).await
    }
}
