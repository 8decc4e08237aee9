use std::sync::Arc;

use tutor_core::model::{AgentStatus, ProgressSummary, StudyTips, Topic};

use crate::api::TutorApi;
use crate::error::ApiError;
use crate::fetched::Fetched;
use crate::notify::{Notifier, report};

/// Data behind the dashboard page.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub topics: Vec<Topic>,
    pub summary: ProgressSummary,
    pub tips: Fetched<StudyTips>,
    pub next_topic: Fetched<Topic>,
    pub agent_status: Fetched<AgentStatus>,
}

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn TutorApi>,
    notifier: Arc<dyn Notifier>,
}

impl DashboardService {
    #[must_use]
    pub fn new(api: Arc<dyn TutorApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Load topics, summary and study tips together, then the optional panels.
    ///
    /// Study tips, the recommendation and agent status never fail the page.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if any of the required calls fails.
    pub async fn load(&self) -> Result<Dashboard, ApiError> {
        let (topics, summary, tips) = futures::join!(
            self.api.topics(),
            self.api.progress_summary(),
            self.api.study_tips()
        );
        let notifier = self.notifier.as_ref();
        let topics = topics.map_err(|err| report(notifier, "topics", err));
        let summary = summary.map_err(|err| report(notifier, "progress summary", err));
        let (topics, summary) = (topics?, summary?);

        let (next_topic, agent_status) =
            futures::join!(self.api.next_topic(None), self.api.agent_status());

        Ok(Dashboard {
            topics,
            summary,
            tips: Fetched::from_result("study tips", tips),
            next_topic: Fetched::from_result("next topic", next_topic),
            agent_status: Fetched::from_result("agent status", agent_status),
        })
    }
}
