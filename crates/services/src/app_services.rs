use std::sync::Arc;

use crate::api::{HttpTutorApi, TutorApi};
use crate::auth::AuthService;
use crate::config::ApiConfig;
use crate::dashboard::DashboardService;
use crate::error::AppServicesError;
use crate::learning::LearningService;
use crate::notify::Notifier;
use crate::progress::ProgressService;
use crate::quiz::QuizService;
use crate::Clock;

/// Assembles the page services around one backend and one notice sink.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    auth: Arc<AuthService>,
    dashboard: Arc<DashboardService>,
    progress: Arc<ProgressService>,
    learning: Arc<LearningService>,
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services talking to the HTTP backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Api` if the HTTP client cannot be built.
    pub fn http(
        config: ApiConfig,
        notifier: Arc<dyn Notifier>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        tracing::debug!(base_url = %config.base_url, "using backend");
        let api = Arc::new(HttpTutorApi::new(config)?);
        Ok(Self::new(api, notifier, clock))
    }

    /// Build services backed by `ApiConfig::from_env`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Config` for an invalid environment and
    /// `AppServicesError::Api` if the HTTP client cannot be built.
    pub fn from_env(notifier: Arc<dyn Notifier>, clock: Clock) -> Result<Self, AppServicesError> {
        Self::http(ApiConfig::from_env()?, notifier, clock)
    }

    #[must_use]
    pub fn new(api: Arc<dyn TutorApi>, notifier: Arc<dyn Notifier>, clock: Clock) -> Self {
        Self {
            clock,
            auth: Arc::new(AuthService::new(Arc::clone(&api), Arc::clone(&notifier))),
            dashboard: Arc::new(DashboardService::new(
                Arc::clone(&api),
                Arc::clone(&notifier),
            )),
            progress: Arc::new(ProgressService::new(Arc::clone(&api), Arc::clone(&notifier))),
            learning: Arc::new(LearningService::new(Arc::clone(&api), Arc::clone(&notifier))),
            quiz: Arc::new(QuizService::new(api, notifier)),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn learning(&self) -> Arc<LearningService> {
        Arc::clone(&self.learning)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
