//! Backend contract for the tutoring service.

mod http;
mod in_memory;

use async_trait::async_trait;

use tutor_core::model::{
    AgentStatus, AnswerResult, AnswerSubmission, CodeCheck, Credentials, Hint, HintRequest,
    KnowledgeState, Lesson, ProgressSummary, Quiz, Registration, StudyTips, Topic, TopicId, User,
};

use crate::error::ApiError;

pub use http::HttpTutorApi;
pub use in_memory::{Endpoint, InMemoryTutorApi};

/// One method per backend operation.
///
/// Implementations only normalize failures into `ApiError`; deciding whether
/// a failure is user-visible belongs to the calling service.
#[async_trait]
pub trait TutorApi: Send + Sync {
    // ── session auth ──

    /// `POST /api/login`
    async fn login(&self, credentials: &Credentials) -> Result<User, ApiError>;
    /// `POST /api/register`
    async fn register(&self, registration: &Registration) -> Result<User, ApiError>;
    /// `POST /api/logout`
    async fn logout(&self) -> Result<(), ApiError>;
    /// `GET /api/current-user`
    async fn current_user(&self) -> Result<User, ApiError>;

    // ── reference data ──

    /// `GET /api/topics`
    async fn topics(&self) -> Result<Vec<Topic>, ApiError>;
    /// `GET /api/topics/{id}`
    async fn topic(&self, id: TopicId) -> Result<Topic, ApiError>;

    // ── learning / practice ──

    /// `POST /api/generate-lesson`
    async fn generate_lesson(&self, topic_id: TopicId) -> Result<Lesson, ApiError>;
    /// `POST /api/check-code`
    async fn check_code(&self, code: &str) -> Result<CodeCheck, ApiError>;
    /// `POST /api/ask-challenge-hint`
    async fn ask_hint(&self, request: &HintRequest) -> Result<Hint, ApiError>;

    // ── quiz ──

    /// `POST /api/generate-quiz`
    async fn generate_quiz(&self, topic_id: TopicId) -> Result<Quiz, ApiError>;
    /// `POST /api/submit-answer`
    async fn submit_answer(&self, submission: &AnswerSubmission) -> Result<AnswerResult, ApiError>;

    // ── progress ──

    /// `GET /api/knowledge-state/{id}`
    async fn knowledge_state(&self, topic_id: TopicId) -> Result<KnowledgeState, ApiError>;
    /// `GET /api/progress-summary`
    async fn progress_summary(&self) -> Result<ProgressSummary, ApiError>;
    /// `GET /api/study-tips`
    async fn study_tips(&self) -> Result<StudyTips, ApiError>;
    /// `GET /api/next-topic?current_topic_id=`; 404 when there is no recommendation.
    async fn next_topic(&self, current: Option<TopicId>) -> Result<Topic, ApiError>;

    // ── introspection ──

    /// `GET /api/agent-status`
    async fn agent_status(&self) -> Result<AgentStatus, ApiError>;
}
