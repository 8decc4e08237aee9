use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use tutor_core::model::{
    AgentStatus, AnswerResult, AnswerSubmission, CodeCheck, Credentials, Hint, HintRequest,
    KnowledgeState, Lesson, ProgressSummary, Quiz, Registration, StudyTips, Topic, TopicId, User,
};

use crate::api::TutorApi;
use crate::config::ApiConfig;
use crate::error::ApiError;

/// `TutorApi` over HTTP.
///
/// The session cookie set by `/api/login` is kept in the client's cookie
/// store and sent with every later request.
#[derive(Clone)]
pub struct HttpTutorApi {
    client: Client,
    config: ApiConfig,
}

impl HttpTutorApi {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.endpoint(path)?;
        self.send(self.client.get(url)).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path)?;
        self.send(self.client.post(url).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let url = response.url().path().to_string();
    let body = response.bytes().await?;

    if !status.is_success() {
        let err = ApiError::from_body(status, &body);
        tracing::debug!(%status, path = %url, error = %err, "backend call failed");
        return Err(err);
    }

    serde_json::from_slice(&body).map_err(|err| {
        tracing::debug!(path = %url, error = %err, "could not decode backend response");
        ApiError::Decode(err.to_string())
    })
}

#[derive(Serialize)]
struct TopicRequest {
    topic_id: TopicId,
}

#[derive(Serialize)]
struct CodeRequest<'a> {
    code: &'a str,
}

#[async_trait]
impl TutorApi for HttpTutorApi {
    async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        self.post("/api/login", credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        self.post("/api/register", registration).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.config.endpoint("/api/logout")?;
        let _: IgnoredAny = self.send(self.client.post(url)).await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/api/current-user").await
    }

    async fn topics(&self) -> Result<Vec<Topic>, ApiError> {
        self.get("/api/topics").await
    }

    async fn topic(&self, id: TopicId) -> Result<Topic, ApiError> {
        self.get(&format!("/api/topics/{id}")).await
    }

    async fn generate_lesson(&self, topic_id: TopicId) -> Result<Lesson, ApiError> {
        self.post("/api/generate-lesson", &TopicRequest { topic_id })
            .await
    }

    async fn check_code(&self, code: &str) -> Result<CodeCheck, ApiError> {
        self.post("/api/check-code", &CodeRequest { code }).await
    }

    async fn ask_hint(&self, request: &HintRequest) -> Result<Hint, ApiError> {
        self.post("/api/ask-challenge-hint", request).await
    }

    async fn generate_quiz(&self, topic_id: TopicId) -> Result<Quiz, ApiError> {
        self.post("/api/generate-quiz", &TopicRequest { topic_id })
            .await
    }

    async fn submit_answer(&self, submission: &AnswerSubmission) -> Result<AnswerResult, ApiError> {
        self.post("/api/submit-answer", submission).await
    }

    async fn knowledge_state(&self, topic_id: TopicId) -> Result<KnowledgeState, ApiError> {
        self.get(&format!("/api/knowledge-state/{topic_id}")).await
    }

    async fn progress_summary(&self) -> Result<ProgressSummary, ApiError> {
        self.get("/api/progress-summary").await
    }

    async fn study_tips(&self) -> Result<StudyTips, ApiError> {
        self.get("/api/study-tips").await
    }

    async fn next_topic(&self, current: Option<TopicId>) -> Result<Topic, ApiError> {
        let url = self.config.endpoint("/api/next-topic")?;
        let mut request = self.client.get(url);
        if let Some(current) = current {
            request = request.query(&[("current_topic_id", current.value())]);
        }
        self.send(request).await
    }

    async fn agent_status(&self) -> Result<AgentStatus, ApiError> {
        self.get("/api/agent-status").await
    }
}
