use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::watch;

use tutor_core::model::{
    AgentStatus, AnswerResult, AnswerSubmission, CodeCheck, Credentials, Hint, HintRequest,
    KnowledgeState, Lesson, ProgressSummary, Quiz, Registration, StudyTips, Topic, TopicId, User,
    UserId,
};

use crate::api::TutorApi;
use crate::error::ApiError;

/// Backend operations, used to inject failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Register,
    Logout,
    CurrentUser,
    Topics,
    Topic,
    GenerateLesson,
    CheckCode,
    AskHint,
    GenerateQuiz,
    SubmitAnswer,
    KnowledgeState,
    ProgressSummary,
    StudyTips,
    NextTopic,
    AgentStatus,
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    current: Option<User>,
    topics: Vec<Topic>,
    knowledge: HashMap<TopicId, KnowledgeState>,
    failing_states: HashSet<TopicId>,
    summary: ProgressSummary,
    tips: StudyTips,
    next_topic: Option<Topic>,
    agent_status: Option<AgentStatus>,
    quizzes: HashMap<TopicId, Quiz>,
    lessons: HashMap<TopicId, Lesson>,
    failures: HashMap<Endpoint, (StatusCode, String)>,
    submissions: Vec<AnswerSubmission>,
    calls: HashMap<Endpoint, usize>,
}

/// In-memory backend for tests and offline demos.
///
/// Grades answers by comparing `user_answer` with `correct_answer`, the same
/// rule the real backend applies.
#[derive(Clone)]
pub struct InMemoryTutorApi {
    state: Arc<Mutex<State>>,
    gradings_open: Arc<watch::Sender<bool>>,
}

impl Default for InMemoryTutorApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTutorApi {
    #[must_use]
    pub fn new() -> Self {
        let (gradings_open, _) = watch::channel(true);
        Self {
            state: Arc::new(Mutex::new(State::default())),
            gradings_open: Arc::new(gradings_open),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[must_use]
    pub fn with_topics(self, topics: Vec<Topic>) -> Self {
        self.lock().topics = topics;
        self
    }

    pub fn add_user(&self, username: &str) -> User {
        let mut state = self.lock();
        let user = User {
            user_id: UserId::new(state.users.len() as u64 + 1),
            username: username.to_string(),
        };
        state.users.push(user.clone());
        user
    }

    pub fn set_knowledge_state(&self, topic_id: TopicId, knowledge: KnowledgeState) {
        self.lock().knowledge.insert(topic_id, knowledge);
    }

    /// Make `GET /api/knowledge-state/{topic_id}` fail with a 500.
    pub fn fail_knowledge_state(&self, topic_id: TopicId) {
        self.lock().failing_states.insert(topic_id);
    }

    pub fn set_summary(&self, summary: ProgressSummary) {
        self.lock().summary = summary;
    }

    pub fn set_study_tips(&self, tips: &str) {
        self.lock().tips = StudyTips {
            tips: tips.to_string(),
        };
    }

    pub fn set_next_topic(&self, topic: Option<Topic>) {
        self.lock().next_topic = topic;
    }

    pub fn set_agent_status(&self, status: Option<AgentStatus>) {
        self.lock().agent_status = status;
    }

    pub fn set_quiz(&self, quiz: Quiz) {
        self.lock().quizzes.insert(quiz.topic_id, quiz);
    }

    pub fn set_lesson(&self, topic_id: TopicId, lesson: Lesson) {
        self.lock().lessons.insert(topic_id, lesson);
    }

    /// Make every call to `endpoint` fail with `{"error": message}`.
    pub fn fail(&self, endpoint: Endpoint, status: StatusCode, message: &str) {
        self.lock()
            .failures
            .insert(endpoint, (status, message.to_string()));
    }

    pub fn clear_failure(&self, endpoint: Endpoint) {
        self.lock().failures.remove(&endpoint);
    }

    /// Hold `submit_answer` responses until `release_gradings` is called.
    pub fn pause_gradings(&self) {
        self.gradings_open.send_replace(false);
    }

    pub fn release_gradings(&self) {
        self.gradings_open.send_replace(true);
    }

    #[must_use]
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.lock().calls.get(&endpoint).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn submissions(&self) -> Vec<AnswerSubmission> {
        self.lock().submissions.clone()
    }

    /// Count the call and apply any injected failure.
    fn enter(&self, endpoint: Endpoint) -> Result<MutexGuard<'_, State>, ApiError> {
        let mut state = self.lock();
        *state.calls.entry(endpoint).or_default() += 1;
        if let Some((status, message)) = state.failures.get(&endpoint) {
            return Err(ApiError::status(*status, message.clone()));
        }
        Ok(state)
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::status(StatusCode::NOT_FOUND, format!("{what} not found"))
}

#[async_trait]
impl TutorApi for InMemoryTutorApi {
    async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let mut state = self.enter(Endpoint::Login)?;
        let user = state
            .users
            .iter()
            .find(|u| u.username == credentials.username)
            .cloned()
            .ok_or_else(|| not_found("User"))?;
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let mut state = self.enter(Endpoint::Register)?;
        if state.users.iter().any(|u| u.username == registration.username) {
            return Err(ApiError::status(
                StatusCode::BAD_REQUEST,
                "Username already exists",
            ));
        }
        let user = User {
            user_id: UserId::new(state.users.len() as u64 + 1),
            username: registration.username.clone(),
        };
        state.users.push(user.clone());
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let mut state = self.enter(Endpoint::Logout)?;
        state.current = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        let state = self.enter(Endpoint::CurrentUser)?;
        state
            .current
            .clone()
            .ok_or_else(|| ApiError::status(StatusCode::UNAUTHORIZED, "Not logged in"))
    }

    async fn topics(&self) -> Result<Vec<Topic>, ApiError> {
        let state = self.enter(Endpoint::Topics)?;
        Ok(state.topics.clone())
    }

    async fn topic(&self, id: TopicId) -> Result<Topic, ApiError> {
        let state = self.enter(Endpoint::Topic)?;
        state
            .topics
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| not_found("Topic"))
    }

    async fn generate_lesson(&self, topic_id: TopicId) -> Result<Lesson, ApiError> {
        let state = self.enter(Endpoint::GenerateLesson)?;
        state
            .lessons
            .get(&topic_id)
            .cloned()
            .ok_or_else(|| not_found("Lesson"))
    }

    async fn check_code(&self, code: &str) -> Result<CodeCheck, ApiError> {
        let _state = self.enter(Endpoint::CheckCode)?;
        let restricted = ["import os", "import sys", "eval", "exec", "open"]
            .iter()
            .any(|keyword| code.to_lowercase().contains(keyword));
        if restricted {
            return Ok(CodeCheck {
                success: false,
                output: "Error: Restricted operations detected.".into(),
                error: true,
            });
        }
        Ok(CodeCheck {
            success: true,
            output: "Code executed successfully (no output)".into(),
            error: false,
        })
    }

    async fn ask_hint(&self, request: &HintRequest) -> Result<Hint, ApiError> {
        let _state = self.enter(Endpoint::AskHint)?;
        Ok(Hint {
            hint: Some(format!(
                "Attempt {}: break the problem into smaller steps.",
                request.attempt_count
            )),
            hint_level: None,
            agent: Some("TutorAgent".into()),
        })
    }

    async fn generate_quiz(&self, topic_id: TopicId) -> Result<Quiz, ApiError> {
        let state = self.enter(Endpoint::GenerateQuiz)?;
        state
            .quizzes
            .get(&topic_id)
            .cloned()
            .ok_or_else(|| not_found("Quiz"))
    }

    async fn submit_answer(&self, submission: &AnswerSubmission) -> Result<AnswerResult, ApiError> {
        drop(self.enter(Endpoint::SubmitAnswer)?);

        let mut open = self.gradings_open.subscribe();
        // The sender lives as long as `self`, so this only errors if it was dropped.
        let _ = open.wait_for(|open| *open).await;

        let mut state = self.lock();
        state.submissions.push(submission.clone());
        let is_correct = submission.user_answer == submission.correct_answer;
        let entry = state.knowledge.entry(submission.topic_id).or_default();
        let delta = if is_correct { 0.1 } else { -0.05 };
        entry.knowledge_level = (entry.knowledge_level + delta).clamp(0.0, 1.0);
        entry.practice_count += 1;
        let new_knowledge_level = entry.knowledge_level;

        let explanation = if is_correct {
            "Correct!".to_string()
        } else {
            format!("The correct answer is {}.", submission.correct_answer)
        };
        Ok(AnswerResult {
            is_correct,
            explanation,
            new_knowledge_level,
            confidence: Some(entry.confidence),
        })
    }

    async fn knowledge_state(&self, topic_id: TopicId) -> Result<KnowledgeState, ApiError> {
        let state = self.enter(Endpoint::KnowledgeState)?;
        if state.failing_states.contains(&topic_id) {
            return Err(ApiError::status(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Knowledge state unavailable",
            ));
        }
        Ok(state.knowledge.get(&topic_id).cloned().unwrap_or_default())
    }

    async fn progress_summary(&self) -> Result<ProgressSummary, ApiError> {
        let state = self.enter(Endpoint::ProgressSummary)?;
        Ok(state.summary.clone())
    }

    async fn study_tips(&self) -> Result<StudyTips, ApiError> {
        let state = self.enter(Endpoint::StudyTips)?;
        Ok(state.tips.clone())
    }

    async fn next_topic(&self, current: Option<TopicId>) -> Result<Topic, ApiError> {
        let state = self.enter(Endpoint::NextTopic)?;
        state
            .next_topic
            .clone()
            .filter(|topic| Some(topic.id) != current)
            .ok_or_else(|| {
                ApiError::from_body(
                    StatusCode::NOT_FOUND,
                    br#"{"message": "No recommendations available"}"#,
                )
            })
    }

    async fn agent_status(&self) -> Result<AgentStatus, ApiError> {
        let state = self.enter(Endpoint::AgentStatus)?;
        state
            .agent_status
            .clone()
            .ok_or_else(|| not_found("Agent status"))
    }
}
