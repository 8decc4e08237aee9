mod agent;
mod ids;
mod knowledge;
mod learning;
mod progress;
mod quiz;
mod serde_ext;
mod topic;
mod user;

pub use agent::{AgentStats, AgentStatus};
pub use ids::{ParseIdError, TopicId, UserId};
pub use knowledge::{KnowledgeState, MergedTopicProgress, StateSource};
pub use learning::{CodeCheck, Hint, HintRequest, Lesson, StudyTips};
pub use progress::{ProgressSummary, RankedTopic};
pub use quiz::{AnswerResult, AnswerSubmission, Quiz, QuizQuestion};
pub use topic::{Difficulty, Topic};
pub use user::{Credentials, Registration, User};
