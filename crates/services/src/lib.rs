#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetched;
pub mod learning;
pub mod notify;
pub mod progress;
pub mod quiz;

pub use tutor_core::Clock;

pub use api::{Endpoint, HttpTutorApi, InMemoryTutorApi, TutorApi};
pub use app_services::AppServices;
pub use auth::AuthService;
pub use config::ApiConfig;
pub use dashboard::{Dashboard, DashboardService};
pub use error::{ApiError, AppServicesError, ConfigError, QuizServiceError};
pub use fetched::Fetched;
pub use learning::{LearningService, Playground};
pub use notify::{Notice, NoticeLevel, Notifier, RecordingNotifier};
pub use progress::{ProgressReport, ProgressService, merge_progress};
pub use quiz::{QuizService, QuizSession};
