mod agent_vm;
mod badge;
mod chart_vm;
mod content_vm;
mod dashboard_vm;
mod lesson_vm;
mod progress_vm;
mod quiz_vm;
mod results_vm;
mod time_fmt;
mod timeline_vm;
mod topic_vm;

pub use agent_vm::{AgentPanelVm, AgentRowVm, agent_display_name, agent_state_label};
pub use badge::{DifficultyBadgeVm, MasteryBand, Tone};
pub use chart_vm::{CHART_LABEL_LEN, ChartRowVm, map_chart_rows};
pub use content_vm::{
    DEFAULT_TRUNCATE_LEN, html_to_text, level_percent, normalize_markdown, percentage,
    sanitize_html, truncate_text,
};
pub use dashboard_vm::{DASHBOARD_TOPICS, DashboardVm, StatCardVm, map_stat_cards};
pub use lesson_vm::{LessonVm, RunOutputVm};
pub use progress_vm::{NO_STRONG_TOPICS, NO_WEAK_TOPICS, ProgressVm, RankedTopicVm};
pub use quiz_vm::{FeedbackVm, OptionVm, QuestionVm};
pub use results_vm::{AnswerReviewVm, Grade, PASS_SCORE, ResultsVm, grade_for};
pub use time_fmt::{format_date, format_datetime, relative_days_label, relative_time};
pub use timeline_vm::{TIMELINE_LEN, TimelineEntryVm, map_timeline};
pub use topic_vm::{TopicCardVm, map_topic_cards};
