mod attempt;
mod flow;

pub use attempt::{
    AnswerRecord, Grading, GradingOutcome, QuizAttempt, QuizFlowError, QuizResults,
    score_percent,
};
pub use flow::QuizFlow;
