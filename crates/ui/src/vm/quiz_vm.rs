use serde::Serialize;

use tutor_core::quiz::{Grading, QuizAttempt};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackVm {
    Unanswered,
    /// Answer recorded; the backend grade has not arrived yet.
    Checking,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionVm {
    pub letter: String,
    pub text: String,
    pub selected: bool,
    /// Only revealed once the answer is graded.
    pub is_answer: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionVm {
    pub position: String,
    pub progress: u32,
    pub question: String,
    pub options: Vec<OptionVm>,
    pub feedback: FeedbackVm,
    pub explanation: Option<String>,
    pub can_go_back: bool,
    pub is_last: bool,
    pub answered: usize,
    pub total: usize,
}

impl From<&QuizAttempt> for QuestionVm {
    fn from(attempt: &QuizAttempt) -> Self {
        let index = attempt.current_index();
        let total = attempt.total();
        let question = attempt.current_question();
        let record = attempt.answer(index);

        let feedback = match record.map(|r| r.grading()) {
            None => FeedbackVm::Unanswered,
            Some(Grading::Pending) => FeedbackVm::Checking,
            Some(Grading::Graded(result)) if result.is_correct => FeedbackVm::Correct,
            Some(_) => FeedbackVm::Incorrect,
        };
        let revealed = matches!(feedback, FeedbackVm::Correct | FeedbackVm::Incorrect);

        let options = question
            .options
            .iter()
            .map(|(letter, text)| OptionVm {
                letter: letter.clone(),
                text: text.clone(),
                selected: record.is_some_and(|r| &r.user_answer == letter),
                is_answer: revealed.then(|| &question.correct_answer == letter),
            })
            .collect();

        Self {
            position: format!("Question {} of {}", index + 1, total),
            progress: ((index + 1) * 100 / total.max(1)) as u32,
            question: question.question.clone(),
            options,
            feedback,
            explanation: record
                .filter(|_| revealed)
                .map(|r| r.explanation().to_string()),
            can_go_back: index > 0,
            is_last: attempt.is_last_question(),
            answered: attempt.answered_count(),
            total,
        }
    }
}
