use serde::Serialize;

use tutor_core::model::{CodeCheck, Lesson};

use crate::vm::content_vm::{html_to_text, level_percent};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LessonVm {
    pub title: String,
    pub difficulty: Option<String>,
    pub knowledge: u32,
    pub body: String,
}

impl From<&Lesson> for LessonVm {
    fn from(lesson: &Lesson) -> Self {
        Self {
            title: lesson.topic_name.clone(),
            difficulty: lesson.difficulty.clone(),
            knowledge: level_percent(lesson.knowledge_level),
            body: html_to_text(&lesson.content),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunOutputVm {
    pub output: String,
    pub is_error: bool,
    pub attempts: u32,
}

impl RunOutputVm {
    #[must_use]
    pub fn new(check: &CodeCheck, attempts: u32) -> Self {
        Self {
            output: check.output.clone(),
            is_error: !check.is_clean(),
            attempts,
        }
    }
}
