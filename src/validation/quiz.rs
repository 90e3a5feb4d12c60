use super::ValidationError;
use crate::models::{EntityId, Quiz, QuizPayload};

/// Editable state of the quiz form. Selected questions keep the order in
/// which they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    questions: Vec<EntityId>,
}

impl QuizDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from an existing quiz. Inline questions are flattened to
    /// their ids.
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            questions: quiz.question_ids(),
        }
    }

    pub fn questions(&self) -> &[EntityId] {
        &self.questions
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.questions.contains(id)
    }

    /// Select the question if it is not selected, otherwise deselect it.
    /// Returns whether it is selected afterwards.
    pub fn toggle_question(&mut self, id: EntityId) -> bool {
        if let Some(pos) = self.questions.iter().position(|q| q == &id) {
            self.questions.remove(pos);
            false
        } else {
            self.questions.push(id);
            true
        }
    }

    /// A quiz without questions is valid; only the title is required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        Ok(())
    }

    pub fn to_payload(&self) -> Result<QuizPayload, ValidationError> {
        self.validate()?;
        Ok(QuizPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            questions: self.questions.clone(),
        })
    }
}
