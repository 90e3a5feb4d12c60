use std::collections::BTreeSet;

use super::ValidationError;
use crate::models::{Question, QuestionPayload, MAX_OPTIONS, MIN_OPTIONS};

/// Options a blank question form starts with.
const INITIAL_OPTIONS: usize = 4;

/// Editable state of the question form.
///
/// `keywords` is the raw comma-separated input; it is parsed when the
/// payload is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    options: Vec<String>,
    correct_answer_index: usize,
    pub keywords: String,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionDraft {
    /// A blank form with four empty options, the first marked correct.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            options: vec![String::new(); INITIAL_OPTIONS],
            correct_answer_index: 0,
            keywords: String::new(),
        }
    }

    /// Prefill the form from an existing question for editing.
    pub fn from_question(question: &Question) -> Self {
        let mut options = question.options.clone();
        while options.len() < MIN_OPTIONS {
            options.push(String::new());
        }
        options.truncate(MAX_OPTIONS);
        let correct_answer_index = question.correct_answer_index.min(options.len() - 1);

        Self {
            text: question.text.clone(),
            options,
            correct_answer_index,
            keywords: question
                .keywords
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer_index(&self) -> usize {
        self.correct_answer_index
    }

    /// Append an empty option. Rejected once the maximum is reached.
    pub fn add_option(&mut self) -> Result<(), ValidationError> {
        if self.options.len() >= MAX_OPTIONS {
            return Err(ValidationError::TooManyOptions);
        }
        self.options.push(String::new());
        Ok(())
    }

    /// Remove the option at `index`, keeping the correct index in bounds.
    ///
    /// Rejected, leaving the draft unchanged, when only the minimum number
    /// of options remain.
    pub fn remove_option(&mut self, index: usize) -> Result<(), ValidationError> {
        if self.options.len() <= MIN_OPTIONS {
            return Err(ValidationError::TooFewOptions);
        }
        if index >= self.options.len() {
            return Err(ValidationError::OptionOutOfRange { index });
        }
        self.options.remove(index);
        self.correct_answer_index = self.correct_answer_index.min(self.options.len() - 1);
        Ok(())
    }

    pub fn set_option(&mut self, index: usize, value: impl Into<String>) -> Result<(), ValidationError> {
        let option = self
            .options
            .get_mut(index)
            .ok_or(ValidationError::OptionOutOfRange { index })?;
        *option = value.into();
        Ok(())
    }

    pub fn set_correct_index(&mut self, index: usize) -> Result<(), ValidationError> {
        if index >= self.options.len() {
            return Err(ValidationError::OptionOutOfRange { index });
        }
        self.correct_answer_index = index;
        Ok(())
    }

    /// Check the content rules, in the order the form reports them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::QuestionTextRequired);
        }
        let filled = self.options.iter().filter(|o| !o.trim().is_empty()).count();
        if filled < MIN_OPTIONS {
            return Err(ValidationError::NotEnoughOptions);
        }
        let correct = self.options.get(self.correct_answer_index);
        if correct.map_or(true, |o| o.trim().is_empty()) {
            return Err(ValidationError::CorrectOptionEmpty);
        }
        Ok(())
    }

    /// Validate and build the request body.
    ///
    /// Blank options are dropped and the correct index is shifted to point
    /// at the same option in the filtered list.
    pub fn to_payload(&self) -> Result<QuestionPayload, ValidationError> {
        self.validate()?;

        let correct_answer_index = self.options[..self.correct_answer_index]
            .iter()
            .filter(|o| !o.trim().is_empty())
            .count();
        let options = self
            .options
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        Ok(QuestionPayload {
            text: self.text.trim().to_string(),
            options,
            correct_answer_index,
            keywords: parse_keywords(&self.keywords),
        })
    }
}

/// Split comma-separated keyword input, trimming and dropping blanks.
pub fn parse_keywords(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
