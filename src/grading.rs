//! Offline grading of quiz attempts.
//!
//! [`grade`] is a pure function of a quiz, an answer set and a question
//! lookup. [`QuizAttempt`] wraps it with the answer-collection phase of the
//! quiz-taking view: select answers, submit once, retry from scratch.

use std::collections::HashMap;
use std::fmt;

use crate::models::{EntityId, Question, QuestionLookup, QuestionRef, Quiz};

/// Selected option index per question, for one attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    answers: HashMap<EntityId, usize>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or change) the answer for a question.
    pub fn select(&mut self, question_id: EntityId, option: usize) {
        self.answers.insert(question_id, option);
    }

    pub fn get(&self, question_id: &EntityId) -> Option<usize> {
        self.answers.get(question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}

impl FromIterator<(EntityId, usize)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (EntityId, usize)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}

/// How one question was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question_id: EntityId,
    pub selected: Option<usize>,
    /// `None` when the question reference could not be resolved
    pub correct_index: Option<usize>,
    pub is_correct: bool,
}

/// Score of a submitted attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeResult {
    pub correct_count: usize,
    pub total: usize,
    /// `round(100 * correct / total)`, 0 for an empty quiz
    pub percentage: u8,
    /// One entry per quiz question, in quiz order
    pub outcomes: Vec<QuestionOutcome>,
}

impl GradeResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_percentage(self.percentage)
    }
}

impl fmt::Display for GradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}%)", self.correct_count, self.total, self.percentage)
    }
}

/// Coarse rating of a percentage, used to pick the result styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsPractice,
}

impl ScoreBand {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            80..=u8::MAX => ScoreBand::Excellent,
            50..=79 => ScoreBand::Good,
            _ => ScoreBand::NeedsPractice,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent work!",
            ScoreBand::Good => "Good effort!",
            ScoreBand::NeedsPractice => "Keep practicing!",
        }
    }
}

/// Integer percentage, rounding halves up. 0 when `total` is 0.
pub fn percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    ((correct * 100 + total / 2) / total) as u8
}

/// Grade `answers` against `quiz`.
///
/// A question counts as correct only when its answer equals its correct
/// index. Unanswered questions, and references `lookup` cannot resolve,
/// count toward the total but are never correct.
pub fn grade<L>(quiz: &Quiz, answers: &AnswerSet, lookup: &L) -> GradeResult
where
    L: QuestionLookup + ?Sized,
{
    let outcomes: Vec<QuestionOutcome> = quiz
        .questions
        .iter()
        .map(|question_ref| {
            let question_id = question_ref.id().clone();
            let selected = answers.get(&question_id);
            let correct_index = question_ref.resolve(lookup).map(|q| q.correct_answer_index);
            let is_correct = matches!((selected, correct_index), (Some(s), Some(c)) if s == c);
            QuestionOutcome {
                question_id,
                selected,
                correct_index,
                is_correct,
            }
        })
        .collect();

    let correct_count = outcomes.iter().filter(|o| o.is_correct).count();
    let total = outcomes.len();
    GradeResult {
        correct_count,
        total,
        percentage: percentage(correct_count, total),
        outcomes,
    }
}

/// One pass through a quiz: collect answers, then submit for a result.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    quiz: Quiz,
    /// Questions referenced by id, resolved when the attempt started
    resolved: Vec<Question>,
    answers: AnswerSet,
    result: Option<GradeResult>,
}

impl QuizAttempt {
    /// Start an attempt. Id references are resolved through `lookup` now;
    /// the quiz itself is never modified.
    pub fn new<L>(quiz: Quiz, lookup: &L) -> Self
    where
        L: QuestionLookup + ?Sized,
    {
        let resolved = quiz
            .questions
            .iter()
            .filter_map(|q| match q {
                QuestionRef::ById(id) => lookup.lookup(id).cloned(),
                QuestionRef::Inline(_) => None,
            })
            .collect();
        Self {
            quiz,
            resolved,
            answers: AnswerSet::new(),
            result: None,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// The quiz's questions in order, with the question where it could be
    /// resolved.
    pub fn questions(&self) -> impl Iterator<Item = (&EntityId, Option<&Question>)> + '_ {
        self.quiz
            .questions
            .iter()
            .map(move |q| (q.id(), q.resolve(self.resolved.as_slice())))
    }

    fn question(&self, id: &EntityId) -> Option<&Question> {
        self.quiz
            .questions
            .iter()
            .find(|q| q.id() == id)
            .and_then(|q| q.resolve(self.resolved.as_slice()))
    }

    /// Choose an option. Ignored once submitted, for questions not in the
    /// quiz, and for options the question does not have. Returns whether
    /// the answer was recorded.
    pub fn select(&mut self, question_id: &EntityId, option: usize) -> bool {
        if self.is_submitted() {
            return false;
        }
        let valid = self
            .question(question_id)
            .map_or(false, |q| q.has_option(option));
        if valid {
            self.answers.select(question_id.clone(), option);
        }
        valid
    }

    pub fn total(&self) -> usize {
        self.quiz.question_count()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn unanswered_count(&self) -> usize {
        self.total().saturating_sub(self.answered_count())
    }

    /// Fraction of questions answered, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.total() == 0 {
            return 0.0;
        }
        self.answered_count() as f32 / self.total() as f32
    }

    /// Submission needs at least one answer and is allowed once.
    pub fn can_submit(&self) -> bool {
        !self.is_submitted() && self.answered_count() > 0
    }

    pub fn is_submitted(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&GradeResult> {
        self.result.as_ref()
    }

    /// Grade the attempt. Returns `None` if nothing was answered; after the
    /// first submission returns the same result again.
    pub fn submit(&mut self) -> Option<&GradeResult> {
        if self.result.is_none() {
            if self.answers.is_empty() {
                return None;
            }
            let result = grade(&self.quiz, &self.answers, self.resolved.as_slice());
            tracing::debug!(quiz = %self.quiz.id, score = %result, "Attempt graded");
            self.result = Some(result);
        }
        self.result.as_ref()
    }

    /// Discard answers and any result, returning to answer collection.
    pub fn retry(&mut self) {
        self.answers.clear();
        self.result = None;
    }
}
