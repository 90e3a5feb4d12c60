use serde::{Deserialize, Serialize};

use super::{deserialize_nullable_string, pick_id, EntityId, Question, QuestionLookup};

/// A quiz entry: either the full question (populated by the server) or a
/// bare reference to one in the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionRef {
    Inline(Question),
    ById(EntityId),
}

impl QuestionRef {
    /// The referenced question's id.
    pub fn id(&self) -> &EntityId {
        match self {
            QuestionRef::Inline(question) => &question.id,
            QuestionRef::ById(id) => id,
        }
    }

    /// The inline question, if the server populated it.
    pub fn as_inline(&self) -> Option<&Question> {
        match self {
            QuestionRef::Inline(question) => Some(question),
            QuestionRef::ById(_) => None,
        }
    }

    /// Resolve to a question: inline questions resolve to themselves, bare
    /// ids through `lookup`.
    pub fn resolve<'a, L>(&'a self, lookup: &'a L) -> Option<&'a Question>
    where
        L: QuestionLookup + ?Sized,
    {
        match self {
            QuestionRef::Inline(question) => Some(question),
            QuestionRef::ById(id) => lookup.lookup(id),
        }
    }
}

impl From<Question> for QuestionRef {
    fn from(question: Question) -> Self {
        QuestionRef::Inline(question)
    }
}

impl From<EntityId> for QuestionRef {
    fn from(id: EntityId) -> Self {
        QuestionRef::ById(id)
    }
}

/// A titled, ordered selection of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QuizWire")]
pub struct Quiz {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionRef>,
}

#[derive(Deserialize)]
struct QuizWire {
    #[serde(default, rename = "_id")]
    object_id: Option<EntityId>,
    #[serde(default)]
    id: Option<EntityId>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    title: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    description: String,
    #[serde(default)]
    questions: Vec<QuestionRef>,
}

impl TryFrom<QuizWire> for Quiz {
    type Error = String;

    fn try_from(wire: QuizWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: pick_id(wire.object_id, wire.id)?,
            title: wire.title,
            description: wire.description,
            questions: wire.questions,
        })
    }
}

impl Quiz {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// A quiz without questions is valid but cannot be taken.
    pub fn is_startable(&self) -> bool {
        !self.questions.is_empty()
    }

    /// Question ids in quiz order.
    pub fn question_ids(&self) -> Vec<EntityId> {
        self.questions.iter().map(|q| q.id().clone()).collect()
    }
}
