use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::{deserialize_nullable_string, pick_id, EntityId};

/// Fewest options a question may have.
pub const MIN_OPTIONS: usize = 2;

/// Most options a question may have.
pub const MAX_OPTIONS: usize = 6;

/// A multiple-choice question from the shared bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QuestionWire")]
pub struct Question {
    pub id: EntityId,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub keywords: BTreeSet<String>,
}

/// Question as the server sends it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionWire {
    #[serde(default, rename = "_id")]
    object_id: Option<EntityId>,
    #[serde(default)]
    id: Option<EntityId>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    text: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answer_index: usize,
    #[serde(default)]
    keywords: BTreeSet<String>,
}

impl TryFrom<QuestionWire> for Question {
    type Error = String;

    fn try_from(wire: QuestionWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: pick_id(wire.object_id, wire.id)?,
            text: wire.text,
            options: wire.options,
            correct_answer_index: wire.correct_answer_index,
            keywords: wire.keywords,
        })
    }
}

impl Question {
    /// Text of the option marked correct, if the index is in range.
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(self.correct_answer_index)
            .map(String::as_str)
    }

    /// Whether `selected` is the correct option.
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_answer_index
    }

    /// Whether `index` addresses one of the options.
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }
}

/// Resolves question ids to questions, e.g. against the question cache.
pub trait QuestionLookup {
    fn lookup(&self, id: &EntityId) -> Option<&Question>;
}

impl QuestionLookup for [Question] {
    fn lookup(&self, id: &EntityId) -> Option<&Question> {
        self.iter().find(|q| &q.id == id)
    }
}

impl QuestionLookup for Vec<Question> {
    fn lookup(&self, id: &EntityId) -> Option<&Question> {
        self.as_slice().lookup(id)
    }
}

impl QuestionLookup for HashMap<EntityId, Question> {
    fn lookup(&self, id: &EntityId) -> Option<&Question> {
        self.get(id)
    }
}

/// Lookup that never resolves anything; only inline questions count.
impl QuestionLookup for () {
    fn lookup(&self, _id: &EntityId) -> Option<&Question> {
        None
    }
}
