//! Per-collection descriptions consumed by [`ResourceCache`](super::ResourceCache).

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{EntityId, Question, QuestionPayload, Quiz, QuizPayload};

/// Fallback messages shown when the server gives no usable failure text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureMessages {
    pub fetch_all: &'static str,
    pub fetch_one: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// A server-owned entity kept in a [`ResourceCache`](super::ResourceCache).
pub trait Resource: Clone + Send + Sync + DeserializeOwned + 'static {
    /// Body for create and update.
    type Payload: Serialize + Send + Sync;

    /// Collection path, e.g. `/quizzes`. Items live at `{PATH}/{id}`.
    const PATH: &'static str;

    /// Singular name used in logs.
    const KIND: &'static str;

    const MESSAGES: FailureMessages;

    fn id(&self) -> &EntityId;
}

impl Resource for Question {
    type Payload = QuestionPayload;
    const PATH: &'static str = "/questions";
    const KIND: &'static str = "question";
    const MESSAGES: FailureMessages = FailureMessages {
        fetch_all: "Failed to fetch questions",
        fetch_one: "Failed to fetch question",
        create: "Failed to create question",
        update: "Failed to update question",
        delete: "Failed to delete question",
    };

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Resource for Quiz {
    type Payload = QuizPayload;
    const PATH: &'static str = "/quizzes";
    const KIND: &'static str = "quiz";
    const MESSAGES: FailureMessages = FailureMessages {
        fetch_all: "Failed to fetch quizzes",
        fetch_one: "Failed to fetch quiz",
        create: "Failed to create quiz",
        update: "Failed to update quiz",
        delete: "Failed to delete quiz",
    };

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Path of one entity in `T`'s collection.
pub(crate) fn item_path<T: Resource>(id: &EntityId) -> String {
    format!("{}/{}", T::PATH, id)
}
