//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod backend;

use std::collections::BTreeSet;
use std::sync::Arc;

use quizbank::adapters::InMemoryStore;
use quizbank::app::QuizClient;
use quizbank::lifecycle::StaleResponsePolicy;
use quizbank::models::{Credentials, QuestionPayload};
use quizbank::traits::KeyValueStore;

pub use backend::{FakeBackend, BASE_URL};

/// A backend with one admin (`admin`/`root`) and one regular user
/// (`alice`/`secret`).
pub fn seeded_backend() -> FakeBackend {
    FakeBackend::new()
        .with_user("admin", "root", true)
        .with_user("alice", "secret", false)
}

/// A client talking to `backend` with an empty in-memory session store.
pub fn client_for(backend: &FakeBackend) -> QuizClient {
    client_with_store(backend, Arc::new(InMemoryStore::new()))
}

pub fn client_with_store(backend: &FakeBackend, store: Arc<dyn KeyValueStore>) -> QuizClient {
    QuizClient::new(
        BASE_URL,
        Arc::new(backend.clone()),
        store,
        StaleResponsePolicy::default(),
    )
}

/// Sign `client` in, panicking on failure.
pub async fn sign_in(client: &QuizClient, username: &str, password: &str) {
    client
        .session()
        .login(&Credentials::new(username, password))
        .await
        .expect("login should succeed");
}

pub fn question_payload(text: &str, options: &[&str], correct: usize) -> QuestionPayload {
    QuestionPayload {
        text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer_index: correct,
        keywords: BTreeSet::new(),
    }
}
