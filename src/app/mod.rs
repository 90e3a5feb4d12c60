//! The client coordinator.
//!
//! [`QuizClient`] owns the session store and both caches, wired to one
//! [`ApiClient`]. Presentation code can await cache and session methods
//! directly, or use the `spawn_*` methods in [`actions`] and read
//! completions from the [`AppMessage`] channel. The channel exists only
//! once [`QuizClient::take_message_rx`] has been called; until then
//! completions are logged and dropped.

mod actions;
mod messages;

pub use messages::{AppMessage, Intent};

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::adapters::{FileKeyValueStore, InMemoryStore, ReqwestHttpClient};
use crate::api::ApiClient;
use crate::cache::{QuestionCache, QuizCache};
use crate::config::ClientConfig;
use crate::grading::QuizAttempt;
use crate::lifecycle::StaleResponsePolicy;
use crate::models::Quiz;
use crate::session::SessionStore;
use crate::traits::{HttpClient, KeyValueStore};

pub struct QuizClient {
    api: Arc<ApiClient>,
    session: SessionStore,
    questions: QuestionCache,
    quizzes: QuizCache,
    /// Sender cloned into spawned tasks, set when the receiver is taken
    message_tx: Option<mpsc::UnboundedSender<AppMessage>>,
}

impl QuizClient {
    /// Wire a client over the given transport and durable store. The
    /// session is hydrated from `store` immediately.
    pub fn new(
        base_url: impl Into<String>,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
        policy: StaleResponsePolicy,
    ) -> Self {
        let api = Arc::new(ApiClient::new(base_url, http));
        let session = SessionStore::hydrate(Arc::clone(&api), store).with_stale_responses(policy);
        let questions = QuestionCache::new(Arc::clone(&api)).with_stale_responses(policy);
        let quizzes = QuizCache::new(Arc::clone(&api)).with_stale_responses(policy);
        Self {
            api,
            session,
            questions,
            quizzes,
            message_tx: None,
        }
    }

    /// Build the production client: reqwest transport and the session file
    /// under the configured state directory.
    pub fn from_config(config: &ClientConfig) -> Self {
        let http: Arc<dyn HttpClient> = match config.request_timeout {
            Some(timeout) => Arc::new(ReqwestHttpClient::with_timeout(timeout)),
            None => Arc::new(ReqwestHttpClient::new()),
        };
        let store: Arc<dyn KeyValueStore> = match &config.state_dir {
            Some(dir) => {
                let store = FileKeyValueStore::in_dir(dir);
                tracing::debug!(path = %store.path().display(), "Session file");
                Arc::new(store)
            }
            None => {
                tracing::warn!("No state directory available, session will not be saved");
                Arc::new(InMemoryStore::new())
            }
        };
        tracing::debug!(api = %config.api_base_url, policy = ?config.stale_responses, "Building client");
        Self::new(config.api_base_url.clone(), http, store, config.stale_responses)
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn questions(&self) -> &QuestionCache {
        &self.questions
    }

    pub fn quizzes(&self) -> &QuizCache {
        &self.quizzes
    }

    /// Open the completion channel and take its receiver. Intents spawned
    /// before this call report nowhere. Returns `None` after the first call.
    pub fn take_message_rx(&mut self) -> Option<mpsc::UnboundedReceiver<AppMessage>> {
        if self.message_tx.is_some() {
            return None;
        }
        let (tx, rx) = mpsc::unbounded_channel();
        self.message_tx = Some(tx);
        Some(rx)
    }

    /// Begin an attempt at `quiz`, resolving id references against the
    /// cached question bank.
    pub fn start_attempt(&self, quiz: Quiz) -> QuizAttempt {
        let bank = self.questions.items();
        QuizAttempt::new(quiz, bank.as_slice())
    }
}

impl std::fmt::Debug for QuizClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizClient")
            .field("api", &self.api)
            .field("session", &self.session)
            .field("questions", &self.questions)
            .field("quizzes", &self.quizzes)
            .finish()
    }
}
