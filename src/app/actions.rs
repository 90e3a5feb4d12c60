//! Background intents for QuizClient
//!
//! Each `spawn_*` method checks access and validates its input up front.
//! Local rejections are returned immediately so a form can show them
//! inline; accepted intents run on a spawned task that reports its outcome
//! as an [`AppMessage`].

use std::future::Future;

use tokio::task::JoinHandle;

use super::{AppMessage, Intent, QuizClient};
use crate::error::ClientError;
use crate::models::{Credentials, EntityId};
use crate::session::Access;
use crate::validation::{QuestionDraft, QuizDraft, RegistrationDraft};

impl QuizClient {
    fn spawn_intent<F, T>(
        &self,
        intent: Intent,
        work: F,
        on_success: fn(T) -> AppMessage,
    ) -> JoinHandle<()>
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
        T: Send + 'static,
    {
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = match work.await {
                Ok(value) => on_success(value),
                Err(error) => {
                    tracing::debug!(intent = intent.as_str(), error = %error, "Intent failed");
                    AppMessage::Failed { intent, error }
                }
            };
            match tx {
                Some(tx) => {
                    if tx.send(message).is_err() {
                        tracing::debug!(intent = intent.as_str(), "Completion dropped, receiver closed");
                    }
                }
                None => {
                    tracing::debug!(intent = intent.as_str(), "Completion dropped, no receiver taken");
                }
            }
        })
    }

    pub fn spawn_login(&self, credentials: Credentials) -> JoinHandle<()> {
        let session = self.session.clone();
        self.spawn_intent(
            Intent::Login,
            async move { session.login(&credentials).await },
            AppMessage::SignedIn,
        )
    }

    /// Register after checking the form locally. Does not sign in.
    pub fn spawn_register(&self, draft: &RegistrationDraft) -> Result<JoinHandle<()>, ClientError> {
        let credentials = draft.to_credentials()?;
        let session = self.session.clone();
        Ok(self.spawn_intent(
            Intent::Register,
            async move {
                session.register(&credentials).await?;
                Ok(credentials.username)
            },
            |username| AppMessage::Registered { username },
        ))
    }

    pub fn spawn_fetch_questions(&self) -> Result<JoinHandle<()>, ClientError> {
        self.session.check(Access::Authenticated)?;
        let questions = self.questions.clone();
        Ok(self.spawn_intent(
            Intent::FetchQuestions,
            async move { questions.fetch_all().await.map(|items| items.len()) },
            |count| AppMessage::QuestionsLoaded { count },
        ))
    }

    pub fn spawn_fetch_quizzes(&self) -> Result<JoinHandle<()>, ClientError> {
        self.session.check(Access::Authenticated)?;
        let quizzes = self.quizzes.clone();
        Ok(self.spawn_intent(
            Intent::FetchQuizzes,
            async move { quizzes.fetch_all().await.map(|items| items.len()) },
            |count| AppMessage::QuizzesLoaded { count },
        ))
    }

    /// Fetch one quiz into the quiz cache's focused slot.
    pub fn spawn_fetch_quiz(&self, id: EntityId) -> Result<JoinHandle<()>, ClientError> {
        self.session.check(Access::Authenticated)?;
        let quizzes = self.quizzes.clone();
        Ok(self.spawn_intent(
            Intent::FetchQuiz,
            async move { quizzes.fetch_one(&id).await },
            AppMessage::QuizLoaded,
        ))
    }

    /// Create (`id` is `None`) or update a question from the form.
    pub fn spawn_save_question(
        &self,
        id: Option<EntityId>,
        draft: &QuestionDraft,
    ) -> Result<JoinHandle<()>, ClientError> {
        self.session.check(Access::Admin)?;
        let payload = draft.to_payload()?;
        let questions = self.questions.clone();
        Ok(self.spawn_intent(
            Intent::SaveQuestion,
            async move {
                match id {
                    Some(id) => questions.update(&id, &payload).await,
                    None => questions.create(&payload).await,
                }
            },
            AppMessage::QuestionSaved,
        ))
    }

    /// Create (`id` is `None`) or update a quiz from the form.
    pub fn spawn_save_quiz(
        &self,
        id: Option<EntityId>,
        draft: &QuizDraft,
    ) -> Result<JoinHandle<()>, ClientError> {
        self.session.check(Access::Admin)?;
        let payload = draft.to_payload()?;
        let quizzes = self.quizzes.clone();
        Ok(self.spawn_intent(
            Intent::SaveQuiz,
            async move {
                match id {
                    Some(id) => quizzes.update(&id, &payload).await,
                    None => quizzes.create(&payload).await,
                }
            },
            AppMessage::QuizSaved,
        ))
    }

    pub fn spawn_delete_question(&self, id: EntityId) -> Result<JoinHandle<()>, ClientError> {
        self.session.check(Access::Admin)?;
        let questions = self.questions.clone();
        Ok(self.spawn_intent(
            Intent::DeleteQuestion,
            async move { questions.delete(&id).await },
            AppMessage::QuestionDeleted,
        ))
    }

    pub fn spawn_delete_quiz(&self, id: EntityId) -> Result<JoinHandle<()>, ClientError> {
        self.session.check(Access::Admin)?;
        let quizzes = self.quizzes.clone();
        Ok(self.spawn_intent(
            Intent::DeleteQuiz,
            async move { quizzes.delete(&id).await },
            AppMessage::QuizDeleted,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStore, MockHttpClient, MockResponse};
    use crate::lifecycle::StaleResponsePolicy;
    use crate::session::AccessDenied;
    use crate::traits::{Method, TOKEN_KEY, USER_KEY};
    use crate::validation::ValidationError;
    use serde_json::json;
    use std::sync::Arc;

    fn client(admin: bool) -> (Arc<MockHttpClient>, QuizClient) {
        let mock = Arc::new(MockHttpClient::new());
        let user = json!({"id": "1", "username": "ada", "isAdmin": admin}).to_string();
        let store = InMemoryStore::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, user.as_str())]);
        let client = QuizClient::new(
            "http://api.test",
            mock.clone(),
            Arc::new(store),
            StaleResponsePolicy::default(),
        );
        (mock, client)
    }

    #[tokio::test]
    async fn test_fetch_quizzes_reports_count() {
        let (mock, mut client) = client(false);
        mock.set_response(
            Method::Get,
            "http://api.test/quizzes",
            MockResponse::json(200, json!([{"_id": "1", "title": "A", "questions": []}])),
        );
        let mut rx = client.take_message_rx().unwrap();

        client.spawn_fetch_quizzes().unwrap().await.unwrap();

        assert_eq!(rx.recv().await, Some(AppMessage::QuizzesLoaded { count: 1 }));
        assert_eq!(client.quizzes().len(), 1);
    }

    #[tokio::test]
    async fn test_intent_without_receiver_still_applies() {
        let (mock, client) = client(false);
        mock.set_response(
            Method::Get,
            "http://api.test/quizzes",
            MockResponse::json(200, json!([{"_id": "1", "title": "A", "questions": []}])),
        );

        client.spawn_fetch_quizzes().unwrap().await.unwrap();
        assert_eq!(client.quizzes().len(), 1);
    }

    #[tokio::test]
    async fn test_only_later_intents_reach_a_late_receiver() {
        let (mock, mut client) = client(false);
        mock.set_response(
            Method::Get,
            "http://api.test/quizzes",
            MockResponse::json(200, json!([])),
        );

        client.spawn_fetch_quizzes().unwrap().await.unwrap();
        let mut rx = client.take_message_rx().unwrap();
        assert!(rx.try_recv().is_err());

        client.spawn_fetch_quizzes().unwrap().await.unwrap();
        assert_eq!(rx.recv().await, Some(AppMessage::QuizzesLoaded { count: 0 }));
    }

    #[tokio::test]
    async fn test_failure_becomes_message() {
        let (mock, mut client) = client(false);
        mock.set_response(Method::Get, "http://api.test/quizzes/7", MockResponse::empty(500));
        let mut rx = client.take_message_rx().unwrap();

        client.spawn_fetch_quiz(EntityId::from("7")).unwrap().await.unwrap();

        let message = rx.recv().await.unwrap();
        assert!(message.is_failure());
        assert_eq!(
            message,
            AppMessage::Failed {
                intent: Intent::FetchQuiz,
                error: ClientError::resource("Failed to fetch quiz"),
            }
        );
    }

    #[tokio::test]
    async fn test_mutations_require_admin() {
        let (mock, client) = client(false);
        let err = client.spawn_delete_quiz(EntityId::from("1")).unwrap_err();
        assert_eq!(err, ClientError::AccessDenied(AccessDenied::NotAdmin));
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_requires_sign_in() {
        let (mock, client) = client(false);
        client.session().logout();
        let err = client.spawn_fetch_questions().unwrap_err();
        assert_eq!(err, ClientError::AccessDenied(AccessDenied::NotAuthenticated));
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_network() {
        let (mock, client) = client(true);
        let err = client.spawn_save_question(None, &QuestionDraft::new()).unwrap_err();
        assert_eq!(err, ClientError::Validation(ValidationError::QuestionTextRequired));

        let err = client
            .spawn_register(&RegistrationDraft::new("bob", "a", "b"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_save_quiz_creates_and_updates() {
        let (mock, mut client) = client(true);
        mock.set_response(
            Method::Post,
            "http://api.test/quizzes",
            MockResponse::json(201, json!({"_id": "9", "title": "New", "questions": ["q1"]})),
        );
        mock.set_response(
            Method::Put,
            "http://api.test/quizzes/9",
            MockResponse::json(200, json!({"_id": "9", "title": "Renamed", "questions": ["q1"]})),
        );
        let mut rx = client.take_message_rx().unwrap();

        let mut draft = QuizDraft::new();
        draft.title = "New".to_string();
        draft.toggle_question(EntityId::from("q1"));
        client.spawn_save_quiz(None, &draft).unwrap().await.unwrap();
        assert!(matches!(rx.recv().await, Some(AppMessage::QuizSaved(q)) if q.title == "New"));

        draft.title = "Renamed".to_string();
        client
            .spawn_save_quiz(Some(EntityId::from("9")), &draft)
            .unwrap()
            .await
            .unwrap();
        assert!(matches!(rx.recv().await, Some(AppMessage::QuizSaved(q)) if q.title == "Renamed"));
        assert_eq!(client.quizzes().items()[0].title, "Renamed");

        let sent = mock.requests_for(Method::Put)[0].json_body().unwrap();
        assert_eq!(sent["questions"], json!(["q1"]));
    }

    #[tokio::test]
    async fn test_login_and_register_messages() {
        let mock = Arc::new(MockHttpClient::new());
        let mut client = QuizClient::new(
            "http://api.test",
            mock.clone(),
            Arc::new(InMemoryStore::new()),
            StaleResponsePolicy::default(),
        );
        mock.set_response(
            Method::Post,
            "http://api.test/auth/register",
            MockResponse::json(201, json!({})),
        );
        mock.set_response(
            Method::Post,
            "http://api.test/auth/login",
            MockResponse::json(200, json!({"token": "t", "user": {"id": 3, "username": "bob"}})),
        );
        let mut rx = client.take_message_rx().unwrap();

        client
            .spawn_register(&RegistrationDraft::new("bob", "pw", "pw"))
            .unwrap()
            .await
            .unwrap();
        assert_eq!(
            rx.recv().await,
            Some(AppMessage::Registered { username: "bob".to_string() })
        );

        client.spawn_login(Credentials::new("bob", "pw")).await.unwrap();
        match rx.recv().await {
            Some(AppMessage::SignedIn(identity)) => assert_eq!(identity.username, "bob"),
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
