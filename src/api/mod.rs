//! Typed REST client for the quiz server.
//!
//! Wraps an [`HttpClient`] with the base URL, the bearer credential and
//! JSON encoding. Non-2xx responses become [`ApiError::Status`] with the
//! parsed body so the normalizer can read its message.

mod error;

pub use error::ApiError;

use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Credentials, LoginResponse, RegisterResponse};
use crate::traits::{Headers, HttpClient, Response};

/// Default server root, matching the development backend.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Client for the quiz REST API.
///
/// One instance is shared by the session store and both caches, so the
/// credential is held behind a lock and set through `&self`.
pub struct ApiClient {
    /// Base URL, without a trailing slash
    base_url: String,
    http: Arc<dyn HttpClient>,
    auth_token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            auth_token: RwLock::new(None),
        }
    }

    /// Set the authentication token for Bearer auth.
    pub fn with_auth(self, token: &str) -> Self {
        self.set_auth_token(Some(token.to_string()));
        self
    }

    /// Replace (or clear) the bearer credential for subsequent calls.
    pub fn set_auth_token(&self, token: Option<String>) {
        let mut guard = self.auth_token.write().unwrap_or_else(|e| e.into_inner());
        *guard = token;
    }

    pub fn auth_token(&self) -> Option<String> {
        self.auth_token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/quizzes/7`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn headers(&self, with_body: bool) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if with_body {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(token) = self.auth_token() {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    /// `GET path`, decoding the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.http.get(&url, &self.headers(false)).await?;
        decode(response)
    }

    /// `POST path` with a JSON body, decoding the reply as `T`.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let body = serde_json::to_string(body).map_err(ApiError::Encode)?;
        tracing::debug!(%url, "POST");
        let response = self.http.post(&url, &body, &self.headers(true)).await?;
        decode(response)
    }

    /// `PUT path` with a JSON body, decoding the reply as `T`.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let body = serde_json::to_string(body).map_err(ApiError::Encode)?;
        tracing::debug!(%url, "PUT");
        let response = self.http.put(&url, &body, &self.headers(true)).await?;
        decode(response)
    }

    /// `DELETE path`. Any 2xx (usually 204) is success; the body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        let response = self.http.delete(&url, &self.headers(false)).await?;
        check_status(&response)
    }

    /// POST /auth/login
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.post_json("/auth/login", credentials).await
    }

    /// POST /auth/register
    ///
    /// Some servers answer with an empty body; that still counts as success.
    pub async fn register(&self, credentials: &Credentials) -> Result<RegisterResponse, ApiError> {
        let response: Option<RegisterResponse> =
            self.post_json("/auth/register", credentials).await?;
        Ok(response.unwrap_or_default())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.auth_token().is_some())
            .finish()
    }
}

fn check_status(response: &Response) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let body = serde_json::from_slice::<serde_json::Value>(&response.body).ok();
    Err(ApiError::Status {
        status: response.status,
        body,
    })
}

/// Decode a 2xx body. An empty body decodes as JSON `null`.
fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check_status(&response)?;
    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &response.body
    };
    serde_json::from_slice(body).map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::models::{Identity, Question};
    use crate::traits::{HttpError, Method};
    use serde_json::json;

    fn client(mock: &Arc<MockHttpClient>) -> ApiClient {
        ApiClient::new("http://api.test/api/", mock.clone())
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let mock = Arc::new(MockHttpClient::new());
        let api = client(&mock);
        assert_eq!(api.base_url(), "http://api.test/api");
        assert_eq!(api.url("/quizzes/7"), "http://api.test/api/quizzes/7");
        assert_eq!(api.url("questions"), "http://api.test/api/questions");
    }

    #[test]
    fn test_auth_token_set_and_clear() {
        let mock = Arc::new(MockHttpClient::new());
        let api = client(&mock).with_auth("abc");
        assert_eq!(api.auth_token().as_deref(), Some("abc"));
        api.set_auth_token(None);
        assert!(api.auth_token().is_none());
        assert!(!format!("{:?}", api).contains("abc"));
    }

    #[tokio::test]
    async fn test_bearer_header_attached() {
        let mock = Arc::new(MockHttpClient::new());
        mock.set_response(
            Method::Get,
            "http://api.test/api/questions",
            MockResponse::json(200, json!([])),
        );
        let api = client(&mock).with_auth("t1");

        let questions: Vec<Question> = api.get_json("/questions").await.unwrap();
        assert!(questions.is_empty());

        let requests = mock.get_requests();
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer t1")
        );
        assert!(!requests[0].headers.contains_key("Content-Type"));
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let mock = Arc::new(MockHttpClient::new());
        mock.set_response(
            Method::Post,
            "http://api.test/api/auth/login",
            MockResponse::json(
                200,
                json!({"token": "t1", "user": {"id": 1, "username": "alice", "isAdmin": false}}),
            ),
        );
        let api = client(&mock);

        let response = api.login(&Credentials::new("alice", "x")).await.unwrap();
        assert_eq!(response.token, "t1");
        assert_eq!(response.user, Identity::new(1u64, "alice", false));

        let sent = mock.requests_for(Method::Post)[0].json_body().unwrap();
        assert_eq!(sent, json!({"username": "alice", "password": "x"}));
    }

    #[tokio::test]
    async fn test_register_accepts_empty_body() {
        let mock = Arc::new(MockHttpClient::new());
        mock.set_response(
            Method::Post,
            "http://api.test/api/auth/register",
            MockResponse::empty(201),
        );
        let response = client(&mock)
            .register(&Credentials::new("bob", "pw"))
            .await
            .unwrap();
        assert!(response.user.is_none());
    }

    #[tokio::test]
    async fn test_non_success_keeps_body() {
        let mock = Arc::new(MockHttpClient::new());
        mock.set_response(
            Method::Post,
            "http://api.test/api/auth/login",
            MockResponse::json(401, json!({"error": "Invalid credentials"})),
        );
        let err = client(&mock)
            .login(&Credentials::new("alice", "bad"))
            .await
            .unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, Some(json!({"error": "Invalid credentials"})));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let mock = Arc::new(MockHttpClient::new());
        mock.set_response(
            Method::Delete,
            "http://api.test/api/questions/5",
            MockResponse::empty(204),
        );
        client(&mock).delete("/questions/5").await.unwrap();
    }

    #[tokio::test]
    async fn test_transport_and_decode_errors() {
        let mock = Arc::new(MockHttpClient::new());
        mock.set_response(
            Method::Get,
            "http://api.test/api/quizzes",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );
        mock.set_response(
            Method::Get,
            "http://api.test/api/questions",
            MockResponse::json(200, json!({"not": "a list"})),
        );
        let api = client(&mock);

        let err = api.get_json::<Vec<Question>>("/quizzes").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));

        let err = api.get_json::<Vec<Question>>("/questions").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
