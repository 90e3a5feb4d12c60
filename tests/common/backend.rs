//! An in-memory quiz server behind the `HttpClient` trait.
//!
//! Keeps a consistent store of users, questions and quizzes so tests can
//! check round trips without a network. Quizzes are listed with question
//! ids and returned from `GET /quizzes/:id` with questions inlined.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use quizbank::traits::{Headers, HttpClient, HttpError, Response};

pub const BASE_URL: &str = "http://backend.test/api";

struct User {
    id: String,
    password: String,
    admin: bool,
}

#[derive(Default)]
struct State {
    users: HashMap<String, User>,
    tokens: HashMap<String, String>,
    questions: Vec<Value>,
    quizzes: Vec<Value>,
    next_id: u64,
    quiz_ids_only: bool,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
}

fn reply(status: u16, body: Value) -> Result<Response, HttpError> {
    Ok(Response::json_body(status, &body))
}

fn id_of(value: &Value) -> Option<&str> {
    value.get("_id").and_then(Value::as_str)
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user directly.
    pub fn with_user(self, username: &str, password: &str, admin: bool) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id("u");
            state.users.insert(
                username.to_string(),
                User {
                    id,
                    password: password.to_string(),
                    admin,
                },
            );
        }
        self
    }

    /// Answer `GET /quizzes/:id` with question ids instead of inlined
    /// questions.
    pub fn serving_quiz_ids_only(self) -> Self {
        self.state.lock().unwrap().quiz_ids_only = true;
        self
    }

    pub fn question_count(&self) -> usize {
        self.state.lock().unwrap().questions.len()
    }

    fn caller(&self, headers: &Headers) -> Option<(String, bool)> {
        let token = headers.get("Authorization")?.strip_prefix("Bearer ")?;
        let state = self.state.lock().unwrap();
        let username = state.tokens.get(token)?;
        let user = state.users.get(username)?;
        Some((username.clone(), user.admin))
    }

    fn route(&self, method: &str, url: &str, body: Option<&str>, headers: &Headers) -> Result<Response, HttpError> {
        let path = url
            .strip_prefix(BASE_URL)
            .ok_or_else(|| HttpError::InvalidUrl(url.to_string()))?;
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let body: Value = body
            .map(|b| serde_json::from_str(b).unwrap_or(Value::Null))
            .unwrap_or(Value::Null);

        match (method, segments.as_slice()) {
            ("POST", ["auth", "login"]) => self.login(&body),
            ("POST", ["auth", "register"]) => self.register(&body),
            (_, [collection, rest @ ..]) if *collection == "questions" || *collection == "quizzes" => {
                let Some((_, admin)) = self.caller(headers) else {
                    return reply(401, json!({"error": "Unauthorized"}));
                };
                if method != "GET" && !admin {
                    return reply(403, json!({"error": {"message": "Admin access required"}}));
                }
                self.collection(method, collection, rest.first().copied(), body)
            }
            _ => reply(404, json!({"message": "Route not found"})),
        }
    }

    fn login(&self, body: &Value) -> Result<Response, HttpError> {
        let username = body["username"].as_str().unwrap_or_default();
        let password = body["password"].as_str().unwrap_or_default();
        let mut state = self.state.lock().unwrap();
        let user = match state.users.get(username) {
            Some(user) if user.password == password => json!({
                "_id": user.id,
                "username": username,
                "admin": user.admin,
            }),
            _ => return reply(401, json!({"error": "Invalid credentials"})),
        };
        let token = format!("token-{}-{}", username, state.tokens.len() + 1);
        state.tokens.insert(token.clone(), username.to_string());
        reply(200, json!({"token": token, "user": user}))
    }

    fn register(&self, body: &Value) -> Result<Response, HttpError> {
        let username = body["username"].as_str().unwrap_or_default().to_string();
        let password = body["password"].as_str().unwrap_or_default().to_string();
        let mut state = self.state.lock().unwrap();
        if state.users.contains_key(&username) {
            return reply(409, json!({"message": "Username already exists"}));
        }
        let id = state.next_id("u");
        state.users.insert(
            username.clone(),
            User {
                id: id.clone(),
                password,
                admin: false,
            },
        );
        reply(201, json!({"user": {"_id": id, "username": username, "admin": false}}))
    }

    fn collection(&self, method: &str, name: &str, id: Option<&str>, body: Value) -> Result<Response, HttpError> {
        let mut state = self.state.lock().unwrap();
        let (prefix, not_found) = if name == "questions" {
            ("q", "Question not found")
        } else {
            ("z", "Quiz not found")
        };

        match (method, id) {
            ("GET", None) => {
                let items = if name == "questions" { &state.questions } else { &state.quizzes };
                reply(200, Value::Array(items.clone()))
            }
            ("GET", Some(id)) => {
                let items = if name == "questions" { &state.questions } else { &state.quizzes };
                let Some(item) = items.iter().find(|item| id_of(item) == Some(id)).cloned() else {
                    return reply(404, json!({"error": {"message": not_found}}));
                };
                if name == "quizzes" && !state.quiz_ids_only {
                    return reply(200, populate(&item, &state.questions));
                }
                reply(200, item)
            }
            ("POST", None) => {
                let new_id = state.next_id(prefix);
                let mut item = body;
                item["_id"] = json!(new_id);
                let items = if name == "questions" { &mut state.questions } else { &mut state.quizzes };
                items.push(item.clone());
                reply(201, item)
            }
            ("PUT", Some(id)) => {
                let items = if name == "questions" { &mut state.questions } else { &mut state.quizzes };
                let Some(slot) = items.iter_mut().find(|item| id_of(item) == Some(id)) else {
                    return reply(404, json!({"error": {"message": not_found}}));
                };
                let mut item = body;
                item["_id"] = json!(id);
                *slot = item.clone();
                reply(200, item)
            }
            ("DELETE", Some(id)) => {
                let items = if name == "questions" { &mut state.questions } else { &mut state.quizzes };
                let before = items.len();
                items.retain(|item| id_of(item) != Some(id));
                if items.len() == before {
                    return reply(404, json!({"error": {"message": not_found}}));
                }
                Ok(Response::new(204, bytes::Bytes::new()))
            }
            _ => reply(405, json!({"error": "Method not allowed"})),
        }
    }
}

/// Replace question ids in a quiz with the stored questions, leaving
/// unknown ids as they are.
fn populate(quiz: &Value, questions: &[Value]) -> Value {
    let mut quiz = quiz.clone();
    if let Some(refs) = quiz.get_mut("questions").and_then(Value::as_array_mut) {
        for entry in refs.iter_mut() {
            if let Some(id) = entry.as_str() {
                if let Some(question) = questions.iter().find(|q| id_of(q) == Some(id)) {
                    *entry = question.clone();
                }
            }
        }
    }
    quiz
}

#[async_trait]
impl HttpClient for FakeBackend {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.route("GET", url, None, headers)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.route("POST", url, Some(body), headers)
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.route("PUT", url, Some(body), headers)
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.route("DELETE", url, None, headers)
    }
}
