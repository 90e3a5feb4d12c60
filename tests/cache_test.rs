//! Resource cache behavior: round trips against a consistent server and
//! ordering of overlapping fetches under both stale-response policies.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{client_for, question_payload, seeded_backend, sign_in};
use quizbank::adapters::mock::{MockHttpClient, MockResponse};
use quizbank::api::ApiClient;
use quizbank::cache::QuestionCache;
use quizbank::lifecycle::{RequestLifecycle, StaleResponsePolicy};
use quizbank::models::{EntityId, QuestionRef, QuizPayload};
use quizbank::traits::Method;
use serde_json::json;

const MOCK_BASE: &str = "http://api.test";

#[tokio::test]
async fn test_created_question_is_listed_once_after_refetch() {
    let backend = seeded_backend();
    let client = client_for(&backend);
    sign_in(&client, "admin", "root").await;

    let created = client
        .questions()
        .create(&question_payload("2 + 2?", &["3", "4"], 1))
        .await
        .unwrap();
    assert_eq!(client.questions().len(), 1);

    let fetched = client.questions().fetch_all().await.unwrap();
    let matching: Vec<_> = fetched.iter().filter(|q| q.id == created.id).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].text, "2 + 2?");
    assert_eq!(client.questions().len(), 1);
    assert_eq!(backend.question_count(), 1);
}

#[tokio::test]
async fn test_update_of_unknown_id_leaves_items_alone() {
    let backend = seeded_backend();
    let client = client_for(&backend);
    sign_in(&client, "admin", "root").await;

    let created = client
        .questions()
        .create(&question_payload("Old", &["a", "b"], 0))
        .await
        .unwrap();

    // A second client edits the question; the first never saw it.
    let other = client_for(&backend);
    sign_in(&other, "admin", "root").await;
    let updated = other
        .questions()
        .update(&created.id, &question_payload("New", &["a", "b"], 1))
        .await
        .unwrap();
    assert_eq!(updated.text, "New");
    assert!(other.questions().is_empty());

    // The first client still holds its own copy until it refetches.
    assert_eq!(client.questions().get(&created.id).unwrap().text, "Old");
    client.questions().fetch_all().await.unwrap();
    assert_eq!(client.questions().get(&created.id).unwrap().text, "New");
}

#[tokio::test]
async fn test_delete_removes_item_and_focus() {
    let backend = seeded_backend();
    let client = client_for(&backend);
    sign_in(&client, "admin", "root").await;

    let quiz = client
        .quizzes()
        .create(&QuizPayload {
            title: "Empty".to_string(),
            description: String::new(),
            questions: Vec::new(),
        })
        .await
        .unwrap();
    client.quizzes().fetch_one(&quiz.id).await.unwrap();
    assert!(client.quizzes().focused().is_some());

    let deleted = client.quizzes().delete(&quiz.id).await.unwrap();
    assert_eq!(deleted, quiz.id);
    assert!(client.quizzes().is_empty());
    assert!(client.quizzes().focused().is_none());

    let err = client.quizzes().delete(&quiz.id).await.unwrap_err();
    assert_eq!(err.to_string(), "Quiz not found");
    assert_eq!(client.quizzes().last_error().as_deref(), Some("Quiz not found"));
}

#[tokio::test]
async fn test_fetched_quiz_has_inline_questions_and_listing_has_ids() {
    let backend = seeded_backend();
    let client = client_for(&backend);
    sign_in(&client, "admin", "root").await;

    let question = client
        .questions()
        .create(&question_payload("Capital of France?", &["Paris", "Rome"], 0))
        .await
        .unwrap();
    let quiz = client
        .quizzes()
        .create(&QuizPayload {
            title: "Geo".to_string(),
            description: "Places".to_string(),
            questions: vec![question.id.clone(), EntityId::from("missing")],
        })
        .await
        .unwrap();

    let listed = client.quizzes().fetch_all().await.unwrap();
    assert!(matches!(listed[0].questions[0], QuestionRef::ById(_)));

    let focused = client.quizzes().fetch_one(&quiz.id).await.unwrap();
    assert_eq!(focused.questions[0].as_inline(), Some(&question));
    assert_eq!(focused.questions[1], QuestionRef::ById(EntityId::from("missing")));
}

#[tokio::test]
async fn test_regular_user_cannot_mutate() {
    let backend = seeded_backend();
    let client = client_for(&backend);
    sign_in(&client, "alice", "secret").await;

    let err = client
        .questions()
        .create(&question_payload("Q", &["a", "b"], 0))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Admin access required");
    assert_eq!(client.questions().snapshot().pending_mutations(), 0);
}

fn question_json(id: &str, text: &str) -> serde_json::Value {
    json!({"_id": id, "text": text, "options": ["x", "y"], "correctAnswerIndex": 0})
}

/// Two overlapping fetches where the first issued resolves last.
async fn overlapping_fetches(policy: StaleResponsePolicy) -> QuestionCache {
    let mock = MockHttpClient::new();
    let url = format!("{}/questions", MOCK_BASE);
    mock.push_response(
        Method::Get,
        &url,
        MockResponse::json(200, json!([question_json("old", "Older request")]))
            .delayed(Duration::from_millis(80)),
    );
    mock.push_response(
        Method::Get,
        &url,
        MockResponse::json(200, json!([question_json("new", "Newer request")])),
    );

    let api = Arc::new(ApiClient::new(MOCK_BASE, Arc::new(mock)));
    let cache = QuestionCache::new(api).with_stale_responses(policy);

    let (first, second) = tokio::join!(cache.fetch_all(), cache.fetch_all());
    assert!(first.is_ok());
    assert!(second.is_ok());
    cache
}

#[tokio::test]
async fn test_last_resolved_response_wins_by_default() {
    let cache = overlapping_fetches(StaleResponsePolicy::LastResolvedWins).await;
    let items = cache.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, EntityId::from("old"));
    assert_eq!(cache.snapshot().lifecycle, RequestLifecycle::Succeeded);
}

#[tokio::test]
async fn test_latest_issued_request_wins_when_strict() {
    let cache = overlapping_fetches(StaleResponsePolicy::LatestIssuedWins).await;
    let items = cache.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, EntityId::from("new"));
    assert!(!cache.is_loading());
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_items() {
    let mock = MockHttpClient::new();
    let url = format!("{}/questions", MOCK_BASE);
    mock.push_response(Method::Get, &url, MockResponse::json(200, json!([question_json("a", "A")])));
    mock.push_response(Method::Get, &url, MockResponse::empty(500));

    let api = Arc::new(ApiClient::new(MOCK_BASE, Arc::new(mock)));
    let cache = QuestionCache::new(api);

    cache.fetch_all().await.unwrap();
    let err = cache.fetch_all().await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to fetch questions");
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.snapshot().lifecycle, RequestLifecycle::Failed);
}
