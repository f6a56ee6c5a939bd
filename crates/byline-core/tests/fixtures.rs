//! Shared helpers for the wiremock-backed integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use byline_core::api::TokenStore;
use tempfile::TempDir;

/// Creates a temp-backed token store for test isolation. Keep the
/// `TempDir` alive for the duration of the test.
pub fn temp_token_store() -> (TempDir, Arc<TokenStore>) {
    let dir = TempDir::new().expect("create temp byline home");
    let store = Arc::new(TokenStore::new(dir.path().join("token.json")));
    (dir, store)
}

/// A server-shaped article body (Laravel wire names).
pub fn article_json(id: i64, title: &str, body: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "body": body,
        "categorie": "Sport",
        "user_id": 3,
        "created_at": "2024-05-06T10:00:00Z"
    })
}

/// A server-shaped comment body, author included.
pub fn comment_json(id: i64, article_id: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "article_id": article_id,
        "user_id": 3,
        "comment": text,
        "created_at": "2024-05-06T11:00:00Z",
        "user": {"name": "Ana"}
    })
}
