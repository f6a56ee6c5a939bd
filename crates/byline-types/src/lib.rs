//! Record and payload types for the byline article API.
//!
//! Field names follow the server's wire format (Laravel-style snake_case,
//! with a few legacy names like `categorie` and `comment`); the Rust-side
//! names are normalized via serde renames.

mod category;

pub use category::Category;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An article as returned by the server.
///
/// Ids are always server-assigned; clients never invent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Free-form category value; known values are listed in [`Category`].
    #[serde(rename = "categorie")]
    pub category: String,
    #[serde(rename = "user_id")]
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Article {
    /// Returns true if `user` authored this article.
    ///
    /// Whether that grants edit/delete rights is the caller's decision.
    pub fn is_authored_by(&self, user: &UserIdentity) -> bool {
        self.author_id == user.id
    }

    /// Returns the body truncated to `max_chars` characters, with a
    /// trailing ellipsis when anything was cut.
    pub fn excerpt(&self, max_chars: usize) -> String {
        if self.body.chars().count() <= max_chars {
            return self.body.clone();
        }
        let cut: String = self.body.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

/// A comment nested under exactly one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub article_id: i64,
    #[serde(rename = "user_id")]
    pub author_id: i64,
    #[serde(rename = "comment")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Author display info. The server omits this for deleted accounts;
    /// a placeholder author is substituted so rendering never deals with
    /// an absent field.
    #[serde(rename = "user", default)]
    pub author: CommentAuthor,
}

impl Comment {
    /// Returns true if `user` authored this comment.
    pub fn is_authored_by(&self, user: &UserIdentity) -> bool {
        self.author_id == user.id
    }
}

/// Display info for a comment's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Default for CommentAuthor {
    fn default() -> Self {
        Self {
            name: "unknown".to_string(),
            avatar: None,
        }
    }
}

/// The authenticated user, fetched fresh per session.
///
/// Used only for ownership comparisons; never cached beyond the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    #[serde(rename = "name")]
    pub display_name: String,
}

/// Payload for creating or updating an article.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDraft {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(rename = "categorie", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            image_path: None,
            category: None,
        }
    }
}

/// Payload for adding a comment to an article.
///
/// The server also scopes comments by the request path; `article_id` is
/// carried in the body as well because the API expects both.
#[derive(Debug, Clone, Serialize)]
pub struct CommentDraft {
    pub article_id: i64,
    #[serde(rename = "user_id")]
    pub author_id: i64,
    #[serde(rename = "comment")]
    pub text: String,
}

/// Payload for registering a new account.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Payload for logging in.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Server response to a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserIdentity>,
}
