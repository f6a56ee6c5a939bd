//! Generic authenticated CRUD over a server collection, plus the typed
//! article and comment fronts.

use std::sync::Arc;

use byline_types::{Article, ArticleDraft, Comment, CommentDraft};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ApiResult, TokenStore, Transport};

/// Route description for a server collection.
///
/// `parent` scopes list/create under a parent record (comments live under
/// an article); by-id operations always address the flat collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRoute {
    /// Collection path segment, e.g. `articles`.
    pub collection: &'static str,
    /// Parent path segment for nested list/create, e.g. `articles`.
    pub parent: Option<&'static str>,
}

impl ResourceRoute {
    /// Top-level articles collection.
    pub const ARTICLES: ResourceRoute = ResourceRoute {
        collection: "articles",
        parent: None,
    };

    /// Comments, nested under an article for list/create.
    pub const COMMENTS: ResourceRoute = ResourceRoute {
        collection: "comments",
        parent: Some("articles"),
    };
}

/// Generic CRUD transport for one collection.
///
/// Record ordering is the server's: `list` returns records exactly as
/// received. Ids are server-assigned; `create` returns the canonical
/// record and the client never assumes its own ids are honored.
pub struct ResourceClient {
    transport: Transport,
    route: ResourceRoute,
}

impl ResourceClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<TokenStore>, route: ResourceRoute) -> Self {
        Self {
            transport: Transport::new(base_url, tokens),
            route,
        }
    }

    fn collection_path(&self, scope: Option<i64>) -> String {
        match (self.route.parent, scope) {
            (Some(parent), Some(scope)) => {
                format!("/{parent}/{scope}/{}", self.route.collection)
            }
            _ => format!("/{}", self.route.collection),
        }
    }

    fn item_path(&self, id: i64) -> String {
        format!("/{}/{id}", self.route.collection)
    }

    /// Fetches the collection, scoped under a parent when given.
    pub async fn list<T: DeserializeOwned>(&self, scope: Option<i64>) -> ApiResult<Vec<T>> {
        self.transport.get_json(&self.collection_path(scope)).await
    }

    /// Fetches a single record by id.
    pub async fn get<T: DeserializeOwned>(&self, id: i64) -> ApiResult<T> {
        self.transport.get_json(&self.item_path(id)).await
    }

    /// Creates a record and returns the server-assigned canonical form.
    pub async fn create<T: DeserializeOwned, B: Serialize>(
        &self,
        payload: &B,
        scope: Option<i64>,
    ) -> ApiResult<T> {
        self.transport
            .post_json(&self.collection_path(scope), payload)
            .await
    }

    /// Updates a record and returns the canonical updated form.
    pub async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        id: i64,
        payload: &B,
    ) -> ApiResult<T> {
        self.transport.put_json(&self.item_path(id), payload).await
    }

    /// Deletes a record. A 2xx response carries no body worth keeping.
    pub async fn remove(&self, id: i64) -> ApiResult<()> {
        self.transport.delete(&self.item_path(id)).await
    }
}

/// Typed front over the articles collection.
pub struct ArticlesClient {
    inner: ResourceClient,
}

impl ArticlesClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<TokenStore>) -> Self {
        Self {
            inner: ResourceClient::new(base_url, tokens, ResourceRoute::ARTICLES),
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<Article>> {
        self.inner.list(None).await
    }

    /// Lists articles written by one author.
    pub async fn list_by_author(&self, user_id: i64) -> ApiResult<Vec<Article>> {
        self.inner
            .transport
            .get_json(&format!("/articles?userId={user_id}"))
            .await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Article> {
        self.inner.get(id).await
    }

    pub async fn create(&self, draft: &ArticleDraft) -> ApiResult<Article> {
        self.inner.create(draft, None).await
    }

    pub async fn update(&self, id: i64, draft: &ArticleDraft) -> ApiResult<Article> {
        self.inner.update(id, draft).await
    }

    pub async fn remove(&self, id: i64) -> ApiResult<()> {
        self.inner.remove(id).await
    }
}

/// Typed front over the comments sub-collection.
///
/// List and create are scoped under an article; delete addresses the flat
/// collection. There is no comment-update route on the server.
pub struct CommentsClient {
    inner: ResourceClient,
}

impl CommentsClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<TokenStore>) -> Self {
        Self {
            inner: ResourceClient::new(base_url, tokens, ResourceRoute::COMMENTS),
        }
    }

    pub async fn list(&self, article_id: i64) -> ApiResult<Vec<Comment>> {
        self.inner.list(Some(article_id)).await
    }

    pub async fn create(&self, article_id: i64, draft: &CommentDraft) -> ApiResult<Comment> {
        self.inner.create(draft, Some(article_id)).await
    }

    pub async fn remove(&self, id: i64) -> ApiResult<()> {
        self.inner.remove(id).await
    }
}
