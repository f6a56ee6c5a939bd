//! Authenticated HTTP surface: credential storage, session and resource CRUD.
//!
//! All failures are normalized into [`ApiError`]; raw status codes never
//! leak past this module.

mod auth;
mod resource;
mod token;

pub use auth::AuthSession;
pub use resource::{ArticlesClient, CommentsClient, ResourceClient, ResourceRoute};
pub use token::{TokenStore, mask_token};

use std::fmt;
use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Standard User-Agent header for byline API requests.
pub const USER_AGENT: &str = concat!("byline/", env!("CARGO_PKG_VERSION"));

/// Categories of client errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// A credential was required but none is stored. Detected locally;
    /// no request is issued.
    Unauthenticated,
    /// The server rejected the credential (401/403).
    Authentication,
    /// 404 on a by-id operation.
    NotFound,
    /// 4xx carrying field-level rejection (e.g. registration conflicts).
    Validation,
    /// Network failure, malformed response, 5xx or anything unclassified.
    Transport,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Unauthenticated => write!(f, "unauthenticated"),
            ApiErrorKind::Authentication => write!(f, "authentication"),
            ApiErrorKind::NotFound => write!(f, "not_found"),
            ApiErrorKind::Validation => write!(f, "validation"),
            ApiErrorKind::Transport => write!(f, "transport"),
        }
    }
}

/// Structured client error with kind and details.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g. raw error body)
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates the no-stored-credential error.
    pub fn unauthenticated() -> Self {
        Self::new(
            ApiErrorKind::Unauthenticated,
            "No credential stored; log in first",
        )
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    /// Classifies a non-success HTTP response.
    pub fn http_status(status: StatusCode, body: &str) -> Self {
        let kind = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiErrorKind::Authentication,
            StatusCode::NOT_FOUND => ApiErrorKind::NotFound,
            StatusCode::UNPROCESSABLE_ENTITY => ApiErrorKind::Validation,
            s if s.is_client_error() && has_field_errors(body) => ApiErrorKind::Validation,
            _ => ApiErrorKind::Transport,
        };
        Self::with_status(kind, status, body)
    }

    /// Maps a rejected login attempt. Any non-success status counts as a
    /// failed authentication here, not just 401/403.
    pub fn credentials_rejected(status: StatusCode, body: &str) -> Self {
        Self::with_status(ApiErrorKind::Authentication, status, body)
    }

    fn with_status(kind: ApiErrorKind, status: StatusCode, body: &str) -> Self {
        let status = status.as_u16();
        let message = match extract_server_message(body) {
            Some(msg) => format!("HTTP {status}: {msg}"),
            None => format!("HTTP {status}"),
        };
        let details = if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        };
        Self {
            kind,
            message,
            details,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for client operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Extracts the server's `message` field when the body is JSON.
fn extract_server_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("message")
        .and_then(|v| v.as_str())
        .map(ToString::to_string)
}

/// True when a JSON body carries a Laravel-style `errors` object.
fn has_field_errors(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .map(|json| json.get("errors").is_some_and(serde_json::Value::is_object))
        .unwrap_or(false)
}

/// Shared HTTP plumbing: owned client, base URL and the token store every
/// request consults for the bearer credential.
#[derive(Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl Transport {
    pub(crate) fn new(base_url: impl Into<String>, tokens: Arc<TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub(crate) fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Builds a request, attaching the bearer credential when one is stored.
    ///
    /// An absent credential is not an error: the request proceeds
    /// unauthenticated and the server decides whether to reject it.
    fn request(&self, method: Method, path: &str) -> ApiResult<reqwest::RequestBuilder> {
        let token = self
            .tokens
            .get()
            .map_err(|err| ApiError::transport(format!("Failed to read stored credential: {err}")))?;
        let mut builder = self.anonymous(method, path);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Builds a request that never carries a credential (register, login).
    fn anonymous(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        self.http
            .request(method, url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = dispatch(self.request(Method::GET, path)?, path).await?;
        read_json(response).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = dispatch(self.request(Method::POST, path)?.json(body), path).await?;
        read_json(response).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = dispatch(self.request(Method::PUT, path)?.json(body), path).await?;
        read_json(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        dispatch(self.request(Method::DELETE, path)?, path).await?;
        Ok(())
    }

    /// POST with an empty JSON body on an authenticated route (logout).
    pub(crate) async fn post_empty(&self, path: &str) -> ApiResult<()> {
        let body = serde_json::json!({});
        dispatch(self.request(Method::POST, path)?.json(&body), path).await?;
        Ok(())
    }

    /// Unauthenticated POST returning a classified error on failure.
    pub(crate) async fn post_json_anon<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = dispatch(self.anonymous(Method::POST, path).json(body), path).await?;
        read_json(response).await
    }

    /// Unauthenticated POST returning the raw response. Only network
    /// failures are mapped; the caller owns status handling.
    pub(crate) async fn post_raw_anon<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<reqwest::Response> {
        send(self.anonymous(Method::POST, path).json(body), path).await
    }
}

async fn send(builder: reqwest::RequestBuilder, path: &str) -> ApiResult<reqwest::Response> {
    let response = builder
        .send()
        .await
        .map_err(|err| ApiError::transport(format!("Request to {path} failed: {err}")))?;
    tracing::debug!(status = %response.status(), path, "api response");
    Ok(response)
}

async fn dispatch(builder: reqwest::RequestBuilder, path: &str) -> ApiResult<reqwest::Response> {
    let response = send(builder, path).await?;
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::http_status(status, &body))
    }
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    response.json().await.map_err(|err| ApiError {
        kind: ApiErrorKind::Transport,
        message: "Malformed response body".to_string(),
        details: Some(err.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: status classification follows the error taxonomy.
    #[test]
    fn test_http_status_classification() {
        let cases = [
            (StatusCode::UNAUTHORIZED, ApiErrorKind::Authentication),
            (StatusCode::FORBIDDEN, ApiErrorKind::Authentication),
            (StatusCode::NOT_FOUND, ApiErrorKind::NotFound),
            (StatusCode::UNPROCESSABLE_ENTITY, ApiErrorKind::Validation),
            (StatusCode::INTERNAL_SERVER_ERROR, ApiErrorKind::Transport),
            (StatusCode::BAD_GATEWAY, ApiErrorKind::Transport),
        ];
        for (status, kind) in cases {
            assert_eq!(ApiError::http_status(status, "").kind, kind, "{status}");
        }
    }

    /// Test: a 4xx body with a field-errors object classifies as validation.
    #[test]
    fn test_field_errors_classify_as_validation() {
        let body = r#"{"message":"The email has already been taken.","errors":{"email":["taken"]}}"#;
        let err = ApiError::http_status(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(err.message, "HTTP 400: The email has already been taken.");
        assert!(err.details.as_deref().unwrap().contains("errors"));

        // Same status without field errors stays unclassified.
        let err = ApiError::http_status(StatusCode::BAD_REQUEST, r#"{"message":"nope"}"#);
        assert_eq!(err.kind, ApiErrorKind::Transport);
    }

    /// Test: server message extraction tolerates non-JSON bodies.
    #[test]
    fn test_message_extraction_non_json() {
        let err = ApiError::http_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.message, "HTTP 500");
        assert_eq!(err.details.as_deref(), Some("<html>oops</html>"));
    }

    /// Test: login rejection maps any status to the authentication kind.
    #[test]
    fn test_credentials_rejected_mapping() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::UNPROCESSABLE_ENTITY,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let err = ApiError::credentials_rejected(status, "");
            assert_eq!(err.kind, ApiErrorKind::Authentication, "{status}");
        }
    }
}
