//! Session lifecycle: register, login, identity lookup, logout.

use std::sync::Arc;

use byline_types::{LoginRequest, LoginResponse, Registration, UserIdentity};

use super::token::mask_token;
use super::{ApiError, ApiResult, TokenStore, Transport, read_json};

/// Authenticated session against the article API.
///
/// Holds the HTTP transport and the shared [`TokenStore`] that `login`
/// populates and every subsequent request reads.
pub struct AuthSession {
    transport: Transport,
}

impl AuthSession {
    /// Creates a session against `base_url`, sharing `tokens` with any
    /// resource clients built over the same store.
    pub fn new(base_url: impl Into<String>, tokens: Arc<TokenStore>) -> Self {
        Self {
            transport: Transport::new(base_url, tokens),
        }
    }

    /// Registers a new account and returns the created user.
    ///
    /// Server-side constraint rejections (e.g. a duplicate email) surface
    /// as validation errors and are not retried.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<UserIdentity> {
        let payload = Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.transport.post_json_anon("/register", &payload).await
    }

    /// Logs in and stores the returned credential.
    ///
    /// On success the token is persisted before the response is returned.
    /// On any failure the stored credential is left untouched; a rejected
    /// login (any non-success status) maps to an authentication error.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.transport.post_raw_anon("/login", &payload).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::credentials_rejected(status, &body));
        }

        let login: LoginResponse = read_json(response).await?;
        self.transport
            .tokens()
            .set(&login.access_token)
            .map_err(|err| ApiError::transport(format!("Failed to persist credential: {err}")))?;
        tracing::debug!(token = %mask_token(&login.access_token), "stored credential");
        Ok(login)
    }

    /// Fetches the identity behind the stored credential.
    ///
    /// Fails without issuing any network call when no credential is
    /// stored. A server-side rejection (expired/invalid token) surfaces as
    /// an authentication error; whether to clear the slot in response is
    /// the caller's policy.
    pub async fn current_user(&self) -> ApiResult<UserIdentity> {
        let token = self
            .transport
            .tokens()
            .get()
            .map_err(|err| ApiError::transport(format!("Failed to read stored credential: {err}")))?;
        if token.is_none() {
            return Err(ApiError::unauthenticated());
        }
        self.transport.get_json("/user").await
    }

    /// Invalidates the server-side session, then clears the local
    /// credential unconditionally.
    ///
    /// A failed server call is logged and otherwise ignored: local logout
    /// must always succeed so a caller is never stuck looking
    /// authenticated.
    pub async fn logout(&self) -> ApiResult<()> {
        let tokens = self.transport.tokens();
        let had_token = match tokens.get() {
            Ok(token) => token.is_some(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read credential slot before logout");
                false
            }
        };

        if had_token
            && let Err(err) = self.transport.post_empty("/logout").await
        {
            tracing::warn!(error = %err, "server-side logout failed; clearing local credential anyway");
        }

        tokens
            .clear()
            .map_err(|err| ApiError::transport(format!("Failed to clear stored credential: {err}")))
    }

    /// Returns true when a credential is stored.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.transport.tokens().get(), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: authentication check tracks the credential slot.
    #[test]
    fn test_is_authenticated_tracks_slot() {
        let dir = tempfile::tempdir().unwrap();
        let tokens = Arc::new(TokenStore::new(dir.path().join("token.json")));
        let session = AuthSession::new("http://localhost:8000/api", Arc::clone(&tokens));

        assert!(!session.is_authenticated());
        tokens.set("tok").unwrap();
        assert!(session.is_authenticated());
        tokens.clear().unwrap();
        assert!(!session.is_authenticated());
    }
}
