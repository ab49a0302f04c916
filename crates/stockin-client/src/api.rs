//! Authorized request plumbing shared by all StockIn API calls.
//!
//! The wrapper contract: every request carries a JSON content-type and,
//! when a non-empty token is stored, an `Authorization: Bearer` header.
//! A 401 response clears the stored session and yields
//! [`AuthOutcome::Unauthorized`]; callers must stop processing on that
//! variant and surface a re-login prompt. Any other response is handed
//! back raw for the caller to interpret.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use stockin_core::{Result, SessionStore, StockinError};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(40);

/// Result of an authorized request: either the credential was accepted
/// (or absent but tolerated) and a value is available, or the server
/// rejected the session and the caller must stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome<A> {
    /// The request completed; the session (if any) is still valid.
    Authorized(A),
    /// The server rejected the credential. The local session has been
    /// cleared; the user must log in again.
    Unauthorized,
}

impl<A> AuthOutcome<A> {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Converts into `Option`, discarding the unauthorized case.
    pub fn authorized(self) -> Option<A> {
        match self {
            Self::Authorized(value) => Some(value),
            Self::Unauthorized => None,
        }
    }

    /// Maps the authorized value, preserving `Unauthorized`.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> AuthOutcome<B> {
        match self {
            Self::Authorized(value) => AuthOutcome::Authorized(f(value)),
            Self::Unauthorized => AuthOutcome::Unauthorized,
        }
    }
}

/// Client for the StockIn API.
///
/// Owns the HTTP transport, the base URL, and the session store that
/// backs the bearer credential.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: SessionStore,
    timeout: Duration,
}

impl ApiClient {
    /// Creates a new client against the given base URL.
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            store,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the session store backing this client.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    /// Reads the stored token. A corrupt session file is treated as "no
    /// token" rather than failing the request.
    fn bearer_token(&self) -> Option<String> {
        match self.store.token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("failed to read stored session: {e}");
                None
            }
        }
    }

    /// Sends a request through the authorized wrapper.
    ///
    /// Attaches the JSON content-type and, if a token is stored, the
    /// bearer header. On a 401 response the stored session is cleared and
    /// `Ok(AuthOutcome::Unauthorized)` is returned; any other response is
    /// returned unmodified for the caller to interpret.
    ///
    /// # Errors
    ///
    /// Returns `StockinError::Network` if no response was produced.
    pub(crate) async fn dispatch(&self, builder: RequestBuilder) -> Result<AuthOutcome<Response>> {
        let response = builder
            .headers(auth_headers(self.bearer_token().as_deref()))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| StockinError::network(e.to_string()))?;

        if clear_if_expired(&self.store, response.status())? {
            return Ok(AuthOutcome::Unauthorized);
        }

        Ok(AuthOutcome::Authorized(response))
    }
}

/// If the status means the credential was rejected, clears the stored
/// session (token and both identity fields) and returns true.
pub fn clear_if_expired(store: &SessionStore, status: StatusCode) -> Result<bool> {
    if !session_expired(status) {
        return Ok(false);
    }
    tracing::info!("credential rejected (401), clearing stored session");
    store.clear().map_err(StockinError::from)?;
    Ok(true)
}

/// Builds the header set for an authorized request: always a JSON
/// content-type, plus `Authorization: Bearer <token>` when a non-empty
/// token is supplied.
pub fn auth_headers(token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = token.filter(|t| !t.trim().is_empty())
        && let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}"))
    {
        headers.insert(AUTHORIZATION, value);
    }

    headers
}

/// Returns true when a response status means the session is over.
pub fn session_expired(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED
}

/// Extracts a user-facing error message from an error response body.
///
/// The API reports failures as `{"error": ...}` (newer endpoints) or
/// `{"message": ...}` (legacy ones); anything else falls back to a
/// generic text carrying the status code.
pub fn extract_error_message(body: &str, status: StatusCode) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

/// Converts a non-success response into a typed API error.
pub(crate) async fn error_from_response(response: Response) -> StockinError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    StockinError::api(status.as_u16(), extract_error_message(&body, status))
}

/// Decodes a JSON response body into the expected type.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json::<T>().await.map_err(|e| {
        StockinError::Serialization {
            format: "JSON".to_string(),
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_with_token_carry_bearer() {
        let headers = auth_headers(Some("tok-123"));
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok-123");
    }

    #[test]
    fn test_headers_without_token_omit_authorization() {
        let headers = auth_headers(None);
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_empty_token_omits_authorization() {
        let headers = auth_headers(Some("   "));
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_only_401_means_session_expired() {
        assert!(session_expired(StatusCode::UNAUTHORIZED));
        assert!(!session_expired(StatusCode::FORBIDDEN));
        assert!(!session_expired(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!session_expired(StatusCode::OK));
    }

    #[test]
    fn test_extract_error_prefers_error_field() {
        let message = extract_error_message(
            r#"{"error": "Invalid login credentials"}"#,
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(message, "Invalid login credentials");
    }

    #[test]
    fn test_extract_error_falls_back_to_message_field() {
        let message = extract_error_message(
            r#"{"message": "Check your email"}"#,
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(message, "Check your email");
    }

    #[test]
    fn test_extract_error_generic_fallback() {
        let message = extract_error_message("<html>gateway</html>", StatusCode::BAD_GATEWAY);
        assert_eq!(message, "Request failed with status 502");

        let message = extract_error_message("", StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Request failed with status 500");
    }

    #[test]
    fn test_outcome_map_and_authorized() {
        let outcome = AuthOutcome::Authorized(2).map(|n| n * 2);
        assert_eq!(outcome.authorized(), Some(4));

        let outcome: AuthOutcome<i32> = AuthOutcome::Unauthorized;
        assert!(outcome.is_unauthorized());
        assert_eq!(outcome.map(|n| n * 2).authorized(), None);
    }

    #[test]
    fn test_401_clears_stored_session() {
        use stockin_core::Session;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path()).unwrap();
        store
            .save(&Session::new(
                "tok-123",
                Some("a@b.com".to_string()),
                Some("user-1".to_string()),
            ))
            .unwrap();

        let expired = clear_if_expired(&store, StatusCode::UNAUTHORIZED).unwrap();

        assert!(expired);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_non_401_keeps_stored_session() {
        use stockin_core::Session;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path()).unwrap();
        store.save(&Session::new("tok-123", None, None)).unwrap();

        assert!(!clear_if_expired(&store, StatusCode::INTERNAL_SERVER_ERROR).unwrap());
        assert!(store.is_logged_in());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path()).unwrap();
        let client = ApiClient::new("http://localhost:8000/", store);
        assert_eq!(client.url("/api/research"), "http://localhost:8000/api/research");
    }
}
