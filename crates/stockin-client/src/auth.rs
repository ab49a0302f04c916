//! Login, signup, and logout operations.
//!
//! Two generations of endpoints exist. The newer `/api/auth/*` endpoints
//! return a full session envelope (`{session: {access_token, user}}`) and
//! may defer with `{requires_verification: true}`; the legacy `/api/login`
//! and `/api/signup` endpoints return a bare `{access_token}` or a
//! `{message}`. The client uses the newer generation; the legacy
//! operations are kept for servers that still run the old handlers.

use serde::{Deserialize, Serialize};

use stockin_core::{Credentials, Result, Session, SignupForm, StockinError};

use crate::api::{ApiClient, AuthOutcome, decode_json, error_from_response};

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Credentials> for CredentialsRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            email: &credentials.email,
            password: &credentials.password,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionEnvelope {
    session: WireSession,
}

#[derive(Debug, Deserialize)]
struct WireSession {
    access_token: String,
    user: WireUser,
}

#[derive(Debug, Default, Deserialize)]
struct WireUser {
    email: Option<String>,
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignupEnvelope {
    #[serde(default)]
    requires_verification: bool,
    session: Option<WireSession>,
}

#[derive(Debug, Deserialize)]
struct LegacyTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct LegacyMessageResponse {
    #[serde(default)]
    message: Option<String>,
}

impl From<WireSession> for Session {
    fn from(wire: WireSession) -> Self {
        Session::new(wire.access_token, wire.user.email, wire.user.id)
    }
}

/// Result of a successful signup request.
#[derive(Debug, Clone, PartialEq)]
pub enum SignupOutcome {
    /// Auto-login was enabled server-side; the session has been persisted.
    SessionCreated(Session),
    /// The account exists but the email must be verified before login; no
    /// session was persisted.
    VerificationRequired,
}

impl ApiClient {
    /// Logs in against `/api/auth/login` and persists the returned session.
    ///
    /// # Errors
    ///
    /// - `Validation` if either credential field is empty (no network call
    ///   is made)
    /// - `Unauthorized` if the server rejects the credentials with a 401
    /// - `Api` with the server-supplied error text on other failures
    /// - `Network` if no response was produced
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        credentials.validate()?;

        let request = CredentialsRequest::from(credentials);
        let outcome = self
            .dispatch(self.post("/api/auth/login").json(&request))
            .await?;

        let response = match outcome {
            AuthOutcome::Authorized(response) => response,
            AuthOutcome::Unauthorized => return Err(StockinError::Unauthorized),
        };

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let envelope: SessionEnvelope = decode_json(response).await?;
        let session = Session::from(envelope.session);
        self.store().save(&session)?;
        tracing::info!(email = ?session.user_email, "logged in");

        Ok(session)
    }

    /// Signs up against `/api/auth/signup`.
    ///
    /// When the server declares `requires_verification`, no session is
    /// persisted and the caller should show an informational message
    /// instead of proceeding.
    ///
    /// # Errors
    ///
    /// - `Validation` for empty fields, mismatched confirmation, or a
    ///   password shorter than 6 characters (no network call is made)
    /// - `Api` / `Network` / `Unauthorized` as for [`ApiClient::login`]
    pub async fn signup(&self, form: &SignupForm) -> Result<SignupOutcome> {
        form.validate()?;

        let credentials = form.credentials();
        let request = CredentialsRequest::from(&credentials);
        let outcome = self
            .dispatch(self.post("/api/auth/signup").json(&request))
            .await?;

        let response = match outcome {
            AuthOutcome::Authorized(response) => response,
            AuthOutcome::Unauthorized => return Err(StockinError::Unauthorized),
        };

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let envelope: SignupEnvelope = decode_json(response).await?;

        if envelope.requires_verification {
            return Ok(SignupOutcome::VerificationRequired);
        }

        match envelope.session {
            Some(wire) => {
                let session = Session::from(wire);
                self.store().save(&session)?;
                tracing::info!(email = ?session.user_email, "signed up");
                Ok(SignupOutcome::SessionCreated(session))
            }
            None => Err(StockinError::internal(
                "signup response contained neither a session nor a verification flag",
            )),
        }
    }

    /// Logs out: notifies `/api/auth/logout` best-effort (the response is
    /// ignored, as are transport failures), then clears the stored
    /// session unconditionally.
    pub async fn logout(&self) -> Result<()> {
        match self.dispatch(self.post("/api/auth/logout")).await {
            Ok(_) => {}
            Err(e) => tracing::debug!("logout request failed: {e}"),
        }

        self.store().clear().map_err(StockinError::from)?;
        tracing::info!("logged out, session cleared");
        Ok(())
    }

    /// Logs in against the legacy `/api/login` endpoint, which returns a
    /// bare `{access_token}` without identity fields.
    pub async fn login_legacy(&self, credentials: &Credentials) -> Result<Session> {
        credentials.validate()?;

        let request = CredentialsRequest::from(credentials);
        let outcome = self
            .dispatch(self.post("/api/login").json(&request))
            .await?;

        let response = match outcome {
            AuthOutcome::Authorized(response) => response,
            AuthOutcome::Unauthorized => return Err(StockinError::Unauthorized),
        };

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: LegacyTokenResponse = decode_json(response).await?;
        let session = Session::new(body.access_token, None, None);
        self.store().save(&session)?;

        Ok(session)
    }

    /// Signs up against the legacy `/api/signup` endpoint. No session is
    /// returned; the server replies with an informational message (email
    /// verification is implied).
    pub async fn signup_legacy(&self, credentials: &Credentials) -> Result<String> {
        credentials.validate()?;

        let request = CredentialsRequest::from(credentials);
        let outcome = self
            .dispatch(self.post("/api/signup").json(&request))
            .await?;

        let response = match outcome {
            AuthOutcome::Authorized(response) => response,
            AuthOutcome::Unauthorized => return Err(StockinError::Unauthorized),
        };

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: LegacyMessageResponse = decode_json(response).await?;
        Ok(body.message.unwrap_or_else(|| {
            "Signup successful! Please check your email to confirm your account.".to_string()
        }))
    }
}
