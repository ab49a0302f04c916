//! HTTP client for the StockIn API.
//!
//! [`ApiClient`] owns the HTTP transport, the API base URL, and the
//! on-disk session store. Every call that reaches a token-gated endpoint
//! goes through the authorized-request wrapper, which attaches the stored
//! bearer token and maps a 401 rejection to [`AuthOutcome::Unauthorized`]
//! after clearing the session.

pub mod api;
pub mod auth;
pub mod research;

pub use api::{ApiClient, AuthOutcome};
pub use auth::SignupOutcome;
pub use research::{Favourite, RecentEntry};
