pub mod auth;
pub mod chat;
pub mod research;

use std::time::Duration;

use anyhow::Result;
use stockin_client::ApiClient;
use stockin_core::{ClientConfig, SessionStore};

/// Builds the API client from the on-disk configuration and session store.
pub fn build_client() -> Result<ApiClient> {
    let config = ClientConfig::load()?;
    let store = SessionStore::default_location()?;
    Ok(ApiClient::new(config.base_url, store)
        .with_timeout(Duration::from_secs(config.timeout_secs)))
}

/// Prompts for a single line of input, trimming whitespace.
pub(crate) fn prompt(label: &str) -> Result<String> {
    let mut rl = rustyline::DefaultEditor::new()?;
    let line = rl.readline(label)?;
    Ok(line.trim().to_string())
}
