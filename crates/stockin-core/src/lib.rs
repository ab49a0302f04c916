pub mod config;
pub mod error;
pub mod message;
pub mod paths;
pub mod query;
pub mod session;
pub mod store;

// Re-export common types
pub use config::ClientConfig;
pub use error::{Result, StockinError};
pub use message::{ChatMessage, MessageRole, Transcript};
pub use query::ResearchQuery;
pub use session::{Credentials, Session, SignupForm};
pub use store::SessionStore;
