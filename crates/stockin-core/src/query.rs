//! Research query model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StockinError};

/// Default research tab when the user does not pick one.
pub const DEFAULT_TAB: &str = "overview";

/// A research question about a company, scoped to a tab (overview,
/// financials, news, ...). Serializes directly into the `/api/research`
/// request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchQuery {
    pub company: String,
    pub tab: String,
    pub question: String,
}

impl ResearchQuery {
    /// Creates a query, defaulting the tab to [`DEFAULT_TAB`] when absent.
    pub fn new(
        company: impl Into<String>,
        tab: Option<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            tab: tab.unwrap_or_else(|| DEFAULT_TAB.to_string()),
            question: question.into(),
        }
    }

    /// Validates that company and question are present. The tab is free
    /// text and never rejected.
    ///
    /// # Errors
    ///
    /// Returns `StockinError::Validation` with a user-facing message when
    /// either required field is empty.
    pub fn validate(&self) -> Result<()> {
        if self.company.trim().is_empty() || self.question.trim().is_empty() {
            return Err(StockinError::validation(
                "Please enter both company and question.",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tab_applied() {
        let query = ResearchQuery::new("ACME", None, "How was Q3?");
        assert_eq!(query.tab, DEFAULT_TAB);
    }

    #[test]
    fn test_empty_company_rejected() {
        let query = ResearchQuery::new("  ", None, "How was Q3?");
        assert!(query.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_empty_question_rejected() {
        let query = ResearchQuery::new("ACME", None, "");
        assert!(query.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_serializes_to_request_body() {
        let query = ResearchQuery::new("ACME", Some("news".to_string()), "Anything today?");
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "company": "ACME",
                "tab": "news",
                "question": "Anything today?"
            })
        );
    }
}
