//! Research, recents, and favourites operations.
//!
//! All of these endpoints are token-gated, so every call goes through the
//! authorized wrapper and can come back [`AuthOutcome::Unauthorized`].

use serde::{Deserialize, Serialize};

use stockin_core::{ResearchQuery, Result, StockinError};

use crate::api::{ApiClient, AuthOutcome, decode_json, error_from_response};

#[derive(Debug, Deserialize)]
struct AnswerResponse {
    answer: String,
}

#[derive(Debug, Deserialize)]
struct RecentsResponse {
    recents: Vec<RecentEntry>,
}

#[derive(Debug, Deserialize)]
struct FavouritesResponse {
    favourites: Vec<Favourite>,
}

/// A past research query with its answer, as recorded by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecentEntry {
    pub id: i64,
    pub company: String,
    pub tab: String,
    pub prompt: String,
    pub response: String,
    pub created_at: String,
}

/// A company marked as favourite.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Favourite {
    pub company_id: Option<i64>,
    pub company_name: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
struct FavouriteRequest<'a> {
    company_id: Option<i64>,
    company_name: &'a str,
    #[serde(rename = "isFavourite")]
    is_favourite: bool,
}

impl ApiClient {
    /// Submits a research question to `/api/research` and returns the
    /// answer text.
    ///
    /// # Errors
    ///
    /// - `Validation` if company or question is empty (no network call is
    ///   made)
    /// - `Api` / `Network` on server or transport failures
    pub async fn research(&self, query: &ResearchQuery) -> Result<AuthOutcome<String>> {
        query.validate()?;

        tracing::debug!(company = %query.company, tab = %query.tab, "submitting research query");
        let outcome = self
            .dispatch(self.post("/api/research").json(query))
            .await?;

        let response = match outcome {
            AuthOutcome::Authorized(response) => response,
            AuthOutcome::Unauthorized => return Ok(AuthOutcome::Unauthorized),
        };

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: AnswerResponse = decode_json(response).await?;
        Ok(AuthOutcome::Authorized(body.answer))
    }

    /// Fetches the most recent research queries.
    pub async fn recents(&self) -> Result<AuthOutcome<Vec<RecentEntry>>> {
        let outcome = self.dispatch(self.get("/api/recents")).await?;

        let response = match outcome {
            AuthOutcome::Authorized(response) => response,
            AuthOutcome::Unauthorized => return Ok(AuthOutcome::Unauthorized),
        };

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: RecentsResponse = decode_json(response).await?;
        Ok(AuthOutcome::Authorized(body.recents))
    }

    /// Fetches the favourite companies.
    pub async fn favourites(&self) -> Result<AuthOutcome<Vec<Favourite>>> {
        let outcome = self.dispatch(self.get("/api/favourites")).await?;

        let response = match outcome {
            AuthOutcome::Authorized(response) => response,
            AuthOutcome::Unauthorized => return Ok(AuthOutcome::Unauthorized),
        };

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: FavouritesResponse = decode_json(response).await?;
        Ok(AuthOutcome::Authorized(body.favourites))
    }

    /// Marks a company as favourite.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the company name is empty; the server
    /// rejects such requests with a 400, so no network call is made.
    pub async fn add_favourite(
        &self,
        company_id: Option<i64>,
        company_name: &str,
    ) -> Result<AuthOutcome<()>> {
        if company_name.trim().is_empty() {
            return Err(StockinError::validation("Company name is required."));
        }
        self.set_favourite(company_id, company_name, true).await
    }

    /// Removes a company from the favourites. The server requires the
    /// company name even for removal, so it must be supplied alongside
    /// the id.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the company name is empty; the server
    /// rejects such requests with a 400, so no network call is made.
    pub async fn remove_favourite(
        &self,
        company_id: i64,
        company_name: &str,
    ) -> Result<AuthOutcome<()>> {
        if company_name.trim().is_empty() {
            return Err(StockinError::validation("Company name is required."));
        }
        self.set_favourite(Some(company_id), company_name, false).await
    }

    async fn set_favourite(
        &self,
        company_id: Option<i64>,
        company_name: &str,
        is_favourite: bool,
    ) -> Result<AuthOutcome<()>> {
        let request = FavouriteRequest {
            company_id,
            company_name,
            is_favourite,
        };
        let outcome = self
            .dispatch(self.post("/api/favourites").json(&request))
            .await?;

        let response = match outcome {
            AuthOutcome::Authorized(response) => response,
            AuthOutcome::Unauthorized => return Ok(AuthOutcome::Unauthorized),
        };

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(AuthOutcome::Authorized(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockin_core::SessionStore;
    use tempfile::TempDir;

    #[test]
    fn test_decode_answer_response() {
        let body: AnswerResponse =
            serde_json::from_str(r#"{"answer": "Revenue grew 4%."}"#).unwrap();
        assert_eq!(body.answer, "Revenue grew 4%.");
    }

    #[test]
    fn test_decode_recents_response() {
        let body: RecentsResponse = serde_json::from_str(
            r#"{
                "recents": [{
                    "id": 7,
                    "company": "ACME",
                    "tab": "overview",
                    "prompt": "How was Q3?",
                    "response": "Revenue grew 4%.",
                    "created_at": "2024-01-01T00:00:00"
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(body.recents.len(), 1);
        assert_eq!(body.recents[0].company, "ACME");
    }

    #[test]
    fn test_decode_favourites_with_null_company_id() {
        let body: FavouritesResponse = serde_json::from_str(
            r#"{
                "favourites": [
                    {"company_id": 2, "company_name": "Tesla", "created_at": "2024-01-01T00:00:00"},
                    {"company_id": null, "company_name": "ACME", "created_at": "2024-01-02T00:00:00"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(body.favourites[0].company_id, Some(2));
        assert_eq!(body.favourites[1].company_id, None);
    }

    #[test]
    fn test_favourite_request_uses_legacy_field_name() {
        let request = FavouriteRequest {
            company_id: Some(2),
            company_name: "Tesla",
            is_favourite: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "company_id": 2,
                "company_name": "Tesla",
                "isFavourite": true
            })
        );
    }

    #[test]
    fn test_removal_payload_carries_company_name() {
        // The server rejects favourites requests with an empty name even
        // when isFavourite is false, so removal must send the name too.
        let request = FavouriteRequest {
            company_id: Some(2),
            company_name: "Tesla",
            is_favourite: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "company_id": 2,
                "company_name": "Tesla",
                "isFavourite": false
            })
        );
        assert!(!json["company_name"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_favourite_requires_company_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path()).unwrap();
        let client = ApiClient::new("http://256.256.256.256", store);

        let err = client.remove_favourite(2, "  ").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_add_favourite_requires_company_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path()).unwrap();
        let client = ApiClient::new("http://256.256.256.256", store);

        let err = client.add_favourite(Some(2), "").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_empty_question_never_issues_a_network_call() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path()).unwrap();
        let client = ApiClient::new("http://256.256.256.256", store);

        let query = ResearchQuery::new("ACME", None, "   ");
        let err = client.research(&query).await.unwrap_err();
        assert!(err.is_validation());
    }
}
