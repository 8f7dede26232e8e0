use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::config::AppwriteSettings;
use crate::models::{Candidate, Page, PageRequest};
use crate::services::store::{RideStore, StoreError};

/// Default request timeout for Appwrite calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Appwrite Databases API client
///
/// Lists ride documents page by page. Credentials are fixed at construction.
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
        })
    }

    pub fn from_settings(settings: &AppwriteSettings) -> Result<Self, StoreError> {
        Self::new(
            settings.endpoint.clone(),
            settings.api_key.clone(),
            settings.project_id.clone(),
            settings.database_id.clone(),
            Duration::from_secs(settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        )
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// Documents URL for a collection with limit/offset queries attached
    fn documents_url(&self, collection_id: &str, page: PageRequest) -> String {
        let queries = [format!("limit({})", page.limit), format!("offset({})", page.offset)]
            .iter()
            .map(|q| format!("queries%5B%5D={}", urlencoding::encode(q)))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}/databases/{}/collections/{}/documents?{}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection_id,
            queries
        )
    }
}

#[async_trait]
impl RideStore for AppwriteClient {
    async fn list_candidates(&self, dataset_id: &str, page: PageRequest) -> Result<Page, StoreError> {
        let url = self.documents_url(dataset_id, page);

        tracing::debug!("Listing rides from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(status, &body);
            tracing::error!("Failed to list rides in {}: {} - {}", dataset_id, status, message);
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut json: Value = response.json().await?;

        let total = json
            .get("total")
            .and_then(Value::as_u64)
            .ok_or_else(|| StoreError::InvalidResponse("Missing total count".into()))?;

        let documents = match json.get_mut("documents").map(Value::take) {
            Some(Value::Array(documents)) => documents,
            _ => return Err(StoreError::InvalidResponse("Missing documents array".into())),
        };

        let candidates = documents
            .into_iter()
            .map(Candidate::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|doc| {
                StoreError::InvalidResponse(format!("Expected a document object, got {}", doc))
            })?;

        tracing::debug!("Fetched {} rides (total: {})", candidates.len(), total);

        Ok(Page { candidates, total })
    }
}

/// Pull the `message` out of an Appwrite error body, falling back to the status
fn api_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("message")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| format!("Failed to list documents: {}", status))
}
