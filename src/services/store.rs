use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Page, PageRequest};

/// Errors surfaced by a ride store.
///
/// `Display` is the message shown to API callers, so API errors render the
/// store's own message without decoration.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

/// Paginated source of candidate rides
#[async_trait]
pub trait RideStore: Send + Sync {
    /// Fetch one page of rides from `dataset_id`. `Page::total` is the
    /// store's count for the whole collection.
    async fn list_candidates(&self, dataset_id: &str, page: PageRequest) -> Result<Page, StoreError>;
}
