use std::sync::Arc;

use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use crate::core::ProximityMatcher;
use crate::models::{MatchResult, MatchRidesRequest, PageRequest};
use crate::services::store::{RideStore, StoreError};

/// Page size used when a request leaves `limit` unset or zero
pub const DEFAULT_LIMIT: u32 = 10;

/// Errors that end a match request
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    InvalidRequest(String),
}

/// Fetches one page of rides and ranks it for a rider's trip
pub struct RideMatchService {
    store: Arc<dyn RideStore>,
    matcher: ProximityMatcher,
    dataset_id: String,
    default_limit: u32,
    max_limit: Option<u32>,
}

impl RideMatchService {
    pub fn new(store: Arc<dyn RideStore>, matcher: ProximityMatcher, dataset_id: impl Into<String>) -> Self {
        Self {
            store,
            matcher,
            dataset_id: dataset_id.into(),
            default_limit: DEFAULT_LIMIT,
            max_limit: None,
        }
    }

    pub fn with_default_limit(mut self, default_limit: u32) -> Self {
        self.default_limit = default_limit;
        self
    }

    pub fn with_max_limit(mut self, max_limit: Option<u32>) -> Self {
        self.max_limit = max_limit;
        self
    }

    pub fn matcher(&self) -> &ProximityMatcher {
        &self.matcher
    }

    /// Resolve limit/offset. Zero or missing values fall back to the defaults.
    pub fn page_request(&self, request: &MatchRidesRequest) -> PageRequest {
        let limit = request
            .limit
            .filter(|limit| *limit > 0)
            .unwrap_or(self.default_limit);
        let limit = match self.max_limit {
            Some(max) => limit.min(max),
            None => limit,
        };

        PageRequest {
            limit,
            offset: request.offset.unwrap_or(0),
        }
    }

    /// Fetch a page from the store and rank it.
    ///
    /// Store failures are not retried. Nothing is returned on failure, not
    /// even a partial page.
    pub async fn find_rides(&self, request: &MatchRidesRequest) -> Result<MatchResult, MatchError> {
        let span = tracing::info_span!("find_rides", request_id = %Uuid::new_v4());

        async move {
            if self.matcher.is_strict() {
                request.validate().map_err(|errors| {
                    tracing::info!("Rejecting match request: {}", errors);
                    MatchError::InvalidRequest(errors.to_string())
                })?;
            }

            let page_request = self.page_request(request);
            let query = request.query();

            tracing::info!(
                "Matching rides in {} (limit: {}, offset: {})",
                self.dataset_id,
                page_request.limit,
                page_request.offset
            );

            let page = self
                .store
                .list_candidates(&self.dataset_id, page_request)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch rides from {}: {}", self.dataset_id, e);
                    e
                })?;

            let result = self.matcher.match_page(&query, page, page_request);

            tracing::info!("Returning {} rides (store total: {})", result.rides.len(), result.total);

            Ok::<_, MatchError>(result)
        }
        .instrument(span)
        .await
    }
}
