use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Body of the match endpoint: either the ranked page or an error message.
///
/// Callers tell the two apart by the presence of the `error` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchRidesResponse {
    Matched(MatchResult),
    Failed(ErrorResponse),
}

impl MatchRidesResponse {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(ErrorResponse::new(message))
    }
}

impl<E: std::fmt::Display> From<Result<MatchResult, E>> for MatchRidesResponse {
    fn from(result: Result<MatchResult, E>) -> Self {
        match result {
            Ok(matched) => Self::Matched(matched),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
