// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Candidate, Coordinate, CoordinateFields, MatchResult, Page, PageRequest, RideQuery,
    ScoredCandidate, DERIVED_FIELDS, DESTINATION_FIELD, ORIGIN_FIELD,
};
pub use requests::MatchRidesRequest;
pub use responses::{ErrorResponse, HealthResponse, MatchRidesResponse};
