//! Ride Match - proximity matching for ride-sharing requests
//!
//! Given a rider's pickup and destination, this library ranks one page of
//! stored rides by how close each ride's own origin and destination are,
//! dropping rides where either leg is beyond the configured distance.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{ProximityMatcher, distance::{great_circle_distance, haversine_distance}};
pub use models::{Candidate, Coordinate, MatchResult, MatchRidesRequest, MatchRidesResponse, Page, PageRequest, RideQuery, ScoredCandidate};
pub use services::{AppwriteClient, RideMatchService, RideStore, StoreError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let d = great_circle_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!(d > 111.0 && d < 111.5);
        assert_eq!(ProximityMatcher::default().max_distance_km(), 10.0);
    }
}
