use crate::models::{Candidate, Coordinate, CoordinateFields, ScoredCandidate};

/// Both legs must be within `threshold_km`, each on its own.
///
/// NaN distances never compare as within range.
#[inline]
pub fn within_threshold(scored: &ScoredCandidate, threshold_km: f64) -> bool {
    scored.pickup_distance <= threshold_km && scored.destination_distance <= threshold_km
}

/// Check that a candidate carries an in-range origin and destination.
///
/// Only consulted under strict validation.
#[inline]
pub fn has_valid_route(candidate: &Candidate, fields: &CoordinateFields) -> bool {
    let valid = |point: Option<Coordinate>| point.is_some_and(|p| p.is_valid());
    valid(candidate.origin(fields)) && valid(candidate.destination(fields))
}
