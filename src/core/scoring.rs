use crate::core::distance::great_circle_distance;
use crate::models::{Candidate, Coordinate, CoordinateFields, RideQuery, ScoredCandidate};

/// Attach pickup, destination and combined distances to a candidate.
///
/// A missing or non-numeric endpoint scores as NaN rather than failing, so
/// the candidate drops out at the threshold check.
pub fn score_candidate(
    query: &RideQuery,
    mut candidate: Candidate,
    fields: &CoordinateFields,
) -> ScoredCandidate {
    let origin = candidate.origin(fields).unwrap_or_else(Coordinate::missing);
    let destination = candidate
        .destination(fields)
        .unwrap_or_else(Coordinate::missing);

    let pickup_distance = great_circle_distance(query.pickup, origin);
    let destination_distance = great_circle_distance(query.destination, destination);

    candidate.strip_derived();

    ScoredCandidate {
        candidate,
        pickup_distance,
        destination_distance,
        combined_distance: pickup_distance + destination_distance,
    }
}
