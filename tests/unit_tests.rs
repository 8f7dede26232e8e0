// Unit tests for Ride Match

use ride_match::core::{
    distance::{great_circle_distance, haversine_distance},
    filters::within_threshold,
    scoring::score_candidate,
    ProximityMatcher,
};
use ride_match::models::{Candidate, Coordinate, CoordinateFields, RideQuery};
use serde_json::json;

fn spread_candidates() -> Vec<Candidate> {
    // Deterministic spread around Berlin, some well outside 10km
    (0..60)
        .map(|i| {
            let step = i as f64;
            let origin = Coordinate::new(52.52 + (step * 0.37).sin() * 0.12, 13.405 + (step * 0.53).cos() * 0.15);
            let destination = Coordinate::new(52.39 + (step * 0.71).cos() * 0.1, 13.06 + (step * 0.29).sin() * 0.2);
            Candidate::with_route(origin, destination).with_field("$id", format!("ride-{}", i))
        })
        .collect()
}

fn berlin_to_potsdam() -> RideQuery {
    RideQuery::new(Coordinate::new(52.52, 13.405), Coordinate::new(52.39, 13.06))
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(40.7128, -74.0060, 40.7128, -74.0060);
    assert!(distance < 0.01);
}

#[test]
fn test_distance_is_symmetric() {
    let a = Coordinate::new(40.7580, -73.9855);
    let b = Coordinate::new(40.6782, -73.9442);

    let there = great_circle_distance(a, b);
    let back = great_circle_distance(b, a);
    assert!((there - back).abs() < 1e-9);
    // Manhattan to Brooklyn is approximately 5-15 km
    assert!(there > 5.0 && there < 15.0);
}

#[test]
fn test_equator_degree_fixture() {
    let distance = great_circle_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
    assert!((distance - 111.19).abs() < 0.5);
}

#[test]
fn test_result_membership_matches_threshold_rule() {
    let matcher = ProximityMatcher::default();
    let query = berlin_to_potsdam();
    let fields = CoordinateFields::default();
    let candidates = spread_candidates();

    let ranked = matcher.rank(&query, candidates.clone(), 10.0);

    let expected: Vec<_> = candidates
        .into_iter()
        .map(|c| score_candidate(&query, c, &fields))
        .filter(|s| s.pickup_distance <= 10.0 && s.destination_distance <= 10.0)
        .map(|s| s.candidate)
        .collect();

    assert!(!expected.is_empty(), "fixture should have some rides in range");
    assert_eq!(ranked.len(), expected.len());
    for scored in &ranked {
        assert!(within_threshold(scored, 10.0));
        assert!(expected.contains(&scored.candidate));
    }
}

#[test]
fn test_result_sorted_ascending() {
    let matcher = ProximityMatcher::default();
    let ranked = matcher.rank(&berlin_to_potsdam(), spread_candidates(), 25.0);

    assert!(ranked.len() > 1);
    for pair in ranked.windows(2) {
        assert!(pair[0].combined_distance <= pair[1].combined_distance);
    }
}

#[test]
fn test_equal_distances_keep_input_order() {
    let matcher = ProximityMatcher::default();
    let query = RideQuery::new(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0));
    let candidates: Vec<Candidate> = ["first", "second", "third"]
        .iter()
        .map(|id| {
            Candidate::with_route(Coordinate::new(0.0, 0.02), Coordinate::new(0.0, 0.0))
                .with_field("$id", *id)
        })
        .collect();

    let ranked = matcher.rank(&query, candidates, 10.0);
    let ids: Vec<_> = ranked.iter().map(|r| r.candidate.get("$id").cloned().unwrap()).collect();

    assert_eq!(ids, vec![json!("first"), json!("second"), json!("third")]);
}

#[test]
fn test_fields_pass_through() {
    let matcher = ProximityMatcher::default();
    let query = RideQuery::new(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0));
    let candidate = Candidate::with_route(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0))
        .with_field("$id", "abc")
        .with_field("price", 12.5)
        .with_field("stops", json!(["A", "B"]));

    let ranked = matcher.rank(&query, vec![candidate.clone()], 10.0);
    let body = serde_json::to_value(&ranked[0]).unwrap();

    for (key, value) in candidate.fields() {
        assert_eq!(&body[key], value, "field {} changed", key);
    }
    assert_eq!(body["pickupDistance"], 0.0);
    assert_eq!(body["destinationDistance"], 0.0);
    assert_eq!(body["combinedDistance"], 0.0);
}

#[test]
fn test_non_numeric_coordinates_are_excluded() {
    let matcher = ProximityMatcher::default();
    let query = RideQuery::new(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0));
    let candidate = Candidate::default()
        .with_field("originCoordinate", json!(["north", "east"]))
        .with_field("destinationCoordinates", json!([0.0, 0.0]));

    assert!(matcher.rank(&query, vec![candidate], 10.0).is_empty());
}

#[test]
fn test_nan_query_excludes_everything() {
    let matcher = ProximityMatcher::default();
    let query = RideQuery::new(Coordinate::missing(), Coordinate::new(52.39, 13.06));

    assert!(matcher.rank(&query, spread_candidates(), 10.0).is_empty());
}

#[test]
fn test_numeric_string_coordinates_are_matched() {
    let matcher = ProximityMatcher::default();
    let query = berlin_to_potsdam();
    let candidate = Candidate::default()
        .with_field("originCoordinate", json!(["52.52", "13.40"]))
        .with_field("destinationCoordinates", json!(["52.39", "13.06"]))
        .with_field("$id", "stringly");

    let ranked = matcher.rank(&query, vec![candidate], 10.0);

    assert_eq!(ranked.len(), 1);
    assert!(ranked[0].pickup_distance < 1.0);
    assert_eq!(ranked[0].candidate.get("originCoordinate"), Some(&json!(["52.52", "13.40"])));
}
