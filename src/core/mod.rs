// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use distance::{great_circle_distance, haversine_distance, EARTH_RADIUS_KM};
pub use filters::{has_valid_route, within_threshold};
pub use matcher::{ProximityMatcher, DEFAULT_MAX_DISTANCE_KM, DEFAULT_PARALLEL_THRESHOLD};
pub use scoring::score_candidate;
