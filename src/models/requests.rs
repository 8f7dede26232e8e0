use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::domain::{lenient_number, Coordinate, RideQuery};

/// Request to match rides against a pickup and destination.
///
/// Coordinates may be numbers or numeric strings. Anything else, or an absent
/// field, stays `None` and scores as NaN, which excludes every candidate.
/// Range checks only run when strict validation is on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MatchRidesRequest {
    #[validate(required, range(min = -90.0, max = 90.0))]
    #[serde(alias = "from_latitude", rename = "fromLatitude", default, deserialize_with = "lenient_coordinate")]
    pub from_latitude: Option<f64>,
    #[validate(required, range(min = -180.0, max = 180.0))]
    #[serde(alias = "from_longitude", rename = "fromLongitude", default, deserialize_with = "lenient_coordinate")]
    pub from_longitude: Option<f64>,
    #[validate(required, range(min = -90.0, max = 90.0))]
    #[serde(alias = "to_latitude", rename = "toLatitude", default, deserialize_with = "lenient_coordinate")]
    pub to_latitude: Option<f64>,
    #[validate(required, range(min = -180.0, max = 180.0))]
    #[serde(alias = "to_longitude", rename = "toLongitude", default, deserialize_with = "lenient_coordinate")]
    pub to_longitude: Option<f64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value))
}

impl MatchRidesRequest {
    pub fn new(pickup: Coordinate, destination: Coordinate) -> Self {
        Self {
            from_latitude: Some(pickup.latitude),
            from_longitude: Some(pickup.longitude),
            to_latitude: Some(destination.latitude),
            to_longitude: Some(destination.longitude),
            limit: None,
            offset: None,
        }
    }

    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    pub fn query(&self) -> RideQuery {
        let point = |lat: Option<f64>, lon: Option<f64>| {
            Coordinate::new(lat.unwrap_or(f64::NAN), lon.unwrap_or(f64::NAN))
        };

        RideQuery::new(
            point(self.from_latitude, self.from_longitude),
            point(self.to_latitude, self.to_longitude),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_strings_are_accepted() {
        let request: MatchRidesRequest = serde_json::from_value(json!({
            "fromLatitude": "52.52",
            "fromLongitude": 13.405,
            "toLatitude": " 52.39 ",
            "toLongitude": "13.06",
        }))
        .unwrap();

        assert_eq!(request.from_latitude, Some(52.52));
        assert_eq!(request.to_latitude, Some(52.39));
        assert_eq!(request.to_longitude, Some(13.06));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_non_numeric_coordinates_become_nan() {
        let request: MatchRidesRequest = serde_json::from_value(json!({
            "fromLatitude": "abc",
            "fromLongitude": true,
            "toLatitude": null,
            "toLongitude": [1.0],
        }))
        .unwrap();

        assert_eq!(request.from_latitude, None);
        assert_eq!(request.from_longitude, None);
        assert!(request.query().pickup.latitude.is_nan());
        assert!(request.query().destination.longitude.is_nan());
        // Strict mode still refuses them
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_absent_fields_default() {
        let request: MatchRidesRequest = serde_json::from_value(json!({ "limit": 5 })).unwrap();

        assert_eq!(request.from_latitude, None);
        assert_eq!(request.limit, Some(5));
    }
}
