use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document attribute holding a ride's origin as `[latitude, longitude]`
pub const ORIGIN_FIELD: &str = "originCoordinate";

/// Document attribute holding a ride's destination as `[latitude, longitude]`
pub const DESTINATION_FIELD: &str = "destinationCoordinates";

/// Keys computed by the matcher. Any incoming values under these keys are replaced.
pub const DERIVED_FIELDS: [&str; 3] = ["pickupDistance", "destinationDistance", "combinedDistance"];

/// A point in decimal degrees.
///
/// Latitude is assumed to lie in [-90, 90] and longitude in [-180, 180].
/// Nothing in the scoring path checks this; out-of-range values simply
/// produce meaningless distances. Use [`Coordinate::is_valid`] where stricter
/// behavior is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// A coordinate whose distance to anything is NaN
    pub const fn missing() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    /// Read a `[latitude, longitude]` pair out of a JSON value.
    ///
    /// Returns `None` unless the value is an array whose first two entries are
    /// numbers or numeric strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        let pair = value.as_array()?;
        let latitude = lenient_number(pair.first()?)?;
        let longitude = lenient_number(pair.get(1)?)?;
        Some(Self::new(latitude, longitude))
    }

    /// Finite and inside the latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A finite number sent either as a JSON number or as a string such as `"52.52"`
pub fn lenient_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

impl From<[f64; 2]> for Coordinate {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.latitude, coordinate.longitude]
    }
}

/// Names of the candidate attributes that carry the route endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateFields {
    pub origin: String,
    pub destination: String,
}

impl Default for CoordinateFields {
    fn default() -> Self {
        Self {
            origin: ORIGIN_FIELD.to_string(),
            destination: DESTINATION_FIELD.to_string(),
        }
    }
}

/// A ride record as stored. Every attribute is kept verbatim so it can be
/// handed back to the caller untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate {
    fields: Map<String, Value>,
}

impl Candidate {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record with the default origin/destination attributes set
    pub fn with_route(origin: Coordinate, destination: Coordinate) -> Self {
        Self::default()
            .with_field(ORIGIN_FIELD, Value::from(<[f64; 2]>::from(origin).to_vec()))
            .with_field(DESTINATION_FIELD, Value::from(<[f64; 2]>::from(destination).to_vec()))
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn coordinate(&self, field: &str) -> Option<Coordinate> {
        self.fields.get(field).and_then(Coordinate::from_value)
    }

    pub fn origin(&self, fields: &CoordinateFields) -> Option<Coordinate> {
        self.coordinate(&fields.origin)
    }

    pub fn destination(&self, fields: &CoordinateFields) -> Option<Coordinate> {
        self.coordinate(&fields.destination)
    }

    /// Drop any stale copies of the matcher's derived keys
    pub(crate) fn strip_derived(&mut self) {
        for key in DERIVED_FIELDS {
            self.fields.remove(key);
        }
    }
}

impl TryFrom<Value> for Candidate {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(other),
        }
    }
}

/// A candidate plus its distances to the rider's requested endpoints, in km
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(rename = "pickupDistance")]
    pub pickup_distance: f64,
    #[serde(rename = "destinationDistance")]
    pub destination_distance: f64,
    #[serde(rename = "combinedDistance")]
    pub combined_distance: f64,
}

/// The rider's requested pickup and destination
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RideQuery {
    pub pickup: Coordinate,
    pub destination: Coordinate,
}

impl RideQuery {
    pub const fn new(pickup: Coordinate, destination: Coordinate) -> Self {
        Self { pickup, destination }
    }
}

/// Pagination window used against the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

/// One page of candidates as the store returned it.
///
/// `total` counts every record matching the store query, not just this page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub candidates: Vec<Candidate>,
    pub total: u64,
}

/// Ranked survivors of one page.
///
/// `total` is the unfiltered store count carried over from the page, so it
/// can exceed the number of rides that would pass the threshold. It is not a
/// usable basis for paginating filtered results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub rides: Vec<ScoredCandidate>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}
