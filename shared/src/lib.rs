use serde::{Deserialize, Serialize};

pub mod fallback;
pub mod parse;

pub use fallback::fallback_response;
pub use parse::{parse_response, InvalidPayload};

/// A latitude/longitude pair as exchanged with the search service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite coordinates within the WGS84 value range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Wire form used by the search endpoint, e.g. `"35.6895,139.6917"`.
    pub fn to_param(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Rectangular region constraining valid location picks. Edges are
/// inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub south_west: Location,
    pub north_east: Location,
}

impl BoundingBox {
    pub fn contains(&self, location: &Location) -> bool {
        location.latitude >= self.south_west.latitude
            && location.latitude <= self.north_east.latitude
            && location.longitude >= self.south_west.longitude
            && location.longitude <= self.north_east.longitude
    }
}

/// What the user asked for. Echoed back by the service and immutable
/// once a search is issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub start_location: Location,
    pub end_location: Location,
}

/// Wire request sent to the search endpoint: coordinates collapse to
/// `"lat,lon"` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub start: String,
    pub end: String,
}

impl SearchParams {
    pub fn from_request(request: &SearchRequest) -> Self {
        Self {
            query: request.query.clone(),
            start: request.start_location.to_param(),
            end: request.end_location.to_param(),
        }
    }
}

/// A labeled point of interest along a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub description: String,
    pub location: Location,
}

/// One ranked candidate route: the polyline to draw plus its call-outs
/// and walking metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub title: String,
    pub description: String,
    pub paths: Vec<Location>,
    pub places: Vec<Place>,
    pub distance_in_meter: f64,
    pub walking_duration_in_minutes: f64,
}

/// The service's answer to one search: the echoed request, narrative
/// paragraphs, and routes ranked best-first. Route order is ranking
/// and must be preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub request: SearchRequest,
    pub paragraphs: Vec<String>,
    pub routes: Vec<Route>,
}
