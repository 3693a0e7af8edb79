//! Boundary validator for the search service payload.
//!
//! The payload reaches this layer untyped: it may come from a service
//! response, from navigation state that was never set, or from nothing
//! at all. `parse_response` turns it into a fully typed
//! [`SearchResponse`] or an explicit [`InvalidPayload`] — never a
//! panic, never a half-populated model.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{Location, Route, SearchResponse};

#[derive(Debug, Error)]
pub enum InvalidPayload {
    #[error("payload does not match the response shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("{field} holds an out-of-range coordinate")]
    Coordinate { field: String },
    #[error("route '{route}' has a negative or non-finite {field}")]
    Metric {
        route: String,
        field: &'static str,
    },
    #[error("route '{route}' has an empty polyline")]
    EmptyPaths { route: String },
}

/// Validates an untrusted JSON value against the full response shape.
///
/// Extra unknown fields are ignored; a missing or wrong-typed required
/// field anywhere in the tree fails the whole parse. The input is
/// never mutated and invalidity is an ordinary outcome, not an
/// exceptional one.
pub fn parse_response(value: &Value) -> Result<SearchResponse, InvalidPayload> {
    let response = SearchResponse::deserialize(value)?;
    check_invariants(&response)?;
    Ok(response)
}

fn check_invariants(response: &SearchResponse) -> Result<(), InvalidPayload> {
    check_location(&response.request.start_location, "request.startLocation")?;
    check_location(&response.request.end_location, "request.endLocation")?;
    for route in &response.routes {
        check_route(route)?;
    }
    Ok(())
}

fn check_location(location: &Location, field: &str) -> Result<(), InvalidPayload> {
    if location.is_valid() {
        Ok(())
    } else {
        Err(InvalidPayload::Coordinate {
            field: field.to_string(),
        })
    }
}

fn check_route(route: &Route) -> Result<(), InvalidPayload> {
    if route.paths.is_empty() {
        return Err(InvalidPayload::EmptyPaths {
            route: route.title.clone(),
        });
    }
    for (index, point) in route.paths.iter().enumerate() {
        check_location(point, &format!("route '{}' paths[{index}]", route.title))?;
    }
    for place in &route.places {
        check_location(&place.location, &format!("place '{}'", place.name))?;
    }
    check_metric(route, route.distance_in_meter, "distanceInMeter")?;
    check_metric(
        route,
        route.walking_duration_in_minutes,
        "walkingDurationInMinutes",
    )?;
    Ok(())
}

fn check_metric(route: &Route, value: f64, field: &'static str) -> Result<(), InvalidPayload> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidPayload::Metric {
            route: route.title.clone(),
            field,
        })
    }
}
