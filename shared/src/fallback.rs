//! Fixed demonstration response shown when no payload exists or the
//! payload fails validation.

use crate::{Location, Place, Route, SearchRequest, SearchResponse};

/// Pure constructor for the fallback response: a single demonstration
/// route through a Tokyo park, satisfying every domain invariant.
pub fn fallback_response() -> SearchResponse {
    SearchResponse {
        request: SearchRequest {
            query: "Mostly shaded route to the nearest park".into(),
            start_location: Location::new(35.6895, 139.6917),
            end_location: Location::new(35.6895, 139.6917),
        },
        paragraphs: vec![
            "We found some routes that match your preference.".into(),
            "The following is the best route we found for you.".into(),
        ],
        routes: vec![Route {
            title: "Shaded route with greenery".into(),
            description: "Much greenery on this route, and you can see shading by the greeneries."
                .into(),
            paths: vec![
                Location::new(35.5974952, 139.7859834),
                Location::new(35.7974952, 139.7859834),
                Location::new(35.7974952, 139.7859834),
                Location::new(35.6974952, 139.7859834),
            ],
            places: vec![
                Place {
                    name: "Your current location".into(),
                    description: "Start point: Your current location".into(),
                    location: Location::new(35.5974952, 139.7859834),
                },
                Place {
                    name: "Greenery area".into(),
                    description: "Waypoint 1: Greenery area. In fall, you can see red leaves."
                        .into(),
                    location: Location::new(35.7974952, 139.7859834),
                },
                Place {
                    name: "Good view of the park".into(),
                    description: "Waypoint 2: Good view of the park".into(),
                    location: Location::new(35.7974952, 139.7859834),
                },
                Place {
                    name: "Ryuhoku Park".into(),
                    description: "Goal: The nearest park, Ryuhoku Park".into(),
                    location: Location::new(35.6974952, 139.7859834),
                },
            ],
            distance_in_meter: 1200.0,
            walking_duration_in_minutes: 15.0,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_response;

    #[test]
    fn fallback_satisfies_the_response_invariants() {
        let response = fallback_response();
        let value = serde_json::to_value(&response).unwrap();
        let reparsed = parse_response(&value).unwrap();
        assert_eq!(reparsed, response);
    }

    #[test]
    fn fallback_always_has_something_to_render() {
        let response = fallback_response();
        assert_eq!(response.routes.len(), 1);
        assert!(!response.routes[0].paths.is_empty());
        assert!(!response.paragraphs.is_empty());
    }
}
