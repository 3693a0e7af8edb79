//! Result orchestration: which route is on screen and which remain as
//! browsable candidates.
//!
//! The validated response is held read-only for the page's life; a new
//! search replaces it wholesale. Browsing candidates only moves the
//! locally held index, never rewrites the response.

use serde_json::Value;
use shared::{fallback_response, parse_response, Route, SearchResponse};

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSelection {
    response: SearchResponse,
    selected: Option<usize>,
}

impl RouteSelection {
    /// Starts on the best-ranked route, or the "no route" state for an
    /// empty result set.
    pub fn new(response: SearchResponse) -> Self {
        let selected = if response.routes.is_empty() {
            None
        } else {
            Some(0)
        };
        Self { response, selected }
    }

    /// The demonstration response, used whenever there is nothing
    /// valid to show.
    pub fn fallback() -> Self {
        Self::new(fallback_response())
    }

    /// Builds the page state from whatever the previous screen left
    /// behind. An absent or malformed payload is the common case, not
    /// an error: it yields the fallback.
    pub fn from_payload(payload: Option<&Value>) -> Self {
        payload
            .and_then(|value| parse_response(value).ok())
            .map(Self::new)
            .unwrap_or_else(Self::fallback)
    }

    /// The route currently on screen, or `None` for "no route found".
    pub fn displayed(&self) -> Option<&Route> {
        self.selected.and_then(|index| self.response.routes.get(index))
    }

    /// The remaining ranked routes, paired with their original rank.
    pub fn candidates(&self) -> impl Iterator<Item = (usize, &Route)> {
        self.response
            .routes
            .iter()
            .enumerate()
            .filter(move |(index, _)| Some(*index) != self.selected)
    }

    /// Switches the displayed route. An out-of-range index is ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.response.routes.len() {
            self.selected = Some(index);
        }
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.response.paragraphs
    }

    pub fn query(&self) -> &str {
        &self.response.request.query
    }

    pub fn response(&self) -> &SearchResponse {
        &self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{Location, SearchRequest};

    fn route(title: &str) -> Route {
        Route {
            title: title.into(),
            description: format!("{title} description"),
            paths: vec![Location::new(35.5, 139.5), Location::new(35.6, 139.6)],
            places: vec![],
            distance_in_meter: 900.0,
            walking_duration_in_minutes: 12.0,
        }
    }

    fn response(routes: Vec<Route>) -> SearchResponse {
        SearchResponse {
            request: SearchRequest {
                query: "a quiet walk".into(),
                start_location: Location::new(35.5, 139.5),
                end_location: Location::new(35.6, 139.6),
            },
            paragraphs: vec!["Here is what we found.".into()],
            routes,
        }
    }

    #[test]
    fn best_ranked_route_is_displayed_first() {
        let selection = RouteSelection::new(response(vec![route("R0"), route("R1")]));
        assert_eq!(selection.displayed().unwrap().title, "R0");
    }

    #[test]
    fn empty_result_set_displays_no_route() {
        let selection = RouteSelection::new(response(vec![]));
        assert!(selection.displayed().is_none());
        assert_eq!(selection.candidates().count(), 0);
    }

    #[test]
    fn candidates_are_the_remaining_ranked_routes() {
        let selection = RouteSelection::new(response(vec![route("R0"), route("R1"), route("R2")]));
        let titles: Vec<_> = selection
            .candidates()
            .map(|(index, route)| (index, route.title.as_str()))
            .collect();
        assert_eq!(titles, vec![(1, "R1"), (2, "R2")]);
    }

    #[test]
    fn selecting_a_candidate_moves_only_the_index() {
        let mut selection = RouteSelection::new(response(vec![route("R0"), route("R1")]));
        let before = selection.response().clone();

        selection.select(1);
        assert_eq!(selection.displayed().unwrap().title, "R1");
        let titles: Vec<_> = selection.candidates().map(|(_, r)| r.title.as_str()).collect();
        assert_eq!(titles, vec!["R0"]);
        assert_eq!(selection.response(), &before);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut selection = RouteSelection::new(response(vec![route("R0")]));
        selection.select(5);
        assert_eq!(selection.displayed().unwrap().title, "R0");

        let mut empty = RouteSelection::new(response(vec![]));
        empty.select(0);
        assert!(empty.displayed().is_none());
    }

    #[test]
    fn absent_payload_falls_back_to_the_demo_response() {
        let selection = RouteSelection::from_payload(None);
        assert_eq!(selection.response(), &fallback_response());
        assert!(selection.displayed().is_some());
        assert!(!selection.paragraphs().is_empty());
    }

    #[test]
    fn malformed_payload_falls_back_to_the_demo_response() {
        let payload = json!({ "routes": "not what you expected" });
        let selection = RouteSelection::from_payload(Some(&payload));
        assert_eq!(selection.response(), &fallback_response());
        assert_eq!(selection.response().routes.len(), 1);
        assert!(!selection.response().routes[0].paths.is_empty());
    }

    #[test]
    fn valid_payload_is_used_as_is() {
        let payload = serde_json::to_value(response(vec![route("R0")])).unwrap();
        let selection = RouteSelection::from_payload(Some(&payload));
        assert_eq!(selection.query(), "a quiet walk");
        assert_eq!(selection.displayed().unwrap().title, "R0");
    }
}
