use seed::{prelude::*, virtual_dom::AtValue, *};
use serde::Deserialize;
use serde_json::Value;
use serde_wasm_bindgen::to_value;
use shared::{
    parse_response, BoundingBox, Location, SearchParams, SearchRequest,
};
use wasm_bindgen::{
    JsCast,
    prelude::{JsValue, wasm_bindgen},
};

pub mod picker;
pub mod selection;

use picker::LocationPicker;
use selection::RouteSelection;

#[wasm_bindgen(module = "/route_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map();
    #[wasm_bindgen(js_name = updateRoute)]
    fn update_route_js(route: JsValue);
    #[wasm_bindgen(js_name = updateSelectionMarkers)]
    fn update_selection_markers(start: JsValue, end: JsValue);
}

fn api_root() -> String {
    if let Some(url) = option_env!("FRONTEND_API_ROOT") {
        return url.trim_end_matches('/').to_string();
    }
    "http://127.0.0.1:5000/search".to_string()
}

/// The area the picker accepts clicks from (greater Tokyo).
pub const BOUNDING_BOX: BoundingBox = BoundingBox {
    south_west: Location::new(35.0, 139.0),
    north_east: Location::new(36.0, 140.0),
};

pub struct Model {
    page: Page,
    query: String,
    picker: LocationPicker,
    pick_mode: PickMode,
    pending: bool,
    flight: SearchFlight,
    notice: Option<String>,
    error: Option<String>,
}

pub enum Page {
    Search,
    Result(RouteSelection),
}

/// Which picker slot the next map click fills.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PickMode {
    Start,
    End,
}

/// Monotonic token distinguishing the current search from superseded
/// ones. A settlement whose token is not current is stale and dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SearchFlight {
    seq: u64,
}

impl SearchFlight {
    pub fn issue(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }
}

/// A search may be issued only with a query and both slots set.
pub fn ready_for_search(query: &str, picker: &LocationPicker) -> bool {
    !query.trim().is_empty() && picker.is_complete()
}

pub enum Msg {
    QueryChanged(String),
    SetPickMode(PickMode),
    MapClicked { lat: f64, lon: f64 },
    ClearStart,
    ClearEnd,
    Submit,
    SearchFetched { seq: u64, result: Result<Value, String> },
    SelectCandidate(usize),
    BackToSearch,
}

pub fn init(url: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.stream(streams::window_event(Ev::from("map-click"), |event| {
        let event = event
            .dyn_into::<web_sys::CustomEvent>()
            .expect("map-click event must be CustomEvent");
        let detail = event.detail();
        let payload: MapClickPayload = serde_wasm_bindgen::from_value(detail)
            .unwrap_or(MapClickPayload { lat: 0.0, lon: 0.0 });
        Msg::MapClicked {
            lat: payload.lat,
            lon: payload.lon,
        }
    }));

    // Landing on /result directly carries no payload; the result page
    // then shows the demonstration response.
    let page = if url.path().first().map(String::as_str) == Some("result") {
        Page::Result(RouteSelection::from_payload(None))
    } else {
        Page::Search
    };

    let model = Model {
        page,
        query: String::new(),
        picker: LocationPicker::default(),
        pick_mode: PickMode::Start,
        pending: false,
        flight: SearchFlight::default(),
        notice: None,
        error: None,
    };

    if let Page::Result(selection) = &model.page {
        push_route_to_map(selection.displayed());
    }

    model
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::QueryChanged(val) => {
            model.query = val;
        }
        Msg::SetPickMode(mode) => {
            model.pick_mode = mode;
        }
        Msg::MapClicked { lat, lon } => {
            let location = Location::new(lat, lon);
            let attempt = match model.pick_mode {
                PickMode::Start => model.picker.set_start(location, &BOUNDING_BOX),
                PickMode::End => model.picker.set_end(location, &BOUNDING_BOX),
            };
            match attempt {
                Ok(()) => {
                    model.notice = None;
                    sync_selection_markers(&model.picker);
                }
                Err(rejected) => {
                    // The slot keeps its previous value; only tell the user.
                    model.notice = Some(rejected.to_string());
                }
            }
        }
        Msg::ClearStart => {
            model.picker.clear_start();
            sync_selection_markers(&model.picker);
        }
        Msg::ClearEnd => {
            model.picker.clear_end();
            sync_selection_markers(&model.picker);
        }
        Msg::Submit => {
            if model.pending || !ready_for_search(&model.query, &model.picker) {
                return;
            }
            let (Some(start_location), Some(end_location)) =
                (model.picker.start(), model.picker.end())
            else {
                return;
            };
            let request = SearchRequest {
                query: model.query.clone(),
                start_location,
                end_location,
            };
            let seq = model.flight.issue();
            model.pending = true;
            model.error = None;
            orders.perform_cmd(send_search(SearchParams::from_request(&request), seq));
        }
        Msg::SearchFetched { seq, result } => {
            if !model.flight.is_current(seq) {
                // Superseded by a newer search; drop silently.
                return;
            }
            model.pending = false;
            match result {
                Ok(payload) => {
                    let selection = match parse_response(&payload) {
                        Ok(response) => RouteSelection::new(response),
                        Err(err) => {
                            web_sys::console::debug_1(
                                &format!("[frontend] payload rejected, showing demo: {err}")
                                    .into(),
                            );
                            RouteSelection::fallback()
                        }
                    };
                    push_route_to_map(selection.displayed());
                    model.error = None;
                    model.page = Page::Result(selection);
                }
                Err(err) => {
                    // Stay on the search page; the user may retry.
                    model.error = Some(err);
                }
            }
        }
        Msg::SelectCandidate(index) => {
            if let Page::Result(selection) = &mut model.page {
                selection.select(index);
                push_route_to_map(selection.displayed());
            }
        }
        Msg::BackToSearch => {
            model.page = Page::Search;
            sync_selection_markers(&model.picker);
        }
    }
}

async fn send_search(params: SearchParams, seq: u64) -> Msg {
    web_sys::console::debug_1(
        &format!(
            "[frontend] search #{seq} query={:?} start={} end={}",
            params.query, params.start, params.end
        )
        .into(),
    );
    let result = match Request::new(api_root()).method(Method::Post).json(&params) {
        Err(err) => Err(format!("{err:?}")),
        Ok(request) => match request.fetch().await {
            Err(err) => Err(format!("{err:?}")),
            Ok(raw) => match raw.check_status() {
                Err(status_err) => Err(format!("{status_err:?}")),
                Ok(resp) => match resp.json::<Value>().await {
                    Ok(payload) => Ok(payload),
                    Err(err) => Err(format!("{err:?}")),
                },
            },
        },
    };

    Msg::SearchFetched { seq, result }
}

pub fn view(model: &Model) -> Node<Msg> {
    match &model.page {
        Page::Search => view_search(model),
        Page::Result(selection) => view_result(selection),
    }
}

fn view_search(model: &Model) -> Node<Msg> {
    div![
        C!["app-container"],
        h1!["Welcome to sanpo.ai"],
        p!["Plan your walking route and explore your surroundings."],
        div![
            C!["search-input"],
            input![
                attrs! {
                    At::Value => model.query.as_str(),
                    At::Placeholder => "Explain your walking preference",
                    At::AutoComplete => "off",
                    At::SpellCheck => "false",
                },
                input_ev(Ev::Input, Msg::QueryChanged),
            ],
        ],
        view_picker(model),
        button![
            "Search",
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::Submit
            }),
            attrs! {
                At::Disabled =>
                    bool_attr(model.pending || !ready_for_search(&model.query, &model.picker)),
            },
        ],
        if model.pending {
            p![C!["pending"], "Searching…"]
        } else {
            empty![]
        },
        if let Some(notice) = &model.notice {
            p![C!["notice"], notice]
        } else {
            empty![]
        },
        if let Some(error) = &model.error {
            p![C!["error"], format!("Failed to search: {error}")]
        } else {
            empty![]
        },
    ]
}

fn view_picker(model: &Model) -> Node<Msg> {
    let slot = |label: &str, location: Option<Location>, clear: fn() -> Msg| {
        div![
            C!["picker-slot"],
            span![C!["label"], label],
            match location {
                Some(location) => span![format_location(&location)],
                None => span![C!["unset"], "not set"],
            },
            IF!(location.is_some() => button![
                "Clear",
                ev(Ev::Click, move |event| {
                    event.prevent_default();
                    clear()
                }),
            ]),
        ]
    };

    fieldset![
        C!["location-picker"],
        legend!["Pick start and end on the map"],
        div![
            C!["pick-mode"],
            label![
                input![
                    attrs! {
                        At::Type => "radio",
                        At::Name => "pick-mode",
                        At::Checked => bool_attr(model.pick_mode == PickMode::Start),
                    },
                    ev(Ev::Change, |_| Msg::SetPickMode(PickMode::Start)),
                ],
                span!["Start"],
            ],
            label![
                input![
                    attrs! {
                        At::Type => "radio",
                        At::Name => "pick-mode",
                        At::Checked => bool_attr(model.pick_mode == PickMode::End),
                    },
                    ev(Ev::Change, |_| Msg::SetPickMode(PickMode::End)),
                ],
                span!["End"],
            ],
        ],
        slot("Start", model.picker.start(), || Msg::ClearStart),
        slot("End", model.picker.end(), || Msg::ClearEnd),
        small!["Clicks outside the searchable area are refused."],
    ]
}

fn view_result(selection: &RouteSelection) -> Node<Msg> {
    let paragraphs = selection
        .paragraphs()
        .iter()
        .map(|paragraph| p![paragraph]);

    let main = match selection.displayed() {
        None => div![C!["no-route"], p!["No route found."]],
        Some(route) => div![
            C!["route"],
            div![C!["route-title"], &route.title],
            div![C!["route-description"], &route.description],
            div![
                C!["route-stats"],
                span![format!("{:.0} m", route.distance_in_meter)],
                span![format!("{:.0} min walk", route.walking_duration_in_minutes)],
            ],
            ul![
                C!["places"],
                route.places.iter().map(|place| li![
                    strong![&place.name],
                    span![&place.description],
                ])
            ],
        ],
    };

    let candidates: Vec<Node<Msg>> = selection
        .candidates()
        .map(|(index, route)| {
            li![button![
                &route.title,
                ev(Ev::Click, move |event| {
                    event.prevent_default();
                    Msg::SelectCandidate(index)
                }),
            ]]
        })
        .collect();

    div![
        C!["app-container"],
        p![
            "Result for:",
            span![C!["query"], format!(" {}", selection.query())],
        ],
        div![C!["paragraphs"], paragraphs],
        main,
        if candidates.is_empty() {
            empty![]
        } else {
            div![
                C!["candidates"],
                div!["Other route candidates:"],
                ul![candidates],
            ]
        },
        button![
            "New search",
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::BackToSearch
            }),
        ],
    ]
}

#[wasm_bindgen(start)]
pub fn start() {
    init_map();
    App::start("app", init, update, view);
}

fn push_route_to_map(route: Option<&shared::Route>) {
    let paths = route.map(|route| route.paths.as_slice()).unwrap_or(&[]);
    if let Ok(value) = to_value(paths) {
        update_route_js(value);
    }
}

fn sync_selection_markers(picker: &LocationPicker) {
    let to_marker = |location: Option<Location>| {
        location
            .and_then(|location| to_value(&location).ok())
            .unwrap_or(JsValue::NULL)
    };
    update_selection_markers(to_marker(picker.start()), to_marker(picker.end()));
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

fn format_location(location: &Location) -> String {
    format!("{:.5} / {:.5}", location.latitude, location.longitude)
}

#[derive(Deserialize)]
struct MapClickPayload {
    lat: f64,
    lon: f64,
}
