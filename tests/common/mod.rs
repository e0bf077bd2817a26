#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::Response,
};
use discogs2xlsx::discogs::{DiscogsClient, RateLimitPolicy};
use serde_json::{Value, json};

pub const TOKEN: &str = "test-token";
pub const USER_AGENT: &str = "discogs2xlsx-tests/1.0";
pub const USERNAME: &str = "vinylhoarder";

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub remaining: Option<u32>,
}

impl MockResponse {
    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            remaining: Some(60),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: json!({ "message": "mock error" }).to_string(),
            remaining: Some(60),
        }
    }

    pub fn raw(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            remaining: Some(60),
        }
    }

    pub fn remaining(mut self, remaining: Option<u32>) -> Self {
        self.remaining = remaining;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
}

impl RecordedRequest {
    pub fn page(&self) -> Option<u32> {
        self.query.get("page").and_then(|p| p.parse().ok())
    }
}

#[derive(Default)]
struct MockState {
    routes: HashMap<String, VecDeque<MockResponse>>,
    requests: Vec<RecordedRequest>,
}

/// A local stand-in for the Discogs API.
///
/// Responses are queued per route. A route is a path, optionally with a
/// page (`"/users/x/wants?page=2"`); a paged route takes precedence over
/// the bare path. The last queued response of a route is repeated.
#[derive(Clone)]
pub struct MockDiscogs {
    pub base_url: String,
    state: Arc<Mutex<MockState>>,
}

impl MockDiscogs {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState::default()));
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn respond(&self, route: &str, response: MockResponse) -> &Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .entry(route.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn respond_json(&self, route: &str, body: Value) -> &Self {
        self.respond(route, MockResponse::json(body))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn client(&self) -> DiscogsClient {
        self.client_with_policy(test_policy())
    }

    pub fn client_with_policy(&self, policy: RateLimitPolicy) -> DiscogsClient {
        DiscogsClient::with_options(TOKEN, &self.base_url, USER_AGENT, policy)
            .expect("build test client")
    }
}

async fn handle(
    State(state): State<Arc<Mutex<MockState>>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let query: HashMap<String, String> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let path = uri.path().to_string();

    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        path: path.clone(),
        query: query.clone(),
        accept: header_value(&headers, header::ACCEPT),
        user_agent: header_value(&headers, header::USER_AGENT),
    });

    let route = query
        .get("page")
        .map(|page| format!("{}?page={}", path, page))
        .filter(|route| state.routes.contains_key(route))
        .unwrap_or(path);

    let response = match state.routes.get_mut(&route) {
        Some(queue) if queue.len() > 1 => queue.pop_front(),
        Some(queue) => queue.front().cloned(),
        None => None,
    }
    .unwrap_or_else(|| MockResponse::status(404));

    let mut builder = Response::builder()
        .status(StatusCode::from_u16(response.status).unwrap())
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(remaining) = response.remaining {
        builder = builder.header("X-Discogs-Ratelimit-Remaining", remaining.to_string());
    }
    builder.body(Body::from(response.body)).unwrap()
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

/// No waiting for a new window, only a short floor sleep.
pub fn test_policy() -> RateLimitPolicy {
    RateLimitPolicy {
        window: Duration::ZERO,
        floor: Duration::from_millis(5),
        ..RateLimitPolicy::default()
    }
}

// Routes

pub fn collection_folder_path() -> String {
    format!("/users/{}/collection/folders/0", USERNAME)
}

pub fn collection_releases_path() -> String {
    format!("/users/{}/collection/folders/0/releases", USERNAME)
}

pub fn collection_page_route(page: u32) -> String {
    format!("{}?page={}", collection_releases_path(), page)
}

pub fn wantlist_path() -> String {
    format!("/users/{}/wants", USERNAME)
}

pub fn wantlist_page_route(page: u32) -> String {
    format!("{}?page={}", wantlist_path(), page)
}

// Payloads

pub fn identity() -> Value {
    json!({
        "id": 1234567,
        "username": USERNAME,
        "resource_url": format!("https://api.discogs.com/users/{}", USERNAME),
        "consumer_name": "discogs2xlsx"
    })
}

pub fn collection_folder(count: u64) -> Value {
    json!({
        "id": 0,
        "name": "All",
        "count": count,
        "resource_url": format!("https://api.discogs.com/users/{}/collection/folders/0", USERNAME)
    })
}

pub fn collection_page(releases: Vec<Value>) -> Value {
    json!({
        "pagination": { "page": 1, "pages": 1, "per_page": 100, "items": releases.len() },
        "releases": releases
    })
}

pub fn wantlist_page(pages: u32, wants: Vec<Value>) -> Value {
    json!({
        "pagination": { "page": 1, "pages": pages, "per_page": 100, "items": wants.len() },
        "wants": wants
    })
}

pub fn release(
    id: u64,
    instance_id: Option<u64>,
    artist: &str,
    title: &str,
    year: i32,
    formats: Value,
    catno: &str,
    styles: &[&str],
) -> Value {
    let mut release = json!({
        "id": id,
        "date_added": "2020-01-01T00:00:00-08:00",
        "rating": 0,
        "basic_information": {
            "id": id,
            "title": title,
            "year": year,
            "resource_url": format!("https://api.discogs.com/releases/{}", id),
            "artists": [{ "name": artist, "anv": "", "join": "", "role": "", "tracks": "", "id": 1 }],
            "formats": formats,
            "labels": [{ "name": "Label", "catno": catno, "entity_type": "1", "id": 2 }],
            "styles": styles,
            "genres": ["Rock"]
        }
    });
    if let Some(instance_id) = instance_id {
        release["instance_id"] = json!(instance_id);
    }
    release
}

pub fn dead_can_dance() -> Value {
    release(
        12736525,
        Some(382774613),
        "Dead Can Dance",
        "Dionysus",
        2018,
        json!([{ "name": "Vinyl", "qty": "1", "descriptions": ["LP", "Album"] }]),
        "PIASR440LP",
        &["Modern Classical", "Downtempo", "New Age"],
    )
}

pub fn dead_can_dance_details() -> Value {
    json!({
        "id": 12736525,
        "community": { "have": 2533, "want": 323, "rating": { "count": 200, "average": 4.5 } },
        "uri": "https://www.discogs.com/Dead-Can-Dance-Dionysus/release/12736525",
        "notes": "℗ 2018 Dead Can Dance\n© 2018 Dead Can Dance.",
        "num_for_sale": 153,
        "lowest_price": 14.46
    })
}

pub fn the_obsessed() -> Value {
    release(
        3099920,
        None,
        "The Obsessed",
        "Lunar Womb",
        2006,
        json!([{ "name": "Vinyl", "qty": "1", "descriptions": ["LP", "Album"] }]),
        "spin:004",
        &["Stoner Rock", "Doom Metal", "Heavy Metal"],
    )
}

pub fn the_obsessed_details() -> Value {
    json!({
        "id": 3099920,
        "community": { "have": 73, "want": 120 },
        "uri": "https://www.discogs.com/The-Obsessed-Lunar-Womb/release/3099920",
        "notes": null,
        "num_for_sale": 1,
        "lowest_price": 60
    })
}

pub fn price_suggestions(values: [f64; 8]) -> Value {
    let grades = [
        "Mint (M)",
        "Near Mint (NM or M-)",
        "Very Good Plus (VG+)",
        "Very Good (VG)",
        "Good Plus (G+)",
        "Good (G)",
        "Fair (F)",
        "Poor (P)",
    ];
    let mut suggestions = serde_json::Map::new();
    for (grade, value) in grades.iter().zip(values) {
        suggestions.insert(
            grade.to_string(),
            json!({ "currency": "EUR", "value": value }),
        );
    }
    Value::Object(suggestions)
}

pub fn dead_can_dance_prices() -> Value {
    price_suggestions([24.43, 21.86, 16.71, 11.57, 6.43, 3.86, 2.58, 1.29])
}

pub fn the_obsessed_prices() -> Value {
    price_suggestions([27.31, 24.44, 18.69, 12.94, 7.19, 4.31, 2.87, 1.44])
}
