//! In-memory stand-in for the Metron REST API.
//!
//! # Design
//! Records live in two maps loaded from `fixtures/seed.json`: `lists` holds
//! paginated collections keyed by path (`creator`, `character/1/issue_list`),
//! `details` holds single documents whose shape differs from their list
//! entry (`issue/1`) or that have no list at all (`collection/stats`).
//! A single catch-all route resolves a path against those maps, so adding an
//! endpoint is a fixture change.
//!
//! Failures are reported the way the real service does: a JSON object with
//! a `detail` message, or field errors without one for bad writes.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{debug, info};

const SEED: &str = include_str!("../fixtures/seed.json");

/// Timestamp stamped on records created or changed through the mock.
pub const MODIFIED: &str = "2024-01-01T00:00:00Z";

/// Resources whose create payload must carry a `name`.
const NAMED: &[&str] = &[
    "arc",
    "character",
    "creator",
    "publisher",
    "series",
    "team",
    "universe",
];

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub page_size: usize,
    pub username: String,
    pub password: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            username: "metron".to_string(),
            password: "metron".to_string(),
        }
    }
}

impl MockConfig {
    /// Defaults, with the page size taken from `METRON_MOCK_PAGE_SIZE` when
    /// it parses.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(size) = std::env::var("METRON_MOCK_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|size: &usize| *size > 0)
        {
            config.page_size = size;
        }
        config
    }

    fn expected_authorization(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Store {
    pub lists: HashMap<String, Vec<Value>>,
    pub details: HashMap<String, Value>,
}

impl Store {
    pub fn seeded() -> Self {
        // The fixture is compiled in; a parse failure is a build-time bug.
        serde_json::from_str(SEED).unwrap_or_default()
    }

    fn find(&self, path: &str) -> Option<&Value> {
        if let Some(doc) = self.details.get(path) {
            return Some(doc);
        }
        let (resource, id) = split_item(path)?;
        self.lists
            .get(resource)?
            .iter()
            .find(|record| record_id(record) == Some(id))
    }
}

#[derive(Clone)]
struct AppState {
    config: Arc<MockConfig>,
    store: Arc<RwLock<Store>>,
}

/// An error response: a `detail` message or a map of field errors.
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    body: Value,
}

impl Failure {
    fn detail(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({ "detail": message }),
        }
    }

    fn not_found() -> Self {
        Self::detail(StatusCode::NOT_FOUND, "Not found.")
    }

    fn field(field: &str, message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ field: [message] }),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(RwLock::new(Store::seeded())),
    };
    Router::new()
        .route("/api/{*path}", get(read).post(create).patch(update))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockConfig::default()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, page_size = config.page_size, "mock metron listening");
    }
    axum::serve(listener, app_with(config)).await
}

fn authorize(config: &MockConfig, headers: &HeaderMap) -> Result<(), Failure> {
    let supplied = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    match supplied {
        None => Err(Failure::detail(
            StatusCode::UNAUTHORIZED,
            "Authentication credentials were not provided.",
        )),
        Some(value) if value == config.expected_authorization() => Ok(()),
        Some(_) => Err(Failure::detail(
            StatusCode::UNAUTHORIZED,
            "Invalid username/password.",
        )),
    }
}

async fn read(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
) -> Result<Response, Failure> {
    authorize(&state.config, &headers)?;
    let path = path.trim_matches('/');
    debug!(path, ?params, "GET");

    let store = state.store.read().await;
    if let Some(records) = store.lists.get(path) {
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("127.0.0.1");
        let base = format!("http://{host}/api/{path}/");
        let page = paginate(records, &params, state.config.page_size, &base)?;
        return Ok(Json(page).into_response());
    }

    store
        .find(path)
        .map(|doc| Json(doc.clone()).into_response())
        .ok_or_else(Failure::not_found)
}

async fn create(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, Failure> {
    authorize(&state.config, &headers)?;
    let resource = path.trim_matches('/').to_string();
    if split_item(&resource).is_some() {
        return Err(Failure::detail(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method \"POST\" not allowed.",
        ));
    }

    let mut store = state.store.write().await;
    let records = store.lists.entry(resource.clone()).or_default();
    let created = match body {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(insert(records, &resource, item)?);
            }
            Value::Array(out)
        }
        item => insert(records, &resource, item)?,
    };
    info!(resource = %resource, "created");
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

async fn update(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, Failure> {
    authorize(&state.config, &headers)?;
    let path = path.trim_matches('/').to_string();
    let (resource, id) = split_item(&path).ok_or_else(Failure::not_found)?;
    let Value::Object(changes) = body else {
        return Err(Failure::field("non_field_errors", "Expected an object."));
    };

    let mut store = state.store.write().await;
    let record = store
        .lists
        .get_mut(resource)
        .and_then(|records| records.iter_mut().find(|r| record_id(r) == Some(id)))
        .ok_or_else(Failure::not_found)?;
    merge(record, &changes);
    let updated = record.clone();
    if let Some(detail) = store.details.get_mut(&path) {
        merge(detail, &changes);
    }
    info!(resource, id, "updated");
    Ok(Json(updated).into_response())
}

fn insert(records: &mut Vec<Value>, resource: &str, item: Value) -> Result<Value, Failure> {
    let Value::Object(mut fields) = item else {
        return Err(Failure::field("non_field_errors", "Expected an object."));
    };
    if NAMED.contains(&resource) && !fields.get("name").is_some_and(Value::is_string) {
        return Err(Failure::field("name", "This field is required."));
    }
    let id = records.iter().filter_map(record_id).max().unwrap_or(0) + 1;
    fields.insert("id".to_string(), json!(id));
    fields.insert(
        "resource_url".to_string(),
        json!(format!("https://metron.cloud/{resource}/{id}/")),
    );
    fields.insert("modified".to_string(), json!(MODIFIED));
    let record = Value::Object(fields);
    records.push(record.clone());
    Ok(record)
}

fn merge(record: &mut Value, changes: &Map<String, Value>) {
    if let Value::Object(fields) = record {
        for (key, value) in changes {
            if key != "id" {
                fields.insert(key.clone(), value.clone());
            }
        }
        fields.insert("modified".to_string(), json!(MODIFIED));
    }
}

/// One page of `records` in the service's envelope. `next` and `previous`
/// are absolute URLs that keep every other query parameter.
pub fn paginate(
    records: &[Value],
    params: &BTreeMap<String, String>,
    page_size: usize,
    base: &str,
) -> Result<Value, Failure> {
    let filtered: Vec<&Value> = match params.get("name") {
        Some(needle) => {
            let needle = needle.to_lowercase();
            records
                .iter()
                .filter(|r| {
                    r.get("name")
                        .and_then(Value::as_str)
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
                })
                .collect()
        }
        None => records.iter().collect(),
    };

    let page: usize = match params.get("page") {
        Some(raw) => raw
            .parse()
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| Failure::detail(StatusCode::NOT_FOUND, "Invalid page."))?,
        None => 1,
    };
    let start = (page - 1) * page_size;
    if start > 0 && start >= filtered.len() {
        return Err(Failure::detail(StatusCode::NOT_FOUND, "Invalid page."));
    }
    let end = (start + page_size).min(filtered.len());
    let results: Vec<Value> = filtered[start..end].iter().map(|r| (*r).clone()).collect();

    let link = |target: usize| {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in params.iter().filter(|(k, _)| k.as_str() != "page") {
            query.append_pair(key, value);
        }
        query.append_pair("page", &target.to_string());
        Value::String(format!("{base}?{}", query.finish()))
    };

    Ok(json!({
        "count": filtered.len(),
        "next": if end < filtered.len() { link(page + 1) } else { Value::Null },
        "previous": if page > 1 { link(page - 1) } else { Value::Null },
        "results": results,
    }))
}

/// Split `creator/3` into `("creator", 3)`. Paths with more segments, or a
/// non-numeric last segment, are not item paths.
pub fn split_item(path: &str) -> Option<(&str, u64)> {
    let (resource, id) = path.rsplit_once('/')?;
    if resource.contains('/') {
        return None;
    }
    Some((resource, id.parse().ok()?))
}

fn record_id(record: &Value) -> Option<u64> {
    record.get("id").and_then(Value::as_u64)
}
