//! Shared harness: a fake EarthLens backend on a real socket, and helpers
//! for driving the front-end router in-process.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get as route_get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use earthlens::config::{Config, ReportSourceKind};
use earthlens::state::AppState;

pub const GOOD_TOKEN: &str = "good-token";
pub const GOOD_PASSWORD: &str = "Secret123";

#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
    tasks: Arc<AtomicUsize>,
}

impl Recorder {
    /// Every request seen so far, as `"METHOD /path?query"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

pub struct FakeBackend {
    pub api_url: String,
    pub recorder: Recorder,
}

async fn record(
    State(recorder): State<Recorder>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let entry = format!(
        "{} {}",
        req.method(),
        req.uri()
            .path_and_query()
            .map(|p| p.as_str())
            .unwrap_or_default()
    );
    recorder.calls.lock().unwrap().push(entry);

    let path = req.uri().path();
    let open = path == "/api/auth/login" || path == "/api/auth/register";
    let expected = format!("Bearer {}", GOOD_TOKEN);
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());
    if !open && !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Token has expired"})),
        )
            .into_response();
    }
    next.run(req).await
}

fn report_json(id: i64, title: &str, location: &str, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("Details about {}", title.to_lowercase()),
        "location": location,
        "image_url": null,
        "ai_category": category,
        "ai_advice": "Alert the county environment office.",
        "user": {"username": "wanjiru"},
        "created_at": "2025-10-12T08:30:00",
        "is_public": true
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == GOOD_PASSWORD {
        Json(json!({
            "token": GOOD_TOKEN,
            "user": {"id": 1, "username": "wanjiru", "email": body["email"]}
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid email or password"})),
        )
            .into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"details": {"email": ["Email already registered"]}})),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "access_token": GOOD_TOKEN,
            "user": {"id": 2, "username": body["username"], "email": body["email"]}
        })),
    )
        .into_response()
}

async fn list_reports() -> Json<Value> {
    Json(json!({"reports": [
        report_json(1, "Burning Tyres", "Eldoret", "Air Pollution"),
        report_json(2, "Blocked Drainage", "Mombasa", "Flooding"),
    ]}))
}

async fn my_reports() -> Json<Value> {
    let reports: Vec<Value> = (1..=8)
        .map(|i| report_json(i, &format!("My Report {}", i), "Nakuru", "Waste Management"))
        .collect();
    Json(json!({ "reports": reports }))
}

async fn create_report() -> Response {
    (
        StatusCode::CREATED,
        Json(json!({"report": report_json(99, "Oil Spill", "Kisumu", "Water Pollution")})),
    )
        .into_response()
}

async fn update_report(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    let mut report = report_json(id, "", "", "Flooding");
    for key in ["title", "description", "location", "is_public"] {
        if !body[key].is_null() {
            report[key] = body[key].clone();
        }
    }
    Json(json!({ "report": report }))
}

async fn delete_report() -> Json<Value> {
    Json(json!({"message": "Report deleted"}))
}

async fn comments(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({"comments": [{
        "id": 10,
        "content": format!("Cleanup planned for report {}", id),
        "user": {"username": "otieno"},
        "created_at": "2025-10-13T09:00:00",
        "is_edited": false
    }]}))
}

async fn add_comment(Json(body): Json<Value>) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({"comment": {"id": 11, "content": body["content"], "report_id": body["report_id"]}})),
    )
        .into_response()
}

async fn profile() -> Json<Value> {
    Json(json!({"profile": {
        "username": "wanjiru",
        "email": "wanjiru@example.com",
        "created_at": "2025-09-01T10:00:00",
        "impact": {"reports_submitted": 4, "comments_made": 3, "public_reports": 4},
        "top_category": "Flooding",
        "recent_activity": {
            "reports": [{"id": 1, "title": "Blocked Drainage", "created_at": "2025-10-12T08:30:00"}],
            "comments": []
        }
    }}))
}

async fn update_me(Json(body): Json<Value>) -> Response {
    if body["current_password"].is_string() && body["current_password"] != GOOD_PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Current password is incorrect"})),
        )
            .into_response();
    }
    Json(json!({"user": {"id": 1, "username": "wanjiru", "email": "wanjiru@example.com"}}))
        .into_response()
}

async fn green_advice() -> Json<Value> {
    Json(json!({"actions": []}))
}

async fn generate_task(State(recorder): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    let n = recorder.tasks.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({"task": {
        "title": format!("Task {}", n),
        "category": body["category"],
        "difficulty": "Easy",
        "description": "Pick up litter on your street.",
        "impact": "Cleaner drains",
        "time_estimate": "20 minutes",
        "materials_needed": ["Gloves", "Bag"]
    }}))
}

async fn analyze() -> Json<Value> {
    Json(json!({"category": "Water Pollution", "advice": "Avoid contact with the water."}))
}

/// Start the fake backend on an ephemeral port.
pub async fn spawn_backend() -> FakeBackend {
    let recorder = Recorder::default();
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/me", put(update_me))
        .route("/reports", route_get(list_reports).post(create_report))
        .route("/reports/my-reports", route_get(my_reports))
        .route("/reports/{id}", put(update_report).delete(delete_report))
        .route("/comments/report/{id}", route_get(comments))
        .route("/comments", post(add_comment))
        .route("/profile", route_get(profile))
        .route("/ai/green-advice", route_get(green_advice))
        .route("/ai/generate-task", post(generate_task))
        .route("/ai/analyze", post(analyze))
        .with_state(recorder.clone());

    let app = Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(recorder.clone(), record));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend {
        api_url: format!("http://{}/api", addr),
        recorder,
    }
}

/// An address nothing listens on.
pub async fn dead_api_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

pub fn config(api_url: &str, source: ReportSourceKind) -> Config {
    let mut config = Config::default();
    config.api.base_url = api_url.to_string();
    config.reports.source = source;
    config.green_actions.next_task_delay_ms = 50;
    config
}

pub fn app(api_url: &str) -> Router {
    app_with(config(api_url, ReportSourceKind::Api))
}

pub fn app_with(config: Config) -> Router {
    earthlens::routes::router(AppState::new(config))
}

/// The router plus a handle on its state, for checking in-memory boards.
pub fn app_and_state(api_url: &str) -> (Router, AppState) {
    let state = AppState::new(config(api_url, ReportSourceKind::Api));
    (earthlens::routes::router(state.clone()), state)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("earthlens_token={}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("earthlens_token={}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub const BOUNDARY: &str = "earthlens-test-boundary";

/// Multipart report submission with text fields and an optional file part.
pub fn post_multipart(
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file_name, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::COOKIE, format!("earthlens_token={}", token))
        .body(Body::from(body))
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(resp: &Response) -> &str {
    resp.headers()[header::LOCATION].to_str().unwrap()
}

pub fn set_cookies(resp: &Response) -> Vec<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Poll `check` until it holds or a second passes.
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..50 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    check()
}
