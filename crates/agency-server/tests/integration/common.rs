use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use agency_client::PlaceholderScraper;
use agency_core::AgencyScraper;
use agency_server::routes;
use agency_server::state::AppState;

pub const TEST_API_KEY: &str = "test-secret-key";

/// Router backed by the placeholder scraper, with auth disabled.
pub fn setup_test_app() -> Router {
    setup_test_app_with(PlaceholderScraper::new(), None)
}

/// Router backed by `scraper`, optionally protected by `api_key`.
pub fn setup_test_app_with<S>(scraper: S, api_key: Option<&str>) -> Router
where
    S: AgencyScraper + 'static,
{
    let state = Arc::new(AppState::new(scraper, api_key.map(str::to_string)));
    routes::router(state)
}

/// Build a `POST /scrape` request with a raw body.
pub fn scrape_request(body: impl Into<Body>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::post("/scrape").header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(body.into()).unwrap()
}

/// Send a request and decode the JSON response.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// POST a JSON body to `/scrape` without credentials.
pub async fn post_scrape(router: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    send(router, scrape_request(body.to_string(), None)).await
}
