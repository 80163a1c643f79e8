use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use agency_core::AppError;
use agency_core::testutil::FailingScraper;

use crate::integration::common::{
    TEST_API_KEY, post_scrape, scrape_request, send, setup_test_app, setup_test_app_with,
};

#[tokio::test]
async fn single_query_returns_placeholder_result() {
    let (status, json) = post_scrape(
        setup_test_app(),
        json!({"queries": [{"business": "Acme", "category": "Plumbing"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"results": [{
            "business": "Acme",
            "category": "Plumbing",
            "max_pages": 1,
            "max_items_per_page": 3,
            "data": "scraped data here"
        }]})
    );
}

#[tokio::test]
async fn results_preserve_query_order() {
    let (status, json) = post_scrape(
        setup_test_app(),
        json!({"queries": [
            {"business": "Acme", "category": "Plumbing"},
            {"business": "Globex", "category": "Marketing"},
            {"business": "Initech", "category": "Software"},
            {"business": "Acme", "category": "Roofing"},
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    let pairs: Vec<(&str, &str)> = results
        .iter()
        .map(|r| {
            (
                r["business"].as_str().unwrap(),
                r["category"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        [
            ("Acme", "Plumbing"),
            ("Globex", "Marketing"),
            ("Initech", "Software"),
            ("Acme", "Roofing"),
        ]
    );
}

#[tokio::test]
async fn explicit_limits_are_echoed() {
    let (status, json) = post_scrape(
        setup_test_app(),
        json!({
            "queries": [
                {"business": "Acme", "category": "Plumbing"},
                {"business": "Globex", "category": "Marketing"},
            ],
            "max_pages": 2,
            "max_items_per_page": 5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    for result in json["results"].as_array().unwrap() {
        assert_eq!(result["max_pages"], 2);
        assert_eq!(result["max_items_per_page"], 5);
    }
}

#[tokio::test]
async fn null_limits_fall_back_to_defaults() {
    let (status, json) = post_scrape(
        setup_test_app(),
        json!({
            "queries": [{"business": "Acme", "category": "Plumbing"}],
            "max_pages": null,
            "max_items_per_page": null
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"][0]["max_pages"], 1);
    assert_eq!(json["results"][0]["max_items_per_page"], 3);
}

#[tokio::test]
async fn empty_queries_returns_400() {
    let (status, json) = post_scrape(setup_test_app(), json!({"queries": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"detail": "Missing or invalid queries array"}));
}

#[tokio::test]
async fn missing_queries_returns_400() {
    let (status, json) = post_scrape(setup_test_app(), json!({"max_pages": 2})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "Missing or invalid queries array");
}

#[tokio::test]
async fn zero_and_negative_limits_are_echoed() {
    let (status, json) = post_scrape(
        setup_test_app(),
        json!({
            "queries": [{"business": "Acme", "category": "Plumbing"}],
            "max_pages": 0,
            "max_items_per_page": -1
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"][0]["max_pages"], 0);
    assert_eq!(json["results"][0]["max_items_per_page"], -1);
    assert_eq!(json["results"][0]["data"], "scraped data here");
}

#[tokio::test]
async fn scraper_failure_returns_500_with_message() {
    let app = setup_test_app_with(
        FailingScraper::new(AppError::Generic("chrome crashed".into())),
        None,
    );

    let (status, json) = post_scrape(
        app,
        json!({"queries": [{"business": "Acme", "category": "Plumbing"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"detail": "chrome crashed"}));
    assert!(json.get("results").is_none());
}

#[tokio::test]
async fn blocked_scraper_returns_500() {
    let app = setup_test_app_with(
        FailingScraper::new(AppError::Blocked("captcha challenge".into())),
        None,
    );

    let (status, json) = post_scrape(
        app,
        json!({"queries": [{"business": "Acme", "category": "Plumbing"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["detail"], "Blocked by target site: captcha challenge");
}

#[tokio::test]
async fn missing_category_returns_422() {
    let (status, json) = post_scrape(
        setup_test_app(),
        json!({"queries": [{"business": "Acme"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn wrong_field_type_returns_422() {
    let (status, json) = post_scrape(
        setup_test_app(),
        json!({"queries": [{"business": 5, "category": "Plumbing"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn fractional_limit_returns_422() {
    let (status, _) = post_scrape(
        setup_test_app(),
        json!({
            "queries": [{"business": "Acme", "category": "Plumbing"}],
            "max_pages": 1.5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let (status, json) = send(setup_test_app(), scrape_request("{not json", None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn health_returns_200() {
    let (status, json) = send(
        setup_test_app(),
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["scraper"], "placeholder");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, json) = send(
        setup_test_app(),
        Request::get("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/scrape"]["post"].is_object());
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

fn acme_body() -> String {
    json!({"queries": [{"business": "Acme", "category": "Plumbing"}]}).to_string()
}

fn protected_app() -> axum::Router {
    setup_test_app_with(agency_client::PlaceholderScraper::new(), Some(TEST_API_KEY))
}

#[tokio::test]
async fn unauthenticated_request_returns_401() {
    let (status, json) = send(protected_app(), scrape_request(acme_body(), None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn wrong_api_key_returns_401() {
    let (status, _) = send(
        protected_app(),
        scrape_request(acme_body(), Some("wrong-key")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn correct_api_key_is_accepted() {
    let (status, json) = send(
        protected_app(),
        scrape_request(acme_body(), Some(TEST_API_KEY)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn health_is_public_when_auth_enabled() {
    let (status, _) = send(
        protected_app(),
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}
