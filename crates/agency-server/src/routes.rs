use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use agency_core::AgencyScraper;

use crate::auth::require_api_key;
use crate::dto::{HealthResponse, ResultItem, ScrapeRequest, ScrapeResponse};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
pub fn router<S>(state: Arc<AppState<S>>) -> Router
where
    S: AgencyScraper + 'static,
{
    let api = Router::new()
        .route("/scrape", post(scrape::<S>))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key::<S>,
        ));

    let public = Router::new()
        .route("/health", get(health::<S>))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/scrape",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "One result per query, in request order", body = ScrapeResponse),
        (status = 400, description = "Missing or empty queries", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
        (status = 422, description = "Body does not match the request shape", body = crate::dto::ErrorResponse),
        (status = 500, description = "Scraping failed", body = crate::dto::ErrorResponse),
    ),
    security((), ("bearer" = [])),
    tag = "scrape"
)]
pub async fn scrape<S>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<axum::Json<ScrapeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AgencyScraper + 'static,
{
    let axum::Json(body) = body?;

    let results = state.service.run(body.into()).await?;

    let response = ScrapeResponse {
        results: results.into_iter().map(ResultItem::from).collect(),
    };

    Ok(axum::Json(response))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health<S>(State(state): State<Arc<AppState<S>>>) -> impl IntoResponse
where
    S: AgencyScraper + 'static,
{
    axum::Json(HealthResponse {
        status: "healthy",
        scraper: state.service.scraper().name(),
    })
}
