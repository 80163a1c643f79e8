use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agency Scraper API",
        version = "0.1.0",
        description = "Batch scraping of agency directory listings by business and category."
    ),
    paths(crate::routes::scrape, crate::routes::health),
    components(schemas(
        crate::dto::QueryItem,
        crate::dto::ScrapeRequest,
        crate::dto::ResultItem,
        crate::dto::ScrapeResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "scrape", description = "Batch scraping"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds Bearer token security scheme to the OpenAPI document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("token")
                        .description(Some(
                            "Optional API key. Enforced only when AGENCY_SERVER_API_KEY is set.",
                        ))
                        .build(),
                ),
            );
        }
    }
}
