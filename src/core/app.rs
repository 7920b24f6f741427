use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{AppConfig, SwaggerConfig};
use crate::core::database;
use crate::core::error::{AppError, Result};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::listings::{routes as listings_routes, ListingService};

/// Liveness probe; answers 503 when the store cannot be queried
async fn health_check(State(pool): State<SqlitePool>) -> Result<StatusCode> {
    database::ping(&pool)
        .await
        .map_err(|e| AppError::Unavailable(e.to_string()))?;
    Ok(StatusCode::OK)
}

async fn not_found() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}

/// Build the application router around an already-initialized store
pub fn build_router(pool: SqlitePool, app: &AppConfig, swagger: &SwaggerConfig) -> Router {
    let category_service = Arc::new(CategoryService::new(pool.clone()));
    let listing_service = Arc::new(ListingService::new(pool.clone()));

    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier {
        title: swagger.title.clone(),
        version: swagger.version.clone(),
        description: swagger.description.clone(),
    }
    .modify(&mut openapi);

    let health_route = Router::new()
        .route("/health", get(health_check))
        .with_state(pool);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(categories_routes::routes(category_service))
        .merge(listings_routes::routes(listing_service))
        .merge(health_route)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::cors_layer(&app.cors_allowed_origins)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::dtos::CategoryResponseDto;
    use crate::features::listings::dtos::ListingResponseDto;
    use crate::shared::test_helpers::{empty_catalog, memory_pool, seeded_catalog};
    use crate::shared::types::ErrorResponse;
    use axum_test::TestServer;

    fn test_app(pool: SqlitePool) -> TestServer {
        let app = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
        };
        let swagger = SwaggerConfig {
            title: "Business Directory API".to_string(),
            version: "0.1.0".to_string(),
            description: "test".to_string(),
        };
        TestServer::new(build_router(pool, &app, &swagger)).unwrap()
    }

    fn listing_names(listings: &[ListingResponseDto]) -> Vec<String> {
        listings.iter().map(|l| l.name.clone()).collect()
    }

    #[tokio::test]
    async fn test_categories_before_seeding_is_empty_array() {
        let server = test_app(empty_catalog().await);

        let response = server.get("/api/categories").await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_categories_after_seeding() {
        let server = test_app(seeded_catalog().await);

        let response = server.get("/api/categories").await;
        response.assert_status_ok();
        let categories = response.json::<Vec<CategoryResponseDto>>();
        assert_eq!(categories.len(), 8);
        assert_eq!(categories[4].id, 5);
        assert_eq!(categories[4].name, "Cybersecurity");
        assert_eq!(categories[4].icon, "Shield");
    }

    #[tokio::test]
    async fn test_listings_without_filter() {
        let server = test_app(seeded_catalog().await);

        let response = server.get("/api/listings").await;
        response.assert_status_ok();
        let listings = response.json::<Vec<ListingResponseDto>>();
        assert_eq!(listings.len(), 5);
        assert!(listings.iter().all(|l| !l.category_name.is_empty()));
    }

    #[tokio::test]
    async fn test_listings_by_category() {
        let server = test_app(seeded_catalog().await);

        let response = server
            .get("/api/listings")
            .add_query_param("categoryId", 1)
            .await;
        response.assert_status_ok();
        let listings = response.json::<Vec<ListingResponseDto>>();
        assert_eq!(listing_names(&listings), vec!["Nexgen AI Labs"]);
        assert!(listings.iter().all(|l| l.category_id == 1));
    }

    #[tokio::test]
    async fn test_listings_category_takes_precedence_over_search() {
        let server = test_app(seeded_catalog().await);

        let response = server
            .get("/api/listings")
            .add_query_param("categoryId", 3)
            .add_query_param("search", "AI")
            .await;
        response.assert_status_ok();
        let listings = response.json::<Vec<ListingResponseDto>>();
        assert_eq!(listing_names(&listings), vec!["CloudScale Solutions"]);
    }

    #[tokio::test]
    async fn test_listings_by_search() {
        let server = test_app(seeded_catalog().await);

        let response = server
            .get("/api/listings")
            .add_query_param("search", "AI")
            .await;
        response.assert_status_ok();
        let listings = response.json::<Vec<ListingResponseDto>>();
        assert_eq!(
            listing_names(&listings),
            vec!["Nexgen AI Labs", "SecureNet AI"]
        );
    }

    #[tokio::test]
    async fn test_listings_unknown_category_is_empty_array() {
        let server = test_app(seeded_catalog().await);

        let response = server
            .get("/api/listings")
            .add_query_param("categoryId", 42)
            .await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_listings_blank_parameters_mean_no_filter() {
        let server = test_app(seeded_catalog().await);

        let response = server.get("/api/listings?categoryId=&search=").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<ListingResponseDto>>().len(), 5);
    }

    #[tokio::test]
    async fn test_listings_malformed_category_id() {
        let server = test_app(seeded_catalog().await);

        let response = server
            .get("/api/listings")
            .add_query_param("categoryId", "one")
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<ErrorResponse>();
        assert!(!body.success);
        assert_eq!(body.message.as_deref(), Some("Internal server error"));
        assert!(body.errors.is_none());
    }

    #[tokio::test]
    async fn test_listings_unparsable_query_string_uses_error_body() {
        let server = test_app(seeded_catalog().await);

        let response = server.get("/api/listings?search=a&search=b").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ErrorResponse>();
        assert!(!body.success);
        assert!(body
            .message
            .as_deref()
            .is_some_and(|m| m.starts_with("Invalid query string")));
        assert!(body.errors.is_some());
    }

    #[tokio::test]
    async fn test_listings_search_injection_is_literal() {
        let server = test_app(seeded_catalog().await);

        let response = server
            .get("/api/listings")
            .add_query_param("search", "x' OR '1'='1")
            .await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));

        let response = server.get("/api/listings").await;
        assert_eq!(response.json::<Vec<ListingResponseDto>>().len(), 5);
    }

    #[tokio::test]
    async fn test_listing_json_preserves_types() {
        let server = test_app(seeded_catalog().await);

        let response = server
            .get("/api/listings")
            .add_query_param("categoryId", 1)
            .await;
        let body = response.json::<serde_json::Value>();
        let first = &body[0];
        assert_eq!(first["rating"], serde_json::json!(4.8));
        assert_eq!(first["is_verified"], serde_json::json!(true));
        assert_eq!(first["reviews_count"], serde_json::json!(120));
        assert_eq!(first["category_name"], serde_json::json!("AI Solutions"));
    }

    #[tokio::test]
    async fn test_store_failure_is_server_error() {
        // No migrations: every catalog query fails at the store
        let server = test_app(memory_pool().await);

        let response = server.get("/api/listings").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<ErrorResponse>();
        assert_eq!(body.message.as_deref(), Some("Database error occurred"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_app(empty_catalog().await);
        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_health_check_reports_unavailable_store() {
        let pool = empty_catalog().await;
        let server = test_app(pool.clone());
        pool.close().await;

        let response = server.get("/health").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body = response.json::<ErrorResponse>();
        assert!(!body.success);
        assert_eq!(body.message.as_deref(), Some("Service unavailable"));
        assert!(body.errors.is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let server = test_app(empty_catalog().await);
        server
            .get("/api/unknown")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let server = test_app(empty_catalog().await);
        let response = server.get("/api/categories").await;
        assert!(!response.header("x-request-id").is_empty());
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let server = test_app(empty_catalog().await);
        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status_ok();
        let doc = response.json::<serde_json::Value>();
        assert_eq!(doc["info"]["title"], "Business Directory API");
        assert!(doc["paths"]["/api/listings"].is_object());
    }
}
