use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::listings::handlers;
use crate::features::listings::services::ListingService;

/// Create routes for the listings feature
pub fn routes(service: Arc<ListingService>) -> Router {
    Router::new()
        .route("/api/listings", get(handlers::list_listings))
        .with_state(service)
}
