use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::listings::{dtos as listings_dtos, handlers as listings_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories (public)
        categories_handlers::list_categories,
        // Listings (public)
        listings_handlers::list_listings,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            // Categories
            categories_dtos::CategoryResponseDto,
            // Listings
            listings_dtos::ListingResponseDto,
        )
    ),
    tags(
        (name = "categories", description = "Service categories"),
        (name = "listings", description = "Business listings with category and search filters"),
    ),
    info(
        title = "Business Directory API",
        version = "0.1.0",
        description = "Read-only catalog of service categories and business listings",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
