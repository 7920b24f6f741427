use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::listings::dtos::{ListListingsQuery, ListingResponseDto};
use crate::features::listings::services::ListingService;
use crate::shared::types::ErrorResponse;

/// List business listings
///
/// `categoryId` takes precedence over `search` when both are given.
#[utoipa::path(
    get,
    path = "/api/listings",
    params(ListListingsQuery),
    responses(
        (status = 200, description = "Matching listings", body = Vec<ListingResponseDto>),
        (status = 400, description = "Query string could not be parsed", body = ErrorResponse),
        (status = 500, description = "Store error or non-integer categoryId", body = ErrorResponse)
    ),
    tag = "listings"
)]
pub async fn list_listings(
    State(service): State<Arc<ListingService>>,
    AppQuery(query): AppQuery<ListListingsQuery>,
) -> Result<Json<Vec<ListingResponseDto>>> {
    let filter = query.into_filter()?;
    let listings = service.list(&filter).await?;
    Ok(Json(listings))
}
