use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::{AppError, Result};
use crate::features::listings::models::{Listing, ListingFilter};

/// Query parameters for listing businesses
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListListingsQuery {
    /// Only listings in this category (takes precedence over `search`)
    #[param(value_type = Option<i64>, example = 1)]
    pub category_id: Option<String>,

    /// Substring of the listing name or its category name
    #[param(example = "AI")]
    pub search: Option<String>,
}

impl ListListingsQuery {
    pub fn into_filter(self) -> Result<ListingFilter> {
        let category_id = match self.category_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                AppError::Internal(format!("categoryId is not an integer: '{}'", raw))
            })?),
        };

        Ok(ListingFilter::from_parts(category_id, self.search.as_deref()))
    }
}

/// Response DTO for listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListingResponseDto {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub category_name: String,
    #[schema(example = 4.8)]
    pub rating: f64,
    pub reviews_count: i64,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub is_verified: bool,
}

impl From<Listing> for ListingResponseDto {
    fn from(l: Listing) -> Self {
        Self {
            id: l.id,
            name: l.name,
            category_id: l.category_id,
            category_name: l.category_name,
            rating: l.rating,
            reviews_count: l.reviews_count,
            address: l.address,
            phone: l.phone,
            image: l.image,
            is_verified: l.is_verified,
        }
    }
}
