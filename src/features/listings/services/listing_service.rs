use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::listings::dtos::ListingResponseDto;
use crate::features::listings::models::{contains_pattern, Listing, ListingFilter};

// Inner join: listings whose category_id does not resolve are never returned.
macro_rules! listing_select {
    () => {
        r#"
        SELECT l.id, l.name, l.category_id, c.name AS category_name,
               COALESCE(l.rating, 0.0) AS rating,
               COALESCE(l.reviews_count, 0) AS reviews_count,
               l.address, l.phone, l.image,
               COALESCE(l.is_verified, 0) AS is_verified
        FROM listings l
        JOIN categories c ON l.category_id = c.id
        "#
    };
}

const LIST_ALL: &str = concat!(listing_select!(), "ORDER BY l.id");

const LIST_BY_CATEGORY: &str = concat!(
    listing_select!(),
    "WHERE l.category_id = ? ORDER BY l.id"
);

const LIST_BY_SEARCH: &str = concat!(
    listing_select!(),
    r"WHERE l.name LIKE ? ESCAPE '\' OR c.name LIKE ? ESCAPE '\' ORDER BY l.id"
);

/// Service for listing queries
pub struct ListingService {
    pool: SqlitePool,
}

impl ListingService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List listings matching the filter, joined with their category name
    pub async fn list(&self, filter: &ListingFilter) -> Result<Vec<ListingResponseDto>> {
        let listings = match filter {
            ListingFilter::All => {
                sqlx::query_as::<_, Listing>(LIST_ALL)
                    .fetch_all(&self.pool)
                    .await
            }
            ListingFilter::ByCategory(category_id) => {
                sqlx::query_as::<_, Listing>(LIST_BY_CATEGORY)
                    .bind(category_id)
                    .fetch_all(&self.pool)
                    .await
            }
            ListingFilter::BySearch(text) => {
                let pattern = contains_pattern(text);
                sqlx::query_as::<_, Listing>(LIST_BY_SEARCH)
                    .bind(&pattern)
                    .bind(&pattern)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to list listings ({}): {:?}", filter.kind(), e);
            AppError::Database(e)
        })?;

        tracing::debug!(
            filter = filter.kind(),
            count = listings.len(),
            "Listed listings"
        );

        Ok(listings.into_iter().map(Into::into).collect())
    }
}
