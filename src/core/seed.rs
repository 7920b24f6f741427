//! Built-in catalog fixture written on first start.
//!
//! The fixture is only applied while the `categories` table is empty, so
//! restarting against an existing store leaves its rows untouched.

use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};

struct SeedCategory {
    name: &'static str,
    icon: &'static str,
}

struct SeedListing {
    name: &'static str,
    category_id: i64,
    rating: f64,
    reviews_count: i64,
    address: &'static str,
    phone: &'static str,
    image: &'static str,
    is_verified: bool,
}

const CATEGORIES: [SeedCategory; 8] = [
    SeedCategory { name: "AI Solutions", icon: "Cpu" },
    SeedCategory { name: "Data Analytics", icon: "BarChart" },
    SeedCategory { name: "Cloud Services", icon: "Cloud" },
    SeedCategory { name: "Software Dev", icon: "Code" },
    SeedCategory { name: "Cybersecurity", icon: "Shield" },
    SeedCategory { name: "Digital Marketing", icon: "Globe" },
    SeedCategory { name: "B2B Services", icon: "Briefcase" },
    SeedCategory { name: "Consulting", icon: "Users" },
];

// category_id values refer to the insertion order of CATEGORIES (1-based)
const LISTINGS: [SeedListing; 5] = [
    SeedListing {
        name: "Nexgen AI Labs",
        category_id: 1,
        rating: 4.8,
        reviews_count: 120,
        address: "Tech Park, Bangalore",
        phone: "080-1234567",
        image: "https://picsum.photos/seed/ai1/400/300",
        is_verified: true,
    },
    SeedListing {
        name: "DataFlow Systems",
        category_id: 2,
        rating: 4.5,
        reviews_count: 85,
        address: "Cyber City, Hyderabad",
        phone: "040-9876543",
        image: "https://picsum.photos/seed/data1/400/300",
        is_verified: true,
    },
    SeedListing {
        name: "CloudScale Solutions",
        category_id: 3,
        rating: 4.2,
        reviews_count: 45,
        address: "BKC, Mumbai",
        phone: "022-5550123",
        image: "https://picsum.photos/seed/cloud1/400/300",
        is_verified: false,
    },
    SeedListing {
        name: "SecureNet AI",
        category_id: 5,
        rating: 4.9,
        reviews_count: 210,
        address: "Sector 62, Noida",
        phone: "0120-4443322",
        image: "https://picsum.photos/seed/sec1/400/300",
        is_verified: true,
    },
    SeedListing {
        name: "InnovateSoft",
        category_id: 4,
        rating: 4.4,
        reviews_count: 67,
        address: "Whitefield, Bangalore",
        phone: "080-8887776",
        image: "https://picsum.photos/seed/soft1/400/300",
        is_verified: true,
    },
];

/// Result of the seed-on-empty step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded { categories: usize, listings: usize },
    Skipped,
}

/// Insert the fixture if no category exists yet. Runs in one transaction.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<SeedOutcome> {
    let mut tx = pool.begin().await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count categories: {:?}", e);
            AppError::Database(e)
        })?;

    if count > 0 {
        tracing::debug!(existing = count, "Catalog already populated, skipping seed");
        return Ok(SeedOutcome::Skipped);
    }

    for category in &CATEGORIES {
        sqlx::query("INSERT INTO categories (name, icon) VALUES (?, ?)")
            .bind(category.name)
            .bind(category.icon)
            .execute(&mut *tx)
            .await?;
    }

    for listing in &LISTINGS {
        sqlx::query(
            r#"
            INSERT INTO listings (name, category_id, rating, reviews_count, address, phone, image, is_verified)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(listing.name)
        .bind(listing.category_id)
        .bind(listing.rating)
        .bind(listing.reviews_count)
        .bind(listing.address)
        .bind(listing.phone)
        .bind(listing.image)
        .bind(listing.is_verified)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(SeedOutcome::Seeded {
        categories: CATEGORIES.len(),
        listings: LISTINGS.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::empty_catalog;

    #[tokio::test]
    async fn test_seed_populates_empty_catalog() {
        let pool = empty_catalog().await;

        let outcome = seed_if_empty(&pool).await.unwrap();
        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                categories: 8,
                listings: 5
            }
        );

        let (categories,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(categories, 8);
    }

    #[tokio::test]
    async fn test_seed_skips_when_categories_exist() {
        let pool = empty_catalog().await;
        sqlx::query("INSERT INTO categories (name, icon) VALUES ('Existing', 'Star')")
            .execute(&pool)
            .await
            .unwrap();

        let outcome = seed_if_empty(&pool).await.unwrap();
        assert_eq!(outcome, SeedOutcome::Skipped);

        let (listings,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM listings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(listings, 0);
    }

    #[test]
    fn test_fixture_listings_reference_fixture_categories() {
        for listing in &LISTINGS {
            let idx = listing.category_id as usize;
            assert!(idx >= 1 && idx <= CATEGORIES.len(), "{}", listing.name);
        }
    }
}
