use sqlx::FromRow;

/// Listing row joined with its category name
#[derive(Debug, Clone, FromRow)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub category_name: String,
    pub rating: f64,
    pub reviews_count: i64,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub is_verified: bool,
}
