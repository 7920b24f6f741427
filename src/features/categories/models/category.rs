use sqlx::FromRow;

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon: String,
}
