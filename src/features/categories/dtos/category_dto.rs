use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::categories::models::Category;

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    /// Client-side icon name
    #[schema(example = "Cpu")]
    pub icon: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            icon: c.icon,
        }
    }
}
