pub mod categories;
pub mod listings;
