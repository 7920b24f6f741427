mod listing;
mod listing_filter;

pub use listing::Listing;
pub use listing_filter::{contains_pattern, ListingFilter};
