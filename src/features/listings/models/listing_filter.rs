/// Which subset of listings to return.
///
/// Each variant maps to exactly one prepared statement; user input only ever
/// reaches the store as a bound parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingFilter {
    All,
    ByCategory(i64),
    BySearch(String),
}

impl ListingFilter {
    /// Resolve the raw query values. A category id wins over search text and
    /// blank values count as absent.
    pub fn from_parts(category_id: Option<i64>, search: Option<&str>) -> Self {
        match (category_id, search) {
            (Some(id), _) => ListingFilter::ByCategory(id),
            (None, Some(text)) if !text.is_empty() => ListingFilter::BySearch(text.to_string()),
            _ => ListingFilter::All,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ListingFilter::All => "all",
            ListingFilter::ByCategory(_) => "category",
            ListingFilter::BySearch(_) => "search",
        }
    }
}

/// Build a LIKE pattern that matches `text` literally anywhere in a value.
/// Escapes with `\`, the statement must declare `ESCAPE '\'`.
pub fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
