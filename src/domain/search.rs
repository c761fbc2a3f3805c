//! Derived search view over a collection

/// Items that can be matched against a search query by display name.
pub trait Searchable {
    fn display_name(&self) -> &str;
}

/// Normalized search query.
///
/// Whitespace-only input counts as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    folded: String,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        let raw = text.into();
        let folded = raw.trim().to_lowercase();
        Self { raw, folded }
    }

    /// The text as typed
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Case-insensitive substring match on the display name
    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        self.is_empty() || item.display_name().to_lowercase().contains(&self.folded)
    }
}

/// Filter `items` by `query`, preserving collection order.
///
/// An empty query yields every item.
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &SearchQuery) -> Vec<&'a T> {
    items.iter().filter(|item| query.matches(*item)).collect()
}
