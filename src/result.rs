//! Search result types.

use serde::{Deserialize, Serialize};

/// A single text search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub href: String,
    /// Result description/snippet.
    pub body: String,
}

impl SearchResult {
    /// Creates a new search result.
    pub fn new(title: impl Into<String>, href: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_new() {
        let result = SearchResult::new("Example", "https://example.com", "Snippet");
        assert_eq!(result.title, "Example");
        assert_eq!(result.href, "https://example.com");
        assert_eq!(result.body, "Snippet");
    }

    #[test]
    fn test_search_result_serialization() {
        let result = SearchResult::new("T", "https://example.com", "B");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"title":"T","href":"https://example.com","body":"B"}"#
        );
    }
}
