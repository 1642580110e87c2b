//! Article models

use serde::Serialize;

use super::date::ArticleDate;

/// A catalog entry: everything a listing view needs, nothing more.
///
/// Recomputed from disk on every catalog request; never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleSummary {
    /// URL-safe identifier derived from the file name
    #[serde(rename = "id")]
    pub slug: String,
    pub title: String,
    pub date: ArticleDate,
    pub category: String,
}

/// A fully rendered article, produced once per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedArticle {
    #[serde(rename = "id")]
    pub slug: String,
    pub title: String,
    pub category: String,
    /// Display form of the publication date (e.g. "June 3rd 2024")
    pub date: String,
    pub content_html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes_slug_as_id() {
        let summary = ArticleSummary {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            date: ArticleDate::parse("01-01-2024").unwrap(),
            category: "Misc".to_string(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["id"], "hello");
        assert_eq!(json["date"], "01-01-2024");
        assert!(json.get("slug").is_none());
    }
}
