//! Article catalog - enumerates, sorts, and groups articles
//!
//! The catalog is constructed with an explicit articles directory and holds
//! no other state. Every operation re-reads the directory; a single
//! malformed or unreadable article fails the whole operation.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use walkdir::WalkDir;

use super::article::ArticleSummary;
use super::error::ContentError;
use super::frontmatter::ArticleFrontMatter;

/// Enumerates available articles and builds listing views.
pub struct ArticleCatalog {
    articles_dir: PathBuf,
}

impl ArticleCatalog {
    /// Create a catalog over an articles directory.
    pub fn new<P: Into<PathBuf>>(articles_dir: P) -> Self {
        Self {
            articles_dir: articles_dir.into(),
        }
    }

    /// All article slugs: markdown file names with the extension stripped.
    ///
    /// Enumeration order carries no guarantee beyond being deterministic.
    pub fn slugs(&self) -> Result<Vec<String>, ContentError> {
        let mut slugs = Vec::new();
        for path in self.article_files()? {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                slugs.push(stem.to_string());
            }
        }
        Ok(slugs)
    }

    /// Metadata for every article, sorted ascending by date (oldest first).
    ///
    /// The sort is stable, so articles sharing a date keep enumeration order.
    pub fn summaries(&self) -> Result<Vec<ArticleSummary>, ContentError> {
        let mut summaries = Vec::new();
        for path in self.article_files()? {
            summaries.push(load_summary(&path)?);
        }
        summaries.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(summaries)
    }

    /// The sorted summaries bucketed by category.
    ///
    /// Category keys appear in first-seen order of the sorted input and
    /// compare by raw string equality; no case or whitespace normalization.
    pub fn categorised(&self) -> Result<IndexMap<String, Vec<ArticleSummary>>, ContentError> {
        let mut buckets: IndexMap<String, Vec<ArticleSummary>> = IndexMap::new();
        for summary in self.summaries()? {
            buckets
                .entry(summary.category.clone())
                .or_default()
                .push(summary);
        }
        Ok(buckets)
    }

    fn article_files(&self) -> Result<Vec<PathBuf>, ContentError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.articles_dir)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.articles_dir.clone());
                ContentError::Io {
                    path,
                    source: e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("walk error")),
                }
            })?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }
}

fn load_summary(path: &Path) -> Result<ArticleSummary, ContentError> {
    let raw = fs::read_to_string(path).map_err(|e| ContentError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let (fm, _body) = ArticleFrontMatter::parse(&raw)
        .map_err(|e| ContentError::FrontMatterSyntax {
            path: path.to_path_buf(),
            source: e,
        })?
        .ok_or_else(|| ContentError::MissingFrontMatter {
            path: path.to_path_buf(),
        })?;
    let meta = fm.validate(path)?;

    let slug = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(ArticleSummary {
        slug,
        title: meta.title,
        date: meta.date,
        category: meta.category,
    })
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_article(dir: &Path, name: &str, title: &str, date: &str, category: &str) {
        let content = format!(
            "---\ntitle: \"{title}\"\ndate: \"{date}\"\ncategory: \"{category}\"\n---\n\nbody\n"
        );
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_slugs_strip_extension_and_skip_non_markdown() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(tmp.path(), "hello.md", "Hello", "01-01-2024", "Misc");
        write_article(tmp.path(), "second-post.md", "Second", "02-01-2024", "Misc");
        fs::write(tmp.path().join("notes.txt"), "not an article").unwrap();

        let catalog = ArticleCatalog::new(tmp.path());
        let mut slugs = catalog.slugs().unwrap();
        slugs.sort();
        assert_eq!(slugs, vec!["hello", "second-post"]);

        let unique: std::collections::HashSet<_> = slugs.iter().collect();
        assert_eq!(unique.len(), slugs.len());
    }

    #[test]
    fn test_summaries_sorted_oldest_first() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(tmp.path(), "newer.md", "Newer", "01-01-2024", "Misc");
        write_article(tmp.path(), "older.md", "Older", "15-03-2023", "Misc");

        let catalog = ArticleCatalog::new(tmp.path());
        let summaries = catalog.summaries().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].slug, "older");
        assert_eq!(summaries[1].slug, "newer");
        assert!(summaries[0].date <= summaries[1].date);
    }

    #[test]
    fn test_summaries_stable_on_equal_dates() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(tmp.path(), "a.md", "A", "01-01-2024", "Misc");
        write_article(tmp.path(), "b.md", "B", "01-01-2024", "Misc");

        let catalog = ArticleCatalog::new(tmp.path());
        let summaries = catalog.summaries().unwrap();
        // Ties keep enumeration order (sorted by file name)
        assert_eq!(summaries[0].slug, "a");
        assert_eq!(summaries[1].slug, "b");
    }

    #[test]
    fn test_categorised_partitions_without_loss() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(tmp.path(), "one.md", "One", "01-01-2024", "Misc");
        write_article(tmp.path(), "two.md", "Two", "15-03-2023", "Misc");
        write_article(tmp.path(), "three.md", "Three", "10-06-2023", "Rust");

        let catalog = ArticleCatalog::new(tmp.path());
        let buckets = catalog.categorised().unwrap();

        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, 3);

        // Within-category chronological order: 15-03-2023 before 01-01-2024
        let misc = &buckets["Misc"];
        assert_eq!(misc[0].slug, "two");
        assert_eq!(misc[1].slug, "one");

        // First-seen order of the sorted input: oldest article's category first
        let keys: Vec<_> = buckets.keys().cloned().collect();
        assert_eq!(keys, vec!["Misc", "Rust"]);
    }

    #[test]
    fn test_categories_compare_literally() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(tmp.path(), "a.md", "A", "01-01-2024", "Misc");
        write_article(tmp.path(), "b.md", "B", "02-01-2024", "misc");

        let catalog = ArticleCatalog::new(tmp.path());
        let buckets = catalog.categorised().unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets["Misc"].len(), 1);
        assert_eq!(buckets["misc"].len(), 1);
    }

    #[test]
    fn test_one_bad_file_fails_the_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(tmp.path(), "good.md", "Good", "01-01-2024", "Misc");
        fs::write(
            tmp.path().join("bad.md"),
            "---\ntitle: \"No Date\"\ncategory: \"Misc\"\n---\nbody\n",
        )
        .unwrap();

        let catalog = ArticleCatalog::new(tmp.path());
        let err = catalog.summaries().unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField { field: "date", .. }
        ));
    }

    #[test]
    fn test_unparseable_date_fails_the_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(tmp.path(), "bad-date.md", "Bad", "01/01/2024", "Misc");

        let catalog = ArticleCatalog::new(tmp.path());
        let err = catalog.summaries().unwrap_err();
        match err {
            ContentError::InvalidDate { ref path, .. } => {
                assert!(path.ends_with("bad-date.md"));
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }
}
