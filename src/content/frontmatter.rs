//! Front-matter parsing and validation

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::date::ArticleDate;
use super::error::ContentError;

/// Raw front-matter data as it appears in the file.
///
/// All fields are optional at this stage; [`ArticleFrontMatter::validate`]
/// enforces the required schema and reports what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArticleFrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,

    /// Additional custom fields, preserved but unused by the pipeline
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Validated article metadata, ready for sorting and display.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleMeta {
    pub title: String,
    pub date: ArticleDate,
    pub category: String,
}

impl ArticleFrontMatter {
    /// Split the leading `---`-delimited YAML block from the body.
    ///
    /// Returns `Ok(None)` when the text has no front-matter block. A present
    /// but syntactically broken block is an error, not missing metadata.
    pub fn parse(content: &str) -> Result<Option<(Self, &str)>, serde_yaml::Error> {
        let content = content.trim_start_matches('\u{feff}');
        let Some(rest) = content.strip_prefix("---") else {
            return Ok(None);
        };
        let rest = rest.trim_start_matches(['\r', '\n']);

        let Some(end) = rest.find("\n---") else {
            return Ok(None);
        };

        let yaml = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\r', '\n']);

        if yaml.trim().is_empty() {
            return Ok(Some((ArticleFrontMatter::default(), body)));
        }

        let fm: ArticleFrontMatter = serde_yaml::from_str(yaml)?;
        Ok(Some((fm, body)))
    }

    /// Enforce the required schema: `title`, `date`, `category`.
    ///
    /// Fails with an error naming the missing key and the offending file,
    /// and rejects dates that do not parse as DD-MM-YYYY.
    pub fn validate(self, path: &Path) -> Result<ArticleMeta, ContentError> {
        let title = require(self.title, "title", path)?;
        let date_raw = require(self.date, "date", path)?;
        let category = require(self.category, "category", path)?;

        let date = ArticleDate::parse(&date_raw).map_err(|_| ContentError::InvalidDate {
            value: date_raw,
            path: path.to_path_buf(),
        })?;

        Ok(ArticleMeta {
            title,
            date,
            category,
        })
    }
}

fn require(
    value: Option<String>,
    field: &'static str,
    path: &Path,
) -> Result<String, ContentError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ContentError::MissingField {
            field,
            path: path.to_path_buf(),
        }),
    }
}
