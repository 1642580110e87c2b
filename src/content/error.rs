//! Error taxonomy for the content pipeline

use std::path::PathBuf;

/// Errors produced while loading and rendering articles.
///
/// `ArticleNotFound` is the only variant that should reach a reader as a
/// 404; everything else aborts the build that triggered it.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No article file matches the requested slug.
    #[error("no article matches slug `{slug}`")]
    ArticleNotFound { slug: String },

    /// The file has no front-matter block at all.
    #[error("{}: missing front-matter block", .path.display())]
    MissingFrontMatter { path: PathBuf },

    /// A required front-matter key is absent or empty.
    #[error("{}: missing required front-matter field `{field}`", .path.display())]
    MissingField {
        field: &'static str,
        path: PathBuf,
    },

    /// The front-matter date does not parse as DD-MM-YYYY.
    #[error("{}: invalid date `{value}` (expected DD-MM-YYYY)", .path.display())]
    InvalidDate { value: String, path: PathBuf },

    /// The front-matter block is not valid YAML.
    #[error("{}: malformed front-matter: {source}", .path.display())]
    FrontMatterSyntax {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Reading the file failed for a reason other than it not existing.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Whether this error should surface as a not-found response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::ArticleNotFound { .. })
    }
}
