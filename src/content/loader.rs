//! Single-article loader

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::config::SiteConfig;

use super::article::RenderedArticle;
use super::error::ContentError;
use super::frontmatter::ArticleFrontMatter;
use super::markdown::MarkdownRenderer;

/// Loads and fully renders one article per request.
pub struct ArticleLoader {
    articles_dir: PathBuf,
    renderer: MarkdownRenderer,
    date_format: String,
}

impl ArticleLoader {
    /// Create a loader over an articles directory.
    pub fn new<P: Into<PathBuf>>(articles_dir: P, config: &SiteConfig) -> Self {
        Self {
            articles_dir: articles_dir.into(),
            renderer: MarkdownRenderer::new(config),
            date_format: config.date_format.clone(),
        }
    }

    /// Load `<articles_dir>/<slug>.md` and render it.
    ///
    /// A missing file is `ArticleNotFound`; any other read failure keeps its
    /// own variant so callers can tell a 404 from a broken disk.
    pub fn load(&self, slug: &str) -> Result<RenderedArticle, ContentError> {
        let path = self.articles_dir.join(format!("{slug}.md"));

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ContentError::ArticleNotFound {
                    slug: slug.to_string(),
                })
            }
            Err(e) => return Err(ContentError::Io { path, source: e }),
        };

        let (fm, body) = ArticleFrontMatter::parse(&raw)
            .map_err(|e| ContentError::FrontMatterSyntax {
                path: path.clone(),
                source: e,
            })?
            .ok_or_else(|| ContentError::MissingFrontMatter { path: path.clone() })?;
        let meta = fm.validate(&path)?;

        let content_html = self.renderer.render(body);

        Ok(RenderedArticle {
            slug: slug.to_string(),
            title: meta.title,
            category: meta.category,
            date: meta.date.display(&self.date_format),
            content_html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn loader_for(dir: &Path) -> ArticleLoader {
        ArticleLoader::new(dir, &SiteConfig::default())
    }

    #[test]
    fn test_load_renders_full_article() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("hello.md"),
            "---\ntitle: \"Hello\"\ndate: \"01-01-2024\"\ncategory: \"Misc\"\n---\n\n# Hi\n",
        )
        .unwrap();

        let article = loader_for(tmp.path()).load("hello").unwrap();
        assert_eq!(article.slug, "hello");
        assert_eq!(article.title, "Hello");
        assert_eq!(article.category, "Misc");
        assert_eq!(article.date, "January 1st 2024");
        assert_eq!(article.content_html.trim_end(), "<h1>Hi</h1>");
    }

    #[test]
    fn test_load_unknown_slug_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = loader_for(tmp.path()).load("does-not-exist").unwrap_err();
        match err {
            ContentError::ArticleNotFound { ref slug } => assert_eq!(slug, "does-not-exist"),
            other => panic!("expected ArticleNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_front_matter_key_fails() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("broken.md"),
            "---\ntitle: \"Broken\"\ndate: \"01-01-2024\"\n---\nbody\n",
        )
        .unwrap();

        let err = loader_for(tmp.path()).load("broken").unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField {
                field: "category",
                ..
            }
        ));
    }

    #[test]
    fn test_load_file_without_front_matter_fails() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("plain.md"), "# Just a heading\n").unwrap();

        let err = loader_for(tmp.path()).load("plain").unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontMatter { .. }));
    }

    #[test]
    fn test_load_highlights_code_fences() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("code.md"),
            "---\ntitle: \"Code\"\ndate: \"05-05-2024\"\ncategory: \"Rust\"\n---\n\n```js\nconst x = 1;\n```\n",
        )
        .unwrap();

        let loader = loader_for(tmp.path());
        let first = loader.load("code").unwrap();
        assert!(first.content_html.contains(r#"<code class="language-js">"#));
        assert!(first.content_html.contains("<span"));

        // Same input, byte-identical output
        let second = loader.load("code").unwrap();
        assert_eq!(first.content_html, second.content_html);
    }
}
