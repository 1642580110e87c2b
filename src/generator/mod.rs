//! Generator module - writes the static site from the article catalog
//!
//! One page per article slug plus the categorised index, a JSON summary
//! index, and the theme assets. Every run is a full rebuild.

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tera::Context;

use crate::content::{theme_css, ArticleCatalog, ArticleLoader};
use crate::helpers::url::{full_url_for, url_for};
use crate::templates::TemplateRenderer;
use crate::Inkpress;

const STYLE_CSS: &str = include_str!("assets/style.css");
const COPY_JS: &str = include_str!("assets/copy.js");

/// Static site generator using the embedded templates
pub struct Generator {
    app: Inkpress,
    renderer: TemplateRenderer,
}

#[derive(Serialize)]
struct SiteData {
    title: String,
    subtitle: String,
    description: String,
    author: String,
    language: String,
}

#[derive(Serialize)]
struct AssetData {
    style_css: String,
    highlight_css: String,
    copy_js: String,
}

#[derive(Serialize)]
struct CategoryGroup {
    name: String,
    anchor: String,
    articles: Vec<IndexEntry>,
}

#[derive(Serialize)]
struct IndexEntry {
    title: String,
    date: String,
    url: String,
}

#[derive(Serialize)]
struct ArticlePageData {
    title: String,
    category: String,
    date: String,
    content_html: String,
    url: String,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Inkpress) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            app: app.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<()> {
        let config = &self.app.config;
        let catalog = ArticleCatalog::new(&self.app.articles_dir);
        let loader = ArticleLoader::new(&self.app.articles_dir, config);

        let summaries = catalog.summaries()?;
        let categorised = catalog.categorised()?;
        tracing::info!(
            "Loaded {} articles in {} categories",
            summaries.len(),
            categorised.len()
        );

        fs::create_dir_all(&self.app.public_dir)?;
        self.write_assets()?;

        let mut base = Context::new();
        base.insert(
            "site",
            &SiteData {
                title: config.title.clone(),
                subtitle: config.subtitle.clone(),
                description: config.description.clone(),
                author: config.author.clone(),
                language: config.language.clone(),
            },
        );
        base.insert(
            "assets",
            &AssetData {
                style_css: url_for(config, "css/style.css"),
                highlight_css: url_for(config, "css/highlight.css"),
                copy_js: url_for(config, "js/copy.js"),
            },
        );
        base.insert("home_url", &url_for(config, ""));

        // Index page: categorised listing
        let groups: Vec<CategoryGroup> = categorised
            .iter()
            .map(|(name, articles)| CategoryGroup {
                name: name.clone(),
                anchor: slug::slugify(name),
                articles: articles
                    .iter()
                    .map(|a| IndexEntry {
                        title: a.title.clone(),
                        date: a.date.display(&config.date_format),
                        url: url_for(config, &format!("{}/", a.slug)),
                    })
                    .collect(),
            })
            .collect();

        let mut context = base.clone();
        context.insert("categories", &groups);
        let html = self.renderer.render("index.html", &context)?;
        self.write_page(&self.app.public_dir.join("index.html"), &html)?;

        // One page per slug
        for summary in &summaries {
            let article = loader.load(&summary.slug)?;
            let mut context = base.clone();
            context.insert(
                "article",
                &ArticlePageData {
                    title: article.title.clone(),
                    category: article.category.clone(),
                    date: article.date.clone(),
                    content_html: article.content_html.clone(),
                    url: full_url_for(config, &format!("{}/", article.slug)),
                },
            );
            let html = self.renderer.render("article.html", &context)?;
            let out = self.app.public_dir.join(&summary.slug).join("index.html");
            self.write_page(&out, &html)?;
        }

        // Summary index for client-side consumption
        let json = serde_json::to_string_pretty(&summaries)?;
        fs::write(self.app.public_dir.join("articles.json"), json)?;

        Ok(())
    }

    fn write_assets(&self) -> Result<()> {
        let css_dir = self.app.public_dir.join("css");
        let js_dir = self.app.public_dir.join("js");
        fs::create_dir_all(&css_dir)?;
        fs::create_dir_all(&js_dir)?;

        fs::write(css_dir.join("style.css"), STYLE_CSS)?;
        fs::write(js_dir.join("copy.js"), COPY_JS)?;

        let highlight = theme_css(&self.app.config.highlight.theme)?;
        fs::write(css_dir.join("highlight.css"), highlight)?;

        Ok(())
    }

    fn write_page(&self, path: &Path, html: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)?;
        tracing::debug!("Wrote {:?}", path);
        Ok(())
    }
}
