//! Built-in theme templates using the Tera template engine
//!
//! All templates are embedded directly in the binary; there is no theme
//! directory to resolve at runtime.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all theme templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("article.html", include_str!("theme/article.html")),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    Ok(tera::Value::String(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_context() -> Context {
        let mut context = Context::new();
        context.insert(
            "site",
            &json!({
                "title": "My Blog",
                "subtitle": "",
                "description": "",
                "author": "Anonymous",
                "language": "en"
            }),
        );
        context.insert(
            "assets",
            &json!({
                "style_css": "/css/style.css",
                "highlight_css": "/css/highlight.css",
                "copy_js": "/js/copy.js"
            }),
        );
        context.insert("home_url", "/");
        context
    }

    #[test]
    fn test_render_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert(
            "categories",
            &json!([{
                "name": "Misc",
                "anchor": "misc",
                "articles": [{"title": "Hello", "date": "January 1st 2024", "url": "/hello/"}]
            }]),
        );

        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains("<h2>Misc</h2>"));
        assert!(html.contains(r#"href="/hello/""#));
        assert!(html.contains("January 1st 2024"));
    }

    #[test]
    fn test_render_article_escapes_title_but_not_body() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert(
            "article",
            &json!({
                "title": "Ampersands & You",
                "category": "Misc",
                "date": "January 1st 2024",
                "content_html": "<h1>Hi</h1>",
                "url": "http://example.com/hello/"
            }),
        );

        let html = renderer.render("article.html", &context).unwrap();
        assert!(html.contains("Ampersands &amp; You"));
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("back to home"));
    }

    #[test]
    fn test_strip_html_filter() {
        let value = tera::Value::String("<p>Hello <em>world</em></p>".to_string());
        let out = strip_html_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("Hello world".to_string()));
    }
}
