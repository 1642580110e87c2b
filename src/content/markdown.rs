//! Markdown rendering
//!
//! The body of an article runs through a fixed, ordered chain: an
//! extended-syntax parse into a stream of events, then each [`MarkdownStage`]
//! in turn, then HTML serialization. Stages transform the event stream and
//! nothing else, so each one can be tested in isolation. Serialization is
//! always last and the structural parse always first.

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::SiteConfig;

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

/// One step of the markdown transformation chain.
///
/// A stage maps the event stream to a new event stream. Stages must be
/// deterministic: no clocks, no randomness, no ambient state.
pub trait MarkdownStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn transform<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>>;
}

/// Markdown renderer with a fixed stage chain.
pub struct MarkdownRenderer {
    stages: Vec<Box<dyn MarkdownStage>>,
}

impl MarkdownRenderer {
    /// Build the default chain for a site: syntax highlighting, then
    /// external-link decoration when enabled.
    pub fn new(config: &SiteConfig) -> Self {
        let mut stages: Vec<Box<dyn MarkdownStage>> = vec![Box::new(SyntaxHighlight::new(
            config.highlight.line_numbers,
        ))];
        if config.external_link.enable {
            stages.push(Box::new(ExternalLinks::new(
                config.external_link.exclude.clone(),
            )));
        }
        Self { stages }
    }

    /// Build a renderer with an explicit stage chain.
    pub fn with_stages(stages: Vec<Box<dyn MarkdownStage>>) -> Self {
        Self { stages }
    }

    /// Render markdown to an HTML string.
    pub fn render(&self, markdown: &str) -> String {
        // GFM-superset parse; front-matter is stripped before we get here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;

        let mut events: Vec<Event> = Parser::new_ext(markdown, options).collect();
        for stage in &self.stages {
            tracing::trace!("applying markdown stage: {}", stage.name());
            events = stage.transform(events);
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Replaces fenced code blocks with class-annotated token markup.
///
/// The fence language hint selects the grammar; unknown hints and bare
/// fences fall back to plain text. Everything outside code blocks passes
/// through untouched.
pub struct SyntaxHighlight {
    line_numbers: bool,
}

impl SyntaxHighlight {
    pub fn new(line_numbers: bool) -> Self {
        Self { line_numbers }
    }

    fn render_block(&self, code: &str, lang: Option<&str>) -> String {
        let token = lang.unwrap_or("text");

        let syntax = SYNTAX_SET
            .find_syntax_by_token(token)
            .or_else(|| SYNTAX_SET.find_syntax_by_extension(token))
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let inner = match classed_html(code, syntax) {
            Ok(highlighted) => highlighted,
            Err(e) => {
                tracing::warn!("highlighting failed for `{}` block: {}", token, e);
                html_escape(code)
            }
        };

        if self.line_numbers {
            self.with_gutter(token, code, &inner)
        } else {
            format!(
                r#"<figure class="code-block highlight {token}"><pre><code class="language-{token}">{inner}</code></pre></figure>"#
            )
        }
    }

    fn with_gutter(&self, token: &str, code: &str, inner: &str) -> String {
        let count = code.lines().count().max(1);
        let gutter = (1..=count)
            .map(|i| format!(r#"<span class="line-number">{i}</span>"#))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="code-block highlight {token}"><table><tr><td class="gutter"><pre>{gutter}</pre></td><td class="code"><pre><code class="language-{token}">{inner}</code></pre></td></tr></table></figure>"#
        )
    }
}

impl MarkdownStage for SyntaxHighlight {
    fn name(&self) -> &'static str {
        "syntax-highlight"
    }

    fn transform<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        // (language hint, accumulated text) while inside a code block
        let mut block: Option<(Option<String>, String)> = None;

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .filter(|t| !t.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = block.take() {
                        let rendered = self.render_block(&code, lang.as_deref());
                        out.push(Event::Html(CowStr::from(rendered)));
                    }
                }
                Event::Text(text) if block.is_some() => {
                    if let Some((_, code)) = block.as_mut() {
                        code.push_str(&text);
                    }
                }
                other => out.push(other),
            }
        }

        out
    }
}

/// Adds `target="_blank" rel="noopener"` to absolute http(s) links.
///
/// Hosts in the exclude list (the site's own domains) keep plain anchors.
pub struct ExternalLinks {
    exclude: Vec<String>,
}

impl ExternalLinks {
    pub fn new(exclude: Vec<String>) -> Self {
        Self { exclude }
    }

    fn is_external(&self, url: &str) -> bool {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return false;
        }
        match host_of(url) {
            Some(host) => !self.exclude.iter().any(|h| h == host),
            None => false,
        }
    }
}

impl MarkdownStage for ExternalLinks {
    fn name(&self) -> &'static str {
        "external-links"
    }

    fn transform<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        let mut rewriting = false;

        for event in events {
            match event {
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    if self.is_external(&dest_url) {
                        let mut anchor = format!(r#"<a href="{}""#, html_escape(&dest_url));
                        if !title.is_empty() {
                            anchor.push_str(&format!(r#" title="{}""#, html_escape(&title)));
                        }
                        anchor.push_str(r#" target="_blank" rel="noopener">"#);
                        out.push(Event::Html(CowStr::from(anchor)));
                        rewriting = true;
                    } else {
                        out.push(Event::Start(Tag::Link {
                            link_type,
                            dest_url,
                            title,
                            id,
                        }));
                    }
                }
                Event::End(TagEnd::Link) if rewriting => {
                    out.push(Event::Html(CowStr::from("</a>")));
                    rewriting = false;
                }
                other => out.push(other),
            }
        }

        out
    }
}

/// CSS for the configured highlight theme, for the generator to ship as an
/// asset. Falls back to the first bundled theme if the name is unknown.
pub fn theme_css(theme_name: &str) -> Result<String, syntect::Error> {
    let theme = THEME_SET.themes.get(theme_name).unwrap_or_else(|| {
        THEME_SET
            .themes
            .values()
            .next()
            .expect("no themes available")
    });
    css_for_theme_with_class_style(theme, ClassStyle::Spaced)
}

fn classed_html(code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn host_of(url: &str) -> Option<&str> {
    url.split("://").nth(1)?.split('/').next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::new(&SiteConfig::default())
    }

    #[test]
    fn test_render_heading() {
        let html = renderer().render("# Hi");
        assert_eq!(html.trim_end(), "<h1>Hi</h1>");
    }

    #[test]
    fn test_render_basic_markdown() {
        let html = renderer().render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_table() {
        let html = renderer().render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_render_strikethrough() {
        let html = renderer().render("~~gone~~");
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_code_block_has_token_markup() {
        let html = renderer().render("```js\nconst x = 1;\n```");
        assert!(html.contains(r#"<figure class="code-block highlight js">"#));
        assert!(html.contains(r#"<code class="language-js">"#));
        assert!(html.contains("<span"));
    }

    #[test]
    fn test_bare_fence_falls_back_to_plain_text() {
        let html = renderer().render("```\nplain text\n```");
        assert!(html.contains(r#"<code class="language-text">"#));
        assert!(html.contains("plain text"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let input = "# Title\n\n```js\nconst x = 1;\n```\n\nprose";
        let r = renderer();
        assert_eq!(r.render(input), r.render(input));
    }

    #[test]
    fn test_plain_prose_is_idempotent() {
        let r = renderer();
        let once = r.render("Hello *world*, plain prose here.");
        let twice = r.render(&once);
        assert_eq!(once.trim_end(), twice.trim_end());
    }

    #[test]
    fn test_external_link_opens_in_new_tab() {
        let html = renderer().render("[site](https://example.com/page)");
        assert!(html.contains(r#"href="https://example.com/page""#));
        assert!(html.contains(r#"target="_blank" rel="noopener""#));
    }

    #[test]
    fn test_relative_link_untouched() {
        let html = renderer().render("[other](/other-article/)");
        assert!(html.contains(r#"<a href="/other-article/">other</a>"#));
        assert!(!html.contains("target="));
    }

    #[test]
    fn test_excluded_host_keeps_plain_anchor() {
        let stage = ExternalLinks::new(vec!["example.com".to_string()]);
        assert!(!stage.is_external("https://example.com/post"));
        assert!(stage.is_external("https://elsewhere.org/"));
        assert!(!stage.is_external("/relative/"));
    }

    #[test]
    fn test_empty_stage_chain_is_plain_conversion() {
        let r = MarkdownRenderer::with_stages(Vec::new());
        let html = r.render("```js\nconst x = 1;\n```");
        // No highlight stage: pulldown-cmark's own code block markup
        assert!(html.contains(r#"<pre><code class="language-js">"#));
        assert!(!html.contains("<figure"));
    }

    #[test]
    fn test_theme_css_known_and_unknown_theme() {
        let css = theme_css("base16-ocean.dark").unwrap();
        assert!(!css.is_empty());
        // Unknown names fall back rather than fail
        assert!(theme_css("no-such-theme").is_ok());
    }
}
