//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub articles_dir: String,
    pub public_dir: String,

    // Date display format (Moment.js tokens)
    pub date_format: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub external_link: ExternalLinkConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "Anonymous".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            articles_dir: "articles".to_string(),
            public_dir: "public".to_string(),

            date_format: "MMMM Do YYYY".to_string(),

            highlight: HighlightConfig::default(),
            external_link: ExternalLinkConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Name of the bundled syntect theme used to emit highlight.css
    pub theme: String,
    pub line_numbers: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_numbers: false,
        }
    }
}

/// External link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalLinkConfig {
    pub enable: bool,
    /// Hosts that count as the site's own (kept as plain anchors)
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ExternalLinkConfig {
    fn default() -> Self {
        Self {
            enable: true,
            exclude: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.articles_dir, "articles");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.date_format, "MMMM Do YYYY");
        assert!(config.external_link.enable);
        assert!(!config.highlight.line_numbers);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Ink & Paper
author: Jo Bloggs
articles_dir: posts
date_format: "DD MMMM YYYY"
highlight:
  theme: InspiredGitHub
  line_numbers: true
external_link:
  exclude:
    - myblog.dev
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Ink & Paper");
        assert_eq!(config.articles_dir, "posts");
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert!(config.highlight.line_numbers);
        assert_eq!(config.external_link.exclude, vec!["myblog.dev"]);
        // Unlisted fields keep their defaults
        assert_eq!(config.public_dir, "public");
    }
}
