//! List site content

use anyhow::Result;

use crate::content::ArticleCatalog;
use crate::Inkpress;

/// List site content by type
pub fn run(app: &Inkpress, content_type: &str) -> Result<()> {
    let catalog = ArticleCatalog::new(&app.articles_dir);

    match content_type {
        "article" | "articles" => {
            let summaries = catalog.summaries()?;
            println!("Articles ({}):", summaries.len());
            for summary in summaries {
                println!(
                    "  {} - {} [{}]",
                    summary.date, summary.title, summary.category
                );
            }
        }
        "category" | "categories" => {
            let buckets = catalog.categorised()?;
            println!("Categories ({}):", buckets.len());
            for (category, articles) in &buckets {
                println!("  {} ({})", category, articles.len());
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: article, category",
                content_type
            );
        }
    }

    Ok(())
}
