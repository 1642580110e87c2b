//! Create a new article

use anyhow::Result;
use std::fs;

use crate::Inkpress;

/// Create a new article file with front-matter scaffolding
pub fn run(app: &Inkpress, title: &str, category: &str) -> Result<()> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title produces an empty slug: {:?}", title);
    }

    fs::create_dir_all(&app.articles_dir)?;

    let file_path = app.articles_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let date = chrono::Local::now().format("%d-%m-%Y");
    let content = format!(
        "---\ntitle: \"{}\"\ndate: \"{}\"\ncategory: \"{}\"\n---\n\n",
        title, date, category
    );

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_article_scaffold_is_loadable() {
        let tmp = tempfile::tempdir().unwrap();
        let app = Inkpress::new(tmp.path()).unwrap();

        run(&app, "My First Post", "Misc").unwrap();

        let path = app.articles_dir.join("my-first-post.md");
        assert!(path.exists());

        let raw = fs::read_to_string(&path).unwrap();
        let (fm, _) = crate::content::ArticleFrontMatter::parse(&raw)
            .unwrap()
            .unwrap();
        let meta = fm.validate(&path).unwrap();
        assert_eq!(meta.title, "My First Post");
        assert_eq!(meta.category, "Misc");
    }

    #[test]
    fn test_new_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let app = Inkpress::new(tmp.path()).unwrap();

        run(&app, "Twice", "Misc").unwrap();
        assert!(run(&app, "Twice", "Misc").is_err());
    }
}
