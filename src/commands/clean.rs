//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Inkpress;

/// Clean the public directory
pub fn run(app: &Inkpress) -> Result<()> {
    if app.public_dir.exists() {
        fs::remove_dir_all(&app.public_dir)?;
        tracing::info!("Deleted: {:?}", app.public_dir);
    }

    Ok(())
}
