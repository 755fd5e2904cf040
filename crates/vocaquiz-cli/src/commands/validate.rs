//! The `vocaquiz validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use vocaquiz_core::catalog::{load_catalog, validate_catalog};

pub fn execute(catalog_path: PathBuf, options_per_question: usize) -> Result<()> {
    let parsed = load_catalog(&catalog_path)
        .with_context(|| format!("failed to load word list {}", catalog_path.display()))?;

    println!(
        "Word list: {} ({} words)",
        catalog_path.display(),
        parsed.catalog.len()
    );

    let warnings = validate_catalog(&parsed.catalog, options_per_question);
    for w in parsed.skipped.iter().chain(&warnings) {
        let prefix = w
            .position
            .map(|pos| format!("  [{pos}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    let total_warnings = parsed.skipped.len() + warnings.len();
    if total_warnings == 0 {
        println!("Word list valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
