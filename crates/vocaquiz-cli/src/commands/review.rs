//! The `vocaquiz review` command.

use std::path::PathBuf;

use anyhow::Result;

use vocaquiz_core::progress::ProgressStore;
use vocaquiz_store::FileStore;

use super::{load_words, resolve_config, word_table};
use crate::StoreArgs;

pub fn execute(store: StoreArgs, catalog_path: Option<PathBuf>) -> Result<()> {
    let mut config = resolve_config(&store)?;
    if let Some(path) = catalog_path {
        config.catalog = Some(path);
    }

    let catalog = load_words(config.catalog.as_deref())?;
    let ids = ProgressStore::new(FileStore::new(&config.store_dir)).load_incorrect_ids();

    let words: Vec<_> = catalog
        .entries()
        .iter()
        .filter(|w| ids.contains(&w.id))
        .collect();

    if words.is_empty() {
        println!("Nothing to review.");
        return Ok(());
    }

    println!("{}", word_table(words.iter().copied()));
    println!("{} word(s) to review.", words.len());
    Ok(())
}
