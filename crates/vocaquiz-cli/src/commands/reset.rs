//! The `vocaquiz reset` command.

use anyhow::{Context, Result};

use vocaquiz_core::progress::{ProgressStore, INCORRECT_IDS_KEY};
use vocaquiz_core::traits::KeyValueStore;
use vocaquiz_store::FileStore;

use super::resolve_config;
use crate::StoreArgs;

pub fn execute(store: StoreArgs) -> Result<()> {
    let config = resolve_config(&store)?;
    let progress = ProgressStore::new(FileStore::new(&config.store_dir));

    let saved = progress.load();
    progress.backend().remove(INCORRECT_IDS_KEY).with_context(|| {
        format!(
            "failed to clear review progress in {}",
            config.store_dir.display()
        )
    })?;

    println!(
        "Review progress cleared ({} word(s)). History kept ({} set(s)).",
        saved.incorrect_ids.len(),
        saved.history.len()
    );
    Ok(())
}
