//! The `vocaquiz history` command.

use anyhow::Result;

use vocaquiz_core::progress::ProgressStore;
use vocaquiz_store::FileStore;

use super::{history_table, resolve_config};
use crate::StoreArgs;

pub fn execute(store: StoreArgs, limit: Option<usize>, format: String) -> Result<()> {
    let config = resolve_config(&store)?;
    let progress = ProgressStore::new(FileStore::new(&config.store_dir));

    let mut history = progress.load_history();
    if let Some(limit) = limit {
        history.truncate(limit);
    }

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        _ => {
            if history.is_empty() {
                println!("No completed sets yet.");
                return Ok(());
            }

            println!("{}", history_table(&history));
            println!("{} set(s) shown.", history.len());
        }
    }

    Ok(())
}
