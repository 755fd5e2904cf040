//! Subcommand implementations and the helpers they share.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use vocaquiz_core::catalog::{load_catalog, Catalog};
use vocaquiz_core::model::{QuizSetResult, WordEntry};
use vocaquiz_core::summary::SetSummary;
use vocaquiz_store::{load_config_from, VocaquizConfig};

use crate::StoreArgs;

pub mod history;
pub mod init;
pub mod play;
pub mod reset;
pub mod review;
pub mod validate;

/// Load the config file and apply the store overrides from the command line.
pub(crate) fn resolve_config(store: &StoreArgs) -> Result<VocaquizConfig> {
    let mut config = load_config_from(store.config.as_deref())?;
    if let Some(dir) = &store.store_dir {
        config.store_dir = dir.clone();
    }
    Ok(config)
}

/// Load the word list at `path`, or the bundled list when none is given.
pub(crate) fn load_words(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::bundled());
    };
    let parsed = load_catalog(path)
        .with_context(|| format!("failed to load word list {}", path.display()))?;
    if !parsed.skipped.is_empty() {
        eprintln!(
            "Warning: skipped {} malformed record(s) in {}",
            parsed.skipped.len(),
            path.display()
        );
    }
    Ok(parsed.catalog)
}

/// Reading as shown to the learner.
pub(crate) fn reading_or_na(word: &WordEntry) -> &str {
    word.reading.as_deref().unwrap_or("N/A")
}

/// Word / reading / meaning table, with remarks appended to the meaning.
pub(crate) fn word_table<'a>(words: impl IntoIterator<Item = &'a WordEntry>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Word", "Reading", "Meaning"]);
    for word in words {
        let meaning = match &word.remarks {
            Some(remarks) => format!("{}\nNote: {remarks}", word.meaning),
            None => word.meaning.clone(),
        };
        table.add_row(vec![
            Cell::new(&word.word),
            Cell::new(reading_or_na(word)),
            Cell::new(meaning),
        ]);
    }
    table
}

/// Completed-set table, in the order given (history is newest first).
pub(crate) fn history_table(history: &[QuizSetResult]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Score", "%", "Missed"]);
    for entry in history {
        let summary = SetSummary::new(entry.score, entry.total_questions);
        table.add_row(vec![
            Cell::new(entry.date.format("%Y-%m-%d %H:%M")),
            Cell::new(format!("{}/{}", entry.score, entry.total_questions)),
            Cell::new(format!("{}%", summary.percentage)),
            Cell::new(&entry.incorrect_words_in_set),
        ]);
    }
    table
}
