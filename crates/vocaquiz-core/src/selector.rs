//! Quiz set selection.
//!
//! Words the learner currently owes a correct answer come first, in random
//! order; the rest of the set is filled with randomly chosen other words.

use std::collections::{BTreeSet, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::model::WordEntry;

/// Default number of questions per set.
pub const DEFAULT_QUESTIONS_PER_SET: usize = 10;

/// Result of choosing the next quiz set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextSet {
    /// A non-empty ordered batch of questions.
    Ready(Vec<WordEntry>),
    /// No question set can be formed.
    NoQuestions,
}

impl NextSet {
    pub fn is_ready(&self) -> bool {
        matches!(self, NextSet::Ready(_))
    }
}

/// Choose the next set of at most `set_size` words from `catalog`.
pub fn select_next_set<R: Rng + ?Sized>(
    catalog: &Catalog,
    incorrect_ids: &BTreeSet<String>,
    set_size: usize,
    rng: &mut R,
) -> NextSet {
    if catalog.is_empty() {
        tracing::debug!("catalog is empty, no questions available");
        return NextSet::NoQuestions;
    }

    let mut priority: Vec<&WordEntry> = catalog
        .entries()
        .iter()
        .filter(|w| incorrect_ids.contains(&w.id))
        .collect();
    priority.shuffle(rng);
    priority.truncate(set_size);

    let mut selected: Vec<&WordEntry> = priority;
    let remaining = set_size.saturating_sub(selected.len());
    if remaining > 0 {
        let taken: HashSet<&str> = selected.iter().map(|w| w.id.as_str()).collect();
        let mut fresh: Vec<&WordEntry> = catalog
            .entries()
            .iter()
            .filter(|w| !incorrect_ids.contains(&w.id) && !taken.contains(w.id.as_str()))
            .collect();
        fresh.shuffle(rng);
        fresh.truncate(remaining);
        selected.extend(fresh);
    }

    if selected.is_empty() {
        selected = catalog
            .entries()
            .choose_multiple(rng, set_size.min(catalog.len()))
            .collect();
    }

    if selected.is_empty() {
        tracing::debug!("no questions could be selected (set size {set_size})");
        return NextSet::NoQuestions;
    }

    tracing::debug!(
        "selected {} questions ({} under review)",
        selected.len(),
        selected
            .iter()
            .filter(|w| incorrect_ids.contains(&w.id))
            .count()
    );
    NextSet::Ready(selected.into_iter().cloned().collect())
}
