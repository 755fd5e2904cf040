//! History and review-progress persistence.
//!
//! Values are JSON bodies under two well-known keys. Absent, unreadable
//! or corrupt values load as empty defaults, and failed writes are logged
//! and dropped: progress storage never fails the caller.

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::QuizSetResult;
use crate::traits::KeyValueStore;

/// Key holding the serialized history list, newest first.
pub const HISTORY_KEY: &str = "quizHistory";

/// Key holding the serialized incorrect-id list.
pub const INCORRECT_IDS_KEY: &str = "incorrectlyAnsweredIds";

/// Everything persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedProgress {
    pub history: Vec<QuizSetResult>,
    pub incorrect_ids: BTreeSet<String>,
}

/// Typed access to quiz progress on top of a [`KeyValueStore`].
#[derive(Debug)]
pub struct ProgressStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying key-value store.
    pub fn backend(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> SavedProgress {
        SavedProgress {
            history: self.load_history(),
            incorrect_ids: self.load_incorrect_ids(),
        }
    }

    /// Stored history, newest first. Unreadable entries are skipped
    /// individually so the rest of the list survives the next save.
    pub fn load_history(&self) -> Vec<QuizSetResult> {
        let entries: Vec<serde_json::Value> = self.read_json(HISTORY_KEY).unwrap_or_default();
        let total = entries.len();
        let history: Vec<QuizSetResult> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::warn!("skipping unreadable {HISTORY_KEY} entry: {e}");
                    None
                }
            })
            .collect();
        if history.len() < total {
            tracing::warn!(
                "kept {} of {total} {HISTORY_KEY} entries",
                history.len()
            );
        }
        history
    }

    pub fn load_incorrect_ids(&self) -> BTreeSet<String> {
        self.read_json(INCORRECT_IDS_KEY).unwrap_or_default()
    }

    pub fn save_history(&self, history: &[QuizSetResult]) {
        self.write_json(HISTORY_KEY, history);
    }

    pub fn save_incorrect_ids(&self, ids: &BTreeSet<String>) {
        self.write_json(INCORRECT_IDS_KEY, ids);
    }

    /// Forget every word owed a correct answer. History is kept.
    pub fn clear_incorrect_ids(&self) {
        if let Err(e) = self.store.remove(INCORRECT_IDS_KEY) {
            tracing::warn!("failed to clear {INCORRECT_IDS_KEY}: {e}");
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("failed to read {key}, using empty default: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("corrupt {key}, using empty default: {e}");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("failed to serialize {key}: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &json) {
            tracing::warn!("failed to persist {key}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::model::WordEntry;
    use crate::traits::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::InvalidKey(key.to_string()))
        }
        fn set(&self, key: &str, _: &str) -> Result<(), StoreError> {
            Err(StoreError::InvalidKey(key.to_string()))
        }
        fn remove(&self, key: &str) -> Result<(), StoreError> {
            Err(StoreError::InvalidKey(key.to_string()))
        }
    }

    #[test]
    fn absent_keys_load_as_empty() {
        let progress = ProgressStore::new(MemoryStore::new());
        assert_eq!(progress.load(), SavedProgress::default());
    }

    #[test]
    fn corrupt_values_load_as_empty() {
        let store = MemoryStore::with_entries([
            (HISTORY_KEY, "{not json"),
            (INCORRECT_IDS_KEY, r#"{"wrong":"shape"}"#),
        ]);
        let progress = ProgressStore::new(store);
        assert_eq!(progress.load(), SavedProgress::default());
    }

    #[test]
    fn backend_failures_never_reach_caller() {
        let progress = ProgressStore::new(BrokenStore);
        assert!(progress.load().history.is_empty());
        progress.save_history(&[]);
        progress.save_incorrect_ids(&BTreeSet::new());
        progress.clear_incorrect_ids();
    }

    #[test]
    fn saved_progress_reloads() {
        let progress = ProgressStore::new(MemoryStore::new());
        let result = QuizSetResult::new(1, 2, &[WordEntry::new("2", "B", "Y")]);
        let ids: BTreeSet<String> = ["2".to_string()].into();

        progress.save_history(std::slice::from_ref(&result));
        progress.save_incorrect_ids(&ids);

        let loaded = progress.load();
        assert_eq!(loaded.history, vec![result]);
        assert_eq!(loaded.incorrect_ids, ids);
        assert_eq!(
            progress.backend().raw(INCORRECT_IDS_KEY).as_deref(),
            Some(r#"["2"]"#)
        );
    }

    #[test]
    fn history_with_non_uuid_ids_loads() {
        let store = MemoryStore::with_entries([(
            HISTORY_KEY,
            r#"[{"id":"set-1","date":"2024-05-01T10:00:00.000Z","score":3,"totalQuestions":4,"incorrectWordsInSet":"B"}]"#,
        )]);
        let history = ProgressStore::new(store).load_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "set-1");
        assert_eq!(history[0].incorrect_words_in_set, "B");
    }

    #[test]
    fn unreadable_history_entries_are_skipped_individually() {
        let store = MemoryStore::with_entries([(
            HISTORY_KEY,
            r#"[{"id":"a","date":"2024-05-02T09:00:00Z","score":4,"totalQuestions":4,"incorrectWordsInSet":"None"},{"id":"b","date":"yesterday","score":1},{"id":"c","date":"2024-05-01T09:00:00Z","score":2,"totalQuestions":4,"incorrectWordsInSet":"A, B"}]"#,
        )]);
        let history = ProgressStore::new(store).load_history();
        let ids: Vec<_> = history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn reads_plain_string_array_for_ids() {
        let store = MemoryStore::with_entries([(INCORRECT_IDS_KEY, r#"["3","1","3"]"#)]);
        let ids = ProgressStore::new(store).load_incorrect_ids();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["1", "3"]);
    }

    #[test]
    fn clear_keeps_history() {
        let progress = ProgressStore::new(MemoryStore::new());
        let result = QuizSetResult::new(4, 4, &[]);
        progress.save_history(std::slice::from_ref(&result));
        progress.save_incorrect_ids(&["1".to_string()].into());

        progress.clear_incorrect_ids();

        let loaded = progress.load();
        assert!(loaded.incorrect_ids.is_empty());
        assert_eq!(loaded.history.len(), 1);
        assert!(progress.backend().raw(INCORRECT_IDS_KEY).is_none());
    }
}
