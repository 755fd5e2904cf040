//! Core data model types for vocaquiz.
//!
//! These are the fundamental types that the entire vocaquiz system uses
//! to represent vocabulary entries, quiz states, and completed-set results.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display text recorded for a set with no missed words.
pub const NO_INCORRECT_WORDS: &str = "None";

/// Display sentinel for an "I don't know" answer.
pub const DONT_KNOW_MARKER: &str = "unknown";

/// A single vocabulary item with its tested meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Unique identifier within the catalog.
    pub id: String,
    /// Surface form shown as the question.
    pub word: String,
    /// Pronunciation, if the catalog provides one.
    #[serde(default)]
    pub reading: Option<String>,
    /// The meaning the learner has to pick.
    pub meaning: String,
    /// Free-form notes shown alongside the answer.
    #[serde(default)]
    pub remarks: Option<String>,
}

impl WordEntry {
    pub fn new(id: impl Into<String>, word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
            reading: None,
            meaning: meaning.into(),
            remarks: None,
        }
    }

    pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
        self.reading = Some(reading.into());
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }
}

/// Summary of one completed quiz set, as stored in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSetResult {
    /// Unique result identifier, a v4 UUID for results recorded here.
    pub id: String,
    /// When the set was completed.
    pub date: DateTime<Utc>,
    /// Number of correct answers.
    pub score: u32,
    /// Number of questions in the set.
    pub total_questions: u32,
    /// Comma-joined words missed in this set, or [`NO_INCORRECT_WORDS`].
    pub incorrect_words_in_set: String,
}

impl QuizSetResult {
    /// Build a result stamped with a fresh id and the current time.
    pub fn new(score: u32, total_questions: u32, missed: &[WordEntry]) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            score,
            total_questions,
            incorrect_words_in_set: join_missed_words(missed),
        }
    }

    /// Whether every question in the set was answered correctly.
    pub fn is_perfect(&self) -> bool {
        self.score == self.total_questions
    }
}

/// Join missed words for display, falling back to [`NO_INCORRECT_WORDS`].
pub fn join_missed_words(missed: &[WordEntry]) -> String {
    if missed.is_empty() {
        return NO_INCORRECT_WORDS.to_string();
    }
    missed
        .iter()
        .map(|w| w.word.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// States of the quiz session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizState {
    Loading,
    NotStarted,
    Ongoing,
    ShowingFeedback,
    SetCompleted,
    AllCompleted,
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizState::Loading => write!(f, "LOADING"),
            QuizState::NotStarted => write!(f, "NOT_STARTED"),
            QuizState::Ongoing => write!(f, "ONGOING"),
            QuizState::ShowingFeedback => write!(f, "SHOWING_FEEDBACK"),
            QuizState::SetCompleted => write!(f, "SET_COMPLETED"),
            QuizState::AllCompleted => write!(f, "ALL_COMPLETED"),
        }
    }
}

impl FromStr for QuizState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "LOADING" => Ok(QuizState::Loading),
            "NOT_STARTED" => Ok(QuizState::NotStarted),
            "ONGOING" => Ok(QuizState::Ongoing),
            "SHOWING_FEEDBACK" => Ok(QuizState::ShowingFeedback),
            "SET_COMPLETED" => Ok(QuizState::SetCompleted),
            "ALL_COMPLETED" => Ok(QuizState::AllCompleted),
            other => Err(format!("unknown quiz state: {other}")),
        }
    }
}

/// The answer the learner gave to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum SelectedAnswer {
    /// One of the offered options, by its display text.
    Choice(String),
    /// The explicit "I don't know" action.
    DontKnow,
}

impl SelectedAnswer {
    pub fn is_dont_know(&self) -> bool {
        matches!(self, SelectedAnswer::DontKnow)
    }
}

impl fmt::Display for SelectedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectedAnswer::Choice(text) => write!(f, "{text}"),
            SelectedAnswer::DontKnow => write!(f, "{DONT_KNOW_MARKER}"),
        }
    }
}

/// Outcome of the most recent answer, shown while in `SHOWING_FEEDBACK`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub selected: SelectedAnswer,
    /// The word that was asked, with its full detail.
    pub word: WordEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_state_display_and_parse() {
        assert_eq!(QuizState::ShowingFeedback.to_string(), "SHOWING_FEEDBACK");
        assert_eq!(
            "all-completed".parse::<QuizState>().unwrap(),
            QuizState::AllCompleted
        );
        assert_eq!("ongoing".parse::<QuizState>().unwrap(), QuizState::Ongoing);
        assert!("finished".parse::<QuizState>().is_err());
    }

    #[test]
    fn join_missed_words_uses_sentinel_when_empty() {
        assert_eq!(join_missed_words(&[]), "None");
        let missed = vec![WordEntry::new("1", "A", "X"), WordEntry::new("2", "B", "Y")];
        assert_eq!(join_missed_words(&missed), "A, B");
    }

    #[test]
    fn quiz_set_result_uses_camel_case_keys() {
        let result = QuizSetResult::new(3, 4, &[WordEntry::new("2", "B", "Y")]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalQuestions"], 4);
        assert_eq!(json["incorrectWordsInSet"], "B");
        assert!(json.get("total_questions").is_none());
        assert!(!result.is_perfect());
    }

    #[test]
    fn dont_know_displays_marker() {
        assert_eq!(SelectedAnswer::DontKnow.to_string(), "unknown");
        assert_eq!(SelectedAnswer::Choice("X".into()).to_string(), "X");
        assert!(SelectedAnswer::DontKnow.is_dont_know());
    }

    #[test]
    fn word_entry_optional_fields_default_to_none() {
        let entry: WordEntry =
            serde_json::from_str(r#"{"id":"1","word":"A","meaning":"X"}"#).unwrap();
        assert_eq!(entry.reading, None);
        assert_eq!(entry.remarks, None);
    }
}
