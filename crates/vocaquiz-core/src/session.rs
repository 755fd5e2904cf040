//! Quiz session state machine.
//!
//! A [`QuizSession`] owns the catalog, the progress store, the random
//! source and all transient state of one learner's session. Every user
//! action is a synchronous method that either performs a transition or
//! reports that the action does not fit the current state.
//!
//! ```text
//! LOADING -> NOT_STARTED -> ONGOING <-> SHOWING_FEEDBACK -> SET_COMPLETED
//!                 |                                          |      |
//!                 +------------> ALL_COMPLETED <-------------+      |
//!                                      |                            |
//!                                      +-- reset --> NOT_STARTED <--+
//! ```

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::SessionError;
use crate::model::{AnswerFeedback, QuizSetResult, QuizState, SelectedAnswer, WordEntry};
use crate::options::{generate_options, DEFAULT_OPTION_COUNT};
use crate::progress::ProgressStore;
use crate::selector::{select_next_set, NextSet, DEFAULT_QUESTIONS_PER_SET};
use crate::summary::SetSummary;
use crate::traits::KeyValueStore;

/// Tunables for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum questions in one set.
    pub questions_per_set: usize,
    /// Maximum options offered per question.
    pub options_per_question: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            questions_per_set: DEFAULT_QUESTIONS_PER_SET,
            options_per_question: DEFAULT_OPTION_COUNT,
        }
    }
}

/// The question currently on screen.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView<'a> {
    pub word: &'a str,
    pub reading: Option<&'a str>,
    /// 1-based position within the set.
    pub number: usize,
    pub total: usize,
}

/// Everything the presentation layer needs to render the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView<'a> {
    pub state: QuizState,
    pub question: Option<QuestionView<'a>>,
    pub options: &'a [String],
    pub score: u32,
    pub feedback: Option<&'a AnswerFeedback>,
    pub summary: Option<SetSummary>,
    pub set_incorrect_words: &'a [WordEntry],
    pub previously_incorrect_words: Vec<&'a WordEntry>,
    pub all_time_incorrect_words: Vec<&'a WordEntry>,
    pub history: &'a [QuizSetResult],
}

/// One learner's quiz session.
pub struct QuizSession<S, R = StdRng> {
    catalog: Catalog,
    progress: ProgressStore<S>,
    rng: R,
    config: SessionConfig,
    state: QuizState,
    history: Vec<QuizSetResult>,
    incorrect_ids: BTreeSet<String>,
    question_set: Vec<WordEntry>,
    index: usize,
    score: u32,
    // Insertion-ordered and duplicate-free.
    set_incorrect_ids: Vec<String>,
    set_incorrect_words: Vec<WordEntry>,
    options: Vec<String>,
    feedback: Option<AnswerFeedback>,
}

impl<S: KeyValueStore, R: Rng> QuizSession<S, R> {
    /// Create a session in the `LOADING` state.
    pub fn new(catalog: Catalog, store: S, rng: R, config: SessionConfig) -> Self {
        Self {
            catalog,
            progress: ProgressStore::new(store),
            rng,
            config,
            state: QuizState::Loading,
            history: Vec::new(),
            incorrect_ids: BTreeSet::new(),
            question_set: Vec::new(),
            index: 0,
            score: 0,
            set_incorrect_ids: Vec::new(),
            set_incorrect_words: Vec::new(),
            options: Vec::new(),
            feedback: None,
        }
    }

    /// Create a session, load persisted progress and start the first set.
    pub fn open(catalog: Catalog, store: S, rng: R, config: SessionConfig) -> Self {
        let mut session = Self::new(catalog, store, rng, config);
        session.load_and_start();
        session
    }

    fn load_and_start(&mut self) {
        self.load_progress();
        self.begin_set();
    }

    /// Load persisted history and review progress: `LOADING -> NOT_STARTED`.
    pub fn load(&mut self) -> Result<(), SessionError> {
        if self.state != QuizState::Loading {
            return Err(SessionError::invalid("load progress", self.state));
        }
        self.load_progress();
        Ok(())
    }

    fn load_progress(&mut self) {
        let saved = self.progress.load();
        let loaded = saved.incorrect_ids.len();
        self.history = saved.history;
        self.incorrect_ids = saved
            .incorrect_ids
            .into_iter()
            .filter(|id| self.catalog.contains(id))
            .collect();
        if self.incorrect_ids.len() < loaded {
            tracing::info!(
                "dropped {} review ids not present in the catalog",
                loaded - self.incorrect_ids.len()
            );
        }
        tracing::debug!(
            "loaded {} history entries, {} words under review",
            self.history.len(),
            self.incorrect_ids.len()
        );
        self.state = QuizState::NotStarted;
    }

    /// Generate the first set: `NOT_STARTED -> ONGOING | ALL_COMPLETED`.
    pub fn start(&mut self) -> Result<QuizState, SessionError> {
        if self.state != QuizState::NotStarted {
            return Err(SessionError::invalid("start a set", self.state));
        }
        Ok(self.begin_set())
    }

    /// Answer the current question with an option's text.
    pub fn submit_answer(&mut self, answer: &str) -> Result<&AnswerFeedback, SessionError> {
        let word = self.question_for("submit an answer")?;
        let is_correct = answer == word.meaning;

        if is_correct {
            self.score += 1;
            if self.incorrect_ids.remove(&word.id) {
                tracing::debug!("'{}' answered correctly, removed from review", word.word);
            }
        } else {
            self.record_incorrect(&word.id);
        }

        Ok(self.show_feedback(AnswerFeedback {
            is_correct,
            selected: SelectedAnswer::Choice(answer.to_string()),
            word,
        }))
    }

    /// Answer the current question with the option at `index` (0-based).
    pub fn submit_option(&mut self, index: usize) -> Result<&AnswerFeedback, SessionError> {
        if self.state != QuizState::Ongoing {
            return Err(SessionError::invalid("submit an answer", self.state));
        }
        let Some(answer) = self.options.get(index).cloned() else {
            return Err(SessionError::OptionOutOfRange {
                index,
                available: self.options.len(),
            });
        };
        self.submit_answer(&answer)
    }

    /// The "I don't know" action: always recorded as incorrect.
    pub fn mark_dont_know(&mut self) -> Result<&AnswerFeedback, SessionError> {
        let word = self.question_for("mark the question as unknown")?;
        self.record_incorrect(&word.id);
        Ok(self.show_feedback(AnswerFeedback {
            is_correct: false,
            selected: SelectedAnswer::DontKnow,
            word,
        }))
    }

    /// Dismiss feedback: next question, or complete the set at the end.
    pub fn acknowledge_feedback(&mut self) -> Result<QuizState, SessionError> {
        if self.state != QuizState::ShowingFeedback {
            return Err(SessionError::invalid("acknowledge feedback", self.state));
        }
        self.feedback = None;

        if self.index + 1 < self.question_set.len() {
            self.index += 1;
            self.refresh_options();
            self.state = QuizState::Ongoing;
        } else {
            self.complete_set();
        }
        Ok(self.state)
    }

    /// Start the next set: `SET_COMPLETED -> ONGOING | ALL_COMPLETED`.
    pub fn advance_to_next_set(&mut self) -> Result<QuizState, SessionError> {
        if self.state != QuizState::SetCompleted {
            return Err(SessionError::invalid("advance to the next set", self.state));
        }
        Ok(self.begin_set())
    }

    /// Forget every word under review and start over. History is kept.
    ///
    /// Accepted between sets (`SET_COMPLETED`) and at `ALL_COMPLETED`.
    pub fn reset_all_progress(&mut self) -> Result<QuizState, SessionError> {
        if !matches!(
            self.state,
            QuizState::AllCompleted | QuizState::SetCompleted
        ) {
            return Err(SessionError::invalid("reset progress", self.state));
        }
        self.incorrect_ids.clear();
        self.progress.clear_incorrect_ids();
        self.set_incorrect_words.clear();
        tracing::info!("review progress reset; history kept");

        self.state = QuizState::NotStarted;
        Ok(self.begin_set())
    }

    fn question_for(&self, action: &'static str) -> Result<WordEntry, SessionError> {
        if self.state != QuizState::Ongoing {
            return Err(SessionError::invalid(action, self.state));
        }
        self.current_word()
            .cloned()
            .ok_or(SessionError::MissingQuestion { index: self.index })
    }

    fn record_incorrect(&mut self, id: &str) {
        self.incorrect_ids.insert(id.to_string());
        if !self.set_incorrect_ids.iter().any(|i| i == id) {
            self.set_incorrect_ids.push(id.to_string());
        }
    }

    fn show_feedback(&mut self, feedback: AnswerFeedback) -> &AnswerFeedback {
        self.state = QuizState::ShowingFeedback;
        self.feedback.insert(feedback)
    }

    fn refresh_options(&mut self) {
        self.options = match self.question_set.get(self.index) {
            Some(word) => generate_options(
                word,
                self.catalog.entries(),
                self.config.options_per_question,
                &mut self.rng,
            ),
            None => Vec::new(),
        };
    }

    fn begin_set(&mut self) -> QuizState {
        self.score = 0;
        self.index = 0;
        self.set_incorrect_ids.clear();
        self.set_incorrect_words.clear();
        self.feedback = None;

        match select_next_set(
            &self.catalog,
            &self.incorrect_ids,
            self.config.questions_per_set,
            &mut self.rng,
        ) {
            NextSet::Ready(set) => {
                tracing::debug!("starting a set of {} questions", set.len());
                self.question_set = set;
                self.refresh_options();
                self.state = QuizState::Ongoing;
            }
            NextSet::NoQuestions => {
                tracing::info!("no questions available, all completed");
                self.question_set.clear();
                self.options.clear();
                self.state = QuizState::AllCompleted;
            }
        }
        self.state
    }

    fn complete_set(&mut self) {
        self.set_incorrect_words = self
            .set_incorrect_ids
            .iter()
            .filter_map(|id| self.catalog.get(id).cloned())
            .collect();

        let result = QuizSetResult::new(
            self.score,
            self.question_set.len() as u32,
            &self.set_incorrect_words,
        );
        tracing::info!(
            "set completed: {}/{} (missed: {})",
            result.score,
            result.total_questions,
            result.incorrect_words_in_set
        );

        self.history.insert(0, result);
        self.progress.save_history(&self.history);
        self.progress.save_incorrect_ids(&self.incorrect_ids);
        self.state = QuizState::SetCompleted;
    }
}

impl<S, R> QuizSession<S, R> {
    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The word being asked, if the set still has one at the current index.
    pub fn current_word(&self) -> Option<&WordEntry> {
        match self.state {
            QuizState::Ongoing | QuizState::ShowingFeedback => self.question_set.get(self.index),
            _ => None,
        }
    }

    pub fn question_set(&self) -> &[WordEntry] {
        &self.question_set
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    /// Completed-set history, newest first.
    pub fn history(&self) -> &[QuizSetResult] {
        &self.history
    }

    /// The most recently completed set, while its results are on screen.
    pub fn last_result(&self) -> Option<&QuizSetResult> {
        match self.state {
            QuizState::SetCompleted => self.history.first(),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<SetSummary> {
        self.last_result()
            .map(|r| SetSummary::new(r.score, r.total_questions))
    }

    pub fn incorrect_ids(&self) -> &BTreeSet<String> {
        &self.incorrect_ids
    }

    /// Words missed in the set just completed.
    pub fn set_incorrect_words(&self) -> &[WordEntry] {
        &self.set_incorrect_words
    }

    /// Every word currently under review, in catalog order.
    pub fn all_time_incorrect_words(&self) -> Vec<&WordEntry> {
        self.catalog
            .entries()
            .iter()
            .filter(|w| self.incorrect_ids.contains(&w.id))
            .collect()
    }

    /// Words under review that were not missed in the set just completed.
    pub fn previously_incorrect_words(&self) -> Vec<&WordEntry> {
        self.all_time_incorrect_words()
            .into_iter()
            .filter(|w| !self.set_incorrect_words.iter().any(|s| s.id == w.id))
            .collect()
    }

    pub fn view(&self) -> SessionView<'_> {
        let question = self.current_word().map(|w| QuestionView {
            word: &w.word,
            reading: w.reading.as_deref(),
            number: self.index + 1,
            total: self.question_set.len(),
        });
        SessionView {
            state: self.state,
            question,
            options: &self.options,
            score: self.score,
            feedback: self.feedback.as_ref(),
            summary: self.summary(),
            set_incorrect_words: &self.set_incorrect_words,
            previously_incorrect_words: self.previously_incorrect_words(),
            all_time_incorrect_words: self.all_time_incorrect_words(),
            history: &self.history,
        }
    }
}
