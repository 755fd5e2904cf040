//! The `vocaquiz play` command: an interactive terminal front end for the
//! quiz session.
//!
//! At a question, a number picks an option, `?` means "I don't know" and
//! `q` quits. End of input always quits cleanly.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vocaquiz_core::error::SessionError;
use vocaquiz_core::model::{QuizState, SelectedAnswer};
use vocaquiz_core::session::QuizSession;
use vocaquiz_core::traits::{KeyValueStore, MemoryStore};
use vocaquiz_store::FileStore;

use super::{history_table, load_words, reading_or_na, resolve_config, word_table};
use crate::StoreArgs;

pub fn execute(
    store: StoreArgs,
    catalog_path: Option<PathBuf>,
    questions: Option<usize>,
    seed: Option<u64>,
    max_sets: Option<usize>,
    ephemeral: bool,
) -> Result<()> {
    let mut config = resolve_config(&store)?;
    if let Some(n) = questions {
        config.questions_per_set = n;
    }
    if let Some(path) = catalog_path {
        config.catalog = Some(path);
    }
    config.validate()?;

    let catalog = load_words(config.catalog.as_deref())?;
    let rng = match seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let backend: Box<dyn KeyValueStore> = if ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::new(&config.store_dir))
    };
    tracing::debug!(
        "playing {} words, {} per set, store {}",
        catalog.len(),
        config.questions_per_set,
        if ephemeral {
            "in memory".to_string()
        } else {
            config.store_dir.display().to_string()
        }
    );

    let mut session = QuizSession::open(catalog, backend, rng, config.session_config());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_loop(&mut session, stdin.lock(), stdout.lock(), max_sets)
}

/// Drive `session` from line-oriented input until the learner quits, input
/// ends, or `max_sets` sets have been completed.
pub fn run_loop<S, R, I, O>(
    session: &mut QuizSession<S, R>,
    input: I,
    mut out: O,
    max_sets: Option<usize>,
) -> Result<()>
where
    S: KeyValueStore,
    R: Rng,
    I: BufRead,
    O: Write,
{
    let mut lines = input.lines();
    let mut completed_sets = 0usize;

    loop {
        match session.state() {
            QuizState::Ongoing => {
                render_question(session, &mut out)?;
                let Some(line) = lines.next().transpose()? else {
                    break;
                };
                match line.trim() {
                    "q" | "quit" => break,
                    "?" => match session.mark_dont_know() {
                        Ok(_) => {}
                        Err(e @ SessionError::MissingQuestion { .. }) => {
                            writeln!(out, "This question is unavailable ({e}).")?;
                            break;
                        }
                        Err(e) => return Err(e.into()),
                    },
                    choice => match choice.parse::<usize>() {
                        Ok(n) if n >= 1 => match session.submit_option(n - 1) {
                            Ok(_) => {}
                            Err(SessionError::OptionOutOfRange { available, .. }) => {
                                writeln!(out, "Please enter a number from 1 to {available}.")?;
                            }
                            Err(e @ SessionError::MissingQuestion { .. }) => {
                                writeln!(out, "This question is unavailable ({e}).")?;
                                break;
                            }
                            Err(e) => return Err(e.into()),
                        },
                        _ => {
                            writeln!(out, "Enter an option number, '?' if you don't know, or 'q' to quit.")?;
                        }
                    },
                }
            }
            QuizState::ShowingFeedback => {
                render_feedback(session, &mut out)?;
                writeln!(out, "Press Enter to continue.")?;
                if lines.next().transpose()?.is_none() {
                    break;
                }
                if session.acknowledge_feedback()? == QuizState::SetCompleted {
                    completed_sets += 1;
                }
            }
            QuizState::SetCompleted => {
                render_results(session, &mut out)?;
                if max_sets.is_some_and(|max| completed_sets >= max) {
                    break;
                }
                writeln!(out, "Next set? [Y]es / [r]eset progress / [q]uit")?;
                let Some(line) = lines.next().transpose()? else {
                    break;
                };
                match line.trim().to_lowercase().as_str() {
                    "" | "y" | "yes" => {
                        session.advance_to_next_set()?;
                    }
                    "r" | "reset" => {
                        session.reset_all_progress()?;
                        writeln!(out, "Review progress cleared. History kept.")?;
                    }
                    _ => break,
                }
            }
            QuizState::AllCompleted => {
                render_all_completed(session, &mut out)?;
                writeln!(out, "[r]estart from the beginning / [q]uit")?;
                let Some(line) = lines.next().transpose()? else {
                    break;
                };
                match line.trim().to_lowercase().as_str() {
                    "r" | "reset" | "restart" => {
                        session.reset_all_progress()?;
                    }
                    _ => break,
                }
            }
            QuizState::Loading | QuizState::NotStarted => {
                session.start()?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn render_question<S, R>(session: &QuizSession<S, R>, out: &mut impl Write) -> Result<()> {
    let view = session.view();
    let Some(question) = view.question else {
        writeln!(out, "\n(question unavailable)")?;
        return Ok(());
    };

    writeln!(
        out,
        "\nQuestion {}/{}  (score: {})",
        question.number, question.total, view.score
    )?;
    match question.reading {
        Some(reading) => writeln!(out, "  {}  [{reading}]", question.word)?,
        None => writeln!(out, "  {}", question.word)?,
    }
    for (i, option) in view.options.iter().enumerate() {
        writeln!(out, "  {}) {option}", i + 1)?;
    }
    writeln!(out, "  ?) I don't know")?;
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

fn render_feedback<S, R>(session: &QuizSession<S, R>, out: &mut impl Write) -> Result<()> {
    let Some(feedback) = session.feedback() else {
        writeln!(out, "(no feedback available)")?;
        return Ok(());
    };

    if feedback.is_correct {
        writeln!(out, "Correct!")?;
    } else {
        writeln!(out, "Incorrect.")?;
        match &feedback.selected {
            SelectedAnswer::DontKnow => writeln!(out, "You chose \"I don't know\".")?,
            SelectedAnswer::Choice(text) => writeln!(out, "Your answer: {text}")?,
        }
    }

    let word = &feedback.word;
    writeln!(out, "  {} (reading: {})", word.word, reading_or_na(word))?;
    writeln!(out, "  Meaning: {}", word.meaning)?;
    if let Some(remarks) = &word.remarks {
        writeln!(out, "  Note: {remarks}")?;
    }
    Ok(())
}

fn render_results<S, R>(session: &QuizSession<S, R>, out: &mut impl Write) -> Result<()> {
    let view = session.view();
    writeln!(out, "\nSet complete!")?;
    match view.summary {
        Some(summary) => {
            writeln!(
                out,
                "Score: {}/{} ({}%)",
                summary.score, summary.total_questions, summary.percentage
            )?;
            writeln!(out, "{}", summary.grade.message())?;
        }
        None => writeln!(out, "(results unavailable)")?,
    }

    if !view.set_incorrect_words.is_empty() {
        writeln!(out, "\nMissed in this set:")?;
        writeln!(out, "{}", word_table(view.set_incorrect_words))?;
    }
    if !view.previously_incorrect_words.is_empty() {
        writeln!(out, "\nStill to review from earlier sets:")?;
        writeln!(out, "{}", word_table(view.previously_incorrect_words))?;
    }
    Ok(())
}

fn render_all_completed<S, R>(session: &QuizSession<S, R>, out: &mut impl Write) -> Result<()> {
    let view = session.view();
    writeln!(out, "\nAll words completed!")?;
    writeln!(
        out,
        "Great work! You have mastered every word, or no words are available."
    )?;
    if !view.all_time_incorrect_words.is_empty() {
        writeln!(out, "\nFinal review list:")?;
        writeln!(out, "{}", word_table(view.all_time_incorrect_words))?;
    }
    if !view.history.is_empty() {
        writeln!(out, "\nHistory:")?;
        writeln!(out, "{}", history_table(view.history))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocaquiz_core::catalog::Catalog;
    use vocaquiz_core::model::WordEntry;
    use vocaquiz_core::session::SessionConfig;

    fn session(words: Vec<WordEntry>, per_set: usize) -> QuizSession<MemoryStore> {
        QuizSession::open(
            Catalog::new(words),
            MemoryStore::new(),
            StdRng::seed_from_u64(1),
            SessionConfig {
                questions_per_set: per_set,
                ..Default::default()
            },
        )
    }

    fn run(session: &mut QuizSession<MemoryStore>, input: &str, max_sets: Option<usize>) -> String {
        let mut out = Vec::new();
        run_loop(session, input.as_bytes(), &mut out, max_sets).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn single_meaning_catalog_is_answered_by_option_one() {
        let mut s = session(
            vec![WordEntry::new("1", "A", "same"), WordEntry::new("2", "B", "same")],
            2,
        );
        let out = run(&mut s, "1\n\n1\n\n", Some(1));
        assert!(out.contains("Correct!"));
        assert!(out.contains("Score: 2/2 (100%)"));
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn dont_know_shows_the_answer() {
        let mut s = session(vec![WordEntry::new("1", "A", "X").with_reading("ey")], 1);
        let out = run(&mut s, "?\n\n", Some(1));
        assert!(out.contains("You chose \"I don't know\"."));
        assert!(out.contains("A (reading: ey)"));
        assert!(out.contains("Score: 0/1 (0%)"));
        assert!(out.contains("Missed in this set:"));
    }

    #[test]
    fn invalid_input_is_reprompted() {
        let mut s = session(vec![WordEntry::new("1", "A", "X")], 1);
        let out = run(&mut s, "abc\n7\nq\n", None);
        assert!(out.contains("Enter an option number"));
        assert!(out.contains("Please enter a number from 1 to 1."));
        assert_eq!(s.state(), QuizState::Ongoing);
    }

    #[test]
    fn empty_catalog_reports_all_completed() {
        let mut s = session(vec![], 4);
        let out = run(&mut s, "", None);
        assert!(out.contains("All words completed!"));
    }

    #[test]
    fn all_completed_lists_history_entries() {
        let store = MemoryStore::with_entries([(
            "quizHistory",
            r#"[{"id":"b","date":"2024-05-02T09:30:00Z","score":4,"totalQuestions":4,"incorrectWordsInSet":"None"},{"id":"a","date":"2024-05-01T10:00:00Z","score":3,"totalQuestions":4,"incorrectWordsInSet":"B"}]"#,
        )]);
        let mut s = QuizSession::open(
            Catalog::default(),
            store,
            StdRng::seed_from_u64(1),
            SessionConfig::default(),
        );
        let out = run(&mut s, "q\n", None);

        assert!(out.contains("All words completed!"));
        assert!(out.contains("History:"));
        let newer = out.find("2024-05-02 09:30").unwrap();
        let older = out.find("2024-05-01 10:00").unwrap();
        assert!(newer < older);
        assert!(out.contains("3/4"));
        assert!(out.contains("75%"));
    }

    #[test]
    fn end_of_input_quits_mid_set() {
        let mut s = session(vec![WordEntry::new("1", "A", "X"), WordEntry::new("2", "B", "Y")], 2);
        let out = run(&mut s, "", None);
        assert!(out.contains("Question 1/2"));
        assert!(s.history().is_empty());
    }
}
