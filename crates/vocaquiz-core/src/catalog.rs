//! Word catalog loader.
//!
//! Parses word lists from the tab-separated text format (the bundled blob
//! uses it) or from TOML files, and validates them. Malformed records are
//! skipped with a warning rather than failing the whole load.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::model::WordEntry;

/// The word list compiled into the binary.
const BUNDLED_WORDS: &str = include_str!("../data/spi_words.tsv");

/// An ordered, read-only collection of word entries with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<WordEntry>,
}

impl Catalog {
    /// Build a catalog, dropping entries whose id was already seen.
    pub fn new(entries: Vec<WordEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|e| {
                let fresh = seen.insert(e.id.clone());
                if !fresh {
                    tracing::warn!("dropping duplicate catalog id '{}'", e.id);
                }
                fresh
            })
            .collect();
        Self { entries }
    }

    /// The word list shipped with vocaquiz.
    pub fn bundled() -> Self {
        let parsed = parse_text(BUNDLED_WORDS);
        for w in &parsed.skipped {
            tracing::warn!("bundled catalog: {}", w);
        }
        parsed.catalog
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&WordEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

/// Supported catalog file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `word<TAB>reading<TAB>meaning[<TAB>remarks]`, one record per line.
    Text,
    /// `[[words]]` tables.
    Toml,
}

impl CatalogFormat {
    /// Pick the format from a file extension; anything but `.toml` is text.
    pub fn from_path(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == "toml") {
            CatalogFormat::Toml
        } else {
            CatalogFormat::Text
        }
    }
}

/// A problem found while loading or validating a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogWarning {
    /// 1-based line (text) or entry position (TOML), if applicable.
    pub position: Option<usize>,
    pub message: String,
}

impl std::fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(pos) => write!(f, "[{pos}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// A parsed catalog plus the records that were skipped.
#[derive(Debug, Clone)]
pub struct ParsedCatalog {
    pub catalog: Catalog,
    pub skipped: Vec<CatalogWarning>,
}

/// Load a catalog file, choosing the format from its extension.
pub fn load_catalog(path: &Path) -> Result<ParsedCatalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_catalog_str(&content, CatalogFormat::from_path(path))?;
    tracing::debug!(
        "loaded {} words from {} ({} skipped)",
        parsed.catalog.len(),
        path.display(),
        parsed.skipped.len()
    );
    Ok(parsed)
}

/// Parse catalog content in the given format.
pub fn parse_catalog_str(
    content: &str,
    format: CatalogFormat,
) -> Result<ParsedCatalog, CatalogError> {
    match format {
        CatalogFormat::Text => Ok(parse_text(content)),
        CatalogFormat::Toml => parse_toml(content),
    }
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse the tab-separated text format. Ids are assigned from "1" in
/// accepted-record order.
pub fn parse_text(content: &str) -> ParsedCatalog {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim_start_matches('\u{feff}').trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            skipped.push(CatalogWarning {
                position: Some(line_no),
                message: format!("expected at least 3 tab-separated fields, found {}", fields.len()),
            });
            continue;
        }

        let Some(word) = non_empty(fields.first().copied()) else {
            skipped.push(CatalogWarning {
                position: Some(line_no),
                message: "record has no word".into(),
            });
            continue;
        };
        let Some(meaning) = non_empty(fields.get(2).copied()) else {
            skipped.push(CatalogWarning {
                position: Some(line_no),
                message: format!("word '{word}' has no meaning"),
            });
            continue;
        };

        entries.push(WordEntry {
            id: (entries.len() + 1).to_string(),
            word,
            reading: non_empty(fields.get(1).copied()),
            meaning,
            remarks: non_empty(fields.get(3).copied()),
        });
    }

    for w in &skipped {
        tracing::warn!("skipping catalog line {}", w);
    }

    ParsedCatalog {
        catalog: Catalog { entries },
        skipped,
    }
}

/// Intermediate TOML structure for catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    words: Vec<TomlWord>,
}

#[derive(Debug, Deserialize)]
struct TomlWord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    word: String,
    #[serde(default)]
    reading: Option<String>,
    #[serde(default)]
    meaning: String,
    #[serde(default)]
    remarks: Option<String>,
}

/// Parse a TOML catalog of `[[words]]` tables.
pub fn parse_toml(content: &str) -> Result<ParsedCatalog, CatalogError> {
    let parsed: TomlCatalogFile = toml::from_str(content)?;

    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    let mut seen_ids = HashSet::new();

    for (idx, w) in parsed.words.into_iter().enumerate() {
        let position = idx + 1;
        let id = non_empty(w.id.as_deref()).unwrap_or_else(|| position.to_string());
        let Some(word) = non_empty(Some(&w.word)) else {
            skipped.push(CatalogWarning {
                position: Some(position),
                message: format!("entry '{id}' has no word"),
            });
            continue;
        };
        let Some(meaning) = non_empty(Some(&w.meaning)) else {
            skipped.push(CatalogWarning {
                position: Some(position),
                message: format!("word '{word}' has no meaning"),
            });
            continue;
        };
        if !seen_ids.insert(id.clone()) {
            skipped.push(CatalogWarning {
                position: Some(position),
                message: format!("duplicate id: {id}"),
            });
            continue;
        }

        entries.push(WordEntry {
            id,
            word,
            reading: non_empty(w.reading.as_deref()),
            meaning,
            remarks: non_empty(w.remarks.as_deref()),
        });
    }

    for w in &skipped {
        tracing::warn!("skipping catalog entry {}", w);
    }

    Ok(ParsedCatalog {
        catalog: Catalog { entries },
        skipped,
    })
}

/// Check a catalog for issues that degrade the quiz.
pub fn validate_catalog(catalog: &Catalog, options_per_question: usize) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();

    if catalog.is_empty() {
        warnings.push(CatalogWarning {
            position: None,
            message: "catalog is empty; no questions can be asked".into(),
        });
        return warnings;
    }

    // Shared meanings cannot both appear as options for one question
    let mut by_meaning: HashMap<&str, Vec<&str>> = HashMap::new();
    for entry in catalog.entries() {
        by_meaning
            .entry(entry.meaning.as_str())
            .or_default()
            .push(entry.word.as_str());
    }
    let mut shared: Vec<_> = by_meaning
        .into_iter()
        .filter(|(_, words)| words.len() > 1)
        .collect();
    shared.sort();
    for (meaning, words) in shared {
        warnings.push(CatalogWarning {
            position: None,
            message: format!("meaning '{meaning}' is shared by: {}", words.join(", ")),
        });
    }

    let distinct = catalog
        .entries()
        .iter()
        .map(|e| e.meaning.as_str())
        .collect::<HashSet<_>>()
        .len();
    if distinct < options_per_question {
        warnings.push(CatalogWarning {
            position: None,
            message: format!(
                "only {distinct} distinct meanings; questions will offer fewer than {options_per_question} options"
            ),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TEXT: &str = "# comment\n\
        杞憂\tきゆう\tあれこれと無用な心配をすること\t故事から\n\
        \n\
        逡巡\t\tためらうこと\n\
        broken line\n\
        \tno word\tmeaning\n\
        瑕疵\tかし\t\n";

    #[test]
    fn parse_text_assigns_sequential_ids_and_skips_malformed() {
        let parsed = parse_text(SAMPLE_TEXT);
        let entries = parsed.catalog.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "1");
        assert_eq!(entries[0].word, "杞憂");
        assert_eq!(entries[0].remarks.as_deref(), Some("故事から"));
        assert_eq!(entries[1].id, "2");
        assert_eq!(entries[1].reading, None);
        assert_eq!(entries[1].remarks, None);
        assert_eq!(parsed.skipped.len(), 3);
        assert_eq!(parsed.skipped[0].position, Some(5));
    }

    #[test]
    fn parse_toml_keeps_explicit_ids() {
        let toml = r#"
[[words]]
id = "kiyuu"
word = "杞憂"
reading = "きゆう"
meaning = "無用な心配"

[[words]]
word = "逡巡"
meaning = "ためらうこと"
remarks = ""

[[words]]
id = "kiyuu"
word = "duplicate"
meaning = "dup"

[[words]]
word = "no meaning"
"#;
        let parsed = parse_toml(toml).unwrap();
        let entries = parsed.catalog.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "kiyuu");
        assert_eq!(entries[1].id, "2");
        assert_eq!(entries[1].remarks, None);
        assert_eq!(parsed.skipped.len(), 2);
        assert!(parsed.skipped[0].message.contains("duplicate id"));
    }

    #[test]
    fn parse_malformed_toml() {
        let result = parse_toml("this is not [valid toml }{");
        assert!(matches!(result, Err(CatalogError::Toml(_))));
    }

    #[test]
    fn catalog_new_drops_duplicate_ids() {
        let catalog = Catalog::new(vec![
            WordEntry::new("1", "A", "X"),
            WordEntry::new("1", "B", "Y"),
            WordEntry::new("2", "C", "Z"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("1").unwrap().word, "A");
        assert!(catalog.contains("2"));
        assert!(!catalog.contains("3"));
    }

    #[test]
    fn bundled_catalog_is_usable() {
        let catalog = Catalog::bundled();
        assert!(catalog.len() >= 20);
        assert!(validate_catalog(&catalog, 4).is_empty());
    }

    #[test]
    fn validate_reports_shared_meanings_and_small_catalogs() {
        let catalog = Catalog::new(vec![
            WordEntry::new("1", "A", "X"),
            WordEntry::new("2", "B", "X"),
            WordEntry::new("3", "C", "Y"),
        ]);
        let warnings = validate_catalog(&catalog, 4);
        assert!(warnings.iter().any(|w| w.message.contains("shared by: A, B")));
        assert!(warnings.iter().any(|w| w.message.contains("only 2 distinct")));
    }

    #[test]
    fn validate_empty_catalog() {
        let warnings = validate_catalog(&Catalog::default(), 4);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("empty"));
    }

    #[test]
    fn load_catalog_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("words.toml");
        std::fs::write(&toml_path, "[[words]]\nword = \"A\"\nmeaning = \"X\"\n").unwrap();
        let tsv_path = dir.path().join("words.tsv");
        std::fs::write(&tsv_path, "A\t\tX\nB\t\tY\n").unwrap();

        assert_eq!(load_catalog(&toml_path).unwrap().catalog.len(), 1);
        assert_eq!(load_catalog(&tsv_path).unwrap().catalog.len(), 2);
        assert!(matches!(
            load_catalog(&dir.path().join("missing.tsv")),
            Err(CatalogError::Read { .. })
        ));
    }
}
