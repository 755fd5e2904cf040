//! vocaquiz configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use vocaquiz_core::options::DEFAULT_OPTION_COUNT;
use vocaquiz_core::selector::DEFAULT_QUESTIONS_PER_SET;
use vocaquiz_core::session::SessionConfig;

/// Top-level vocaquiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocaquizConfig {
    /// Questions per set.
    #[serde(default = "default_questions_per_set")]
    pub questions_per_set: usize,
    /// Options offered per question.
    #[serde(default = "default_options_per_question")]
    pub options_per_question: usize,
    /// Directory holding history and review progress.
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// Word list to quiz on; the bundled list when unset.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Fixed RNG seed for reproducible sets.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_questions_per_set() -> usize {
    DEFAULT_QUESTIONS_PER_SET
}
fn default_options_per_question() -> usize {
    DEFAULT_OPTION_COUNT
}
fn default_store_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("vocaquiz"),
        Err(_) => PathBuf::from(".vocaquiz"),
    }
}

impl Default for VocaquizConfig {
    fn default() -> Self {
        Self {
            questions_per_set: default_questions_per_set(),
            options_per_question: default_options_per_question(),
            store_dir: default_store_dir(),
            catalog: None,
            seed: None,
        }
    }
}

impl VocaquizConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.questions_per_set >= 1,
            "questions_per_set must be at least 1"
        );
        anyhow::ensure!(
            self.options_per_question >= 1,
            "options_per_question must be at least 1"
        );
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            questions_per_set: self.questions_per_set,
            options_per_question: self.options_per_question,
        }
    }
}

/// Expand `${VAR_NAME}` references; unset variables expand to nothing.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        out.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    out.push_str(rest);
    out
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `vocaquiz.toml` in the current directory
/// 2. `~/.config/vocaquiz/config.toml`
///
/// Environment variable overrides: `VOCAQUIZ_STORE_DIR`, `VOCAQUIZ_CATALOG`.
pub fn load_config() -> Result<VocaquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<VocaquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("vocaquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => VocaquizConfig::default(),
    };

    if let Ok(dir) = std::env::var("VOCAQUIZ_STORE_DIR") {
        config.store_dir = PathBuf::from(dir);
    }
    if let Ok(catalog) = std::env::var("VOCAQUIZ_CATALOG") {
        config.catalog = Some(PathBuf::from(catalog));
    }

    config.store_dir = resolve_path(&config.store_dir);
    config.catalog = config.catalog.as_deref().map(resolve_path);

    config.validate()?;
    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<VocaquizConfig> {
    Ok(toml::from_str::<VocaquizConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("vocaquiz"))
}
