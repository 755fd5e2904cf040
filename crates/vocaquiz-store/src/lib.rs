//! vocaquiz-store: file-backed persistence and configuration.
//!
//! Implements the `KeyValueStore` trait on top of a directory of JSON
//! files and loads the `vocaquiz.toml` configuration.

pub mod config;
pub mod file;

pub use config::{load_config, load_config_from, VocaquizConfig};
pub use file::FileStore;
