//! vocaquiz-core: quiz engine, word catalog, and progress tracking.
//!
//! This crate defines the vocabulary data model, the set selection and
//! option generation logic, and the session state machine that the
//! vocaquiz front ends drive.

pub mod catalog;
pub mod error;
pub mod model;
pub mod options;
pub mod progress;
pub mod selector;
pub mod session;
pub mod summary;
pub mod traits;

pub use catalog::Catalog;
pub use error::{CatalogError, SessionError, StoreError};
pub use model::{QuizSetResult, QuizState, WordEntry};
pub use session::{QuizSession, SessionConfig};
pub use traits::{KeyValueStore, MemoryStore};
