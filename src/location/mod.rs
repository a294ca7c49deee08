//! Address resolution subsystem.
//!
//! Resolves free-form Chinese address strings into province, city and
//! county (with their geocodes) against fixed reference dictionaries.

pub mod batch;
pub mod dictionary;
pub mod matcher;
pub mod providers;
pub mod resolver;
pub mod types;

pub use batch::{annotate, resolve_all, resolve_all_parallel};
pub use dictionary::DictionaryStore;
pub use providers::{BuiltinProvider, DictionaryProvider, JsonFileProvider};
pub use resolver::{digit_prefix, LocationResolver};
pub use types::{
    AnnotatedLocation, Candidate, DictionaryEntry, DictionaryError, DictionaryTables, Level,
    LocationMatch,
};
