//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - sources(guid, source)
//! - comments(guid, source_guid, comment)
//! - translations(source_guid, lang, translation)

pub mod schema;
pub mod sqlite;

pub use sqlite::{LanguageText, SourceHit, StoreStats, TranslationHit, TranslationMemory};
