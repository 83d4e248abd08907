//! # Lingo - Translation Memory Manager
//!
//! A small translation-memory store for app localization.
//!
//! Lingo provides:
//! - SQLite-backed storage for base-language source strings, translator
//!   comments and per-language translations
//! - Substring search over sources, with translations attached on demand
//! - Android `strings.xml` import and per-language build
//! - An interactive terminal shell plus scriptable CLI subcommands

pub mod android;
pub mod config;
pub mod language;
pub mod shell;
pub mod store;
pub mod ui;

// Re-exports for convenient access
pub use language::{Language, BASE_LANG, SUPPORTED_LANGUAGES};
pub use store::{LanguageText, SourceHit, StoreStats, TranslationHit, TranslationMemory};

/// Result type alias for Lingo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Lingo operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing required argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed strings file: {0}")]
    MalformedStrings(String),
}
