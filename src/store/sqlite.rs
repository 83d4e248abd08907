//! SQLite translation-memory implementation

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::schema;
use crate::language::{self, Language, BASE_LANG};
use crate::{Error, Result};

/// SQLite-backed translation memory
///
/// Owns one exclusive connection for its lifetime; callers pass the handle
/// around explicitly, there is no global instance.
pub struct TranslationMemory {
    conn: Connection,
}

impl TranslationMemory {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        let stats = store.stats()?;
        tracing::info!(
            "Opened translation memory {:?}: {} sources, {} comments, {} translations",
            path,
            stats.sources,
            stats.comments,
            stats.translations
        );
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Release the underlying connection
    ///
    /// Consuming the store makes a second close unrepresentable; dropping
    /// the store releases the handle as well.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Storage(e))
    }

    // ========== Source Operations ==========

    /// Insert a source string, or resolve it if the text already exists
    ///
    /// Identity is assigned exactly once per distinct text; a duplicate add
    /// returns the existing guid and appends `comments` to it. Comments are
    /// applied one by one, not atomically across the sequence.
    pub fn add_source(&self, text: &str, comments: &[String]) -> Result<String> {
        if text.is_empty() {
            return Err(Error::InvalidArgument("text"));
        }

        if let Some(guid) = self.guid_for_source(text)? {
            self.add_comments(&guid, comments)?;
            return Ok(guid);
        }

        let guid = Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO sources (guid, source) VALUES (?1, ?2)",
            params![guid, text],
        )?;
        self.add_comments(&guid, comments)?;
        Ok(guid)
    }

    /// Get the guid of the source with exactly this text
    pub fn guid_for_source(&self, text: &str) -> Result<Option<String>> {
        if text.is_empty() {
            return Err(Error::InvalidArgument("text"));
        }
        self.conn
            .query_row(
                "SELECT guid FROM sources WHERE source = ?1",
                [text],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get the source text for a guid
    pub fn source_for_guid(&self, guid: &str) -> Result<Option<String>> {
        if guid.is_empty() {
            return Err(Error::InvalidArgument("guid"));
        }
        self.conn
            .query_row(
                "SELECT source FROM sources WHERE guid = ?1",
                [guid],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Count all sources
    pub fn count_sources(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sources", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Comment Operations ==========

    /// Comments for a source identified by text
    ///
    /// `None` means the text is unknown; a known source with no comments
    /// yields `Some` of an empty list.
    pub fn comments_for_source(&self, text: &str) -> Result<Option<Vec<String>>> {
        match self.guid_for_source(text)? {
            Some(guid) => Ok(Some(self.comments_for_source_guid(&guid)?)),
            None => Ok(None),
        }
    }

    /// Comments for a source guid, in insertion order
    ///
    /// An unknown guid yields an empty list, not an error.
    pub fn comments_for_source_guid(&self, guid: &str) -> Result<Vec<String>> {
        if guid.is_empty() {
            return Err(Error::InvalidArgument("guid"));
        }
        let mut stmt = self.conn.prepare(
            "SELECT comment FROM comments WHERE source_guid = ?1 ORDER BY rowid",
        )?;

        let comments = stmt
            .query_map([guid], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(comments)
    }

    /// Attach each comment in turn via [`Self::add_comment`]
    pub fn add_comments(&self, guid: &str, comments: &[String]) -> Result<()> {
        for comment in comments {
            self.add_comment(guid, comment)?;
        }
        Ok(())
    }

    /// Attach one comment to a source
    ///
    /// Duplicate comment text for the same source is a no-op (exact-match,
    /// case-sensitive dedup).
    pub fn add_comment(&self, guid: &str, text: &str) -> Result<()> {
        if guid.is_empty() {
            return Err(Error::InvalidArgument("guid"));
        }
        if text.is_empty() {
            return Err(Error::InvalidArgument("comment"));
        }
        if self.source_for_guid(guid)?.is_none() {
            return Err(Error::SourceNotFound(guid.to_string()));
        }

        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT guid FROM comments WHERE source_guid = ?1 AND comment = ?2",
                params![guid, text],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Ok(());
        }

        self.conn.execute(
            "INSERT INTO comments (guid, source_guid, comment) VALUES (?1, ?2, ?3)",
            params![Uuid::new_v4().to_string(), guid, text],
        )?;
        Ok(())
    }

    /// Count all comments
    pub fn count_comments(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM comments", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Translation Operations ==========

    /// Get the translation of a source into one language
    pub fn translation(&self, guid: &str, lang: &str) -> Result<Option<String>> {
        if guid.is_empty() {
            return Err(Error::InvalidArgument("guid"));
        }
        if lang.is_empty() {
            return Err(Error::InvalidArgument("lang"));
        }
        self.conn
            .query_row(
                "SELECT translation FROM translations WHERE source_guid = ?1 AND lang = ?2",
                params![guid, lang],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Store a translation for a source and language
    ///
    /// At most one translation exists per (source, language): adding over a
    /// differing one updates it in place, adding the same text again is a
    /// no-op.
    pub fn add_translation(&self, guid: &str, lang: &str, text: &str) -> Result<()> {
        if guid.is_empty() {
            return Err(Error::InvalidArgument("guid"));
        }
        if lang.is_empty() {
            return Err(Error::InvalidArgument("lang"));
        }
        if text.is_empty() {
            return Err(Error::InvalidArgument("translation"));
        }
        if self.source_for_guid(guid)?.is_none() {
            return Err(Error::SourceNotFound(guid.to_string()));
        }

        match self.translation(guid, lang)? {
            Some(existing) if existing == text => Ok(()),
            Some(_) => self.update_translation(guid, lang, text),
            None => {
                self.conn.execute(
                    "INSERT INTO translations (source_guid, lang, translation) VALUES (?1, ?2, ?3)",
                    params![guid, lang, text],
                )?;
                Ok(())
            }
        }
    }

    /// Overwrite the stored translation for a (source, language) key
    pub fn update_translation(&self, guid: &str, lang: &str, text: &str) -> Result<()> {
        if guid.is_empty() {
            return Err(Error::InvalidArgument("guid"));
        }
        if lang.is_empty() {
            return Err(Error::InvalidArgument("lang"));
        }
        if text.is_empty() {
            return Err(Error::InvalidArgument("translation"));
        }
        self.conn.execute(
            "UPDATE translations SET translation = ?3 WHERE source_guid = ?1 AND lang = ?2",
            params![guid, lang, text],
        )?;
        Ok(())
    }

    /// Count all translations
    pub fn count_translations(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM translations", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Search Operations ==========

    /// Search sources by substring
    ///
    /// Uses SQL LIKE. A term containing `%` is used verbatim as the match
    /// pattern, so callers can do prefix/suffix matches themselves; any
    /// other term is wrapped `%term%`. The pattern always travels as a
    /// bound parameter. Result order is storage-defined.
    pub fn search_sources(&self, term: &str) -> Result<Vec<SourceHit>> {
        if term.is_empty() {
            return Err(Error::InvalidArgument("term"));
        }

        let pattern = if term.contains('%') {
            term.to_string()
        } else {
            format!("%{}%", term)
        };

        let mut stmt = self
            .conn
            .prepare("SELECT guid, source FROM sources WHERE source LIKE ?1")?;

        let hits = stmt
            .query_map([pattern], |row| {
                Ok(SourceHit {
                    guid: row.get(0)?,
                    source: row.get(1)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(hits)
    }

    /// Search sources by substring and attach every translation of each hit
    ///
    /// A matched source with no translations still appears, with an empty
    /// translations list.
    pub fn search_translations(&self, term: &str) -> Result<Vec<TranslationHit>> {
        let sources = self.search_sources(term)?;

        let mut stmt = self.conn.prepare(
            "SELECT lang, translation FROM translations WHERE source_guid = ?1 ORDER BY lang",
        )?;

        let mut hits = Vec::with_capacity(sources.len());
        for hit in sources {
            let translations = stmt
                .query_map([&hit.guid], |row| {
                    Ok(LanguageText {
                        lang: row.get(0)?,
                        text: row.get(1)?,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            hits.push(TranslationHit {
                guid: hit.guid,
                source: hit.source,
                translations,
            });
        }

        Ok(hits)
    }

    // ========== Language Operations ==========

    /// Distinct language codes present across all translations, ascending
    ///
    /// An empty store reports just the base language.
    pub fn existing_language_codes(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT lang FROM translations ORDER BY lang")?;

        let codes: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        if codes.is_empty() {
            return Ok(vec![BASE_LANG.to_string()]);
        }
        Ok(codes)
    }

    /// The fixed supported-language table
    ///
    /// Informational only; `add_translation` does not validate codes
    /// against it.
    pub fn supported_languages(&self) -> &'static [Language] {
        language::SUPPORTED_LANGUAGES
    }

    // ========== Statistics ==========

    /// Get store statistics
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            sources: self.count_sources()?,
            comments: self.count_comments()?,
            translations: self.count_translations()?,
        })
    }
}

/// One source matched by a search
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceHit {
    pub guid: String,
    pub source: String,
}

/// A translation of a matched source into one language
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LanguageText {
    pub lang: String,
    pub text: String,
}

/// One source matched by a translation search, with all its translations
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TranslationHit {
    pub guid: String,
    pub source: String,
    pub translations: Vec<LanguageText>,
}

/// Store statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub sources: usize,
    pub comments: usize,
    pub translations: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        writeln!(f, "  Sources: {}", self.sources)?;
        writeln!(f, "  Comments: {}", self.comments)?;
        writeln!(f, "  Translations: {}", self.translations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comments(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_source_assigns_identity_once() {
        let tm = TranslationMemory::open_in_memory().unwrap();

        let first = tm.add_source("Hello World", &comments(&["greeting"])).unwrap();
        let second = tm.add_source("Hello World", &comments(&["shown on launch"])).unwrap();
        assert_eq!(first, second);

        let attached = tm.comments_for_source_guid(&first).unwrap();
        assert_eq!(attached, vec!["greeting", "shown on launch"]);
    }

    #[test]
    fn test_source_lookup_round_trip() {
        let tm = TranslationMemory::open_in_memory().unwrap();

        let guid = tm.add_source("Goodbye", &[]).unwrap();
        assert_eq!(tm.guid_for_source("Goodbye").unwrap(), Some(guid.clone()));
        assert_eq!(tm.source_for_guid(&guid).unwrap(), Some("Goodbye".to_string()));

        assert_eq!(tm.guid_for_source("Never added").unwrap(), None);
        assert_eq!(tm.source_for_guid("no-such-guid").unwrap(), None);
    }

    #[test]
    fn test_add_comment_dedups_exact_text() {
        let tm = TranslationMemory::open_in_memory().unwrap();
        let guid = tm.add_source("Save", &[]).unwrap();

        tm.add_comment(&guid, "button label").unwrap();
        tm.add_comment(&guid, "button label").unwrap();
        tm.add_comment(&guid, "Button label").unwrap(); // case-sensitive, distinct

        let attached = tm.comments_for_source_guid(&guid).unwrap();
        assert_eq!(attached, vec!["button label", "Button label"]);
    }

    #[test]
    fn test_add_comment_unknown_source_fails() {
        let tm = TranslationMemory::open_in_memory().unwrap();
        let err = tm.add_comment("no-such-guid", "orphan").unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(_)));
    }

    #[test]
    fn test_comments_for_source_distinguishes_unknown_from_empty() {
        let tm = TranslationMemory::open_in_memory().unwrap();
        tm.add_source("Known", &[]).unwrap();

        // Known source, zero comments
        assert_eq!(tm.comments_for_source("Known").unwrap(), Some(Vec::<String>::new()));
        // Unknown text
        assert_eq!(tm.comments_for_source("Unknown").unwrap(), None);
        // Unknown guid still yields an empty list, not an error
        assert_eq!(tm.comments_for_source_guid("no-such-guid").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_translation_round_trip_and_overwrite() {
        let tm = TranslationMemory::open_in_memory().unwrap();
        let guid = tm.add_source("Hello World", &[]).unwrap();

        tm.add_translation(&guid, "es", "Hola Mundo").unwrap();
        assert_eq!(tm.translation(&guid, "es").unwrap(), Some("Hola Mundo".to_string()));

        // Same text again is a no-op
        tm.add_translation(&guid, "es", "Hola Mundo").unwrap();
        assert_eq!(tm.count_translations().unwrap(), 1);

        // Differing text updates in place
        tm.add_translation(&guid, "es", "Hola, Mundo").unwrap();
        assert_eq!(tm.translation(&guid, "es").unwrap(), Some("Hola, Mundo".to_string()));
        assert_eq!(tm.count_translations().unwrap(), 1);
    }

    #[test]
    fn test_add_translation_unknown_source_fails() {
        let tm = TranslationMemory::open_in_memory().unwrap();
        let err = tm.add_translation("no-such-guid", "es", "Hola").unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(_)));
    }

    #[test]
    fn test_update_translation_missing_row_is_quiet() {
        let tm = TranslationMemory::open_in_memory().unwrap();
        let guid = tm.add_source("Hello", &[]).unwrap();

        tm.update_translation(&guid, "fr", "Bonjour").unwrap();
        assert_eq!(tm.translation(&guid, "fr").unwrap(), None);
    }

    #[test]
    fn test_empty_arguments_rejected_before_mutation() {
        let tm = TranslationMemory::open_in_memory().unwrap();
        let guid = tm.add_source("Hello", &[]).unwrap();

        assert!(matches!(tm.add_source("", &[]), Err(Error::InvalidArgument(_))));
        assert!(matches!(tm.add_comment(&guid, ""), Err(Error::InvalidArgument(_))));
        assert!(matches!(tm.add_translation(&guid, "", "Hola"), Err(Error::InvalidArgument(_))));
        assert!(matches!(tm.translation("", "es"), Err(Error::InvalidArgument(_))));
        assert!(matches!(tm.search_sources(""), Err(Error::InvalidArgument(_))));
        assert_eq!(tm.stats().unwrap().sources, 1);
    }

    #[test]
    fn test_search_sources_substring() {
        let tm = TranslationMemory::open_in_memory().unwrap();
        tm.add_source("Hello World", &[]).unwrap();
        tm.add_source("Goodbye", &[]).unwrap();

        let hits = tm.search_sources("Hello").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source, "Hello World");
    }

    #[test]
    fn test_search_sources_explicit_wildcard_passthrough() {
        let tm = TranslationMemory::open_in_memory().unwrap();
        tm.add_source("Hello World", &[]).unwrap();
        tm.add_source("World Peace", &[]).unwrap();

        // Suffix-only match: no implicit wrapping once the caller brings %
        let hits = tm.search_sources("%World").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source, "Hello World");

        // Match-all pattern
        let all = tm.search_sources("%").unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_search_translations_attaches_languages() {
        let tm = TranslationMemory::open_in_memory().unwrap();
        let hello = tm.add_source("Hello World", &[]).unwrap();
        tm.add_source("Untranslated too", &[]).unwrap();
        tm.add_translation(&hello, "es", "Hola Mundo").unwrap();

        let hits = tm.search_translations("Hello").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source, "Hello World");
        assert_eq!(
            hits[0].translations,
            vec![LanguageText { lang: "es".to_string(), text: "Hola Mundo".to_string() }]
        );

        // Zero-translation sources still appear in the result set
        let hits = tm.search_translations("Untranslated").unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].translations.is_empty());
    }

    #[test]
    fn test_existing_language_codes() {
        let tm = TranslationMemory::open_in_memory().unwrap();
        assert_eq!(tm.existing_language_codes().unwrap(), vec![BASE_LANG.to_string()]);

        let guid = tm.add_source("Hello", &[]).unwrap();
        tm.add_translation(&guid, "fr", "Bonjour").unwrap();
        assert_eq!(tm.existing_language_codes().unwrap(), vec!["fr".to_string()]);

        tm.add_translation(&guid, "de", "Hallo").unwrap();
        assert_eq!(
            tm.existing_language_codes().unwrap(),
            vec!["de".to_string(), "fr".to_string()]
        );
    }

    #[test]
    fn test_reopen_is_idempotent_and_durable() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("memory.db");

        let guid = {
            let tm = TranslationMemory::open(&db).unwrap();
            let guid = tm.add_source("Hello World", &comments(&["greeting"])).unwrap();
            tm.add_translation(&guid, "es", "Hola Mundo").unwrap();
            tm.close().unwrap();
            guid
        };

        let tm = TranslationMemory::open(&db).unwrap();
        assert_eq!(tm.guid_for_source("Hello World").unwrap(), Some(guid.clone()));
        assert_eq!(tm.translation(&guid, "es").unwrap(), Some("Hola Mundo".to_string()));
        assert_eq!(tm.comments_for_source_guid(&guid).unwrap(), vec!["greeting"]);
    }
}
