//! Database schema definitions

/// SQL to create the sources table
///
/// Source text is unique: identity is assigned exactly once per distinct
/// text, at first insert.
pub const CREATE_SOURCES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sources (
    guid TEXT PRIMARY KEY,
    source TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the comments table
pub const CREATE_COMMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    guid TEXT PRIMARY KEY,
    source_guid TEXT NOT NULL,
    comment TEXT NOT NULL
)
"#;

/// SQL to create the translations table
///
/// At most one translation per (source, language); re-adds update in place.
pub const CREATE_TRANSLATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS translations (
    source_guid TEXT NOT NULL,
    lang TEXT NOT NULL,
    translation TEXT NOT NULL,
    PRIMARY KEY (source_guid, lang)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_comments_source ON comments(source_guid)",
    "CREATE INDEX IF NOT EXISTS idx_translations_source ON translations(source_guid)",
];

/// All schema creation statements
///
/// Every statement is create-if-absent, so running the full set on each
/// open is safe.
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_SOURCES_TABLE,
        CREATE_COMMENTS_TABLE,
        CREATE_TRANSLATIONS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
