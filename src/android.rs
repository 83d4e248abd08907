//! Android `strings.xml` import and build
//!
//! Import reads `<string name="key">text</string>` entries into the store,
//! keeping each resource name as an `android:<key>` comment so translators
//! see where the string lives and builds can map texts back to keys.

use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::store::TranslationMemory;
use crate::{Error, Result};

/// Comment prefix that carries the Android resource name of a source
pub const KEY_PREFIX: &str = "android:";

/// Outcome of a strings.xml import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    /// Entries read from the file
    pub total: usize,
    /// Entries that created a new source (the rest already existed)
    pub created: usize,
}

/// Outcome of a strings.xml build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    /// Entries written to the file
    pub written: usize,
    /// Keyed sources with no translation for the requested language
    pub missing: usize,
}

/// Import an Android `strings.xml` into the store
///
/// Entries marked `translatable="false"` are skipped, as are empty or
/// self-closing elements.
pub fn import_strings(tm: &TranslationMemory, path: &Path) -> Result<ImportStats> {
    let content = std::fs::read_to_string(path)?;
    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);

    let mut stats = ImportStats { total: 0, created: 0 };

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"string" => {
                let Some(entry) = read_entry(&mut reader, &e)? else {
                    continue;
                };
                stats.total += 1;
                let is_new = tm.guid_for_source(&entry.text)?.is_none();
                tm.add_source(&entry.text, &[format!("{}{}", KEY_PREFIX, entry.key)])?;
                if is_new {
                    stats.created += 1;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    tracing::info!(
        "Imported {:?}: {} entries, {} new sources",
        path,
        stats.total,
        stats.created
    );
    Ok(stats)
}

struct StringEntry {
    key: String,
    text: String,
}

/// Read one `<string>` element body; `None` when it should be skipped
fn read_entry(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<Option<StringEntry>> {
    let mut key = None;
    let mut translatable = true;
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        match attr.key.as_ref() {
            b"name" => {
                let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
                key = Some(value.into_owned());
            }
            b"translatable" => {
                let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
                translatable = value.as_ref() != "false";
            }
            _ => {}
        }
    }

    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => {
                text.push_str(&t.unescape().map_err(quick_xml::Error::from)?);
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                text.push_str(std::str::from_utf8(&raw).map_err(|e| {
                    Error::MalformedStrings(format!("non-UTF8 CDATA: {}", e))
                })?);
            }
            Event::End(e) if e.name().as_ref() == b"string" => break,
            Event::Eof => {
                return Err(Error::MalformedStrings(
                    "unterminated <string> element".to_string(),
                ));
            }
            // Inline markup (<b>, <xliff:g>, ...) is dropped, text kept
            _ => {}
        }
    }

    let Some(key) = key else {
        tracing::warn!("Skipping <string> without a name attribute");
        return Ok(None);
    };
    if !translatable {
        tracing::debug!("Skipping non-translatable resource {}", key);
        return Ok(None);
    }
    if text.is_empty() {
        tracing::warn!("Skipping empty resource {}", key);
        return Ok(None);
    }
    Ok(Some(StringEntry { key, text }))
}

/// Build a per-language `strings.xml` from the store
///
/// Every source carrying an `android:<key>` comment and a translation for
/// `lang` becomes one `<string>` element, sorted by resource name. Keyed
/// sources without a translation are counted, not fatal.
pub fn build_strings(tm: &TranslationMemory, lang: &str, out: &Path) -> Result<BuildStats> {
    if lang.is_empty() {
        return Err(Error::InvalidArgument("lang"));
    }

    let mut entries = Vec::new();
    let mut missing = 0usize;
    for hit in tm.search_sources("%")? {
        let Some(key) = resource_key(tm, &hit.guid)? else {
            continue;
        };
        match tm.translation(&hit.guid, lang)? {
            Some(text) => entries.push((key, text)),
            None => {
                tracing::debug!("No {} translation for {} ({})", lang, key, hit.source);
                missing += 1;
            }
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let file = std::fs::File::create(out)?;
    let mut writer = Writer::new_with_indent(std::io::BufWriter::new(file), b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("resources")))?;
    for (key, text) in &entries {
        let mut el = BytesStart::new("string");
        el.push_attribute(("name", key.as_str()));
        writer.write_event(Event::Start(el))?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
        writer.write_event(Event::End(BytesEnd::new("string")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("resources")))?;
    writer.into_inner().flush()?;

    let stats = BuildStats { written: entries.len(), missing };
    tracing::info!(
        "Built {:?} for {}: {} entries, {} missing",
        out,
        lang,
        stats.written,
        stats.missing
    );
    Ok(stats)
}

/// The Android resource name of a source, if one was recorded at import
fn resource_key(tm: &TranslationMemory, guid: &str) -> Result<Option<String>> {
    for comment in tm.comments_for_source_guid(guid)? {
        if let Some(key) = comment.strip_prefix(KEY_PREFIX) {
            return Ok(Some(key.to_string()));
        }
    }
    Ok(None)
}
