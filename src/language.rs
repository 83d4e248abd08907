//! Supported-language table
//!
//! The table is informational: translation language codes are drawn from
//! it but never validated against it.

/// Language code sources are written in
pub const BASE_LANG: &str = "en";

/// One supported target language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

/// Fixed table of languages the tooling knows display names for
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { name: "English", code: "en" },
    Language { name: "Spanish", code: "es" },
    Language { name: "French", code: "fr" },
    Language { name: "German", code: "de" },
    Language { name: "Italian", code: "it" },
    Language { name: "Portuguese", code: "pt" },
    Language { name: "Dutch", code: "nl" },
    Language { name: "Swedish", code: "sv" },
    Language { name: "Danish", code: "da" },
    Language { name: "Norwegian", code: "nb" },
    Language { name: "Finnish", code: "fi" },
    Language { name: "Polish", code: "pl" },
    Language { name: "Russian", code: "ru" },
    Language { name: "Turkish", code: "tr" },
    Language { name: "Japanese", code: "ja" },
    Language { name: "Korean", code: "ko" },
    Language { name: "Simplified Chinese", code: "zh-CN" },
    Language { name: "Traditional Chinese", code: "zh-TW" },
];

/// Look up a supported language by its code
pub fn language_for_code(code: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES.iter().find(|l| l.code == code)
}

/// Display name for a code, falling back to the code itself
pub fn display_name(code: &str) -> &str {
    language_for_code(code).map(|l| l.name).unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_language_is_supported() {
        assert!(language_for_code(BASE_LANG).is_some());
    }

    #[test]
    fn test_display_name_falls_back_to_code() {
        assert_eq!(display_name("es"), "Spanish");
        assert_eq!(display_name("tlh"), "tlh");
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in SUPPORTED_LANGUAGES.iter().enumerate() {
            for b in &SUPPORTED_LANGUAGES[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
    }
}
