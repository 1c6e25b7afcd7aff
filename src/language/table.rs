//! Language table: Single source of truth for language codes and display names.
//!
//! The table is initialized once on first access via `OnceLock` and is read-only
//! thereafter, so it can be shared freely across requests.

use std::sync::OnceLock;

/// Display name returned for codes that are not in the table
pub const UNKNOWN: &str = "UNKNOWN";

/// Code of the `UNKNOWN` sentinel entry
pub const UNKNOWN_CODE: &str = "unknown";

/// A single entry of the language table.
#[derive(Debug, Clone)]
pub struct LanguageEntry {
    /// Language code as reported by the NLP service (e.g., "en", "zh-TW")
    pub code: &'static str,

    /// Upper-case display name (e.g., "ENGLISH", "CHINESE_TAIWAN")
    pub name: &'static str,

    /// Whether the service can extract key phrases for this language
    pub key_phrases: bool,
}

/// Global language table singleton.
pub struct LanguageTable {
    entries: Vec<LanguageEntry>,
}

static TABLE: OnceLock<LanguageTable> = OnceLock::new();

impl LanguageTable {
    /// Get the global language table instance.
    pub fn get() -> &'static LanguageTable {
        TABLE.get_or_init(|| LanguageTable {
            entries: default_entries(),
        })
    }

    /// Get an entry by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageEntry)` if the code is in the table
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    /// Map a code to its display name, falling back to [`UNKNOWN`].
    ///
    /// Total: never fails, whatever the input.
    pub fn display_name(&self, code: &str) -> &'static str {
        self.get_by_code(code).map(|entry| entry.name).unwrap_or(UNKNOWN)
    }

    /// Check whether key-phrase extraction is supported for a code.
    pub fn supports_key_phrases(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|entry| entry.key_phrases)
            .unwrap_or(false)
    }

    /// Codes for which key-phrase extraction is supported, in table order.
    pub fn key_phrase_codes(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|entry| entry.key_phrases)
            .map(|entry| entry.code)
            .collect()
    }

    /// All entries, including the `UNKNOWN` sentinel.
    pub fn list_all(&self) -> Vec<&LanguageEntry> {
        self.entries.iter().collect()
    }
}

fn entry(code: &'static str, name: &'static str, key_phrases: bool) -> LanguageEntry {
    LanguageEntry {
        code,
        name,
        key_phrases,
    }
}

/// Languages recognised by the analyzer.
///
/// Swahili and Tagalog can be detected but the key-phrase operation does not
/// accept them.
fn default_entries() -> Vec<LanguageEntry> {
    vec![
        entry("en", "ENGLISH", true),
        entry("es", "SPANISH", true),
        entry("sw", "SWAHILI", false),
        entry("fr", "FRENCH", true),
        entry("de", "GERMAN", true),
        entry("it", "ITALIAN", true),
        entry("pt", "PORTUGUESE", true),
        entry("ja", "JAPANESE", true),
        entry("ko", "KOREAN", true),
        entry("hi", "HINDI", true),
        entry("ar", "ARABIC", true),
        entry("zh", "CHINESE", true),
        entry("zh-TW", "CHINESE_TAIWAN", true),
        entry("tl", "TAGALOG", false),
        entry(UNKNOWN_CODE, UNKNOWN, false),
    ]
}
