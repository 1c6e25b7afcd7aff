//! Language metadata and the policy rules built on it.
//!
//! # Architecture
//!
//! - `table`: read-only mapping from service language codes to display names,
//!   including the `UNKNOWN` sentinel and key-phrase support flags
//! - `policy`: named correction and substitution rules applied to service answers
//!
//! # Example
//!
//! ```rust,ignore
//! use comprehend_analyzer::language::{KeyPhraseLanguagePolicy, LanguageTable};
//!
//! assert_eq!(LanguageTable::get().display_name("sw"), "SWAHILI");
//! assert_eq!(KeyPhraseLanguagePolicy.resolve("sw"), "en");
//! ```

mod policy;
mod table;

pub use policy::{KeyPhraseLanguagePolicy, TagalogSwahiliCorrection, DEFAULT_KEY_PHRASE_LANGUAGE};
pub use table::{LanguageEntry, LanguageTable, UNKNOWN, UNKNOWN_CODE};
