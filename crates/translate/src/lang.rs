//! Supported languages.
//!
//! The set is closed: site content is authored in English and offered in
//! four target languages. Parsing a code outside the set fails before any
//! provider is consulted.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported page language, identified by its two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English — the language the page is authored in.
    En,
    /// Spanish.
    Es,
    /// German.
    De,
    /// Portuguese.
    Pt,
    /// Italian.
    It,
}

impl Lang {
    /// The language pages are authored in. Translating into it is a no-op.
    pub const SOURCE: Lang = Lang::En;

    /// Every supported language, in display order.
    pub const ALL: [Lang; 5] = [Lang::En, Lang::Es, Lang::De, Lang::Pt, Lang::It];

    /// The two-letter language code.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Es => "es",
            Lang::De => "de",
            Lang::Pt => "pt",
            Lang::It => "it",
        }
    }

    /// Human-readable language name.
    pub fn name(&self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Es => "Spanish",
            Lang::De => "German",
            Lang::Pt => "Portuguese",
            Lang::It => "Italian",
        }
    }
}

impl FromStr for Lang {
    type Err = Error;

    /// Parse a two-letter code. Region suffixes (`es-ES`) are accepted and
    /// reduced to their primary subtag, matching how browser locales are
    /// matched against the supported set.
    fn from_str(s: &str) -> Result<Self, Error> {
        let code = s.split(['-', '_']).next().unwrap_or(s);
        match code.to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "es" => Ok(Lang::Es),
            "de" => Ok(Lang::De),
            "pt" => Ok(Lang::Pt),
            "it" => Ok(Lang::It),
            _ => Err(Error::UnsupportedLanguage(s.to_owned())),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
