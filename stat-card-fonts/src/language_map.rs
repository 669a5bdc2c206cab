//! Language-to-font-family map.
//!
//! Maps the language/script codes reported by the layout engine to the font
//! families the font-serving endpoint knows how to deliver.

use std::collections::HashMap;

/// Delimiter joining several language codes into one composite request.
pub const LANGUAGE_CODE_DELIMITER: char = '|';

/// Built-in font families per language code.
///
/// Codes follow what the layout engine emits: locale-style tags for the
/// scripts it detects by locale, bare script names otherwise, and the
/// `"unknown"` sentinel for text it cannot classify.
pub const BUILTIN_LANGUAGE_FONTS: &[(&str, &[&str])] = &[
    // CJK
    ("ja-JP", &["Noto Sans JP"]),
    ("ko-KR", &["Noto Sans KR"]),
    ("zh-CN", &["Noto Sans SC"]),
    ("zh-TW", &["Noto Sans TC"]),
    ("zh-HK", &["Noto Sans HK"]),
    // South-east Asian, Indic, and Middle-Eastern scripts
    ("th-TH", &["Noto Sans Thai"]),
    ("bn-IN", &["Noto Sans Bengali"]),
    ("ar-AR", &["Noto Sans Arabic"]),
    ("ta-IN", &["Noto Sans Tamil"]),
    ("ml-IN", &["Noto Sans Malayalam"]),
    ("he-IL", &["Noto Sans Hebrew"]),
    ("te-IN", &["Noto Sans Telugu"]),
    ("devanagari", &["Noto Sans Devanagari"]),
    ("kannada", &["Noto Sans Kannada"]),
    // Symbols and pictographs
    ("symbol", &["Noto Sans Symbols", "Noto Sans Symbols 2"]),
    ("math", &["Noto Sans Math"]),
    ("emoji", &["Noto Color Emoji"]),
    // General fallback
    ("unknown", &["Noto Sans"]),
];

/// Static lookup from language code to font family names.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageFontMap {
    entries: HashMap<String, Vec<String>>,
}

impl LanguageFontMap {
    /// Map holding [`BUILTIN_LANGUAGE_FONTS`].
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_LANGUAGE_FONTS.iter().map(|(code, families)| {
            (code.to_string(), families.iter().map(|f| f.to_string()).collect())
        }))
    }

    /// Build a map from `(code, families)` pairs. Later pairs replace earlier ones.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut map = Self::default();
        map.extend(entries);
        map
    }

    /// Add `families` for `code`, replacing any existing entry.
    pub fn with(mut self, code: &str, families: &[&str]) -> Self {
        self.entries.insert(
            code.to_string(),
            families.iter().map(|f| f.to_string()).collect(),
        );
        self
    }

    /// Merge entries over this map; an entry replaces the existing one for its code.
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        for (code, families) in entries {
            log::debug!("Language font entry {} -> {:?}", code, families);
            self.entries.insert(code, families);
        }
    }

    /// Font families for a single language code. Empty if the code is unrecognized.
    pub fn families_for(&self, code: &str) -> &[String] {
        self.entries.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Families for a `|`-delimited list of codes, flattened in code order.
    ///
    /// Unrecognized codes contribute nothing; a family requested by several
    /// codes appears once, at its first position.
    pub fn families_for_codes(&self, codes: &str) -> Vec<&str> {
        let mut families: Vec<&str> = Vec::new();
        for code in split_language_codes(codes) {
            for family in self.families_for(code) {
                if !families.contains(&family.as_str()) {
                    families.push(family.as_str());
                }
            }
        }
        families
    }

    /// Known language codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a composite language key into its codes, skipping empty parts.
pub fn split_language_codes(codes: &str) -> impl Iterator<Item = &str> {
    codes
        .split(LANGUAGE_CODE_DELIMITER)
        .map(str::trim)
        .filter(|code| !code.is_empty())
}
