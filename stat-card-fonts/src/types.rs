//! Decoded font record and bundle types.

use std::sync::Arc;
use swash::FontRef;

/// Weight assigned to every decoded record.
pub const NORMAL_WEIGHT: u16 = 400;

/// Language code sentinel for fonts that apply regardless of language.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Font style of a decoded record. Bundles carry no style information, so
/// every record is upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
}

impl FontStyle {
    /// CSS keyword for this style.
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
        }
    }
}

/// One render-ready font asset decoded from a bundle.
///
/// The font program bytes are shared, so cloning a record (or a whole
/// [`FontBundle`] out of the cache) never copies font data.
#[derive(Clone, PartialEq, Eq)]
pub struct FontRecord {
    /// Registration name, unique per language code and text segment
    pub name: String,
    /// Language the font covers, `None` when it applies to any language
    pub language_code: Option<String>,
    /// Raw font program (TTF/OTF)
    pub data: Arc<[u8]>,
    /// Numeric weight, always [`NORMAL_WEIGHT`]
    pub weight: u16,
    /// Font style, always [`FontStyle::Normal`]
    pub style: FontStyle,
}

impl std::fmt::Debug for FontRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRecord")
            .field("name", &self.name)
            .field("language_code", &self.language_code)
            .field("data_len", &self.data.len())
            .field("weight", &self.weight)
            .field("style", &self.style)
            .finish()
    }
}

impl FontRecord {
    /// Build a record for font data tagged with `language_code`.
    ///
    /// The `"unknown"` sentinel leaves [`FontRecord::language_code`] unset.
    /// `text_segment` only feeds the synthesized name.
    pub fn new(language_code: &str, data: impl Into<Arc<[u8]>>, text_segment: &str) -> Self {
        Self {
            name: Self::record_name(language_code, text_segment),
            language_code: (language_code != UNKNOWN_LANGUAGE).then(|| language_code.to_string()),
            data: data.into(),
            weight: NORMAL_WEIGHT,
            style: FontStyle::Normal,
        }
    }

    /// Registration name for a font covering `text_segment` in `language_code`.
    ///
    /// Bundles for different segments are cached side by side and handed to
    /// the same render engine, so the segment is part of the name.
    pub fn record_name(language_code: &str, text_segment: &str) -> String {
        format!("stat_card_{language_code}_fallback_{text_segment}")
    }

    /// Whether this font should be offered for text in `language_code`.
    pub fn applies_to(&self, language_code: &str) -> bool {
        self.language_code
            .as_deref()
            .is_none_or(|code| code == language_code)
    }

    /// Parse the font program for glyph lookups.
    ///
    /// Returns `None` if the data is not a loadable TTF/OTF face.
    pub fn face(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, 0)
    }
}

/// Ordered sequence of records decoded from one font endpoint response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontBundle {
    records: Vec<FontRecord>,
}

impl FontBundle {
    pub fn new(records: Vec<FontRecord>) -> Self {
        Self { records }
    }

    /// Bundle with no records, meaning "no additional coverage".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[FontRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FontRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<FontRecord> {
        self.records
    }

    /// Total number of font program bytes across all records.
    pub fn data_len(&self) -> usize {
        self.records.iter().map(|r| r.data.len()).sum()
    }
}

impl<'a> IntoIterator for &'a FontBundle {
    type Item = &'a FontRecord;
    type IntoIter = std::slice::Iter<'a, FontRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for FontBundle {
    type Item = FontRecord;
    type IntoIter = std::vec::IntoIter<FontRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<FontRecord> for FontBundle {
    fn from_iter<I: IntoIterator<Item = FontRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sentinel_clears_language() {
        let record = FontRecord::new("unknown", vec![0xCA, 0xFE], "42");
        assert_eq!(record.language_code, None);
        assert_eq!(record.name, "stat_card_unknown_fallback_42");
        assert!(record.applies_to("ja-JP"));
        assert!(record.applies_to("zh-CN"));
    }

    #[test]
    fn test_language_record_applies_only_to_its_code() {
        let record = FontRecord::new("ja-JP", vec![1, 2, 3], "こんにちは");
        assert_eq!(record.language_code.as_deref(), Some("ja-JP"));
        assert_eq!(record.weight, NORMAL_WEIGHT);
        assert_eq!(record.style, FontStyle::Normal);
        assert_eq!(record.style.as_str(), "normal");
        assert!(record.applies_to("ja-JP"));
        assert!(!record.applies_to("ko-KR"));
    }

    #[test]
    fn test_names_differ_per_segment() {
        let a = FontRecord::new("zh-CN", vec![0], "你");
        let b = FontRecord::new("zh-CN", vec![0], "好");
        assert_ne!(a.name, b.name);
    }

    #[test]
    fn test_debug_hides_font_bytes() {
        let record = FontRecord::new("en", vec![0u8; 64], "x");
        let debug = format!("{record:?}");
        assert!(debug.contains("data_len: 64"));
        assert!(!debug.contains("[0, 0"));
    }

    #[test]
    fn test_face_rejects_garbage() {
        let record = FontRecord::new("en", vec![0xDE, 0xAD, 0xBE, 0xEF], "x");
        assert!(record.face().is_none());
    }

    #[test]
    fn test_bundle_data_len() {
        let bundle: FontBundle = [
            FontRecord::new("en", vec![0; 4], "a"),
            FontRecord::new("unknown", vec![0; 2], "a"),
        ]
        .into_iter()
        .collect();
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.data_len(), 6);
        assert!(FontBundle::empty().is_empty());
    }
}
