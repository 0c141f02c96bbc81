//! CMU pronouncing dictionary source.

use std::collections::HashMap;
use std::path::Path;

use super::{PhoneticKey, PronunciationSource};
use crate::error::{Error, Result};

/// Compact dictionary shipped with the crate.
const BUILTIN_DICT: &str = include_str!("../../data/cmudict-lite.dict");

/// Word → stressed phones, parsed from CMU dictionary text.
#[derive(Debug, Clone, Default)]
pub struct CmuDict {
    entries: HashMap<String, Vec<String>>,
}

impl CmuDict {
    /// Parse dictionary text in either the classic (`WORD  W ER1 D`) or the
    /// lowercase (`word w er1 d`) layout.
    ///
    /// Comment lines (`;;;`) and trailing `#` comments are skipped. Only the
    /// first pronunciation of a word is kept; `WORD(1)` variants are ignored.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();

        for line in text.lines() {
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            if word.ends_with(')') {
                continue;
            }

            let phones: Vec<String> = parts.map(str::to_ascii_uppercase).collect();
            if phones.is_empty() {
                continue;
            }
            entries.entry(word.to_lowercase()).or_insert(phones);
        }

        Self { entries }
    }

    /// The dictionary embedded in the crate.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_DICT)
    }

    /// Load a dictionary file, refusing files without any entries.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let dict = Self::parse(&text);
        if dict.is_empty() {
            return Err(Error::parse("no pronunciations found", path.to_path_buf()));
        }
        tracing::info!("Loaded {} pronunciations from {}", dict.len(), path.display());
        Ok(dict)
    }

    /// Number of words in the dictionary.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no words.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full stressed pronunciation of a lowercase word.
    pub fn pronunciation(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// All words, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PronunciationSource for CmuDict {
    fn phonetic_key_of(&self, word: &str) -> Option<PhoneticKey> {
        self.pronunciation(word).and_then(PhoneticKey::from_pronunciation)
    }

    fn is_available(&self) -> bool {
        !self.is_empty()
    }

    fn name(&self) -> &'static str {
        "CmuDict"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_both_layouts() {
        let dict = CmuDict::parse(
            ";;; comment\nNIGHT  N AY1 T\nNIGHT(1)  N AY1 D\nlight l ay1 t # note\n\n",
        );
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.pronunciation("night").unwrap(), ["N", "AY1", "T"]);
        assert_eq!(dict.phonetic_key_of("light").unwrap().to_string(), "AY T");
        assert!(dict.phonetic_key_of("moon").is_none());
    }

    #[test]
    fn test_builtin_has_common_words() {
        let dict = CmuDict::builtin();
        assert!(dict.is_available());
        assert_eq!(dict.phonetic_key_of("mat").unwrap().to_string(), "AE T");
        assert_eq!(dict.phonetic_key_of("fog").unwrap().to_string(), "AA G");
        assert_eq!(dict.phonetic_key_of("love"), dict.phonetic_key_of("above"));
    }

    #[test]
    fn test_load_rejects_empty_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ";;; nothing here").unwrap();
        assert!(CmuDict::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = CmuDict::load(Path::new("/tmp/nonexistent_litloom_dict")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
