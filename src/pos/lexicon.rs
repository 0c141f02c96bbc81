//! Lexicon-and-rules part-of-speech tagger.

use std::collections::HashMap;
use std::path::Path;

use super::{PosTagger, TagContext};
use crate::error::{Error, Result};
use crate::poem::Token;
use crate::types::PartOfSpeech;

/// Lexicon shipped with the crate.
const BUILTIN_LEXICON: &str = include_str!("../../data/pos-lexicon.tsv");

/// Words after which an ambiguous entry reads as a verb.
const VERB_TRIGGERS: &[&str] = &[
    "i", "you", "we", "they", "he", "she", "thou", "to", "can", "could", "will", "would", "shall",
    "should", "may", "might", "must", "shalt", "wilt", "do", "does", "did",
];

/// Suffix rules for words missing from the lexicon, longest suffixes first.
const SUFFIX_RULES: &[(&str, PartOfSpeech)] = &[
    ("ness", PartOfSpeech::Noun),
    ("tion", PartOfSpeech::Noun),
    ("sion", PartOfSpeech::Noun),
    ("ment", PartOfSpeech::Noun),
    ("ship", PartOfSpeech::Noun),
    ("hood", PartOfSpeech::Noun),
    ("less", PartOfSpeech::Adjective),
    ("able", PartOfSpeech::Adjective),
    ("ible", PartOfSpeech::Adjective),
    ("ous", PartOfSpeech::Adjective),
    ("ful", PartOfSpeech::Adjective),
    ("ive", PartOfSpeech::Adjective),
    ("ish", PartOfSpeech::Adjective),
    ("ity", PartOfSpeech::Noun),
    ("ize", PartOfSpeech::Verb),
    ("ise", PartOfSpeech::Verb),
    ("ify", PartOfSpeech::Verb),
    ("ing", PartOfSpeech::Verb),
    ("ly", PartOfSpeech::Adverb),
    ("ed", PartOfSpeech::Verb),
    ("al", PartOfSpeech::Adjective),
    ("ic", PartOfSpeech::Adjective),
];

/// Tagger backed by a word → readings table plus suffix and capitalization rules.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    entries: HashMap<String, Vec<PartOfSpeech>>,
}

impl LexiconTagger {
    /// Parse `word<TAB>TAG[|TAG...]` lines. Unknown tag codes are skipped.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((word, codes)) = line.split_once(char::is_whitespace) else {
                continue;
            };
            let tags: Vec<PartOfSpeech> = codes
                .split('|')
                .filter_map(|code| {
                    let tag = PartOfSpeech::from_code(code);
                    if tag.is_none() {
                        tracing::debug!("Skipping unknown tag {code:?} for {word:?}");
                    }
                    tag
                })
                .collect();
            if !tags.is_empty() {
                entries.insert(word.to_lowercase(), tags);
            }
        }
        Self { entries }
    }

    /// The lexicon embedded in the crate.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_LEXICON)
    }

    /// Load extra entries from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let tagger = Self::parse(&text);
        if tagger.is_empty() {
            return Err(Error::parse("no tagger entries found", path.to_path_buf()));
        }
        tracing::info!("Loaded {} tagger entries from {}", tagger.len(), path.display());
        Ok(tagger)
    }

    /// Merge another lexicon over this one; its entries replace ours.
    #[must_use]
    pub fn merged_with(mut self, other: Self) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Number of words in the lexicon.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All lexicon words.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn readings(&self, word: &str) -> Option<&[PartOfSpeech]> {
        if let Some(tags) = self.entries.get(word) {
            return Some(tags);
        }
        let stem = word.strip_suffix("'s").or_else(|| word.strip_suffix('\''))?;
        self.entries.get(stem).map(Vec::as_slice)
    }
}

/// Pick a reading of an ambiguous word from the word before it.
fn resolve(readings: &[PartOfSpeech], context: &TagContext<'_>) -> PartOfSpeech {
    let prefer = |tag: PartOfSpeech| readings.contains(&tag).then_some(tag);

    let after_modifier = matches!(
        context.previous_tag,
        Some(PartOfSpeech::Determiner | PartOfSpeech::Adjective)
    );
    let after_subject = context
        .previous_word
        .is_some_and(|w| VERB_TRIGGERS.contains(&w));

    let preferred = if after_modifier {
        readings
            .iter()
            .copied()
            .find(|&t| matches!(t, PartOfSpeech::Noun | PartOfSpeech::Adjective))
    } else if after_subject {
        prefer(PartOfSpeech::Verb)
    } else {
        None
    };
    preferred.unwrap_or(readings[0])
}

fn by_suffix(word: &str) -> Option<PartOfSpeech> {
    SUFFIX_RULES
        .iter()
        .find(|(suffix, _)| word.len() > suffix.len() + 2 && word.ends_with(suffix))
        .map(|&(_, tag)| tag)
}

impl PosTagger for LexiconTagger {
    fn tag(&self, token: &Token, context: &TagContext<'_>) -> Result<PartOfSpeech> {
        let word = token.normalized.as_str();
        if word.is_empty() {
            return Ok(PartOfSpeech::Punctuation);
        }
        if !token.has_alpha() {
            return Ok(PartOfSpeech::Numeral);
        }

        if let Some(readings) = self.readings(word).filter(|r| !r.is_empty()) {
            return Ok(resolve(readings, context));
        }

        let capitalized = token
            .surface
            .chars()
            .find(|c| c.is_alphabetic())
            .is_some_and(char::is_uppercase);
        if capitalized && !context.line_start {
            return Ok(PartOfSpeech::ProperNoun);
        }

        if let Some(tag) = by_suffix(word) {
            return Ok(tag);
        }
        // plural of a known noun
        if let Some(stem) = word.strip_suffix("es").or_else(|| word.strip_suffix('s')) {
            if self.readings(stem).is_some_and(|r| r.contains(&PartOfSpeech::Noun)) {
                return Ok(PartOfSpeech::Noun);
            }
        }
        Ok(PartOfSpeech::Noun)
    }

    fn is_available(&self) -> bool {
        !self.is_empty()
    }

    fn name(&self) -> &'static str {
        "LexiconTagger"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn tag_with(word: &str, previous_word: Option<&str>, previous_tag: Option<PartOfSpeech>) -> PartOfSpeech {
        let tagger = LexiconTagger::builtin();
        let context = TagContext {
            previous_tag,
            previous_word,
            line_start: previous_word.is_none(),
        };
        tagger.tag(&Token::new(word), &context).unwrap()
    }

    #[test]
    fn test_closed_class_words() {
        assert_eq!(tag_with("the", None, None), PartOfSpeech::Determiner);
        assert_eq!(tag_with("is", Some("life"), Some(PartOfSpeech::Noun)), PartOfSpeech::Auxiliary);
        assert_eq!(tag_with("of", Some("box"), Some(PartOfSpeech::Noun)), PartOfSpeech::Preposition);
        assert_eq!(tag_with("—", Some("box"), Some(PartOfSpeech::Noun)), PartOfSpeech::Punctuation);
        assert_eq!(tag_with("1848", None, None), PartOfSpeech::Numeral);
    }

    #[test]
    fn test_ambiguous_words_use_previous_word() {
        assert_eq!(
            tag_with("like", Some("is"), Some(PartOfSpeech::Auxiliary)),
            PartOfSpeech::Preposition
        );
        assert_eq!(tag_with("like", Some("i"), Some(PartOfSpeech::Pronoun)), PartOfSpeech::Verb);
        assert_eq!(tag_with("love", Some("to"), Some(PartOfSpeech::Preposition)), PartOfSpeech::Verb);
        assert_eq!(tag_with("love", Some("my"), Some(PartOfSpeech::Determiner)), PartOfSpeech::Noun);
        assert_eq!(tag_with("light", Some("the"), Some(PartOfSpeech::Determiner)), PartOfSpeech::Noun);
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(tag_with("softly", Some("sang"), None), PartOfSpeech::Adverb);
        assert_eq!(tag_with("joyful", Some("and"), None), PartOfSpeech::Adjective);
        assert_eq!(tag_with("picked", Some("piper"), None), PartOfSpeech::Verb);
        assert_eq!(tag_with("darkness", Some("the"), None), PartOfSpeech::Noun);
        assert_eq!(tag_with("wandering", Some("i"), None), PartOfSpeech::Verb);
    }

    #[test]
    fn test_capitalization_and_plurals() {
        assert_eq!(tag_with("Piper", Some("peter"), Some(PartOfSpeech::Noun)), PartOfSpeech::ProperNoun);
        // line-initial capitals are not names
        assert_eq!(tag_with("Lanterns", None, None), PartOfSpeech::Noun);
        assert_eq!(tag_with("hearts", Some("our"), None), PartOfSpeech::Noun);
        assert_eq!(tag_with("heart's", Some("my"), None), PartOfSpeech::Noun);
    }

    #[test]
    fn test_merge_overrides() {
        let extra = LexiconTagger::parse("rose\tVERB\nzephyr\tNOUN\nbogus\tXYZ\n");
        assert_eq!(extra.len(), 2);
        let tagger = LexiconTagger::builtin().merged_with(extra);
        let context = TagContext { previous_tag: None, previous_word: Some("a"), line_start: false };
        assert_eq!(tagger.tag(&Token::new("rose"), &context).unwrap(), PartOfSpeech::Verb);
    }

    #[test]
    fn test_load_empty_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(LexiconTagger::load(file.path()).is_err());
    }
}
