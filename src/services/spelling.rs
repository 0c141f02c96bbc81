//! Spell checking against a bundled word list and the collaborators' vocabularies.
//!
//! Lists hold base forms. Regular inflections (`-s`, `-ed`, `-ing`, `-ly`,
//! `-er`, `-est` and their `y`/`e`/doubled-consonant variants) are accepted
//! when their base is known.

use std::collections::HashSet;
use std::path::Path;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use rayon::prelude::*;

use crate::constants::spelling::MAX_EDIT_DISTANCE;
use crate::error::{Error, Result};
use crate::phonetics::CmuDict;
use crate::poem::Token;
use crate::pos::LexiconTagger;

/// Common English words shipped with the crate.
const BUILTIN_WORDLIST: &str = include_str!("../../data/wordlist.txt");

/// Suffix and the endings that may replace it to form the base word.
const INFLECTIONS: &[(&str, &[&str])] = &[
    ("'s", &[""]),
    ("'", &[""]),
    ("ies", &["y"]),
    ("es", &[""]),
    ("s", &[""]),
    ("ied", &["y"]),
    ("ed", &["", "e"]),
    ("ing", &["", "e"]),
    ("ily", &["y"]),
    ("ly", &["", "le"]),
    ("ier", &["y"]),
    ("iest", &["y"]),
    ("er", &["", "e"]),
    ("est", &["", "e"]),
];

/// Known-word list with edit-distance suggestions.
#[derive(Debug, Clone, Default)]
pub struct SpellChecker {
    words: Vec<String>,
    known: HashSet<String>,
}

impl SpellChecker {
    /// Build from any word list; words are lowercased and deduplicated.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let known: HashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        let mut words: Vec<String> = known.iter().cloned().collect();
        words.sort_unstable();
        Self { words, known }
    }

    /// Parse a word list: one word per line, `#` comments skipped.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .filter_map(|line| line.split_whitespace().next()),
        )
    }

    /// Load a word list file, refusing files without any words.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let checker = Self::parse(&text);
        if checker.is_empty() {
            return Err(Error::parse("no words found", path.to_path_buf()));
        }
        tracing::info!("Loaded {} spelling words from {}", checker.len(), path.display());
        Ok(checker)
    }

    /// Combine two vocabularies.
    #[must_use]
    pub fn merged_with(self, other: Self) -> Self {
        Self::new(self.words.into_iter().chain(other.words))
    }

    /// The bundled word list plus a pronunciation dictionary and tagger lexicon.
    pub fn from_collaborators(dict: &CmuDict, tagger: &LexiconTagger) -> Self {
        Self::parse(BUILTIN_WORDLIST).merged_with(Self::new(dict.words().chain(tagger.words())))
    }

    /// Vocabulary of the bundled list and built-in collaborators.
    pub fn builtin() -> Self {
        Self::from_collaborators(&CmuDict::builtin(), &LexiconTagger::builtin())
    }

    /// Number of known words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no words are known.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether a normalized word, or the base of a regular inflection of it, is known.
    pub fn is_known(&self, word: &str) -> bool {
        self.known.contains(word) || base_forms(word).iter().any(|base| self.known.contains(base))
    }

    /// Distinct unknown words of `text`, sorted.
    pub fn unknown_words(&self, text: &str) -> Vec<String> {
        let mut unknown: Vec<String> = text
            .split_whitespace()
            .map(|w| Token::new(w).normalized)
            .filter(|w| w.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-'))
            .filter(|w| !w.is_empty() && !self.is_known(w))
            .collect();
        unknown.sort_unstable();
        unknown.dedup();
        unknown
    }

    /// Up to `limit` known words within the edit-distance limit of `word`.
    ///
    /// Closer words come first; ties go to the better fuzzy match, then
    /// alphabetical order.
    pub fn suggestions(&self, word: &str, limit: usize) -> Vec<String> {
        let word = word.to_lowercase();
        let matcher = SkimMatcherV2::default();

        let mut scored: Vec<(usize, i64, &str)> = self
            .words
            .par_iter()
            .filter_map(|candidate| {
                let distance = strsim::levenshtein(&word, candidate);
                if distance == 0 || distance > MAX_EDIT_DISTANCE {
                    return None;
                }
                let fuzzy = matcher.fuzzy_match(candidate, &word).unwrap_or(0);
                Some((distance, fuzzy, candidate.as_str()))
            })
            .collect();

        scored.sort_unstable_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(b.2)));
        scored.into_iter().take(limit).map(|(_, _, w)| w.to_string()).collect()
    }
}

/// Candidate base words for an inflected form.
fn base_forms(word: &str) -> Vec<String> {
    let mut bases = Vec::new();
    for (suffix, endings) in INFLECTIONS {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        if stem.chars().count() < 2 {
            continue;
        }
        bases.extend(endings.iter().map(|ending| format!("{stem}{ending}")));

        // stopped -> stop, bigger -> big
        let mut tail = stem.chars().rev();
        if let (Some(a), Some(b)) = (tail.next(), tail.next()) {
            if a == b && a.is_ascii_alphabetic() {
                bases.push(stem[..stem.len() - 1].to_string());
            }
        }
    }
    bases
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn checker() -> SpellChecker {
        SpellChecker::new(["moon", "night", "light", "might", "the", "shine", "rose"])
    }

    #[test]
    fn test_unknown_words_sorted_and_distinct() {
        let unknown = checker().unknown_words("The moon glowz,\nthe moon glowz! Nihgt 1999");
        assert_eq!(unknown, ["glowz", "nihgt"]);
    }

    #[test]
    fn test_plural_and_possessive_are_known() {
        let c = checker();
        assert!(c.is_known("nights"));
        assert!(c.is_known("moon's"));
        assert!(!c.is_known("moonz"));
    }

    #[test]
    fn test_suggestions_ranked_by_distance() {
        let c = checker();
        let s = c.suggestions("lihgt", 3);
        assert_eq!(s[0], "light");
        assert_eq!(c.suggestions("nigt", 5), ["night", "light", "might"]);
        assert!(c.suggestions("xyzzyq", 5).is_empty());
    }

    #[test]
    fn test_limit_and_exact_word_excluded() {
        let c = checker();
        assert!(!c.suggestions("moon", 5).contains(&"moon".to_string()));
        assert_eq!(c.suggestions("mighte", 1).len(), 1);
    }

    #[test]
    fn test_regular_inflections_are_known() {
        let c = SpellChecker::new(["play", "happy", "breeze", "stop", "gentle", "cry", "big"]);
        for word in ["played", "happily", "breezes", "stopped", "stopping", "gently", "cried", "bigger"] {
            assert!(c.is_known(word), "{word}");
        }
        assert!(!c.is_known("plyed"));
    }

    #[test]
    fn test_common_words_not_flagged() {
        let text = "The children played happily in the green meadow while gentle breezes \
                    whispered through golden fields";
        assert!(SpellChecker::builtin().unknown_words(text).is_empty());
    }

    #[test]
    fn test_load_word_list() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# extra\nzephyr\nsnickersnee").unwrap();
        let c = SpellChecker::builtin().merged_with(SpellChecker::load(file.path()).unwrap());
        assert!(c.is_known("zephyrs"));
        assert!(c.is_known("moon"));

        let empty = tempfile::NamedTempFile::new().unwrap();
        assert!(SpellChecker::load(empty.path()).is_err());
    }

    #[test]
    fn test_builtin_vocabulary() {
        let c = SpellChecker::builtin();
        assert!(!c.is_empty());
        assert!(c.is_known("moon"));
        assert!(c.is_known("the"));
    }
}
