//! Poem tokenization and normalization.
//!
//! Splits raw text into stanzas (blank-line separated), lines and
//! whitespace tokens. Each token keeps its surface form alongside a
//! lowercased, edge-punctuation-stripped form and its onset key; each line
//! records its end word and that word's phonetic key.

use std::sync::LazyLock;

use regex::Regex;

use crate::phonetics::{self, KeyOrigin, PhoneticKey, PronunciationSource};

/// Regex matching leading or trailing characters that are neither letters nor digits.
#[allow(clippy::expect_used)]
static RE_EDGE_PUNCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\p{L}\p{N}]+|[^\p{L}\p{N}]+$").expect("valid regex: RE_EDGE_PUNCT")
});

/// A single whitespace-delimited token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Text exactly as written.
    pub surface: String,
    /// Lowercased with edge punctuation removed; empty for pure punctuation.
    pub normalized: String,
    /// Starting-sound key for alliteration.
    pub onset: Option<String>,
}

impl Token {
    /// Normalize a raw token.
    pub fn new(surface: &str) -> Self {
        let unified = surface.replace(['\u{2019}', '\u{2018}'], "'");
        let normalized = RE_EDGE_PUNCT.replace_all(&unified, "").to_lowercase();
        let onset = phonetics::onset_of(&normalized);
        Self {
            surface: surface.to_string(),
            normalized,
            onset,
        }
    }

    /// Whether the token has any letters or digits.
    pub fn is_word(&self) -> bool {
        !self.normalized.is_empty()
    }

    /// Whether the token contains at least one letter.
    pub fn has_alpha(&self) -> bool {
        self.normalized.chars().any(char::is_alphabetic)
    }
}

/// A non-blank line of the poem.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Position among all non-blank lines of the poem (0-indexed).
    pub index: usize,
    /// Stanza this line belongs to (0-indexed).
    pub stanza: usize,
    /// Original text with trailing whitespace removed.
    pub text: String,
    /// Tokens in reading order.
    pub tokens: Vec<Token>,
    /// Index of the last token containing a letter.
    pub end_word: Option<usize>,
    /// Rhyme key of the end word.
    pub phonetic_key: Option<PhoneticKey>,
    /// Whether the key came from the dictionary or the spelling fallback.
    pub key_origin: Option<KeyOrigin>,
}

impl Line {
    fn parse(
        index: usize,
        stanza: usize,
        text: &str,
        pronunciation: &dyn PronunciationSource,
    ) -> Self {
        let tokens: Vec<Token> = text.split_whitespace().map(Token::new).collect();
        let end_word = tokens.iter().rposition(Token::has_alpha);
        let keyed = end_word.and_then(|i| phonetics::key_for(&tokens[i].normalized, pronunciation));
        let (phonetic_key, key_origin) = keyed.map_or((None, None), |(k, o)| (Some(k), Some(o)));

        Self {
            index,
            stanza,
            text: text.trim_end().to_string(),
            tokens,
            end_word,
            phonetic_key,
            key_origin,
        }
    }

    /// The end-word token, if the line has one.
    pub fn end_token(&self) -> Option<&Token> {
        self.end_word.and_then(|i| self.tokens.get(i))
    }

    /// Number of tokens with letters or digits.
    pub fn word_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_word()).count()
    }
}

/// Lines between two blank-line boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Stanza {
    /// Position of the stanza in the poem (0-indexed).
    pub index: usize,
    /// Non-blank lines in order.
    pub lines: Vec<Line>,
}

/// Immutable snapshot of a submitted poem.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Poem {
    text: String,
    stanzas: Vec<Stanza>,
}

impl Poem {
    /// Split raw text into stanzas, lines and tokens, keying every end word.
    ///
    /// Runs of blank or whitespace-only lines form a single stanza boundary.
    pub fn parse(text: &str, pronunciation: &dyn PronunciationSource) -> Self {
        let mut stanzas: Vec<Stanza> = Vec::new();
        let mut current: Vec<Line> = Vec::new();
        let mut line_index = 0;

        for raw in text.lines() {
            if raw.trim().is_empty() {
                if !current.is_empty() {
                    stanzas.push(Stanza {
                        index: stanzas.len(),
                        lines: std::mem::take(&mut current),
                    });
                }
                continue;
            }
            current.push(Line::parse(line_index, stanzas.len(), raw, pronunciation));
            line_index += 1;
        }
        if !current.is_empty() {
            stanzas.push(Stanza { index: stanzas.len(), lines: current });
        }

        tracing::debug!("Parsed {} lines in {} stanzas", line_index, stanzas.len());

        Self {
            text: text.to_string(),
            stanzas,
        }
    }

    /// The raw text this snapshot was built from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stanzas in order.
    pub fn stanzas(&self) -> &[Stanza] {
        &self.stanzas
    }

    /// All non-blank lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.stanzas.iter().flat_map(|s| s.lines.iter())
    }

    /// Line by its poem-wide index.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines().nth(index)
    }

    /// Number of non-blank lines.
    pub fn line_count(&self) -> usize {
        self.stanzas.iter().map(|s| s.lines.len()).sum()
    }

    /// Number of tokens with letters or digits.
    pub fn word_count(&self) -> usize {
        self.lines().map(Line::word_count).sum()
    }

    /// Whether the poem has no non-blank lines.
    pub fn is_empty(&self) -> bool {
        self.stanzas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::phonetics::CmuDict;

    fn parse(text: &str) -> Poem {
        Poem::parse(text, &CmuDict::builtin())
    }

    #[test]
    fn test_token_normalization() {
        let t = Token::new("\"Night,");
        assert_eq!(t.normalized, "night");
        assert_eq!(t.surface, "\"Night,");

        assert_eq!(Token::new("o'er").normalized, "o'er");
        assert_eq!(Token::new("heart-break!").normalized, "heart-break");
        assert_eq!(Token::new("O\u{2019}er").normalized, "o'er");

        let dash = Token::new("—");
        assert!(!dash.is_word());
        assert_eq!(dash.onset, None);
    }

    #[test]
    fn test_stanza_splitting() {
        let poem = parse("one day\ntwo night\n\n  \n\nthree way\r\nfour light\n");
        assert_eq!(poem.stanzas().len(), 2);
        assert_eq!(poem.line_count(), 4);
        assert_eq!(poem.stanzas()[1].lines[0].index, 2);
        assert_eq!(poem.stanzas()[1].lines[0].stanza, 1);
        assert_eq!(poem.line(3).unwrap().text, "four light");
    }

    #[test]
    fn test_end_word_skips_trailing_punctuation() {
        let poem = parse("Upon the mat -- !");
        let line = poem.line(0).unwrap();
        assert_eq!(line.end_token().unwrap().normalized, "mat");
        assert_eq!(line.phonetic_key.as_ref().unwrap().to_string(), "AE T");
        assert_eq!(line.key_origin, Some(KeyOrigin::Dictionary));
    }

    #[test]
    fn test_line_without_letters_has_no_key() {
        let poem = parse("1 2 3 ...");
        let line = poem.line(0).unwrap();
        assert_eq!(line.end_word, None);
        assert_eq!(line.phonetic_key, None);
        assert_eq!(line.word_count(), 3);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(parse("").is_empty());
        assert!(parse("   \n\t\n").is_empty());
        assert_eq!(parse("\n\n").word_count(), 0);
    }

    #[test]
    fn test_word_count_ignores_punctuation_tokens() {
        let poem = parse("The cat sat on the mat\nThe dog ran — to the fog");
        assert_eq!(poem.word_count(), 12);
    }
}
