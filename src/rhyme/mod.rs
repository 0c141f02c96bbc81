//! Rhyme scheme assignment.
//!
//! Lines are processed in order and the first occurrence of a sound claims
//! the next letter. A later line reuses a letter when its key exactly
//! matches one already in that group; otherwise the earliest group holding a
//! fuzzy-equal key wins. Exact matches always beat fuzzy ones.

use serde::Serialize;
use std::fmt;

use crate::constants::rhyme::ALPHABET_LEN;
use crate::phonetics::PhoneticKey;
use crate::poem::{Line, Poem};

/// Lines judged to rhyme with each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RhymeGroup {
    /// Scheme letter shared by the group.
    pub letter: String,
    /// Poem-wide indices of the lines in the group.
    pub lines: Vec<usize>,
    /// Distinct end words, in first-seen order.
    pub words: Vec<String>,
}

/// Scheme letters for every non-blank line plus the groups they form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RhymeScheme {
    letters: Vec<String>,
    groups: Vec<RhymeGroup>,
}

impl RhymeScheme {
    /// Assign scheme letters to lines in order.
    ///
    /// A line without a phonetic key (no alphabetic end word) always opens
    /// a new group.
    pub fn assign<'a>(lines: impl IntoIterator<Item = &'a Line>, tolerance: u32) -> Self {
        let mut letters = Vec::new();
        let mut groups: Vec<RhymeGroup> = Vec::new();
        let mut group_keys: Vec<Vec<&PhoneticKey>> = Vec::new();

        for line in lines {
            let key = line.phonetic_key.as_ref();
            let found = key.and_then(|key| {
                group_keys
                    .iter()
                    .position(|keys| keys.contains(&key))
                    .or_else(|| {
                        group_keys
                            .iter()
                            .position(|keys| keys.iter().any(|k| k.is_fuzzy_equal(key, tolerance)))
                    })
            });

            let slot = found.unwrap_or_else(|| {
                groups.push(RhymeGroup {
                    letter: scheme_letter(groups.len()),
                    lines: Vec::new(),
                    words: Vec::new(),
                });
                group_keys.push(Vec::new());
                groups.len() - 1
            });

            if let Some(key) = key {
                if !group_keys[slot].contains(&key) {
                    group_keys[slot].push(key);
                }
            }

            let group = &mut groups[slot];
            group.lines.push(line.index);
            if let Some(word) = line.end_token().map(|t| &t.normalized) {
                if !group.words.contains(word) {
                    group.words.push(word.clone());
                }
            }
            letters.push(group.letter.clone());
        }

        Self { letters, groups }
    }

    /// One letter per non-blank line, in order.
    pub fn letters(&self) -> &[String] {
        &self.letters
    }

    /// Groups in order of first appearance.
    pub fn groups(&self) -> &[RhymeGroup] {
        &self.groups
    }

    /// Number of lettered lines.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Whether no line was lettered.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Letter assigned to a poem-wide line index.
    pub fn letter_of(&self, line: usize) -> Option<&str> {
        self.letters.get(line).map(String::as_str)
    }

    /// Scheme with a space at each stanza boundary, e.g. `ABAB CDCD`.
    pub fn by_stanza(&self, poem: &Poem) -> String {
        poem.stanzas()
            .iter()
            .map(|stanza| {
                stanza
                    .lines
                    .iter()
                    .filter_map(|line| self.letter_of(line.index))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for RhymeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.letters {
            f.write_str(letter)?;
        }
        Ok(())
    }
}

/// Letter for the n-th group: `A`..`Z`, then `AA`, `BB`, ... `ZZ`, then `AAA`.
pub fn scheme_letter(n: usize) -> String {
    let base = u8::try_from(n % ALPHABET_LEN).unwrap_or_default();
    let letter = char::from(b'A' + base);
    std::iter::repeat(letter).take(n / ALPHABET_LEN + 1).collect()
}
