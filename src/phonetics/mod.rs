//! Phonetic keys for rhyme comparison and onset keys for alliteration.
//!
//! A key is the rhyming tail of a word in ARPAbet-style symbols: everything
//! from the last stressed vowel to the end. Dictionary pronunciations and the
//! spelling-based fallback produce the same symbol set, so keys from either
//! source compare against each other.

mod approximate;
mod cmudict;

pub use approximate::approximate_key;
pub use cmudict::CmuDict;

use serde::Serialize;
use std::fmt;

/// Trait for pronunciation lookup providers.
///
/// Different implementations can provide pronunciations from various
/// sources (the bundled dictionary, a downloaded CMU file, a service).
pub trait PronunciationSource: Send + Sync {
    /// Look up the rhyme key of a lowercase word, `None` when not found.
    fn phonetic_key_of(&self, word: &str) -> Option<PhoneticKey>;

    /// Whether the source has any data at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Get the name of this source (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Where a line's phonetic key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOrigin {
    /// Found in the pronunciation source.
    Dictionary,
    /// Derived from spelling because the word was missing.
    Approximated,
}

/// Articulatory class used for fuzzy comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhoneClass {
    FrontHigh,
    FrontMid,
    Low,
    Central,
    BackHigh,
    BackMid,
    Rhotic,
    DiphthongAy,
    DiphthongAw,
    DiphthongOy,
    Stop,
    Nasal,
    Fricative,
    Affricate,
    Liquid,
    Glide,
}

impl PhoneClass {
    fn of(phone: &str) -> Option<Self> {
        let class = match phone {
            "IY" | "IH" => Self::FrontHigh,
            "EY" | "EH" => Self::FrontMid,
            "AE" | "AA" | "AO" => Self::Low,
            "AH" => Self::Central,
            "UW" | "UH" => Self::BackHigh,
            "OW" => Self::BackMid,
            "ER" => Self::Rhotic,
            "AY" => Self::DiphthongAy,
            "AW" => Self::DiphthongAw,
            "OY" => Self::DiphthongOy,
            "P" | "B" | "T" | "D" | "K" | "G" => Self::Stop,
            "M" | "N" | "NG" => Self::Nasal,
            "F" | "V" | "TH" | "DH" | "S" | "Z" | "SH" | "ZH" | "HH" => Self::Fricative,
            "CH" | "JH" => Self::Affricate,
            "L" | "R" => Self::Liquid,
            "W" | "Y" => Self::Glide,
            _ => return None,
        };
        Some(class)
    }

    const fn is_vowel(self) -> bool {
        !matches!(
            self,
            Self::Stop | Self::Nasal | Self::Fricative | Self::Affricate | Self::Liquid | Self::Glide
        )
    }
}

/// Rhyming tail of a word, compared exactly or within a phonetic distance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PhoneticKey {
    phones: Vec<String>,
}

impl PhoneticKey {
    /// Build a key from phones, dropping stress digits.
    pub fn new<I, S>(phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phones = phones
            .into_iter()
            .map(|p| strip_stress(p.as_ref()).to_ascii_uppercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { phones }
    }

    /// Take the rhyming tail of a full stressed pronunciation.
    ///
    /// Starts at the last primary-stressed vowel, else the last secondary
    /// stress, else the last vowel. Pronunciations without vowels are kept whole.
    pub fn from_pronunciation<S: AsRef<str>>(phones: &[S]) -> Option<Self> {
        if phones.is_empty() {
            return None;
        }
        let stressed = |mark: char| phones.iter().rposition(|p| p.as_ref().ends_with(mark));
        let start = stressed('1')
            .or_else(|| stressed('2'))
            .or_else(|| phones.iter().rposition(|p| p.as_ref().ends_with(|c: char| c.is_ascii_digit())))
            .unwrap_or(0);
        Some(Self::new(&phones[start..]))
    }

    /// The phones making up the key.
    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    /// The vowel the tail is built around, if any.
    pub fn nucleus(&self) -> Option<&str> {
        self.phones
            .iter()
            .find(|p| PhoneClass::of(p).is_some_and(PhoneClass::is_vowel))
            .map(String::as_str)
    }

    /// Phonetic distance between keys of equal shape.
    ///
    /// Identical phones cost 0, phones of the same articulatory class cost 1.
    /// Returns `None` when the keys differ in length or any position differs
    /// in class.
    pub fn distance(&self, other: &Self) -> Option<u32> {
        if self.phones.len() != other.phones.len() {
            return None;
        }
        self.phones.iter().zip(&other.phones).try_fold(0u32, |acc, (a, b)| {
            if a == b {
                return Some(acc);
            }
            let (ca, cb) = (PhoneClass::of(a)?, PhoneClass::of(b)?);
            (ca == cb).then_some(acc + 1)
        })
    }

    /// Whether the keys differ but lie within `tolerance`.
    pub fn is_fuzzy_equal(&self, other: &Self, tolerance: u32) -> bool {
        matches!(self.distance(other), Some(d) if d > 0 && d <= tolerance)
    }
}

impl fmt::Display for PhoneticKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phones.join(" "))
    }
}

fn strip_stress(phone: &str) -> &str {
    phone.trim().trim_end_matches(|c: char| c.is_ascii_digit())
}

/// Resolve a word's rhyme key, falling back to the spelling approximation.
///
/// Hyphenated compounds are looked up whole, then by their last segment.
/// Returns `None` for words without letters or without any approximable sound.
pub fn key_for(word: &str, source: &dyn PronunciationSource) -> Option<(PhoneticKey, KeyOrigin)> {
    let word = word.to_lowercase();
    if !word.chars().any(char::is_alphabetic) {
        return None;
    }

    let last_segment = word
        .rsplit('-')
        .next()
        .filter(|s| !s.is_empty() && s.len() < word.len());
    let found = source
        .phonetic_key_of(&word)
        .or_else(|| last_segment.and_then(|s| source.phonetic_key_of(s)));
    if let Some(key) = found {
        return Some((key, KeyOrigin::Dictionary));
    }

    last_segment
        .and_then(approximate_key)
        .or_else(|| approximate_key(&word))
        .map(|key| (key, KeyOrigin::Approximated))
}

/// Starting-sound key of a word for alliteration.
///
/// Silent initial letters are skipped (`knight` starts with `n`), common
/// digraphs are kept together and hard/soft `c` is resolved, so `cat`,
/// `kite` and `queen` share the onset `k`.
pub fn onset_of(word: &str) -> Option<String> {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    let first = *letters.first()?;
    let second = letters.get(1).copied();
    let third = letters.get(2).copied();

    let onset = match (first, second) {
        ('k' | 'g' | 'p', Some('n')) => "n",
        ('w', Some('h')) if third == Some('o') => "h",
        ('w', Some('h')) => "w",
        ('w', Some('r')) | ('r', Some('h')) => "r",
        ('p', Some('s')) => "s",
        ('p', Some('h')) => "f",
        ('c', Some('h')) => "ch",
        ('s', Some('h')) => "sh",
        ('t', Some('h')) => "th",
        ('c', Some('e' | 'i' | 'y')) => "s",
        ('c' | 'k' | 'q', _) => "k",
        ('x', _) => "z",
        (c, _) => return Some(c.to_string()),
    };
    Some(onset.to_string())
}

/// Whether an onset key is a vowel sound.
pub fn is_vowel_onset(onset: &str) -> bool {
    matches!(onset, "a" | "e" | "i" | "o" | "u")
}
