//! Core type definitions shared across the analysis pipeline.
//!
//! Small closed enums for tags, tiers and labels so the detectors and the
//! report never compare stringly-typed values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::tone;

/// Fine-grained part-of-speech tag assigned to a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    /// Common noun.
    Noun,
    /// Capitalized name.
    ProperNoun,
    /// Personal or demonstrative pronoun.
    Pronoun,
    /// Lexical verb.
    Verb,
    /// Copula, auxiliary or modal verb.
    Auxiliary,
    /// Adjective.
    Adjective,
    /// Adverb.
    Adverb,
    /// Article, possessive or quantifier.
    Determiner,
    /// Preposition or particle.
    Preposition,
    /// Coordinating or subordinating conjunction.
    Conjunction,
    /// Interjection.
    Interjection,
    /// Cardinal number.
    Numeral,
    /// Token without letters or digits.
    Punctuation,
    /// The tagger failed for this token.
    Unknown,
}

impl PartOfSpeech {
    /// Parse a lexicon tag code such as `NOUN` or `ADJ`.
    pub fn from_code(code: &str) -> Option<Self> {
        let tag = match code.trim().to_ascii_uppercase().as_str() {
            "NOUN" | "NN" => Self::Noun,
            "PROPN" | "NNP" => Self::ProperNoun,
            "PRON" | "PRP" => Self::Pronoun,
            "VERB" | "VB" => Self::Verb,
            "AUX" | "MD" => Self::Auxiliary,
            "ADJ" | "JJ" => Self::Adjective,
            "ADV" | "RB" => Self::Adverb,
            "DET" | "DT" => Self::Determiner,
            "ADP" | "PREP" | "IN" => Self::Preposition,
            "CONJ" | "CC" => Self::Conjunction,
            "INTJ" | "UH" => Self::Interjection,
            "NUM" | "CD" => Self::Numeral,
            "PUNCT" => Self::Punctuation,
            _ => return None,
        };
        Some(tag)
    }

    /// Coarse category used by the frequency table.
    #[must_use]
    pub const fn category(self) -> PosCategory {
        match self {
            Self::Noun | Self::ProperNoun => PosCategory::Noun,
            Self::Verb | Self::Auxiliary => PosCategory::Verb,
            Self::Adjective => PosCategory::Adjective,
            Self::Adverb => PosCategory::Adverb,
            Self::Unknown => PosCategory::Unknown,
            _ => PosCategory::Other,
        }
    }

    /// Whether the token can head a noun phrase.
    #[must_use]
    pub const fn is_nominal(self) -> bool {
        matches!(self, Self::Noun | Self::ProperNoun)
    }

    /// Whether the token carries lexical content (not a function word).
    #[must_use]
    pub const fn is_content(self) -> bool {
        matches!(
            self,
            Self::Noun | Self::ProperNoun | Self::Verb | Self::Adjective | Self::Adverb | Self::Unknown
        )
    }
}

/// Coarse part-of-speech category reported in frequency tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosCategory {
    /// Nouns and proper nouns.
    Noun,
    /// Verbs and auxiliaries.
    Verb,
    /// Adjectives.
    Adjective,
    /// Adverbs.
    Adverb,
    /// Every other word class.
    Other,
    /// Tokens the tagger could not tag.
    Unknown,
}

impl PosCategory {
    /// Returns all categories in report order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Noun, Self::Verb, Self::Adjective, Self::Adverb, Self::Other, Self::Unknown]
    }

    /// Returns the human-readable name of this category.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Noun => "Nouns",
            Self::Verb => "Verbs",
            Self::Adjective => "Adjectives",
            Self::Adverb => "Adverbs",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }
}

/// Confidence tier attached to a figure-of-speech match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Pattern fully satisfied.
    High,
    /// Pattern partially satisfied.
    Medium,
    /// Marker present with little supporting structure.
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.write_str(s)
    }
}

/// Kind of figure of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureKind {
    /// Comparison with an explicit marker.
    Simile,
    /// Comparison through a copula.
    Metaphor,
    /// Repeated initial sounds.
    Alliteration,
}

impl FigureKind {
    /// Returns the human-readable name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Simile => "Simile",
            Self::Metaphor => "Metaphor",
            Self::Alliteration => "Alliteration",
        }
    }
}

/// Tone label derived from a compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneLabel {
    /// Score at or above the positive threshold.
    Positive,
    /// Score between the thresholds.
    Neutral,
    /// Score at or below the negative threshold.
    Negative,
}

impl ToneLabel {
    /// Classify a compound score with the fixed thresholds.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= tone::POSITIVE_THRESHOLD {
            Self::Positive
        } else if score <= tone::NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Returns the lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Mood description shown alongside the label.
    #[must_use]
    pub const fn mood(self) -> &'static str {
        match self {
            Self::Positive => "This may suggest a mood of joy, love, or hope.",
            Self::Neutral => "The language is balanced, suggesting an objective or descriptive mood.",
            Self::Negative => "This may suggest a mood of sadness, anger, or despair.",
        }
    }
}

impl fmt::Display for ToneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
