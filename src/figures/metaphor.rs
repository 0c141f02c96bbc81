//! Metaphors: `X is Y` where both sides are nouns of different kinds.

use super::{tag_at, Evidence, FigureHeuristic, FigureMatch};
use crate::constants::figures::METAPHOR_MAX_MODIFIERS;
use crate::poem::Line;
use crate::types::{Confidence, PartOfSpeech};

const COPULAS: &[&str] = &["is", "are", "was", "were"];

/// Vehicles too generic to make a metaphor (`he is a man`).
const GENERIC_NOUNS: &[&str] = &[
    "man", "woman", "person", "thing", "animal", "human", "boy", "girl", "one", "kind", "sort",
];

/// Coarse semantic class of a noun; two nouns of one class are a literal
/// statement (`the rose is a flower`), not a metaphor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NounClass {
    Person,
    Animal,
    Plant,
    Object,
    Place,
    Nature,
    Body,
    Abstract,
    Time,
}

const NOUN_CLASSES: &[(NounClass, &[&str])] = &[
    (
        NounClass::Person,
        &[
            "man", "woman", "person", "boy", "girl", "child", "king", "queen", "mother", "father",
            "friend", "lover", "soldier", "stranger", "poet", "maid",
        ],
    ),
    (
        NounClass::Animal,
        &[
            "cat", "dog", "bird", "horse", "lion", "wolf", "fish", "snake", "dove", "eagle", "lamb",
            "tiger", "sparrow", "raven",
        ],
    ),
    (
        NounClass::Plant,
        &["rose", "tree", "flower", "lily", "oak", "grass", "seed", "leaf", "vine", "willow", "petal"],
    ),
    (
        NounClass::Object,
        &[
            "box", "stone", "sword", "key", "cup", "door", "book", "ship", "glass", "mirror", "lamp",
            "lantern", "chain", "cage", "candle", "coin", "sail",
        ],
    ),
    (
        NounClass::Place,
        &["home", "house", "city", "garden", "road", "prison", "field", "world", "land", "town"],
    ),
    (
        NounClass::Nature,
        &[
            "sun", "moon", "star", "sea", "ocean", "river", "rain", "snow", "wind", "fire", "storm",
            "sky", "light", "mountain", "cloud", "ice",
        ],
    ),
    (
        NounClass::Body,
        &["heart", "eye", "hand", "face", "lip", "blood", "bone", "tear", "voice"],
    ),
    (
        NounClass::Abstract,
        &[
            "love", "hope", "life", "death", "fear", "joy", "grief", "sorrow", "memory", "truth",
            "faith", "dream", "soul", "pain", "peace",
        ],
    ),
    (
        NounClass::Time,
        &["time", "day", "night", "year", "hour", "morning", "evening", "season", "age"],
    ),
];

fn noun_class(word: &str) -> Option<NounClass> {
    let lookup = |w: &str| {
        NOUN_CLASSES
            .iter()
            .find(|(_, words)| words.contains(&w))
            .map(|&(class, _)| class)
    };
    lookup(word).or_else(|| word.strip_suffix('s').and_then(lookup))
}

/// Finds copula constructions that equate two unrelated nouns.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaphorHeuristic;

impl MetaphorHeuristic {
    /// Locate the vehicle noun after the copula at `copula`.
    fn vehicle_after(line: &Line, tags: &[PartOfSpeech], copula: usize) -> Option<usize> {
        let mut modifiers = 0;
        for (j, token) in line.tokens.iter().enumerate().skip(copula + 1) {
            let word = token.normalized.as_str();
            if word == "like" || word == "as" {
                return None;
            }
            match tag_at(tags, j) {
                tag if tag.is_nominal() => return Some(j),
                PartOfSpeech::Determiner | PartOfSpeech::Adjective | PartOfSpeech::Adverb
                    if modifiers < METAPHOR_MAX_MODIFIERS =>
                {
                    modifiers += 1;
                }
                _ => return None,
            }
        }
        None
    }

    fn is_figurative(tenor: &str, vehicle: &str) -> bool {
        if tenor == vehicle || GENERIC_NOUNS.contains(&vehicle) {
            return false;
        }
        match (noun_class(tenor), noun_class(vehicle)) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    }
}

impl FigureHeuristic for MetaphorHeuristic {
    fn detect(&self, line: &Line, tags: &[PartOfSpeech]) -> Vec<FigureMatch> {
        let mut matches = Vec::new();

        for (i, token) in line.tokens.iter().enumerate().skip(1) {
            let copula = token.normalized.as_str();
            if !COPULAS.contains(&copula) || !tag_at(tags, i - 1).is_nominal() {
                continue;
            }
            let Some(j) = Self::vehicle_after(line, tags, i) else {
                continue;
            };

            let tenor = &line.tokens[i - 1].normalized;
            let vehicle = &line.tokens[j].normalized;
            if !Self::is_figurative(tenor, vehicle) {
                tracing::trace!("Literal copula: {tenor} {copula} {vehicle}");
                continue;
            }

            matches.push(FigureMatch::new(
                line,
                i - 1,
                j + 1,
                Confidence::Medium,
                Evidence::Metaphor {
                    tenor: tenor.clone(),
                    copula: copula.to_string(),
                    vehicle: vehicle.clone(),
                },
            ));
        }

        matches
    }

    fn name(&self) -> &'static str {
        "MetaphorHeuristic"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::phonetics::CmuDict;
    use crate::poem::Poem;
    use crate::pos::{LexiconTagger, TaggedPoem};

    fn metaphors(text: &str) -> Vec<FigureMatch> {
        let poem = Poem::parse(text, &CmuDict::builtin());
        let tagged = TaggedPoem::tag(&poem, &LexiconTagger::builtin());
        MetaphorHeuristic.detect(poem.line(0).unwrap(), tagged.line(0))
    }

    #[test]
    fn test_copula_between_unrelated_nouns() {
        let found = metaphors("My love is a red red rose");
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].evidence,
            Evidence::Metaphor {
                tenor: "love".into(),
                copula: "is".into(),
                vehicle: "rose".into(),
            }
        );
        assert_eq!(found[0].confidence, Confidence::Medium);
        assert_eq!(found[0].excerpt, "love is a red red rose");
    }

    #[test]
    fn test_past_tense_and_plural() {
        let found = metaphors("The stars were lanterns");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span.start, 1);
    }

    #[test]
    fn test_literal_statements_rejected() {
        assert!(metaphors("The rose is a flower").is_empty());
        assert!(metaphors("The cat is a dog").is_empty());
        assert!(metaphors("He is a man").is_empty());
        assert!(metaphors("The king is a man").is_empty());
    }

    #[test]
    fn test_comparison_markers_stop_search() {
        assert!(metaphors("Life is like a box of chocolates").is_empty());
    }

    #[test]
    fn test_too_many_modifiers() {
        assert!(metaphors("The sea is a very very cold grey stone").is_empty());
        assert_eq!(metaphors("The sea is a cold grey stone").len(), 1);
    }

    #[test]
    fn test_semantic_classes() {
        assert_eq!(noun_class("stars"), Some(NounClass::Nature));
        assert!(MetaphorHeuristic::is_figurative("time", "thief"));
        assert!(!MetaphorHeuristic::is_figurative("day", "night"));
    }
}
