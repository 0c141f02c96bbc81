//! Similes: `like`, `as ... as`, and `as` + noun phrase after a modifier.

use super::{tag_at, Evidence, FigureHeuristic, FigureMatch};
use crate::constants::figures::{AS_AS_MAX_GAP, SIMILE_REACH};
use crate::poem::Line;
use crate::types::{Confidence, PartOfSpeech};

/// Finds explicit comparisons and checks for nouns on both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimileHeuristic;

impl SimileHeuristic {
    /// Identify a marker at `i`, returning its label and last token.
    fn marker_at(line: &Line, tags: &[PartOfSpeech], i: usize) -> Option<(&'static str, usize)> {
        let word = |j: usize| line.tokens.get(j).map(|t| t.normalized.as_str());

        match word(i)? {
            "like" if tag_at(tags, i) != PartOfSpeech::Verb => Some(("like", i)),
            "as" => {
                let closing = (i + 2..=i + 1 + AS_AS_MAX_GAP).find(|&j| word(j) == Some("as"));
                if let Some(j) = closing {
                    return Some(("as ... as", j));
                }
                // "bright as the sun": modifier, `as`, then a determiner
                let after_modifier = i > 0
                    && matches!(tag_at(tags, i - 1), PartOfSpeech::Adjective | PartOfSpeech::Adverb);
                let then_determiner = matches!(word(i + 1), Some("a" | "an" | "the"));
                (after_modifier && then_determiner).then_some(("as", i))
            }
            _ => None,
        }
    }
}

impl FigureHeuristic for SimileHeuristic {
    fn detect(&self, line: &Line, tags: &[PartOfSpeech]) -> Vec<FigureMatch> {
        let mut matches = Vec::new();
        let mut i = 0;

        while i < line.tokens.len() {
            let Some((marker, marker_end)) = Self::marker_at(line, tags, i) else {
                i += 1;
                continue;
            };

            let left = (0..i).rev().find(|&j| tag_at(tags, j).is_nominal());
            let right = (marker_end + 1..=marker_end + SIMILE_REACH)
                .take_while(|&j| j < line.tokens.len())
                .find(|&j| tag_at(tags, j).is_nominal());

            // a lone `as` needs the compared noun to count at all
            if marker == "as" && right.is_none() {
                i += 1;
                continue;
            }

            let confidence = if left.is_some() && right.is_some() {
                Confidence::High
            } else {
                Confidence::Medium
            };
            let start = left.unwrap_or(i);
            let end = right.unwrap_or(marker_end) + 1;

            matches.push(FigureMatch::new(
                line,
                start,
                end,
                confidence,
                Evidence::Simile {
                    marker: marker.to_string(),
                },
            ));
            i = marker_end + 1;
        }

        matches
    }

    fn name(&self) -> &'static str {
        "SimileHeuristic"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::phonetics::CmuDict;
    use crate::poem::Poem;
    use crate::pos::{LexiconTagger, TaggedPoem};

    fn similes(text: &str) -> Vec<FigureMatch> {
        let poem = Poem::parse(text, &CmuDict::builtin());
        let tagged = TaggedPoem::tag(&poem, &LexiconTagger::builtin());
        let line = poem.line(0).unwrap();
        SimileHeuristic.detect(line, tagged.line(0))
    }

    #[test]
    fn test_like_between_nouns() {
        let found = similes("Life is like a box of chocolates");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].excerpt, "Life is like a box");
        assert_eq!(found[0].confidence, Confidence::High);
    }

    #[test]
    fn test_verb_like_is_not_a_marker() {
        assert!(similes("I like the rain").is_empty());
    }

    #[test]
    fn test_as_as() {
        let found = similes("Her heart was as cold as ice");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].evidence, Evidence::Simile { marker: "as ... as".into() });
        assert_eq!(found[0].confidence, Confidence::High);
        assert_eq!(found[0].excerpt, "heart was as cold as ice");
    }

    #[test]
    fn test_lone_as_after_modifier() {
        let found = similes("She shone bright as the morning sun");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].evidence, Evidence::Simile { marker: "as".into() });

        // `as` used as a conjunction is not a comparison
        assert!(similes("As I walked out one evening").is_empty());
    }

    #[test]
    fn test_one_sided_comparison_is_medium() {
        let found = similes("Running like the wind");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].confidence, Confidence::Medium);
        assert_eq!(found[0].span.start, 1);
    }

    #[test]
    fn test_marker_without_nouns_is_medium() {
        let found = similes("She sang like mad");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].confidence, Confidence::Medium);
        assert_eq!(found[0].excerpt, "like");
    }
}
