//! Alliteration: repeated initial consonant sounds within a sliding window.

use std::collections::{BTreeMap, BTreeSet};

use super::{tag_at, Evidence, FigureHeuristic, FigureMatch};
use crate::config::clamp_window;
use crate::constants::figures::{ALLITERATION_HIGH_SHARED, ALLITERATION_MIN_SHARED};
use crate::phonetics::is_vowel_onset;
use crate::poem::Line;
use crate::types::{Confidence, PartOfSpeech};

/// Slides a fixed window over each line looking for shared onsets.
///
/// Windows that overlap an existing run for the same sound extend it, so a
/// long run is reported once rather than once per window. Confidence is
/// graded on the merged run.
#[derive(Debug, Clone, Copy)]
pub struct AlliterationHeuristic {
    window: usize,
}

impl AlliterationHeuristic {
    /// Create a heuristic with a window size, clamped to the supported range.
    pub fn new(window: usize) -> Self {
        Self {
            window: clamp_window(window),
        }
    }

    /// The window size in tokens.
    pub const fn window(&self) -> usize {
        self.window
    }
}

/// A run of same-onset tokens being built up.
struct Run {
    sound: String,
    members: BTreeSet<usize>,
}

impl Run {
    fn first(&self) -> usize {
        self.members.first().copied().unwrap_or_default()
    }

    fn last(&self) -> usize {
        self.members.last().copied().unwrap_or_default()
    }
}

impl FigureHeuristic for AlliterationHeuristic {
    fn detect(&self, line: &Line, tags: &[PartOfSpeech]) -> Vec<FigureMatch> {
        // content words with a consonant onset
        let candidates: Vec<(usize, &str)> = line
            .tokens
            .iter()
            .enumerate()
            .filter(|&(i, t)| t.is_word() && tag_at(tags, i).is_content())
            .filter_map(|(i, t)| t.onset.as_deref().map(|onset| (i, onset)))
            .filter(|&(_, onset)| !is_vowel_onset(onset))
            .collect();

        let mut runs: Vec<Run> = Vec::new();
        let last_start = line.tokens.len().saturating_sub(self.window);

        for start in 0..=last_start {
            let end = start + self.window;
            let mut by_onset: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
            for &(i, onset) in candidates.iter().filter(|&&(i, _)| i >= start && i < end) {
                by_onset.entry(onset).or_default().push(i);
            }

            for (sound, members) in by_onset {
                if members.len() < ALLITERATION_MIN_SHARED {
                    continue;
                }
                let (lo, hi) = (members[0], members[members.len() - 1]);
                let existing = runs
                    .iter_mut()
                    .find(|r| r.sound == sound && r.first() <= hi && lo <= r.last());
                match existing {
                    Some(run) => run.members.extend(members),
                    None => runs.push(Run {
                        sound: sound.to_string(),
                        members: members.into_iter().collect(),
                    }),
                }
            }
        }

        runs.into_iter()
            .map(|run| {
                let confidence = if run.members.len() >= ALLITERATION_HIGH_SHARED {
                    Confidence::High
                } else {
                    Confidence::Medium
                };
                let words = run
                    .members
                    .iter()
                    .map(|&i| line.tokens[i].normalized.clone())
                    .collect();
                FigureMatch::new(
                    line,
                    run.first(),
                    run.last() + 1,
                    confidence,
                    Evidence::Alliteration {
                        sound: run.sound,
                        members: words,
                    },
                )
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "AlliterationHeuristic"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::phonetics::CmuDict;
    use crate::poem::Poem;
    use crate::pos::{LexiconTagger, TaggedPoem};

    fn alliterations(text: &str, window: usize) -> Vec<FigureMatch> {
        let poem = Poem::parse(text, &CmuDict::builtin());
        let tagged = TaggedPoem::tag(&poem, &LexiconTagger::builtin());
        AlliterationHeuristic::new(window).detect(poem.line(0).unwrap(), tagged.line(0))
    }

    fn members(m: &FigureMatch) -> Vec<String> {
        match &m.evidence {
            Evidence::Alliteration { members, .. } => members.clone(),
            other => panic!("unexpected evidence {other:?}"),
        }
    }

    #[test]
    fn test_peter_piper_is_one_run() {
        let found = alliterations("Peter Piper picked a peck of pickled peppers", 5);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].confidence, Confidence::High);
        assert_eq!(
            members(&found[0]),
            ["peter", "piper", "picked", "peck", "pickled", "peppers"]
        );
        assert_eq!(found[0].span.start, 0);
        assert_eq!(found[0].span.end, 8);
    }

    #[test]
    fn test_three_is_medium() {
        let found = alliterations("The silent sea sang on", 5);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].confidence, Confidence::Medium);
        assert_eq!(found[0].evidence, Evidence::Alliteration {
            sound: "s".into(),
            members: vec!["silent".into(), "sea".into(), "sang".into()],
        });
    }

    #[test]
    fn test_function_words_and_vowels_ignored() {
        // "the", "those", "then" are function words
        assert!(alliterations("the those then there", 5).is_empty());
        assert!(alliterations("apples and every orange", 5).is_empty());
    }

    #[test]
    fn test_outside_window() {
        let text = "Birds sing over the barn at the bay";
        assert!(alliterations(text, 5).is_empty());
        assert_eq!(alliterations(text, 8).len(), 1);
    }

    #[test]
    fn test_confidence_follows_merged_run() {
        // no single window of five holds more than three b-words
        let found = alliterations("big bold dog cat blue bright", 5);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].confidence, Confidence::High);
        assert_eq!(members(&found[0]), ["big", "bold", "blue", "bright"]);
    }

    #[test]
    fn test_sounds_not_letters() {
        let found = alliterations("cold kings queue", 5);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].evidence, Evidence::Alliteration {
            sound: "k".into(),
            members: vec!["cold".into(), "kings".into(), "queue".into()],
        });
    }

    #[test]
    fn test_short_line() {
        assert!(alliterations("big bad", 5).is_empty());
        assert_eq!(alliterations("big bad boys", 5).len(), 1);
    }

    #[test]
    fn test_window_clamped() {
        assert_eq!(AlliterationHeuristic::new(1).window(), 3);
        assert_eq!(AlliterationHeuristic::new(20).window(), 8);
    }
}
