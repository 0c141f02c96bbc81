//! Part-of-speech tagging and frequency tables.
//!
//! Every token of every line goes through a [`PosTagger`]. A failed call
//! tags the token [`PartOfSpeech::Unknown`] and is recorded so the report can
//! mark itself degraded; tagging never aborts an analysis.

mod lexicon;

pub use lexicon::LexiconTagger;

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::poem::{Poem, Token};
use crate::types::{PartOfSpeech, PosCategory};

/// What the tagger may see around the token it is tagging.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagContext<'a> {
    /// Tag of the previous word on the line.
    pub previous_tag: Option<PartOfSpeech>,
    /// Normalized previous word on the line.
    pub previous_word: Option<&'a str>,
    /// Whether this is the first word of the line.
    pub line_start: bool,
}

/// Trait for part-of-speech tagging backends.
pub trait PosTagger: Send + Sync {
    /// Tag a single token given its left context.
    fn tag(&self, token: &Token, context: &TagContext<'_>) -> Result<PartOfSpeech>;

    /// Whether the tagger has any data at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Get the name of this tagger (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// A token the tagger failed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFailure {
    /// Poem-wide line index.
    pub line: usize,
    /// Token position within the line.
    pub token: usize,
    /// The token's surface text.
    pub word: String,
    /// Error reported by the tagger.
    pub message: String,
}

/// Tags for every token of a poem, indexed by line then token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedPoem {
    tags: Vec<Vec<PartOfSpeech>>,
    failures: Vec<TagFailure>,
}

impl TaggedPoem {
    /// Tag every token, line by line. Context resets at each line start.
    pub fn tag(poem: &Poem, tagger: &dyn PosTagger) -> Self {
        let mut tags = Vec::with_capacity(poem.line_count());
        let mut failures = Vec::new();

        for line in poem.lines() {
            let mut line_tags = Vec::with_capacity(line.tokens.len());
            let mut context = TagContext {
                line_start: true,
                ..TagContext::default()
            };

            for (i, token) in line.tokens.iter().enumerate() {
                let tag = tagger.tag(token, &context).unwrap_or_else(|e| {
                    tracing::debug!("{} failed on {:?}: {e}", tagger.name(), token.surface);
                    failures.push(TagFailure {
                        line: line.index,
                        token: i,
                        word: token.surface.clone(),
                        message: e.to_string(),
                    });
                    PartOfSpeech::Unknown
                });
                line_tags.push(tag);

                if token.is_word() {
                    context = TagContext {
                        previous_tag: Some(tag),
                        previous_word: Some(token.normalized.as_str()),
                        line_start: false,
                    };
                }
            }
            tags.push(line_tags);
        }

        Self { tags, failures }
    }

    /// Tags of one line.
    pub fn line(&self, line: usize) -> &[PartOfSpeech] {
        self.tags.get(line).map(Vec::as_slice).unwrap_or_default()
    }

    /// Tag of one token.
    pub fn get(&self, line: usize, token: usize) -> Option<PartOfSpeech> {
        self.tags.get(line)?.get(token).copied()
    }

    /// Tokens the tagger failed on.
    pub fn failures(&self) -> &[TagFailure] {
        &self.failures
    }
}

/// Category counts plus the distinct words behind each count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosFrequencies {
    counts: BTreeMap<PosCategory, usize>,
    words: BTreeMap<PosCategory, BTreeSet<String>>,
}

impl Default for PosFrequencies {
    fn default() -> Self {
        Self {
            counts: PosCategory::all().iter().map(|&c| (c, 0)).collect(),
            words: PosCategory::all().iter().map(|&c| (c, BTreeSet::new())).collect(),
        }
    }
}

impl PosFrequencies {
    /// Count every word token by category. Punctuation is not counted.
    pub fn build(poem: &Poem, tagged: &TaggedPoem) -> Self {
        let mut freq = Self::default();
        for line in poem.lines() {
            for (token, &tag) in line.tokens.iter().zip(tagged.line(line.index)) {
                if tag == PartOfSpeech::Punctuation || !token.is_word() {
                    continue;
                }
                let category = tag.category();
                *freq.counts.entry(category).or_default() += 1;
                freq.words
                    .entry(category)
                    .or_default()
                    .insert(token.normalized.clone());
            }
        }
        freq
    }

    /// Count for one category.
    pub fn count(&self, category: PosCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or_default()
    }

    /// All counts in category order.
    pub fn counts(&self) -> &BTreeMap<PosCategory, usize> {
        &self.counts
    }

    /// Sorted distinct words of one category.
    pub fn words(&self, category: PosCategory) -> impl Iterator<Item = &str> {
        self.words
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Total counted tokens.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}
