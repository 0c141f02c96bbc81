//! Figure-of-speech detection.
//!
//! Three independent heuristics run over each tagged line. Their matches are
//! combined by [`FigureDetector`], which applies the overlap policy: a
//! metaphor sharing any token with a simile on the same line is dropped,
//! while alliteration is always kept.

mod alliteration;
mod metaphor;
mod simile;

pub use alliteration::AlliterationHeuristic;
pub use metaphor::MetaphorHeuristic;
pub use simile::SimileHeuristic;

use serde::Serialize;

use crate::pos::TaggedPoem;
use crate::poem::{Line, Poem};
use crate::types::{Confidence, FigureKind, PartOfSpeech};

/// Tokens `start..end` of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TokenSpan {
    /// Stanza of the line (0-indexed).
    pub stanza: usize,
    /// Poem-wide line index.
    pub line: usize,
    /// First token of the span.
    pub start: usize,
    /// One past the last token of the span.
    pub end: usize,
}

impl TokenSpan {
    /// Span over `start..end` of a line.
    pub const fn on(line: &Line, start: usize, end: usize) -> Self {
        Self {
            stanza: line.stanza,
            line: line.index,
            start,
            end,
        }
    }

    /// Whether both spans are on the same line and share a token.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.line == other.line && self.start < other.end && other.start < self.end
    }

    /// Number of tokens covered.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no tokens.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Kind-specific evidence for a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Evidence {
    /// An explicit comparison marker.
    Simile {
        /// `like`, `as`, or `as ... as`.
        marker: String,
    },
    /// A copula joining two nouns.
    Metaphor {
        /// The noun being described.
        tenor: String,
        /// The copula (`is`, `are`, ...).
        copula: String,
        /// The noun it is equated with.
        vehicle: String,
    },
    /// Words sharing an initial sound.
    Alliteration {
        /// The shared onset.
        sound: String,
        /// Words sharing it, in line order.
        members: Vec<String>,
    },
}

/// A detected figure of speech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FigureMatch {
    /// Tokens involved.
    pub span: TokenSpan,
    /// How fully the pattern was satisfied.
    pub confidence: Confidence,
    /// Surface text of the span.
    pub excerpt: String,
    /// What triggered the match.
    #[serde(flatten)]
    pub evidence: Evidence,
}

impl FigureMatch {
    /// Build a match, taking the excerpt from the line.
    pub fn new(line: &Line, start: usize, end: usize, confidence: Confidence, evidence: Evidence) -> Self {
        let excerpt = line
            .tokens
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|t| t.surface.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            span: TokenSpan::on(line, start, end),
            confidence,
            excerpt,
            evidence,
        }
    }

    /// Which figure this is.
    pub const fn kind(&self) -> FigureKind {
        match self.evidence {
            Evidence::Simile { .. } => FigureKind::Simile,
            Evidence::Metaphor { .. } => FigureKind::Metaphor,
            Evidence::Alliteration { .. } => FigureKind::Alliteration,
        }
    }
}

/// Trait for one figure-of-speech heuristic.
pub trait FigureHeuristic: Send + Sync {
    /// Find matches on a single line given its tags.
    fn detect(&self, line: &Line, tags: &[PartOfSpeech]) -> Vec<FigureMatch>;

    /// Get the name of this heuristic (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Tag at a token position, `Unknown` when missing.
pub(crate) fn tag_at(tags: &[PartOfSpeech], i: usize) -> PartOfSpeech {
    tags.get(i).copied().unwrap_or(PartOfSpeech::Unknown)
}

/// Runs every heuristic and applies the overlap policy.
pub struct FigureDetector {
    heuristics: Vec<Box<dyn FigureHeuristic>>,
}

impl FigureDetector {
    /// Create a detector from explicit heuristics.
    pub fn new(heuristics: Vec<Box<dyn FigureHeuristic>>) -> Self {
        Self { heuristics }
    }

    /// Simile, metaphor and alliteration with the given alliteration window.
    pub fn with_defaults(alliteration_window: usize) -> Self {
        Self::new(vec![
            Box::new(SimileHeuristic),
            Box::new(MetaphorHeuristic),
            Box::new(AlliterationHeuristic::new(alliteration_window)),
        ])
    }

    /// Detect every figure in the poem, ordered by line, start, then kind.
    pub fn detect(&self, poem: &Poem, tagged: &TaggedPoem) -> Vec<FigureMatch> {
        let mut matches = Vec::new();
        for line in poem.lines() {
            let tags = tagged.line(line.index);
            let mut found: Vec<FigureMatch> = self
                .heuristics
                .iter()
                .flat_map(|h| h.detect(line, tags))
                .collect();
            suppress_covered_metaphors(&mut found);
            matches.extend(found);
        }

        matches.sort_by_key(|m| (m.span.line, m.span.start, m.kind()));
        tracing::debug!(
            "Detected {} figures using {}",
            matches.len(),
            self.heuristics.iter().map(|h| h.name()).collect::<Vec<_>>().join(", ")
        );
        matches
    }
}

/// Drop metaphors that overlap a simile; the explicit marker wins.
fn suppress_covered_metaphors(matches: &mut Vec<FigureMatch>) {
    let similes: Vec<TokenSpan> = matches
        .iter()
        .filter(|m| m.kind() == FigureKind::Simile)
        .map(|m| m.span)
        .collect();
    matches.retain(|m| m.kind() != FigureKind::Metaphor || !similes.iter().any(|s| s.overlaps(&m.span)));
}
