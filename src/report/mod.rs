//! The immutable analysis report.
//!
//! [`AnalysisReport::compose`] is a pure composition step over results that
//! were all computed from one [`Poem`] snapshot. The report is never mutated
//! afterwards; a later analysis of revised text produces a new one.

mod render;

pub use render::{render_text, render_text_at};

use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::report::SNIPPET_CHARS;
use crate::figures::FigureMatch;
use crate::phonetics::KeyOrigin;
use crate::poem::Poem;
use crate::pos::{PosFrequencies, TagFailure};
use crate::rhyme::{RhymeGroup, RhymeScheme};
use crate::sentiment::{ScoreFailure, ToneReport};
use crate::types::PosCategory;

/// A recoverable data gap that forced a fallback value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AnalysisNote {
    /// An end word was missing from the pronunciation source; its rhyme key
    /// was approximated from spelling.
    MissingPronunciation {
        /// Poem-wide line index.
        line: usize,
        /// The end word.
        word: String,
    },
    /// The tagger failed on a token, which was tagged unknown.
    TaggerFailure {
        /// Poem-wide line index.
        line: usize,
        /// Token position within the line.
        token: usize,
        /// The token's surface text.
        word: String,
        /// Error reported by the tagger.
        message: String,
    },
    /// The scorer failed on a line, which was scored neutral.
    ScorerFailure {
        /// Poem-wide line index.
        line: usize,
        /// Error reported by the scorer.
        message: String,
    },
}

impl AnalysisNote {
    /// Line the note refers to.
    pub const fn line(&self) -> usize {
        match self {
            Self::MissingPronunciation { line, .. }
            | Self::TaggerFailure { line, .. }
            | Self::ScorerFailure { line, .. } => *line,
        }
    }
}

impl From<TagFailure> for AnalysisNote {
    fn from(f: TagFailure) -> Self {
        Self::TaggerFailure {
            line: f.line,
            token: f.token,
            word: f.word,
            message: f.message,
        }
    }
}

impl From<ScoreFailure> for AnalysisNote {
    fn from(f: ScoreFailure) -> Self {
        Self::ScorerFailure {
            line: f.line,
            message: f.message,
        }
    }
}

/// Everything computed for one snapshot, ready to be composed.
#[derive(Debug, Clone, Default)]
pub struct ReportParts {
    /// Rhyme letters and groups.
    pub scheme: RhymeScheme,
    /// Part-of-speech counts.
    pub frequencies: PosFrequencies,
    /// Figures of speech, already ordered.
    pub figures: Vec<FigureMatch>,
    /// Whole-poem and per-stanza tone.
    pub tone: ToneReport,
    /// Tagger failures.
    pub tag_failures: Vec<TagFailure>,
    /// Scorer failures.
    pub score_failures: Vec<ScoreFailure>,
}

/// Read-only aggregate of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    line_count: usize,
    word_count: usize,
    stanza_count: usize,
    snippet_preview: String,
    rhyme_scheme: String,
    rhyme_letters: Vec<String>,
    rhyme_scheme_by_stanza: String,
    rhyme_groups: Vec<RhymeGroup>,
    pos_frequencies: BTreeMap<PosCategory, usize>,
    pos_words: BTreeMap<PosCategory, Vec<String>>,
    figures_of_speech: Vec<FigureMatch>,
    tone: ToneReport,
    degraded: bool,
    notes: Vec<AnalysisNote>,
}

impl AnalysisReport {
    /// Compose the report from per-component results for `poem`.
    pub fn compose(poem: &Poem, parts: ReportParts) -> Self {
        let mut notes: Vec<AnalysisNote> = poem
            .lines()
            .filter(|line| line.key_origin == Some(KeyOrigin::Approximated))
            .filter_map(|line| {
                line.end_token().map(|t| AnalysisNote::MissingPronunciation {
                    line: line.index,
                    word: t.normalized.clone(),
                })
            })
            .collect();
        notes.extend(parts.tag_failures.into_iter().map(AnalysisNote::from));
        notes.extend(parts.score_failures.into_iter().map(AnalysisNote::from));
        notes.sort_by_key(AnalysisNote::line);

        let pos_words = PosCategory::all()
            .iter()
            .map(|&c| (c, parts.frequencies.words(c).map(str::to_string).collect()))
            .collect();

        Self {
            line_count: poem.line_count(),
            word_count: poem.word_count(),
            stanza_count: poem.stanzas().len(),
            snippet_preview: snippet(poem.text()),
            rhyme_scheme: parts.scheme.to_string(),
            rhyme_letters: parts.scheme.letters().to_vec(),
            rhyme_scheme_by_stanza: parts.scheme.by_stanza(poem),
            rhyme_groups: parts.scheme.groups().to_vec(),
            pos_frequencies: parts.frequencies.counts().clone(),
            pos_words,
            figures_of_speech: parts.figures,
            tone: parts.tone,
            degraded: !notes.is_empty(),
            notes,
        }
    }

    /// Report for empty or whitespace-only input.
    pub fn empty() -> Self {
        Self::compose(&Poem::default(), ReportParts::default())
    }

    /// Number of non-blank lines.
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// Number of word tokens.
    pub const fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of stanzas.
    pub const fn stanza_count(&self) -> usize {
        self.stanza_count
    }

    /// Opening of the poem, truncated with `...`.
    pub fn snippet_preview(&self) -> &str {
        &self.snippet_preview
    }

    /// Scheme letters concatenated, e.g. `ABAB`.
    pub fn rhyme_scheme(&self) -> &str {
        &self.rhyme_scheme
    }

    /// One scheme letter per non-blank line.
    pub fn rhyme_letters(&self) -> &[String] {
        &self.rhyme_letters
    }

    /// Scheme split at stanza boundaries, e.g. `ABAB CDCD`.
    pub fn rhyme_scheme_by_stanza(&self) -> &str {
        &self.rhyme_scheme_by_stanza
    }

    /// Rhyme groups in order of first appearance.
    pub fn rhyme_groups(&self) -> &[RhymeGroup] {
        &self.rhyme_groups
    }

    /// Count per part-of-speech category.
    pub const fn pos_frequencies(&self) -> &BTreeMap<PosCategory, usize> {
        &self.pos_frequencies
    }

    /// Sorted distinct words per category.
    pub const fn pos_words(&self) -> &BTreeMap<PosCategory, Vec<String>> {
        &self.pos_words
    }

    /// Figures of speech ordered by line, position and kind.
    pub fn figures_of_speech(&self) -> &[FigureMatch] {
        &self.figures_of_speech
    }

    /// Whole-poem and per-stanza tone.
    pub const fn tone(&self) -> &ToneReport {
        &self.tone
    }

    /// Whether any field used a fallback value.
    pub const fn degraded(&self) -> bool {
        self.degraded
    }

    /// Data gaps behind the degraded flag.
    pub fn notes(&self) -> &[AnalysisNote] {
        &self.notes
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn snippet(text: &str) -> String {
    let text = text.trim();
    let mut chars = text.char_indices();
    match chars.nth(SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
