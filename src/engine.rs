//! Analysis entry point.
//!
//! Collaborators are passed in explicitly through an [`AnalysisContext`];
//! nothing is cached process-wide. [`analyze`] is a pure function of the text
//! and the context.

use std::fmt;
use std::sync::Arc;

use crate::config::{clamp_window, Config};
use crate::constants::{figures, rhyme};
use crate::error::{Error, Result};
use crate::figures::FigureDetector;
use crate::phonetics::{CmuDict, PronunciationSource};
use crate::poem::Poem;
use crate::pos::{LexiconTagger, PosFrequencies, PosTagger, TaggedPoem};
use crate::report::{AnalysisReport, ReportParts};
use crate::rhyme::RhymeScheme;
use crate::sentiment::{LexiconScorer, SentimentScorer, ToneReport};

/// Tunable heuristic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSettings {
    /// Maximum phonetic distance for two end words to rhyme.
    pub rhyme_tolerance: u32,
    /// Alliteration window size in tokens.
    pub alliteration_window: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            rhyme_tolerance: rhyme::DEFAULT_TOLERANCE,
            alliteration_window: figures::DEFAULT_ALLITERATION_WINDOW,
        }
    }
}

/// Collaborator handles and settings for one or more analyses.
#[derive(Clone)]
pub struct AnalysisContext {
    pronunciation: Arc<dyn PronunciationSource>,
    tagger: Arc<dyn PosTagger>,
    scorer: Arc<dyn SentimentScorer>,
    settings: AnalysisSettings,
}

impl fmt::Debug for AnalysisContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisContext")
            .field("pronunciation", &self.pronunciation.name())
            .field("tagger", &self.tagger.name())
            .field("scorer", &self.scorer.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl AnalysisContext {
    /// Create a context from explicit collaborators.
    pub fn new(
        pronunciation: Arc<dyn PronunciationSource>,
        tagger: Arc<dyn PosTagger>,
        scorer: Arc<dyn SentimentScorer>,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            pronunciation,
            tagger,
            scorer,
            settings,
        }
    }

    /// The built-in dictionary, tagger and scorer with default settings.
    pub fn builtin() -> Self {
        Self::new(
            Arc::new(CmuDict::builtin()),
            Arc::new(LexiconTagger::builtin()),
            Arc::new(LexiconScorer::builtin()),
            AnalysisSettings::default(),
        )
    }

    /// Build a context from configuration, loading any configured data files.
    ///
    /// A configured file that is missing or empty makes its collaborator
    /// unavailable, which is refused here rather than degrading every line.
    pub fn from_config(config: &Config) -> Result<Self> {
        let pronunciation: Arc<dyn PronunciationSource> = match &config.cmudict_path {
            Some(path) => Arc::new(CmuDict::load(path).map_err(|e| {
                tracing::warn!("Failed to load pronunciation dictionary: {e}");
                Error::unavailable("pronunciation dictionary")
            })?),
            None => Arc::new(CmuDict::builtin()),
        };

        let mut tagger = LexiconTagger::builtin();
        if let Some(path) = &config.pos_lexicon_path {
            let extra = LexiconTagger::load(path).map_err(|e| {
                tracing::warn!("Failed to load tagger lexicon: {e}");
                Error::unavailable("part-of-speech tagger")
            })?;
            tagger = tagger.merged_with(extra);
        }

        let scorer: Arc<dyn SentimentScorer> = match &config.sentiment_lexicon_path {
            Some(path) => Arc::new(LexiconScorer::load(path).map_err(|e| {
                tracing::warn!("Failed to load sentiment lexicon: {e}");
                Error::unavailable("sentiment scorer")
            })?),
            None => Arc::new(LexiconScorer::builtin()),
        };

        let settings = AnalysisSettings {
            rhyme_tolerance: config.rhyme_tolerance,
            alliteration_window: clamp_window(config.alliteration_window),
        };
        tracing::debug!("Analysis settings: {settings:?}");

        Ok(Self::new(pronunciation, Arc::new(tagger), scorer, settings))
    }

    /// Refuse early when a collaborator has no data at all.
    pub fn ensure_available(&self) -> Result<()> {
        if !self.pronunciation.is_available() {
            return Err(Error::unavailable("pronunciation dictionary"));
        }
        if !self.tagger.is_available() {
            return Err(Error::unavailable("part-of-speech tagger"));
        }
        if !self.scorer.is_available() {
            return Err(Error::unavailable("sentiment scorer"));
        }
        Ok(())
    }

    /// The pronunciation source.
    pub fn pronunciation(&self) -> &dyn PronunciationSource {
        self.pronunciation.as_ref()
    }

    /// The part-of-speech tagger.
    pub fn tagger(&self) -> &dyn PosTagger {
        self.tagger.as_ref()
    }

    /// The sentiment scorer.
    pub fn scorer(&self) -> &dyn SentimentScorer {
        self.scorer.as_ref()
    }

    /// Heuristic settings.
    pub const fn settings(&self) -> AnalysisSettings {
        self.settings
    }

    /// Copy of this context with different settings.
    #[must_use]
    pub fn with_settings(&self, settings: AnalysisSettings) -> Self {
        Self {
            pronunciation: Arc::clone(&self.pronunciation),
            tagger: Arc::clone(&self.tagger),
            scorer: Arc::clone(&self.scorer),
            settings,
        }
    }
}

/// Analyze one poem snapshot.
///
/// Only an entirely unavailable collaborator is an error. Empty or
/// whitespace-only text yields an empty-shaped report.
pub fn analyze(text: &str, ctx: &AnalysisContext) -> Result<AnalysisReport> {
    ctx.ensure_available()?;

    if text.trim().is_empty() {
        tracing::debug!("Empty input, returning empty report");
        return Ok(AnalysisReport::empty());
    }

    let settings = ctx.settings();
    let poem = Poem::parse(text, ctx.pronunciation());

    let scheme = RhymeScheme::assign(poem.lines(), settings.rhyme_tolerance);
    tracing::debug!("Rhyme scheme: {scheme}");

    let tagged = TaggedPoem::tag(&poem, ctx.tagger());
    let frequencies = PosFrequencies::build(&poem, &tagged);
    let figures = FigureDetector::with_defaults(settings.alliteration_window).detect(&poem, &tagged);
    let (tone, score_failures) = ToneReport::score(&poem, ctx.scorer());
    tracing::debug!("Overall tone: {} ({:.3})", tone.overall.label, tone.overall.score);

    let parts = ReportParts {
        scheme,
        frequencies,
        figures,
        tone,
        tag_failures: tagged.failures().to_vec(),
        score_failures,
    };
    Ok(AnalysisReport::compose(&poem, parts))
}
