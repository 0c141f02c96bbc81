//! Tone scoring.
//!
//! Each line is scored on its own; stanza scores average their lines and
//! the poem score averages its stanzas. A line the scorer fails on counts
//! as neutral and is recorded so the report can flag degraded mode.

mod lexicon;

pub use lexicon::LexiconScorer;

use serde::Serialize;

use crate::error::Result;
use crate::poem::Poem;
use crate::types::ToneLabel;

/// Proportions of positive, neutral and negative weight in a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarityScores {
    /// Share of positive weight.
    pub positive: f64,
    /// Share of neutral words.
    pub neutral: f64,
    /// Share of negative weight.
    pub negative: f64,
    /// Normalized compound score in `[-1, 1]`.
    pub compound: f64,
}

/// Trait for lexicon-based polarity scorers.
pub trait SentimentScorer: Send + Sync {
    /// Compound score of a text in `[-1, 1]`.
    fn score(&self, text: &str) -> Result<f64>;

    /// Positive/neutral/negative proportions, when the scorer can tell.
    fn breakdown(&self, _text: &str) -> Option<PolarityScores> {
        None
    }

    /// Whether the scorer has any data at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Get the name of this scorer (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// A compound score with its derived label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToneScore {
    /// Compound score in `[-1, 1]`.
    pub score: f64,
    /// Label derived from the fixed thresholds.
    pub label: ToneLabel,
}

impl ToneScore {
    /// Wrap a score, labelling it.
    pub fn new(score: f64) -> Self {
        Self {
            score,
            label: ToneLabel::from_score(score),
        }
    }

    /// The neutral default used for empty input and failed lines.
    pub fn neutral() -> Self {
        Self::new(0.0)
    }
}

impl Default for ToneScore {
    fn default() -> Self {
        Self::neutral()
    }
}

/// A line the scorer failed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreFailure {
    /// Poem-wide line index.
    pub line: usize,
    /// Error reported by the scorer.
    pub message: String,
}

/// Whole-poem and per-stanza tone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToneReport {
    /// Average of the stanza scores.
    pub overall: ToneScore,
    /// One score per stanza, in order.
    pub stanzas: Vec<ToneScore>,
    /// Proportions for the whole poem text.
    pub breakdown: Option<PolarityScores>,
}

impl ToneReport {
    /// Score every line and aggregate upwards.
    pub fn score(poem: &Poem, scorer: &dyn SentimentScorer) -> (Self, Vec<ScoreFailure>) {
        let mut failures = Vec::new();

        let stanzas: Vec<ToneScore> = poem
            .stanzas()
            .iter()
            .map(|stanza| {
                let lines: Vec<f64> = stanza
                    .lines
                    .iter()
                    .map(|line| match scorer.score(&line.text) {
                        Ok(s) if s.is_finite() => s.clamp(-1.0, 1.0),
                        Ok(s) => {
                            failures.push(ScoreFailure {
                                line: line.index,
                                message: format!("non-finite score {s}"),
                            });
                            0.0
                        }
                        Err(e) => {
                            tracing::debug!("{} failed on line {}: {e}", scorer.name(), line.index);
                            failures.push(ScoreFailure {
                                line: line.index,
                                message: e.to_string(),
                            });
                            0.0
                        }
                    })
                    .collect();
                ToneScore::new(mean(&lines))
            })
            .collect();

        let overall = ToneScore::new(mean(&stanzas.iter().map(|s| s.score).collect::<Vec<_>>()));
        let breakdown = if poem.is_empty() {
            None
        } else {
            scorer.breakdown(poem.text())
        };

        (
            Self {
                overall,
                stanzas,
                breakdown,
            },
            failures,
        )
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::error::Error;
    use crate::phonetics::CmuDict;

    /// Scores 1.0 for lines mentioning the sun, fails on lines mentioning fog.
    struct WeatherScorer;

    impl SentimentScorer for WeatherScorer {
        fn score(&self, text: &str) -> Result<f64> {
            if text.contains("fog") {
                return Err(Error::collaborator("sentiment scorer", "cannot see"));
            }
            Ok(if text.contains("sun") { 1.0 } else { -0.5 })
        }

        fn name(&self) -> &'static str {
            "WeatherScorer"
        }
    }

    fn poem(text: &str) -> Poem {
        Poem::parse(text, &CmuDict::builtin())
    }

    #[test]
    fn test_stanza_and_poem_averages() {
        let p = poem("the sun\nthe rain\n\nthe sun");
        let (tone, failures) = ToneReport::score(&p, &WeatherScorer);
        assert!(failures.is_empty());
        assert!((tone.stanzas[0].score - 0.25).abs() < 1e-9);
        assert!((tone.stanzas[1].score - 1.0).abs() < 1e-9);
        assert!((tone.overall.score - 0.625).abs() < 1e-9);
        assert_eq!(tone.overall.label, ToneLabel::Positive);
        assert!(tone.breakdown.is_none());
    }

    #[test]
    fn test_failed_line_is_neutral() {
        let p = poem("the sun\nthe fog");
        let (tone, failures) = ToneReport::score(&p, &WeatherScorer);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].line, 1);
        assert!((tone.overall.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_poem_is_neutral() {
        let (tone, failures) = ToneReport::score(&poem(""), &LexiconScorer::builtin());
        assert!(failures.is_empty());
        assert_eq!(tone.overall.label, ToneLabel::Neutral);
        assert!(tone.stanzas.is_empty());
        assert!(tone.breakdown.is_none());
    }

    #[test]
    fn test_lexicon_scorer_provides_breakdown() {
        let (tone, _) = ToneReport::score(&poem("I am so happy and joyful today"), &LexiconScorer::builtin());
        assert_eq!(tone.overall.label, ToneLabel::Positive);
        assert!(tone.breakdown.unwrap().positive > 0.0);
    }
}
