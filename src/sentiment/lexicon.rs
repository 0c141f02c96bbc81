//! Valence-lexicon sentiment scorer in the style of VADER.

use std::collections::HashMap;
use std::path::Path;

use super::{PolarityScores, SentimentScorer};
use crate::constants::tone;
use crate::error::{Error, Result};
use crate::poem::Token;

/// Lexicon shipped with the crate.
const BUILTIN_LEXICON: &str = include_str!("../../data/sentiment-lexicon.tsv");

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nor", "none", "nothing", "nobody", "neither", "nowhere", "cannot",
    "without", "ain't", "nae",
];

const BOOSTERS: &[&str] = &[
    "absolutely", "completely", "deeply", "so", "very", "extremely", "entirely", "incredibly",
    "really", "truly", "utterly", "most", "totally", "ever", "such", "too",
];

const DAMPENERS: &[&str] = &[
    "barely", "hardly", "slightly", "somewhat", "scarcely", "partly", "marginally", "almost",
    "little", "less",
];

/// Booster strength by distance from the word it modifies.
const DISTANCE_SCALE: [f64; tone::LOOKBACK] = [1.0, 0.95, 0.9];

/// Scorer summing word valences with booster, negation and contrast rules.
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer {
    valences: HashMap<String, f64>,
}

impl LexiconScorer {
    /// Parse `word<TAB>valence[<TAB>...]` lines; extra columns are ignored.
    pub fn parse(text: &str) -> Self {
        let valences = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let mut cols = line.split('\t');
                let word = cols.next()?.trim();
                let valence = cols.next()?.trim().parse::<f64>().ok()?;
                Some((word.to_lowercase(), valence))
            })
            .collect();
        Self { valences }
    }

    /// The lexicon embedded in the crate.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_LEXICON)
    }

    /// Load a lexicon file, refusing files without any entries.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let scorer = Self::parse(&text);
        if scorer.is_empty() {
            return Err(Error::parse("no valences found", path.to_path_buf()));
        }
        tracing::info!("Loaded {} sentiment valences from {}", scorer.len(), path.display());
        Ok(scorer)
    }

    /// Number of words with a valence.
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    /// Whether the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    /// Valence of a lowercase word.
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    /// One adjusted valence per word, zero for words without one.
    fn word_valences(&self, text: &str) -> Vec<f64> {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| Token::new(w).normalized)
            .filter(|w| !w.is_empty())
            .collect();

        let mut valences: Vec<f64> = words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let Some(mut valence) = self.valence(word) else {
                    return 0.0;
                };
                let preceding = words[..i].iter().rev().take(tone::LOOKBACK);
                for (distance, prev) in preceding.enumerate() {
                    let prev = prev.as_str();
                    let scale = DISTANCE_SCALE[distance];
                    if BOOSTERS.contains(&prev) {
                        valence += valence.signum() * tone::BOOSTER_INCREMENT * scale;
                    } else if DAMPENERS.contains(&prev) {
                        valence -= valence.signum() * tone::BOOSTER_INCREMENT * scale;
                    }
                }
                if words[..i]
                    .iter()
                    .rev()
                    .take(tone::LOOKBACK)
                    .any(|w| is_negation(w))
                {
                    valence *= tone::NEGATION_SCALAR;
                }
                valence
            })
            .collect();

        // contrast: "but" shifts weight to the clause after it
        if let Some(pivot) = words.iter().position(|w| w == "but") {
            for (i, valence) in valences.iter_mut().enumerate() {
                *valence *= if i < pivot { 0.5 } else { 1.5 };
            }
        }
        valences
    }

    fn emphasis(text: &str, sum: f64) -> f64 {
        let marks = text.matches('!').count().min(tone::MAX_EXCLAMATIONS);
        sum.signum() * marks as f64 * tone::EXCLAMATION_INCREMENT
    }
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

/// Squash an unbounded valence sum into `[-1, 1]`.
fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + tone::NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64> {
        let valences = self.word_valences(text);
        let sum: f64 = valences.iter().sum();
        if sum == 0.0 {
            return Ok(0.0);
        }
        Ok(normalize(sum + Self::emphasis(text, sum)))
    }

    fn breakdown(&self, text: &str) -> Option<PolarityScores> {
        let valences = self.word_valences(text);
        if valences.is_empty() {
            return None;
        }
        let sum: f64 = valences.iter().sum();
        let emphasis = Self::emphasis(text, sum);

        let mut positive: f64 = valences.iter().filter(|&&v| v > 0.0).map(|v| v + 1.0).sum();
        let mut negative: f64 = valences.iter().filter(|&&v| v < 0.0).map(|v| v - 1.0).sum();
        let neutral = valences.iter().filter(|&&v| v == 0.0).count() as f64;
        if positive > negative.abs() {
            positive += emphasis.abs();
        } else if positive < negative.abs() {
            negative -= emphasis.abs();
        }

        let total = positive + negative.abs() + neutral;
        let compound = if sum == 0.0 { 0.0 } else { normalize(sum + emphasis) };
        Some(PolarityScores {
            positive: positive / total,
            neutral: neutral / total,
            negative: negative.abs() / total,
            compound,
        })
    }

    fn is_available(&self) -> bool {
        !self.is_empty()
    }

    fn name(&self) -> &'static str {
        "LexiconScorer"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn score(text: &str) -> f64 {
        LexiconScorer::builtin().score(text).unwrap()
    }

    #[test]
    fn test_positive_with_booster() {
        let s = score("I am so happy and joyful today");
        assert!(s >= 0.05, "score {s}");
        assert!((s - 0.846).abs() < 0.01, "score {s}");
    }

    #[test]
    fn test_neutral_and_empty() {
        assert!(score("The table stands by the door").abs() < f64::EPSILON);
        assert!(score("").abs() < f64::EPSILON);
    }

    #[test]
    fn test_negation_flips() {
        assert!(score("I am happy") > 0.0);
        assert!(score("I am not happy") < 0.0);
        assert!(score("I don't love the rain") < 0.0);
    }

    #[test]
    fn test_but_shifts_weight() {
        // "sad" before "but" is halved, "hope" after it is boosted
        assert!(score("I was sad but there is hope") > 0.0);
    }

    #[test]
    fn test_exclamation_adds_emphasis() {
        assert!(score("what joy!!!") > score("what joy"));
        assert!(score("what grief!!!") < score("what grief"));
    }

    #[test]
    fn test_scores_stay_in_range() {
        let s = score("love love love joy joy bliss delight glory freedom rejoice!!!!!!");
        assert!(s <= 1.0 && s > 0.9);
    }

    #[test]
    fn test_breakdown_proportions_sum_to_one() {
        let b = LexiconScorer::builtin().breakdown("sweet sorrow of the night").unwrap();
        assert!((b.positive + b.neutral + b.negative - 1.0).abs() < 1e-9);
        assert!(b.negative > 0.0 && b.positive > 0.0);
    }

    #[test]
    fn test_parse_vader_layout() {
        let scorer = LexiconScorer::parse("joy\t2.8\t0.7\t[3, 2]\nbad line\n#c\t1\n");
        assert_eq!(scorer.len(), 1);
        assert!((scorer.valence("joy").unwrap() - 2.8).abs() < 1e-9);
    }
}
