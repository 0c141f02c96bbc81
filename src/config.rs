//! Engine configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::{figures, rhyme};
use crate::error::Result;

/// Configuration for the engine and its built-in collaborators.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// CMU pronouncing dictionary to load instead of the built-in one
    pub cmudict_path: Option<PathBuf>,
    /// VADER-format sentiment lexicon to load instead of the built-in one
    pub sentiment_lexicon_path: Option<PathBuf>,
    /// Extra tagger entries merged over the built-in lexicon
    pub pos_lexicon_path: Option<PathBuf>,
    /// Extra spelling words merged over the bundled word list
    pub wordlist_path: Option<PathBuf>,
    /// Maximum phonetic distance for fuzzy rhymes
    pub rhyme_tolerance: u32,
    /// Alliteration sliding window size
    pub alliteration_window: usize,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            cmudict_path: None,
            sentiment_lexicon_path: None,
            pos_lexicon_path: None,
            wordlist_path: None,
            rhyme_tolerance: rhyme::DEFAULT_TOLERANCE,
            alliteration_window: figures::DEFAULT_ALLITERATION_WINDOW,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        // Dictionary: env var override, or a downloaded copy in the data dir
        config.cmudict_path = path_var("LITLOOM_CMUDICT").or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("litloom").join("cmudict.dict"))
                .filter(|p| p.is_file())
        });
        config.sentiment_lexicon_path = path_var("LITLOOM_SENTIMENT_LEXICON");
        config.pos_lexicon_path = path_var("LITLOOM_POS_LEXICON");
        config.wordlist_path = path_var("LITLOOM_WORDLIST");

        if let Some(tolerance) = parsed_var::<u32>("LITLOOM_RHYME_TOLERANCE") {
            config.rhyme_tolerance = tolerance;
        }

        if let Some(window) = parsed_var::<usize>("LITLOOM_ALLITERATION_WINDOW") {
            config.alliteration_window = clamp_window(window);
        }

        Ok(config)
    }

    /// Check if any external data file replaces a built-in collaborator
    pub const fn uses_external_data(&self) -> bool {
        self.cmudict_path.is_some()
            || self.sentiment_lexicon_path.is_some()
            || self.pos_lexicon_path.is_some()
            || self.wordlist_path.is_some()
    }
}

/// Read a path variable, expanding `~`.
fn path_var(name: &str) -> Option<PathBuf> {
    let raw = env::var(name).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(PathBuf::from(shellexpand::tilde(raw).to_string()))
}

/// Read and parse a numeric variable, ignoring unparseable values.
fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    raw.trim().parse::<T>().map_or_else(
        |_| {
            tracing::warn!("Ignoring {name}={raw:?}: not a valid number");
            None
        },
        Some,
    )
}

/// Keep the alliteration window within the range the detector supports.
pub(crate) fn clamp_window(window: usize) -> usize {
    let clamped = window.clamp(figures::MIN_ALLITERATION_WINDOW, figures::MAX_ALLITERATION_WINDOW);
    if clamped != window {
        tracing::warn!("Alliteration window {window} out of range, using {clamped}");
    }
    clamped
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.app_name(), "litloom");
        assert_eq!(config.rhyme_tolerance, 2);
        assert_eq!(config.alliteration_window, 5);
        assert!(!config.uses_external_data());
    }

    #[test]
    fn test_wordlist_counts_as_external_data() {
        let config = Config {
            wordlist_path: Some(PathBuf::from("/usr/share/dict/words")),
            ..Config::default()
        };
        assert!(config.uses_external_data());
    }

    #[test]
    fn test_clamp_window() {
        assert_eq!(clamp_window(1), 3);
        assert_eq!(clamp_window(4), 4);
        assert_eq!(clamp_window(50), 8);
    }
}
