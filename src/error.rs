//! Engine error types.
//!
//! Malformed poetic content never produces an error. Only I/O, configuration
//! and a completely unavailable collaborator are surfaced to the caller; a
//! single failed collaborator call is degraded into a report note instead.

use thiserror::Error;

/// Engine result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Engine error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Data file parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// A required collaborator (pronunciation, tagger, scorer) is missing entirely
    #[error("{collaborator} is unavailable. {hint}")]
    CollaboratorUnavailable {
        /// Name of the missing collaborator.
        collaborator: &'static str,
        /// Actionable guidance for installing or configuring it.
        hint: &'static str,
    },

    /// A single collaborator call failed
    #[error("{collaborator} failed: {message}")]
    Collaborator {
        /// Name of the collaborator that failed.
        collaborator: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create an unavailable-collaborator error with a hint matching the collaborator
    pub fn unavailable(collaborator: &'static str) -> Self {
        let hint = match collaborator {
            "pronunciation dictionary" => "Set LITLOOM_CMUDICT to a CMU pronouncing dictionary file",
            "part-of-speech tagger" => "Set LITLOOM_POS_LEXICON to a tagger lexicon file",
            "sentiment scorer" => "Set LITLOOM_SENTIMENT_LEXICON to a VADER-format lexicon file",
            _ => "Check that the collaborator's data files are installed",
        };
        Self::CollaboratorUnavailable { collaborator, hint }
    }

    /// Create a single-call collaborator failure
    pub fn collaborator(collaborator: &'static str, message: impl Into<String>) -> Self {
        Self::Collaborator { collaborator, message: message.into() }
    }

    /// Whether this error must stop an analysis before it begins
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Collaborator { .. })
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}
