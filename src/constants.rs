//! Engine constants.
//!
//! Centralizes heuristic thresholds so the detectors stay readable.

/// Rhyme assignment constants.
pub mod rhyme {
    /// Default maximum phonetic distance for two keys to be fuzzy-equal.
    pub const DEFAULT_TOLERANCE: u32 = 2;

    /// Number of single letters before doubling (A..Z, then AA, BB, ...).
    pub const ALPHABET_LEN: usize = 26;
}

/// Figure-of-speech detection constants.
pub mod figures {
    /// Default alliteration window size in tokens.
    pub const DEFAULT_ALLITERATION_WINDOW: usize = 5;

    /// Smallest accepted alliteration window.
    pub const MIN_ALLITERATION_WINDOW: usize = 3;

    /// Largest accepted alliteration window.
    pub const MAX_ALLITERATION_WINDOW: usize = 8;

    /// Tokens sharing an onset needed to report alliteration.
    pub const ALLITERATION_MIN_SHARED: usize = 3;

    /// Shared onsets at which alliteration is reported with high confidence.
    pub const ALLITERATION_HIGH_SHARED: usize = 4;

    /// Tokens searched after a simile marker for the compared noun.
    pub const SIMILE_REACH: usize = 4;

    /// Maximum words between the two halves of an `as ... as` comparison.
    pub const AS_AS_MAX_GAP: usize = 2;

    /// Modifiers allowed between a copula and the metaphor vehicle.
    pub const METAPHOR_MAX_MODIFIERS: usize = 3;
}

/// Tone classification constants.
pub mod tone {
    /// Scores at or above this are positive.
    pub const POSITIVE_THRESHOLD: f64 = 0.05;

    /// Scores at or below this are negative.
    pub const NEGATIVE_THRESHOLD: f64 = -0.05;

    /// Normalization constant for the compound score.
    pub const NORMALIZATION_ALPHA: f64 = 15.0;

    /// Intensity added by a booster word.
    pub const BOOSTER_INCREMENT: f64 = 0.293;

    /// Multiplier applied to a negated word.
    pub const NEGATION_SCALAR: f64 = -0.74;

    /// Intensity added per exclamation mark.
    pub const EXCLAMATION_INCREMENT: f64 = 0.292;

    /// Exclamation marks that still add emphasis.
    pub const MAX_EXCLAMATIONS: usize = 4;

    /// Preceding words checked for negations and boosters.
    pub const LOOKBACK: usize = 3;
}

/// Report composition constants.
pub mod report {
    /// Characters kept in the snippet preview.
    pub const SNIPPET_CHARS: usize = 200;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for session updates.
    pub const CHANNEL_BUFFER_SIZE: usize = 10;
}

/// Spell checking constants.
pub mod spelling {
    /// Largest edit distance for a suggestion.
    pub const MAX_EDIT_DISTANCE: usize = 2;

    /// Suggestions offered per unknown word.
    pub const DEFAULT_SUGGESTIONS: usize = 5;
}
