//! `LitLoom` - poem analysis engine.
//!
//! Given the text of a poem, this crate computes its rhyme scheme, part of
//! speech frequencies, figures of speech (simile, metaphor, alliteration) and
//! overall tone, and composes them into an immutable [`AnalysisReport`].
//!
//! ```no_run
//! use litloom::{analyze, AnalysisContext};
//!
//! let ctx = AnalysisContext::builtin();
//! let report = analyze("The cat sat on the mat\nThe dog ran to the fog", &ctx)?;
//! assert_eq!(report.rhyme_scheme(), "AA");
//! # Ok::<(), litloom::error::Error>(())
//! ```

// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod figures;
pub mod phonetics;
pub mod poem;
pub mod pos;
pub mod report;
pub mod rhyme;
pub mod sentiment;
pub mod services;
pub mod types;

pub use engine::{analyze, AnalysisContext, AnalysisSettings};
pub use report::AnalysisReport;
