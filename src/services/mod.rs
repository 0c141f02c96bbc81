//! Host-side services built on the analysis engine.
//!
//! The engine itself is synchronous and stateless; these services add the
//! background scheduling and spell checking a host application needs.

pub mod session;
pub mod spelling;
