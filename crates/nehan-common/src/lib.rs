//! Common utilities for the nehan layout engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Warning System** - deduplicated diagnostics for values the engine
//!   had to ignore

pub mod warning;
