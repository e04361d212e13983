//! Test helpers shared across the `optbind` crates.
//!
//! Option resolution falls back to process environment variables, so tests
//! that exercise it need to set and clear variables without racing each
//! other. The [`env`] module provides guards for that.

pub mod env;
