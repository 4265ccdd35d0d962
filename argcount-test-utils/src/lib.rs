//! Test utilities shared across the argcount workspace
//!
//! This crate drives the `argcount` binary from on-disk fixture directories:
//! - Fixture loading ([`FixtureCase`], [`load_cases`])
//! - Case filtering ([`Selection`])
//! - Running and reporting ([`CaseReport`], [`Summary`])
//! - Scratch fixture roots for tests ([`FixtureRootGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod fixture;
pub mod guard;
pub mod runner;
pub mod selection;

// Re-export commonly used items
pub use fixture::{FixtureCase, FixtureError, load_cases};
pub use guard::FixtureRootGuard;
pub use runner::{CASE_TIMEOUT, CaseReport, Mismatch, Summary};
pub use selection::{HELP_TEXT, Selection};
