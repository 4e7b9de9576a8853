// src/filter/mod.rs

//! Path filter rules and step guards.
//!
//! - [`rules`] compiles the `[filter]` table into globsets and evaluates
//!   them against an event's changed paths.
//! - [`guard`] parses and evaluates the boolean guard expressions steps
//!   carry over those filter results.
//!
//! This module knows nothing about steps or execution; it only turns
//! changed paths into label booleans and label booleans into decisions.

pub mod guard;
pub mod rules;

pub use guard::Guard;
pub use rules::{FilterOutcome, FilterRule, FilterSet, compile_globs};
