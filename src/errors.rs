// src/errors.rs

//! Crate-wide error aliases.
//!
//! Everything error-shaped in this crate flows through `anyhow`; importing
//! from here keeps call sites uniform and gives a single place to introduce
//! structured error types if that ever becomes necessary.

pub use anyhow::{Context, Error, Result, anyhow, bail};
