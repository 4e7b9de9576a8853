// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs the commands defined in the steps, using `tokio::process::Command`,
//! and maps their exit statuses back to the pipeline runner. Steps are
//! opaque external collaborators here: the command is spawned with fixed
//! arguments and judged only by its exit status.

pub mod command;

pub use command::{CommandOutcome, run_step_command};
