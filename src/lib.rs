// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod filter;
pub mod logging;
pub mod pipeline;
pub mod trigger;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::cli::{CliArgs, EventKindArg};
use crate::config::loader::load_and_validate;
use crate::errors::{Result, bail};
use crate::pipeline::plan::Plan;
use crate::pipeline::runner::run_plan;
use crate::trigger::event::{EventKind, TriggerEvent, read_changed_list};
use crate::trigger::gate::{Admission, TriggerGate};

/// Outcome of one invocation, as seen by `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failed,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - trigger admission (branch allow-list, ignore globs)
/// - plan evaluation (filters + guards)
/// - sequential execution (unless --dry-run)
pub async fn run(args: CliArgs) -> Result<RunStatus> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let event = event_from_args(&args)?;
    let gate = TriggerGate::from_config(&cfg.trigger)?;

    match gate.admit(&event) {
        Admission::Reject(reason) => {
            info!(?reason, "event not admitted; nothing to run");
            return Ok(RunStatus::Success);
        }
        Admission::Fire => {}
    }

    let plan = Plan::evaluate(&cfg, &event)?;

    if args.dry_run {
        print_plan(&plan);
        return Ok(RunStatus::Success);
    }

    let report = run_plan(&plan).await;

    if report.success() {
        info!("pipeline run succeeded");
        Ok(RunStatus::Success)
    } else {
        warn!("pipeline run failed");
        Ok(RunStatus::Failed)
    }
}

/// Build the trigger event from CLI arguments.
fn event_from_args(args: &CliArgs) -> Result<TriggerEvent> {
    let mut paths = args.changed.clone();
    if let Some(list) = &args.changed_list {
        paths.extend(read_changed_list(list)?);
    }

    let kind = match args.event {
        EventKindArg::Push => {
            let Some(branch) = &args.branch else {
                bail!("--branch is required for push events");
            };
            EventKind::Push {
                branch: branch.clone(),
            }
        }
        EventKindArg::PullRequest => EventKind::PullRequest,
    };

    Ok(TriggerEvent::new(kind, paths))
}

/// Dry-run output: filter results plus one line per step decision.
fn print_plan(plan: &Plan) {
    println!("changegate dry-run");
    println!();

    println!("filters:");
    for (label, matched) in plan.filters.iter() {
        println!("  {label} = {matched}");
    }
    println!();

    println!("steps ({}):", plan.entries.len());
    for entry in &plan.entries {
        let decision = if entry.will_run() { "run" } else { "skip" };
        println!("  - {} [{}]", entry.step.name, decision);
        println!("      cmd: {}", entry.step.cmd);
        if let Some(guard) = &entry.step.guard {
            println!("      guard: {}", guard.text);
        }
        if !entry.step.after.is_empty() {
            println!("      after: {:?}", entry.step.after);
        }
        if !entry.step.requires_env.is_empty() {
            println!("      requires_env: {:?}", entry.step.requires_env);
        }
    }
}
