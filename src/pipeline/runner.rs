// src/pipeline/runner.rs

use std::collections::HashMap;

use tracing::{error, info, warn};

use crate::exec::command::{CommandOutcome, run_step_command};
use crate::pipeline::plan::{Decision, Plan};
use crate::pipeline::step::Step;

/// Terminal state of one step after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Command exited zero.
    Succeeded,
    /// Command exited non-zero (exit code, or -1 when unavailable).
    Failed(i32),
    /// Guard was false; never started. Counts as success for aggregation.
    Skipped,
    /// An `after` dependency failed or was blocked; never started.
    Blocked { dependency: String },
    /// A variable in `requires_env` was missing; the command never spawned.
    MissingEnv { variable: String },
}

impl StepStatus {
    /// Whether this status satisfies a dependent's `after` edge.
    ///
    /// Skipped counts as satisfied, matching exit-status aggregation where
    /// skipped steps are treated as success.
    pub fn satisfies_dependents(&self) -> bool {
        matches!(self, StepStatus::Succeeded | StepStatus::Skipped)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StepStatus::Failed(_) | StepStatus::MissingEnv { .. })
    }
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: String,
    pub status: StepStatus,
}

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
}

impl RunReport {
    /// Logical AND over executed steps' exit statuses; skipped steps count
    /// as success. A blocked step implies its dependency already failed, so
    /// checking executed failures is sufficient.
    pub fn success(&self) -> bool {
        !self.steps.iter().any(|step| step.status.is_failure())
    }

    pub fn status_of(&self, name: &str) -> Option<&StepStatus> {
        self.steps
            .iter()
            .find(|step| step.name == name)
            .map(|step| &step.status)
    }
}

/// Run the plan strictly sequentially.
///
/// Each step runs to completion (or is skipped/blocked) before the next is
/// considered; nothing runs concurrently with anything else. A failure does
/// not abort the loop: it blocks exactly the failed step's transitive
/// `after` dependents, while unrelated later steps still run.
pub async fn run_plan(plan: &Plan) -> RunReport {
    let mut statuses: HashMap<String, StepStatus> = HashMap::new();
    let mut reports = Vec::with_capacity(plan.entries.len());

    for entry in &plan.entries {
        let step = &entry.step;

        let status = if entry.decision == Decision::Skip {
            info!(step = %step.name, "step skipped (guard false)");
            StepStatus::Skipped
        } else if let Some(dependency) = first_unsatisfied_dep(step, &statuses) {
            warn!(step = %step.name, dependency = %dependency, "step blocked by failed dependency");
            StepStatus::Blocked { dependency }
        } else if let Some(variable) = first_missing_env(step) {
            warn!(step = %step.name, variable = %variable, "required environment variable missing; failing step");
            StepStatus::MissingEnv { variable }
        } else {
            match run_step_command(step).await {
                Ok(CommandOutcome::Success) => StepStatus::Succeeded,
                Ok(CommandOutcome::Failed(code)) => {
                    warn!(step = %step.name, exit_code = code, "step failed");
                    StepStatus::Failed(code)
                }
                Err(err) => {
                    error!(step = %step.name, error = %err, "step execution error");
                    StepStatus::Failed(-1)
                }
            }
        };

        statuses.insert(step.name.clone(), status.clone());
        reports.push(StepReport {
            name: step.name.clone(),
            status,
        });
    }

    RunReport { steps: reports }
}

/// First `after` dependency that does not satisfy this step, if any.
fn first_unsatisfied_dep(step: &Step, statuses: &HashMap<String, StepStatus>) -> Option<String> {
    for dep in &step.after {
        match statuses.get(dep) {
            Some(status) if status.satisfies_dependents() => {}
            Some(_) => return Some(dep.clone()),
            None => {
                // Validation requires `after` to name an earlier step, so a
                // missing status should not happen; treat it as unsatisfied.
                warn!(step = %step.name, dependency = %dep, "dependency has no recorded status");
                return Some(dep.clone());
            }
        }
    }
    None
}

/// First `requires_env` variable that is absent or empty, if any.
///
/// Variables supplied through the step's own `env` table count as present.
fn first_missing_env(step: &Step) -> Option<String> {
    step.requires_env
        .iter()
        .find(|var| {
            if step.env.contains_key(var.as_str()) {
                return false;
            }
            match std::env::var(var.as_str()) {
                Ok(value) => value.is_empty(),
                Err(_) => true,
            }
        })
        .cloned()
}
