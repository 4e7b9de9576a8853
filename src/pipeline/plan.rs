// src/pipeline/plan.rs

use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::filter::rules::{FilterOutcome, FilterSet};
use crate::pipeline::step::Step;
use crate::trigger::event::TriggerEvent;

/// Gate decision for a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Run,
    /// The step's guard evaluated false for this event. Skipped steps are
    /// not run and not failed.
    Skip,
}

/// One step together with its gate decision.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub step: Step,
    pub decision: Decision,
}

impl PlanEntry {
    pub fn will_run(&self) -> bool {
        self.decision == Decision::Run
    }
}

/// Ordered execution plan for one admitted event.
///
/// Entries keep the declared step order regardless of which of them are
/// skipped; the filter outcome is computed exactly once, before any guard
/// is read, and is shared by every guard.
#[derive(Debug, Clone)]
pub struct Plan {
    pub filters: FilterOutcome,
    pub entries: Vec<PlanEntry>,
}

impl Plan {
    /// Evaluate the filter rules against the event and gate every step.
    ///
    /// Guards are independent per step: a later step may gate on a
    /// different filter than an earlier one.
    pub fn evaluate(cfg: &ConfigFile, event: &TriggerEvent) -> Result<Self> {
        let filter_set = FilterSet::from_config(&cfg.filter)?;
        let filters = filter_set.evaluate(event.changed_paths());

        let mut entries = Vec::with_capacity(cfg.steps.len());
        for step_cfg in &cfg.steps {
            let step = Step::from_config(step_cfg)?;
            let decision = match &step.guard {
                Some(guard) if !guard.expr.eval(&filters) => Decision::Skip,
                _ => Decision::Run,
            };
            debug!(step = %step.name, ?decision, "step gated");
            entries.push(PlanEntry { step, decision });
        }

        Ok(Plan { filters, entries })
    }

    /// Names of the steps that will execute, in order.
    pub fn executed_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.will_run())
            .map(|entry| entry.step.name.as_str())
            .collect()
    }
}
