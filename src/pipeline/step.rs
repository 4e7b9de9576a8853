// src/pipeline/step.rs

use std::collections::BTreeMap;

use crate::config::model::StepConfig;
use crate::errors::{Context, Result};
use crate::filter::guard::Guard;

/// A step guard: the compiled expression plus the text it was parsed from
/// (kept for plan output).
#[derive(Debug, Clone)]
pub struct StepGuard {
    pub text: String,
    pub expr: Guard,
}

/// Runtime form of a configured step.
#[derive(Debug, Clone)]
pub struct Step {
    pub name: String,
    pub cmd: String,
    pub guard: Option<StepGuard>,
    pub after: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub requires_env: Vec<String>,
}

impl Step {
    /// Build a step from its config entry, compiling the guard.
    ///
    /// Guards were already checked during config validation; this re-parse
    /// keeps `Step` constructible from a bare `StepConfig` in tests.
    pub fn from_config(cfg: &StepConfig) -> Result<Self> {
        let guard = match &cfg.guard {
            Some(text) => {
                let expr = Guard::parse(text)
                    .with_context(|| format!("parsing guard for step '{}'", cfg.name))?;
                Some(StepGuard {
                    text: text.clone(),
                    expr,
                })
            }
            None => None,
        };

        Ok(Step {
            name: cfg.name.clone(),
            cmd: cfg.cmd.clone(),
            guard,
            after: cfg.after.clone(),
            env: cfg.env.clone(),
            requires_env: cfg.requires_env.clone(),
        })
    }
}
