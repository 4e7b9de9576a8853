// src/config/validate.rs

use std::collections::HashSet;

use crate::errors::{Context, Result, anyhow};

use crate::config::model::ConfigFile;
use crate::filter::guard::Guard;
use crate::filter::rules::compile_globs;

/// Run semantic validation against a loaded configuration.
///
/// Every rule here fails the run before any step executes. In particular a
/// malformed glob never degrades into "all filters true" or "all filters
/// false"; it is a hard configuration error.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    ensure_has_steps(cfg)?;
    validate_step_names(cfg)?;
    validate_step_dependencies(cfg)?;
    validate_guards(cfg)?;
    validate_patterns(cfg)?;
    Ok(())
}

fn ensure_has_steps(cfg: &ConfigFile) -> Result<()> {
    if cfg.steps.is_empty() {
        return Err(anyhow!("config must contain at least one [[step]] entry"));
    }
    Ok(())
}

fn validate_step_names(cfg: &ConfigFile) -> Result<()> {
    let mut seen = HashSet::new();
    for step in cfg.steps.iter() {
        if step.name.trim().is_empty() {
            return Err(anyhow!("step names must not be empty"));
        }
        if !seen.insert(step.name.as_str()) {
            return Err(anyhow!("duplicate step name '{}'", step.name));
        }
    }
    Ok(())
}

/// `after` may only reference steps declared earlier.
///
/// Execution is strictly sequential in declared order, so a forward
/// reference could never be satisfied; rejecting it here also rules out
/// cycles without needing a graph.
fn validate_step_dependencies(cfg: &ConfigFile) -> Result<()> {
    let mut earlier: HashSet<&str> = HashSet::new();

    for step in cfg.steps.iter() {
        for dep in step.after.iter() {
            if dep == &step.name {
                return Err(anyhow!(
                    "step '{}' cannot depend on itself in `after`",
                    step.name
                ));
            }
            if !earlier.contains(dep.as_str()) {
                return Err(anyhow!(
                    "step '{}' has `after` reference '{}' which is not an earlier step",
                    step.name,
                    dep
                ));
            }
        }
        earlier.insert(step.name.as_str());
    }

    Ok(())
}

fn validate_guards(cfg: &ConfigFile) -> Result<()> {
    for step in cfg.steps.iter() {
        let Some(text) = &step.guard else { continue };

        let guard = Guard::parse(text)
            .with_context(|| format!("parsing guard for step '{}'", step.name))?;

        for label in guard.labels() {
            if !cfg.filter.contains_key(label) {
                return Err(anyhow!(
                    "step '{}' guard references unknown filter label '{}'",
                    step.name,
                    label
                ));
            }
        }
    }
    Ok(())
}

fn validate_patterns(cfg: &ConfigFile) -> Result<()> {
    for (label, patterns) in cfg.filter.iter() {
        compile_globs(patterns)
            .with_context(|| format!("compiling globs for filter '{label}'"))?;
    }

    compile_globs(&cfg.trigger.ignore).context("compiling [trigger].ignore globs")?;

    Ok(())
}
