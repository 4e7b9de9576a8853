// src/filter/rules.rs

use std::collections::BTreeMap;
use std::fmt;

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::errors::{Context, Result};

/// A single named filter rule: a label plus its compiled glob patterns.
///
/// Patterns are shell-style globs relative to the repository root, with
/// `**` meaning recursive directory match (e.g. `src/**`).
#[derive(Clone)]
pub struct FilterRule {
    label: String,
    globs: GlobSet,
}

impl fmt::Debug for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRule")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl FilterRule {
    /// Label guard expressions refer to.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true if the given path (relative to repository root, forward
    /// slashes) matches any of this rule's globs.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.globs.is_match(rel_path)
    }
}

/// The full static rule table, compiled once per run.
#[derive(Debug, Clone)]
pub struct FilterSet {
    rules: Vec<FilterRule>,
}

impl FilterSet {
    /// Compile every rule in the `[filter]` table.
    ///
    /// A malformed glob is a hard error; the caller must not fall back to
    /// treating the filter as matched or unmatched.
    pub fn from_config(table: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut rules = Vec::with_capacity(table.len());

        for (label, patterns) in table {
            let globs = compile_globs(patterns)
                .with_context(|| format!("building globset for filter '{label}'"))?;
            rules.push(FilterRule {
                label: label.clone(),
                globs,
            });
        }

        Ok(Self { rules })
    }

    /// Evaluate every rule against the changed paths.
    ///
    /// A rule is matched iff at least one changed path matches at least one
    /// of its globs.
    pub fn evaluate(&self, changed: &[String]) -> FilterOutcome {
        let mut matched = BTreeMap::new();

        for rule in &self.rules {
            let hit = changed.iter().any(|path| rule.matches(path));
            debug!(filter = %rule.label, matched = hit, "filter rule evaluated");
            matched.insert(rule.label.clone(), hit);
        }

        FilterOutcome { matched }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.label())
    }
}

/// Mapping from filter label to "did any changed path match", computed once
/// per admitted event and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    matched: BTreeMap<String, bool>,
}

impl FilterOutcome {
    /// Result for a label; unknown labels read as false.
    pub fn get(&self, label: &str) -> bool {
        self.matched.get(label).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.matched.iter().map(|(label, hit)| (label.as_str(), *hit))
    }
}

/// Build a GlobSet from simple string patterns.
pub fn compile_globs(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
