// src/trigger/event.rs

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::errors::{Context, Result};

/// Kind of event that triggered this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A push to a named branch.
    Push { branch: String },
    /// A pull-request event.
    PullRequest,
}

/// One triggering event: its kind plus the set of file paths it changed.
///
/// Created once per invocation and immutable afterwards. Paths are
/// normalized (forward slashes, no `./` prefix) and de-duplicated while
/// keeping first-seen order.
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    pub kind: EventKind,
    changed: Vec<String>,
}

impl TriggerEvent {
    pub fn new(kind: EventKind, paths: impl IntoIterator<Item = String>) -> Self {
        let mut seen = BTreeSet::new();
        let mut changed = Vec::new();

        for raw in paths {
            let path = normalize_path(&raw);
            if path.is_empty() {
                continue;
            }
            if seen.insert(path.clone()) {
                changed.push(path);
            }
        }

        Self { kind, changed }
    }

    /// Changed paths, relative to the repository root.
    pub fn changed_paths(&self) -> &[String] {
        &self.changed
    }
}

/// Read a changed-path list file: one path per line, blank lines ignored.
pub fn read_changed_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading changed-path list at {:?}", path))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect())
}

/// Normalize a changed path: forward slashes, no leading `./`.
fn normalize_path(raw: &str) -> String {
    let s = raw.trim().replace('\\', "/");
    let s = s.strip_prefix("./").unwrap_or(&s);
    s.to_string()
}
