// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [trigger]
/// branches = ["main"]
/// ignore = ["README.md"]
///
/// [filter]
/// src = ["src/**"]
/// pyproject = ["pyproject.toml"]
///
/// [[step]]
/// name = "build-image"
/// cmd = "docker build -t xspec-tests ."
/// guard = "src or pyproject"
/// after = ["checkout"]
/// ```
///
/// `[trigger]` and `[filter]` are optional; the step list carries the
/// execution order.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Event admission rules from `[trigger]`.
    #[serde(default)]
    pub trigger: TriggerSection,

    /// Filter rules from `[filter]`: label -> glob patterns.
    ///
    /// Keys are the labels guard expressions refer to (e.g. `"src"`).
    #[serde(default)]
    pub filter: BTreeMap<String, Vec<String>>,

    /// Ordered pipeline steps from `[[step]]`.
    #[serde(default, rename = "step")]
    pub steps: Vec<StepConfig>,
}

/// `[trigger]` section.
///
/// Decides whether an event fires at all, before any filter is evaluated.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerSection {
    /// Branch allow-list for push events. Empty means any branch.
    #[serde(default)]
    pub branches: Vec<String>,

    /// Whether pull-request events fire at all.
    #[serde(default = "default_pull_request")]
    pub pull_request: bool,

    /// Event-level ignore globs.
    ///
    /// If every changed path matches one of these, the event does not fire
    /// and no step executes. A change set with at least one non-ignored
    /// path fires normally.
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_pull_request() -> bool {
    true
}

impl Default for TriggerSection {
    fn default() -> Self {
        Self {
            branches: Vec::new(),
            pull_request: default_pull_request(),
            ignore: Vec::new(),
        }
    }
}

/// `[[step]]` entry. Declaration order is execution order.
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    /// Unique step name.
    pub name: String,

    /// The command to execute.
    pub cmd: String,

    /// Optional guard expression over filter labels, e.g. `"src or pyproject"`.
    ///
    /// If `None`, the step always runs. A step whose guard evaluates false
    /// is skipped entirely (not run, not failed).
    #[serde(default)]
    pub guard: Option<String>,

    /// Names of earlier steps this step needs.
    ///
    /// If any of them failed (or was itself blocked), this step is blocked
    /// and not executed. A skipped step satisfies the dependency.
    #[serde(default)]
    pub after: Vec<String>,

    /// Extra environment variables for the command.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Environment variables that must be present and non-empty when the
    /// step runs (e.g. an upload token). Checked at execution time; a
    /// missing variable fails the step without spawning the command.
    #[serde(default)]
    pub requires_env: Vec<String>,
}
