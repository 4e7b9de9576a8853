// src/trigger/gate.rs

use std::fmt;

use globset::GlobSet;
use tracing::debug;

use crate::config::model::TriggerSection;
use crate::errors::{Context, Result};
use crate::filter::rules::compile_globs;
use crate::trigger::event::{EventKind, TriggerEvent};

/// Why an event was not admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Push to a branch outside the `branches` allow-list.
    BranchNotAllowed { branch: String },
    /// Pull-request events are disabled in `[trigger]`.
    PullRequestsDisabled,
    /// Every changed path matched an ignore glob.
    AllPathsIgnored,
    /// The event carried no changed paths at all.
    NoChangedPaths,
}

/// Admission decision for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Fire,
    Reject(RejectReason),
}

impl Admission {
    pub fn fires(&self) -> bool {
        matches!(self, Admission::Fire)
    }
}

/// Compiled `[trigger]` rules.
///
/// The ignore decision short-circuits the whole run: a rejected event never
/// reaches filter evaluation, let alone a step.
#[derive(Clone)]
pub struct TriggerGate {
    branches: Vec<String>,
    pull_request: bool,
    ignore: Option<GlobSet>,
}

impl fmt::Debug for TriggerGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerGate")
            .field("branches", &self.branches)
            .field("pull_request", &self.pull_request)
            .finish_non_exhaustive()
    }
}

impl TriggerGate {
    pub fn from_config(cfg: &TriggerSection) -> Result<Self> {
        let ignore = if cfg.ignore.is_empty() {
            None
        } else {
            Some(compile_globs(&cfg.ignore).context("building ignore globset for [trigger]")?)
        };

        Ok(Self {
            branches: cfg.branches.clone(),
            pull_request: cfg.pull_request,
            ignore,
        })
    }

    /// Decide whether the event fires.
    ///
    /// The ignore rule suppresses the event only when *every* changed path
    /// is covered by an ignore glob; a change set mixing an ignored path
    /// with anything else fires normally.
    pub fn admit(&self, event: &TriggerEvent) -> Admission {
        match &event.kind {
            EventKind::Push { branch } => {
                if !self.branches.is_empty() && !self.branches.iter().any(|b| b == branch) {
                    debug!(branch = %branch, "push branch not in allow-list");
                    return Admission::Reject(RejectReason::BranchNotAllowed {
                        branch: branch.clone(),
                    });
                }
            }
            EventKind::PullRequest => {
                if !self.pull_request {
                    return Admission::Reject(RejectReason::PullRequestsDisabled);
                }
            }
        }

        if event.changed_paths().is_empty() {
            return Admission::Reject(RejectReason::NoChangedPaths);
        }

        if let Some(ignore) = &self.ignore {
            let all_ignored = event.changed_paths().iter().all(|path| ignore.is_match(path));
            if all_ignored {
                debug!("every changed path matched an ignore glob");
                return Admission::Reject(RejectReason::AllPathsIgnored);
            }
        }

        Admission::Fire
    }
}
