use std::error::Error;

use changegate::config::model::TriggerSection;
use changegate::trigger::event::{EventKind, TriggerEvent};
use changegate::trigger::gate::{Admission, RejectReason, TriggerGate};

type TestResult = Result<(), Box<dyn Error>>;

fn gate() -> Result<TriggerGate, Box<dyn Error>> {
    let section = TriggerSection {
        branches: vec!["main".to_string()],
        pull_request: true,
        ignore: vec!["README.md".to_string()],
    };
    Ok(TriggerGate::from_config(&section)?)
}

fn push_event(branch: &str, paths: &[&str]) -> TriggerEvent {
    TriggerEvent::new(
        EventKind::Push {
            branch: branch.to_string(),
        },
        paths.iter().map(|p| p.to_string()),
    )
}

fn pr_event(paths: &[&str]) -> TriggerEvent {
    TriggerEvent::new(EventKind::PullRequest, paths.iter().map(|p| p.to_string()))
}

#[test]
fn readme_only_change_does_not_fire() -> TestResult {
    let gate = gate()?;
    let event = push_event("main", &["README.md"]);

    assert_eq!(
        gate.admit(&event),
        Admission::Reject(RejectReason::AllPathsIgnored),
    );

    Ok(())
}

#[test]
fn readme_plus_src_change_fires() -> TestResult {
    // The ignore rule only suppresses the event when it covers the *whole*
    // change set; a mixed change set fires.
    let gate = gate()?;
    let event = push_event("main", &["README.md", "src/core.py"]);

    assert!(gate.admit(&event).fires());

    Ok(())
}

#[test]
fn readme_only_pull_request_does_not_fire_either() -> TestResult {
    let gate = gate()?;
    let event = pr_event(&["README.md"]);

    assert_eq!(
        gate.admit(&event),
        Admission::Reject(RejectReason::AllPathsIgnored),
    );

    Ok(())
}

#[test]
fn push_to_unlisted_branch_does_not_fire() -> TestResult {
    let gate = gate()?;
    let event = push_event("feature/mcmc", &["src/core.py"]);

    assert_eq!(
        gate.admit(&event),
        Admission::Reject(RejectReason::BranchNotAllowed {
            branch: "feature/mcmc".to_string(),
        }),
    );

    Ok(())
}

#[test]
fn pull_request_fires_regardless_of_branch_list() -> TestResult {
    let gate = gate()?;
    let event = pr_event(&["src/core.py"]);

    assert!(gate.admit(&event).fires());

    Ok(())
}

#[test]
fn pull_requests_can_be_disabled() -> TestResult {
    let section = TriggerSection {
        branches: vec!["main".to_string()],
        pull_request: false,
        ignore: vec![],
    };
    let gate = TriggerGate::from_config(&section)?;

    assert_eq!(
        gate.admit(&pr_event(&["src/core.py"])),
        Admission::Reject(RejectReason::PullRequestsDisabled),
    );

    Ok(())
}

#[test]
fn empty_change_set_does_not_fire() -> TestResult {
    let gate = gate()?;
    let event = push_event("main", &[]);

    assert_eq!(
        gate.admit(&event),
        Admission::Reject(RejectReason::NoChangedPaths),
    );

    Ok(())
}

#[test]
fn empty_branch_list_admits_any_branch() -> TestResult {
    let section = TriggerSection {
        branches: vec![],
        pull_request: true,
        ignore: vec![],
    };
    let gate = TriggerGate::from_config(&section)?;

    assert!(gate.admit(&push_event("anything-goes", &["src/a.py"])).fires());

    Ok(())
}

#[test]
fn changed_paths_are_normalized_and_deduplicated() -> TestResult {
    let event = push_event("main", &["./src/core.py", "src\\core.py", "src/fit.py"]);

    assert_eq!(
        event.changed_paths(),
        &["src/core.py".to_string(), "src/fit.py".to_string()],
    );

    Ok(())
}
