use std::error::Error;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use changegate::config::loader::load_and_validate;

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(dir: &TempDir, contents: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.path().join("Changegate.toml");
    fs::write(&path, contents)?;
    Ok(path)
}

fn expect_error(contents: &str, needle: &str) -> TestResult {
    let dir = TempDir::new()?;
    let path = write_config(&dir, contents)?;

    let err = load_and_validate(&path).unwrap_err();
    let rendered = format!("{err:#}");
    assert!(
        rendered.contains(needle),
        "expected error containing {needle:?}, got: {rendered}"
    );

    Ok(())
}

#[test]
fn config_without_steps_is_rejected() -> TestResult {
    expect_error(
        r#"
[filter]
src = ["src/**"]
"#,
        "at least one [[step]]",
    )
}

#[test]
fn duplicate_step_names_are_rejected() -> TestResult {
    expect_error(
        r#"
[[step]]
name = "build"
cmd = "echo one"

[[step]]
name = "build"
cmd = "echo two"
"#,
        "duplicate step name 'build'",
    )
}

#[test]
fn malformed_filter_glob_fails_before_any_step() -> TestResult {
    // An unclosed character class must be a hard error, not an implicit
    // all-true or all-false filter.
    expect_error(
        r#"
[filter]
src = ["src/["]

[[step]]
name = "build"
cmd = "echo build"
guard = "src"
"#,
        "invalid glob pattern",
    )
}

#[test]
fn malformed_ignore_glob_is_rejected() -> TestResult {
    expect_error(
        r#"
[trigger]
ignore = ["[badglob"]

[[step]]
name = "build"
cmd = "echo build"
"#,
        "ignore",
    )
}

#[test]
fn guard_with_unknown_label_is_rejected() -> TestResult {
    expect_error(
        r#"
[filter]
src = ["src/**"]

[[step]]
name = "build"
cmd = "echo build"
guard = "src or pyproject"
"#,
        "unknown filter label 'pyproject'",
    )
}

#[test]
fn guard_syntax_error_is_rejected() -> TestResult {
    expect_error(
        r#"
[filter]
src = ["src/**"]

[[step]]
name = "build"
cmd = "echo build"
guard = "src or"
"#,
        "guard",
    )
}

#[test]
fn forward_after_reference_is_rejected() -> TestResult {
    // Execution is strictly sequential in declared order; a dependency on a
    // later step could never be satisfied.
    expect_error(
        r#"
[[step]]
name = "tests"
cmd = "echo tests"
after = ["build"]

[[step]]
name = "build"
cmd = "echo build"
"#,
        "not an earlier step",
    )
}

#[test]
fn self_after_reference_is_rejected() -> TestResult {
    expect_error(
        r#"
[[step]]
name = "build"
cmd = "echo build"
after = ["build"]
"#,
        "cannot depend on itself",
    )
}

#[test]
fn unknown_after_reference_is_rejected() -> TestResult {
    expect_error(
        r#"
[[step]]
name = "build"
cmd = "echo build"
after = ["bootstrap"]
"#,
        "'bootstrap'",
    )
}

#[test]
fn valid_config_loads_with_defaults() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        r#"
[[step]]
name = "build"
cmd = "echo build"
"#,
    )?;

    let cfg = load_and_validate(&path)?;

    assert!(cfg.trigger.branches.is_empty());
    assert!(cfg.trigger.pull_request);
    assert!(cfg.trigger.ignore.is_empty());
    assert!(cfg.filter.is_empty());
    assert_eq!(cfg.steps.len(), 1);
    assert_eq!(cfg.steps[0].name, "build");

    Ok(())
}
