// src/exec/command.rs

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{Context, Result};
use crate::pipeline::step::Step;

/// Result of one step process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    Failed(i32),
}

/// Run a step's command to completion, streaming its output into the log.
///
/// Commands go through the platform shell (`sh -c` / `cmd /C`). stdout is
/// logged at info, stderr at debug; both are always drained so the child
/// never stalls on a full pipe.
pub async fn run_step_command(step: &Step) -> Result<CommandOutcome> {
    info!(step = %step.name, cmd = %step.cmd, "starting step process");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&step.cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&step.cmd);
        c
    };

    cmd.envs(&step.env)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for step '{}'", step.name))?;

    if let Some(stdout) = child.stdout.take() {
        let step_name = step.name.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(step = %step_name, "stdout: {}", line);
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        let step_name = step.name.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(step = %step_name, "stderr: {}", line);
            }
        });
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of step '{}'", step.name))?;

    let code = status.code().unwrap_or(-1);
    info!(
        step = %step.name,
        exit_code = code,
        success = status.success(),
        "step process exited"
    );

    if status.success() {
        Ok(CommandOutcome::Success)
    } else {
        Ok(CommandOutcome::Failed(code))
    }
}
