use std::process::{Command, ExitStatus, Stdio};

use anyhow::Context;

/// Runs `<program> <host>` attached to this process's stdio and waits for it.
pub fn connect(program: &str, host: &str) -> anyhow::Result<ExitStatus> {
    anyhow::ensure!(!host.is_empty(), "cannot connect to an empty host");

    log::info!("connecting: {} {}", program, host);

    let status = Command::new(program)
        .arg(host)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("failed to run {} for {}", program, host))?;

    log::debug!("{} exited with {}", program, status);

    Result::Ok(status)
}
