use anyhow::{anyhow, Result};
use log::debug;
use std::process::{Command, Stdio};

/// Checks whether `program` resolves on the current `PATH`
/// Delegates to the shell's `command -v`; the name is handed over as a
/// positional parameter so it is never parsed as shell syntax
pub fn check_dependency(program: &str) -> bool {
    let found = Command::new("sh")
        .args(["-c", "command -v \"$1\"", "sh", program])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false);

    debug!("Dependency '{}' found: {}", program, found);
    found
}

/// Fails with "<program> not found" for the first missing program
pub fn require_dependencies(programs: &[&str]) -> Result<()> {
    for program in programs {
        if !check_dependency(program) {
            return Err(anyhow!("{} not found", program));
        }
    }
    Ok(())
}
