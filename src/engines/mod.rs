use anyhow::{anyhow, Context, Result};
use log::{debug, trace};
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

pub mod docker;
pub mod engine;
pub mod podman;

pub use docker::DockerEngine;
pub use engine::ContainerEngine;
pub use podman::PodmanEngine;

/// Runs `program` with `args`, capturing its output
/// Returns stdout on success, or an error carrying stderr on a non-zero exit
pub(crate) fn run_command(program: &str, args: &[&str]) -> Result<String> {
    debug!("Running {} {:?}", program, args);
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to execute {} command: {:?}", program, args))?;

    if !output.status.success() {
        let error = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "{} command failed ({}): {}",
            program,
            output.status,
            error.trim()
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    trace!("{} output: {}", program, stdout.trim());
    Ok(stdout)
}

/// Runs `program` with `args`, writing its stdout into `dest`
pub(crate) fn run_command_to_file(program: &str, args: &[&str], dest: &Path) -> Result<()> {
    debug!("Running {} {:?} > {}", program, args, dest.display());
    let file = File::create(dest)
        .with_context(|| format!("Failed to create output file: {}", dest.display()))?;

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(file))
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("Failed to execute {} command: {:?}", program, args))?;

    if !output.status.success() {
        let error = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "{} command failed ({}): {}",
            program,
            output.status,
            error.trim()
        ));
    }

    Ok(())
}
