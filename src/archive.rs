//! Archive handling through the system `tar` binary.

use anyhow::{anyhow, Context, Result};
use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};

/// Unpacks and repacks plain tar archives
pub trait Archiver {
    /// Extracts `archive` into the existing directory `dest`
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<()>;

    /// Archives the contents of `src` (rooted at `.`) into `archive`
    fn pack(&self, src: &Path, archive: &Path) -> Result<()>;
}

/// Archiver backed by the `tar` executable
pub struct TarArchiver;

impl TarArchiver {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, command: &mut Command) -> Result<()> {
        debug!("Running {:?}", command);
        let output = command
            .stdin(Stdio::null())
            .output()
            .context("Failed to execute tar command")?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "tar command failed ({}): {}",
                output.status,
                error.trim()
            ));
        }
        Ok(())
    }
}

impl Default for TarArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Archiver for TarArchiver {
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<()> {
        self.run(
            Command::new("tar")
                .arg("-xf")
                .arg(archive)
                .arg("-C")
                .arg(dest),
        )
    }

    fn pack(&self, src: &Path, archive: &Path) -> Result<()> {
        self.run(
            Command::new("tar")
                .arg("-C")
                .arg(src)
                .arg("-cf")
                .arg(archive)
                .arg("."),
        )
    }
}
