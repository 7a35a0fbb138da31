use anyhow::{anyhow, Context, Result};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Hands a finished layer archive to the target system
pub trait Importer {
    /// Executable that must be present on `PATH` for this importer to work
    fn program(&self) -> &str;

    /// Imports `archive` under the name `layer_name`
    fn import(&self, layer_name: &str, archive: &Path) -> Result<()>;
}

/// Runs `brl import <layer> <archive>`, elevated through `sudo` by default
pub struct BrlImporter {
    elevate: bool,
}

impl BrlImporter {
    pub fn new(elevate: bool) -> Self {
        Self { elevate }
    }

    /// Builds the command line without running it
    pub fn command(&self, layer_name: &str, archive: &Path) -> Command {
        let mut command = if self.elevate {
            let mut sudo = Command::new("sudo");
            sudo.arg(self.program());
            sudo
        } else {
            Command::new(self.program())
        };
        command.arg("import").arg(layer_name).arg(archive);
        command
    }
}

impl Default for BrlImporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Importer for BrlImporter {
    fn program(&self) -> &str {
        "brl"
    }

    fn import(&self, layer_name: &str, archive: &Path) -> Result<()> {
        let mut command = self.command(layer_name, archive);
        debug!("Running {:?}", command);

        // Inherit the terminal so sudo can prompt for a password
        let status = command
            .status()
            .context("Failed to execute brl import")?;

        if !status.success() {
            return Err(anyhow!("brl import exited with {}", status));
        }
        Ok(())
    }
}
