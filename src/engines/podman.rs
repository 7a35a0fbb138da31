use anyhow::Result;
use log::info;
use std::path::Path;

use super::{run_command, run_command_to_file, ContainerEngine};

/// Podman implementation of the ContainerEngine trait
#[derive(Default)]
pub struct PodmanEngine;

impl PodmanEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerEngine for PodmanEngine {
    fn name(&self) -> &str {
        "podman"
    }

    fn program(&self) -> &str {
        "podman"
    }

    fn pull(&self, image: &str) -> Result<()> {
        info!("Pulling image '{}' with podman...", image);
        run_command(self.program(), &["pull", image])?;
        Ok(())
    }

    fn create(&self, container: &str, image: &str) -> Result<()> {
        run_command(self.program(), &["create", "--name", container, image])?;
        Ok(())
    }

    fn export(&self, container: &str, dest: &Path) -> Result<()> {
        run_command_to_file(self.program(), &["export", container], dest)
    }

    fn remove(&self, container: &str) -> Result<()> {
        run_command(self.program(), &["rm", "-f", container])?;
        Ok(())
    }
}
