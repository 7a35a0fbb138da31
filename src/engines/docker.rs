use anyhow::Result;
use log::info;
use std::path::Path;

use super::{run_command, run_command_to_file, ContainerEngine};

/// Docker implementation of the ContainerEngine trait
/// Uses the same verbs as podman; `docker export` also streams to stdout
#[derive(Default)]
pub struct DockerEngine;

impl DockerEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerEngine for DockerEngine {
    fn name(&self) -> &str {
        "docker"
    }

    fn program(&self) -> &str {
        "docker"
    }

    fn pull(&self, image: &str) -> Result<()> {
        info!("Pulling image '{}' with docker...", image);
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
