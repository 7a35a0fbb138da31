//! Per-run resources and their guaranteed release.
//!
//! [`RunContext`] owns the two resources a run allocates: the temporary
//! container handle and the temporary working directory. Dropping the context
//! removes both on a best-effort basis, so every exit path of the pipeline
//! (success, `?` early returns, panics that unwind) releases them exactly once.

use anyhow::{Context, Result};
use chrono::Utc;
use log::debug;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::engines::ContainerEngine;

pub const CONTAINER_PREFIX: &str = "dbrl_temp_container_";
pub const WORKDIR_PREFIX: &str = "dbrl_import_";

const EXPORT_ARCHIVE: &str = "export.tar";
const LAYER_ROOT: &str = "layer_root";
const LAYER_ARCHIVE: &str = "layer.tar";

/// Resources owned by a single import run
pub struct RunContext<'a> {
    engine: &'a dyn ContainerEngine,
    container: Option<String>,
    workdir: Option<TempDir>,
}

impl<'a> RunContext<'a> {
    /// Allocates a container handle and a working directory in the system temp area
    pub fn allocate(engine: &'a dyn ContainerEngine) -> Result<Self> {
        Self::allocate_in(engine, &std::env::temp_dir())
    }

    /// Allocates a container handle and a working directory under `base`
    pub fn allocate_in(engine: &'a dyn ContainerEngine, base: &Path) -> Result<Self> {
        let workdir = tempfile::Builder::new()
            .prefix(WORKDIR_PREFIX)
            .tempdir_in(base)
            .context("Failed to create temp directory")?;
        debug!("Working directory: {}", workdir.path().display());

        let container = generate_container_name();
        debug!("Temporary container name: {}", container);

        Ok(Self {
            engine,
            container: Some(container),
            workdir: Some(workdir),
        })
    }

    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_ref().map(TempDir::path)
    }

    /// Archive written by the container export
    pub fn export_archive(&self) -> Option<PathBuf> {
        self.workdir().map(|dir| dir.join(EXPORT_ARCHIVE))
    }

    /// Directory the export is unpacked into
    pub fn layer_root(&self) -> Option<PathBuf> {
        self.workdir().map(|dir| dir.join(LAYER_ROOT))
    }

    /// Archive handed to the importer
    pub fn layer_archive(&self) -> Option<PathBuf> {
        self.workdir().map(|dir| dir.join(LAYER_ARCHIVE))
    }

    /// Removes the container and the working directory, ignoring failures
    /// Each resource is released at most once; later calls are no-ops
    pub fn cleanup(&mut self) {
        if let Some(container) = self.container.take() {
            debug!("Removing temporary container {}", container);
            if let Err(e) = self.engine.remove(&container) {
                debug!("Ignoring container removal failure: {:#}", e);
            }
        }

        if let Some(workdir) = self.workdir.take() {
            let path = workdir.path().to_path_buf();
            debug!("Removing working directory {}", path.display());
            if let Err(e) = workdir.close() {
                debug!("Ignoring failure to remove {}: {}", path.display(), e);
            }
        }
    }
}

impl Drop for RunContext<'_> {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Builds a container name from the current time and process id
fn generate_container_name() -> String {
    format!(
        "{}{}_{}",
        CONTAINER_PREFIX,
        Utc::now().timestamp(),
        std::process::id()
    )
}
