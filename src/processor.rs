//! End-to-end “container image → Bedrock stratum” pipeline orchestrator.
//!
//! This module provides [`LayerProcessor`], which:
//! - checks that the engine and importer executables are installed,
//! - allocates a [`RunContext`] (temporary container name + working directory),
//! - pulls the image, creates a stopped container and exports its filesystem,
//! - unpacks the export, adds `bedrock/layer` and `bedrock/version`, and repacks it,
//! - hands the archive to the importer under the sanitized layer name.
//!
//! Steps run strictly in order and the first failure ends the run. The failing
//! [`Step`] is attached to the error as context, and the run context is dropped
//! on every path, which removes the container and the working directory.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::archive::Archiver;
use crate::dependencies::require_dependencies;
use crate::engines::ContainerEngine;
use crate::importer::Importer;
use crate::metadata::{prepare_metadata_dir, write_layer_metadata};
use crate::naming::sanitize_layer_name;
use crate::notifier::Notifier;
use crate::workspace::RunContext;

/// Pipeline steps, in execution order
///
/// `Display` renders the message reported when the step fails. The value is
/// attached as error context, so callers can recover it with
/// `err.downcast_ref::<Step>()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Pull,
    Create,
    Export,
    CreateLayerDir,
    Unpack,
    CreateMetadataDir,
    WriteMetadata,
    Pack,
    Import,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Step::Pull => "Failed to pull image",
            Step::Create => "Failed to create container",
            Step::Export => "Export failed",
            Step::CreateLayerDir => "Failed to create layer directory",
            Step::Unpack => "Failed to unpack filesystem",
            Step::CreateMetadataDir => "Failed to create bedrock directory",
            Step::WriteMetadata => "Failed to write layer metadata",
            Step::Pack => "Failed to create layer tarball",
            Step::Import => "brl import failed",
        };
        f.write_str(message)
    }
}

/// Orchestrates the image to stratum pipeline for a concrete engine, archiver and importer.
///
/// ### Type parameters
/// - `E`: the container engine CLI (see [`crate::engines`]).
/// - `A`: how archives are unpacked and repacked (see [`crate::archive`]).
/// - `I`: the importer that receives the finished layer (see [`crate::importer`]).
pub struct LayerProcessor<E: ContainerEngine, A: Archiver, I: Importer> {
    engine: E,
    archiver: A,
    importer: I,
    notifier: Notifier,
}

impl<E: ContainerEngine, A: Archiver, I: Importer> LayerProcessor<E, A, I> {
    pub fn new(engine: E, archiver: A, importer: I, notifier: Notifier) -> Self {
        Self {
            engine,
            archiver,
            importer,
            notifier,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn importer(&self) -> &I {
        &self.importer
    }

    /// Executables that must be on `PATH` before anything else happens
    pub fn required_programs(&self) -> [&str; 2] {
        [self.engine.program(), self.importer.program()]
    }

    /// Imports `image` as a Bedrock stratum, working in the system temp area
    ///
    /// Returns the layer name the image was imported under.
    pub fn convert(&self, image: &str) -> Result<String> {
        self.convert_in(image, &std::env::temp_dir())
    }

    /// Imports `image` as a Bedrock stratum, allocating the working directory under `base`
    ///
    /// # Errors
    /// - A required executable is missing (nothing has been allocated yet).
    /// - The working directory cannot be created.
    /// - Any pipeline step fails; the error context is the failing [`Step`].
    pub fn convert_in(&self, image: &str, base: &Path) -> Result<String> {
        self.notifier.debug(&format!(
            "Starting import of image {} with {} engine",
            image,
            self.engine.name()
        ));

        require_dependencies(&self.required_programs())?;

        let mut ctx = RunContext::allocate_in(&self.engine, base)?;
        let result = self.run(image, &ctx);

        self.notifier.info("Cleaning up temporary resources");
        ctx.cleanup();
        result
    }

    fn run(&self, image: &str, ctx: &RunContext<'_>) -> Result<String> {
        let container = ctx.container().context("Temporary container already released")?;
        let (export_archive, layer_root, layer_archive) =
            match (ctx.export_archive(), ctx.layer_root(), ctx.layer_archive()) {
                (Some(export), Some(root), Some(archive)) => (export, root, archive),
                _ => anyhow::bail!("Working directory already released"),
            };

        self.notifier.info(&format!("Downloading image {}", image));
        self.engine.pull(image).context(Step::Pull)?;

        self.notifier.info("Creating temporary container");
        self.engine.create(container, image).context(Step::Create)?;

        self.notifier.info("Exporting container filesystem");
        self.engine
            .export(container, &export_archive)
            .context(Step::Export)?;
        if let Ok(meta) = fs::metadata(&export_archive) {
            self.notifier
                .debug(&format!("Exported archive size: {} bytes", meta.len()));
        }

        self.notifier.info("Preparing Bedrock Linux layer");
        fs::create_dir(&layer_root).context(Step::CreateLayerDir)?;
        self.archiver
            .unpack(&export_archive, &layer_root)
            .context(Step::Unpack)?;

        let layer_name = sanitize_layer_name(image);
        self.notifier
            .info(&format!("Using layer name: {}", layer_name));

        let bedrock_dir = prepare_metadata_dir(&layer_root).context(Step::CreateMetadataDir)?;
        write_layer_metadata(&bedrock_dir, &layer_name).context(Step::WriteMetadata)?;

        self.notifier.info("Creating layer tarball");
        self.archiver
            .pack(&layer_root, &layer_archive)
            .context(Step::Pack)?;

        self.notifier.info("Importing into Bedrock Linux");
        self.notifier
            .suspend(|| self.importer.import(&layer_name, &layer_archive))
            .context(Step::Import)?;

        Ok(layer_name)
    }
}
