//! Bedrock stratum metadata stored inside the layer root.
//!
//! `brl import` reads `bedrock/layer` and `bedrock/version` from the imported
//! tree. Both are single-line UTF-8 files.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Directory holding the metadata, relative to the layer root
pub const METADATA_DIR: &str = "bedrock";
pub const LAYER_FILE: &str = "layer";
pub const VERSION_FILE: &str = "version";
/// Version marker written for every imported image
pub const UNKNOWN_VERSION: &str = "unknown";

/// Path of the metadata directory under `layer_root`
pub fn metadata_dir(layer_root: &Path) -> PathBuf {
    layer_root.join(METADATA_DIR)
}

/// Ensures `bedrock/` under `layer_root` is a real directory inside the tree
/// An existing directory from the image is reused; a symlink or any other
/// file type is rejected so metadata can never land outside `layer_root`
pub fn prepare_metadata_dir(layer_root: &Path) -> Result<PathBuf> {
    let dir = metadata_dir(layer_root);
    match fs::symlink_metadata(&dir) {
        Ok(meta) if meta.file_type().is_symlink() => {
            Err(anyhow!("{} is a symlink", dir.display()))
        }
        Ok(meta) if !meta.is_dir() => Err(anyhow!("{} is not a directory", dir.display())),
        Ok(_) => Ok(dir),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            Ok(dir)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to inspect {}", dir.display())),
    }
}

/// Writes `bedrock/layer` and `bedrock/version` into an existing metadata directory
pub fn write_layer_metadata(metadata_dir: &Path, layer_name: &str) -> Result<()> {
    write_line(&metadata_dir.join(LAYER_FILE), layer_name)
        .context("Failed to write layer name")?;
    write_line(&metadata_dir.join(VERSION_FILE), UNKNOWN_VERSION)
        .context("Failed to write version")?;
    Ok(())
}

/// Replaces whatever entry the image left at `path` with a fresh regular file
fn write_line(path: &Path, value: &str) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            return Err(anyhow!("{} is a directory", path.display()));
        }
        // Unlinking drops a symlink itself, never its target
        Ok(_) => fs::remove_file(path)
            .with_context(|| format!("Failed to remove existing {}", path.display()))?,
        Err(_) => {}
    }

    // create_new refuses to follow a symlink planted after the check
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writeln!(file, "{}", value).with_context(|| format!("Failed to write {}", path.display()))?;
    file.flush()?;
    Ok(())
}
