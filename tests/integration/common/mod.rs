//! Common utilities for integration tests

use anyhow::Result;
use dbrl::Importer;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tar_rs as tar;
use tempfile::{tempdir, TempDir};

/// Small image used by the live engine tests
#[allow(dead_code)]
pub const TEST_IMAGE: &str = "docker.io/library/alpine:latest";

#[allow(dead_code)]
/// Test image that definitely doesn't exist
pub const NONEXISTENT_IMAGE: &str = "this-image-definitely-does-not-exist:never";

/// Importer that keeps a copy of the archive instead of calling `brl`
/// The working directory is removed after the run, so the copy lives elsewhere
pub struct CapturingImporter {
    keep: TempDir,
    pub imported: RefCell<Option<(String, PathBuf)>>,
}

impl CapturingImporter {
    pub fn new() -> Self {
        Self {
            keep: tempdir().expect("Should create temp dir"),
            imported: RefCell::new(None),
        }
    }
}

impl Importer for CapturingImporter {
    fn program(&self) -> &str {
        "sh"
    }

    fn import(&self, layer_name: &str, archive: &Path) -> Result<()> {
        let copy = self.keep.path().join(format!("{layer_name}.tar"));
        fs::copy(archive, &copy)?;
        *self.imported.borrow_mut() = Some((layer_name.to_string(), copy));
        Ok(())
    }
}

/// Reads every regular file of a tar archive, keyed by path without the leading "./"
pub fn read_archive(path: &Path) -> Result<HashMap<String, String>> {
    let mut archive = tar::Archive::new(File::open(path)?);
    let mut files = HashMap::new();
    for entry in archive.entries()? {
        let mut entry = entry?;
        if entry.header().entry_type() != tar::EntryType::Regular {
            continue;
        }
        let name = entry
            .path()?
            .to_string_lossy()
            .trim_start_matches("./")
            .to_string();
        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        files.insert(name, String::from_utf8_lossy(&content).into_owned());
    }
    Ok(files)
}
