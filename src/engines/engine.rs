use anyhow::Result;
use std::path::Path;

/// A container engine CLI used to turn an image into a flat filesystem archive
///
/// Implementations only ever run the engine with discrete arguments; image
/// references and container names are never interpolated into a shell string.
pub trait ContainerEngine {
    /// Returns the name of the engine for identification purposes
    fn name(&self) -> &str;

    /// Executable that must be present on `PATH` for this engine to work
    fn program(&self) -> &str;

    /// Pulls `image` from its registry
    fn pull(&self, image: &str) -> Result<()>;

    /// Creates, but does not start, a container called `container` from `image`
    fn create(&self, container: &str, image: &str) -> Result<()>;

    /// Exports the filesystem of `container` as a tar archive at `dest`
    fn export(&self, container: &str, dest: &Path) -> Result<()>;

    /// Force-removes `container`
    fn remove(&self, container: &str) -> Result<()>;
}
