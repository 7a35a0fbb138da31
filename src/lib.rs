pub mod archive;
pub mod dependencies;
pub mod engines;
pub mod importer;
pub mod metadata;
pub mod naming;
pub mod notifier;
pub mod processor;
pub mod workspace;

// Re-exports for easy access
pub use archive::{Archiver, TarArchiver};
pub use engines::{ContainerEngine, DockerEngine, PodmanEngine};
pub use importer::{BrlImporter, Importer};
pub use naming::sanitize_layer_name;
pub use notifier::Notifier;
pub use processor::{LayerProcessor, Step};
pub use workspace::RunContext;
