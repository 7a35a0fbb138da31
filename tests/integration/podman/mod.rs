//! Podman integration tests
//!
//! Drive a real podman installation end to end, stopping short of `brl import`.

#[cfg(all(test, feature = "podman"))]
mod tests {
    use crate::integration::common::*;
    use dbrl::{ContainerEngine, LayerProcessor, Notifier, PodmanEngine, Step, TarArchiver};
    use tempfile::TempDir;

    #[test]
    fn test_podman_engine_creation() {
        let engine = PodmanEngine::new();
        assert_eq!(engine.name(), "podman");
        assert_eq!(engine.program(), "podman");
    }

    #[test]
    fn test_podman_image_to_layer_archive() {
        let base = TempDir::new().expect("Should create temp dir");
        let engine = PodmanEngine::new();
        let processor =
            LayerProcessor::new(engine, TarArchiver::new(), CapturingImporter::new(), Notifier::new(1));

        let layer = processor
            .convert_in(TEST_IMAGE, base.path())
            .expect("Should convert alpine");
        assert_eq!(layer, "alpine_latest");

        let imported = processor.importer().imported.borrow();
        let (_, archive) = imported.as_ref().expect("Importer should be called");
        let files = read_archive(archive).expect("Should read layer archive");

        assert_eq!(files.get("bedrock/layer").map(String::as_str), Some("alpine_latest\n"));
        assert!(files.contains_key("etc/alpine-release"), "Alpine rootfs should be present");
        assert_eq!(std::fs::read_dir(base.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_podman_nonexistent_image() {
        let base = TempDir::new().expect("Should create temp dir");
        let engine = PodmanEngine::new();
        let processor =
            LayerProcessor::new(engine, TarArchiver::new(), CapturingImporter::new(), Notifier::new(0));

        let err = processor
            .convert_in(NONEXISTENT_IMAGE, base.path())
            .expect_err("Pull should fail");

        assert_eq!(err.downcast_ref::<Step>(), Some(&Step::Pull));
        assert!(processor.importer().imported.borrow().is_none());
        assert_eq!(std::fs::read_dir(base.path()).unwrap().count(), 0);
    }
}
