use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use folio::config::{AmbientConfig, FolioConfig};
use folio::core::boundary::GraphicsSupport;
use folio::core::content::ContentStore;
use folio::core::page::Page;
use tempfile::NamedTempFile;

/// Fixed seed so particle and dice layouts repeat between runs.
pub const TEST_SEED: u64 = 42;

pub const DESKTOP: (f32, f32) = (1280.0, 800.0);
pub const MOBILE: (f32, f32) = (400.0, 800.0);

/// Config with a fixed seed and full motion.
pub fn test_config() -> FolioConfig {
    FolioConfig {
        ambient: AmbientConfig {
            seed: Some(TEST_SEED),
            ..AmbientConfig::default()
        },
        ..FolioConfig::default()
    }
}

/// Config that asks for reduced motion.
pub fn reduced_motion_config() -> FolioConfig {
    let mut config = test_config();
    config.ambient.reduced_motion = Some(true);
    config
}

/// Config for a host without 3D graphics.
pub fn no_graphics_config() -> FolioConfig {
    let mut config = test_config();
    config.ambient.graphics = GraphicsSupport::Unavailable;
    config
}

/// A page over the bundled content.
pub fn make_page(config: FolioConfig, viewport: (f32, f32)) -> Page {
    Page::new(Arc::new(ContentStore::builtin().clone()), config, viewport)
}

pub fn desktop_page() -> Page {
    make_page(test_config(), DESKTOP)
}

/// `start` advanced by `ms` milliseconds.
pub fn after(start: Instant, ms: u64) -> Instant {
    start + Duration::from_millis(ms)
}

/// Writes `contents` to a temp file with the given suffix.
/// The file will be automatically cleaned up when dropped.
pub fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// The bundled content serialized to a temp JSON file.
pub fn bundled_content_file() -> NamedTempFile {
    let json = serde_json::to_string_pretty(ContentStore::builtin())
        .expect("Failed to serialize bundled content");
    temp_file(".json", &json)
}
