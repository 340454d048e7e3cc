//! Decorative backdrop carousel.
//!
//! Cosmetic only: cycles each subject's configured image paths and warms them
//! up at startup. Nothing here may fail the program.

use tracing::debug;

/// Cycles through a subject's decoration image paths.
#[derive(Debug, Default, Clone)]
pub struct Carousel {
    images: Vec<String>,
    index: usize,
}

impl Carousel {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, index: 0 }
    }

    pub fn paths(&self) -> &[String] {
        &self.images
    }

    /// Next image path, wrapping; `None` when no decorations are configured.
    pub fn next(&mut self) -> Option<&str> {
        if self.images.is_empty() {
            return None;
        }
        let idx = self.index % self.images.len();
        self.index = (idx + 1) % self.images.len();
        Some(self.images[idx].as_str())
    }
}

/// Best-effort warm-up: stat every configured decoration so the first peek
/// hits a warm cache. Missing files are logged and skipped, never fatal.
pub fn preload<'a>(paths: impl IntoIterator<Item = &'a str>) {
    for path in paths {
        match std::fs::metadata(path) {
            Ok(meta) => debug!(path, size = meta.len(), "decoration preloaded"),
            Err(err) => debug!(path, error = %err, "decoration unreachable, skipping"),
        }
    }
}
