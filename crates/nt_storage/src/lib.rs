use std::path::Path;
use std::sync::Arc;

use nt_core::{Error, ReportArchive, Result};

pub mod backends;

pub use backends::*;

pub const AVAILABLE_ARCHIVES: &[&str] = &["file", "memory"];

/// Builds the archive backend named `kind`. `dir` is only used by the file backend.
pub fn create_archive(kind: &str, dir: &Path) -> Result<Arc<dyn ReportArchive>> {
    match kind {
        "file" => Ok(Arc::new(FileArchive::new(dir))),
        "memory" => Ok(Arc::new(MemoryArchive::new())),
        other => Err(Error::Storage(format!(
            "Unknown archive backend '{}'. Available backends: {}",
            other,
            AVAILABLE_ARCHIVES.join(", ")
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_archive;
    pub use nt_core::ReportArchive;
}
