//! Filesystem operations
//!
//! Artifact presence checks. Only existence is inspected, never content.

use std::path::Path;

use crate::core::builder::ArtifactProbe;

/// Checks artifacts on the local filesystem
///
/// Relative paths resolve against the process working directory, which is
/// also where build commands run.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl ArtifactProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
