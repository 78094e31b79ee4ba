//! Scoped temporary files for the two artifacts a bridge operation
//! needs: the `.jsx` script handed to Illustrator and the `.png` the
//! screen-capture utility writes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::errors::BridgeError;

/// What a temp artifact is used for. Determines the file suffix, which
/// matters to the consumers (`do javascript file` expects `.jsx`,
/// `screencapture` infers the output format from `.png`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Script,
    Image,
}

impl ArtifactKind {
    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Script => ".jsx",
            ArtifactKind::Image => ".png",
        }
    }
}

/// A uniquely named temp file owned by exactly one bridge operation.
///
/// The file is created empty; the script path writes content right
/// after acquisition, the capture path lets `screencapture` populate
/// it. Deletion is guaranteed on every exit path because it happens in
/// `Drop`, and it is idempotent: a file that is already gone is not an
/// error.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    pub fn acquire(kind: ArtifactKind) -> Result<Self, BridgeError> {
        let file = tempfile::Builder::new()
            .prefix("illustrator-bridge-")
            .suffix(kind.suffix())
            .tempfile()?;
        // Detach from tempfile's delete-on-close so the path stays
        // valid while an external process writes to it; this artifact
        // owns deletion from here on.
        let (_handle, path) = file.keep().map_err(|e| BridgeError::Io(e.error))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now instead of at end of scope.
    pub fn release(self) {
        // Drop does the work.
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove temp artifact");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_creates_file_with_expected_suffix() {
        let script = TempArtifact::acquire(ArtifactKind::Script).unwrap();
        assert!(script.path().exists());
        assert_eq!(
            script.path().extension().and_then(|e| e.to_str()),
            Some("jsx")
        );

        let image = TempArtifact::acquire(ArtifactKind::Image).unwrap();
        assert_eq!(
            image.path().extension().and_then(|e| e.to_str()),
            Some("png")
        );
    }

    #[test]
    fn file_is_gone_after_drop() {
        let path = {
            let artifact = TempArtifact::acquire(ArtifactKind::Script).unwrap();
            artifact.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn file_is_gone_after_release() {
        let artifact = TempArtifact::acquire(ArtifactKind::Image).unwrap();
        let path = artifact.path().to_path_buf();
        artifact.release();
        assert!(!path.exists());
    }

    #[test]
    fn drop_tolerates_already_deleted_file() {
        let artifact = TempArtifact::acquire(ArtifactKind::Script).unwrap();
        fs::remove_file(artifact.path()).unwrap();
        // Drop must not panic even though the file is already gone.
    }

    #[test]
    fn concurrent_artifacts_get_distinct_paths() {
        let a = TempArtifact::acquire(ArtifactKind::Script).unwrap();
        let b = TempArtifact::acquire(ArtifactKind::Script).unwrap();
        assert_ne!(a.path(), b.path());
    }
}
