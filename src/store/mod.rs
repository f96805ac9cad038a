//! The content-addressed artifact store.
//!
//! Artifacts are named by the digest of their own bytes and published with a
//! write-to-temp-then-rename discipline. There is no locking anywhere: the
//! rename is the only operation that makes an artifact visible under its
//! final name, so a reader listing the store never observes a partial write,
//! and publishers racing on the same key each rename byte-identical content.
//! A crash mid-write leaves a stray temp object, never a corrupt final one.

mod content_key;

pub use content_key::ContentKey;

use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::PlumeError;

/// File extension of published artifacts.
pub const ARTIFACT_EXT: &str = "feather";

/// Name of the scratch subdirectory for in-progress writes. It lives inside
/// the store root so the final rename never crosses a filesystem boundary;
/// cross-volume renames are not atomic, and atomicity here is a hard
/// requirement, not an optimization.
pub const TMP_DIR_NAME: &str = "tmp";

/// A published artifact's identity and location.
///
/// The reference is handed to the client surface, which retrieves the bytes
/// out-of-band; the store itself never serves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRef {
    key: ContentKey,
    path: PathBuf,
}

impl ArtifactRef {
    pub fn key(&self) -> &ContentKey {
        &self.key
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The locator string delivered to the client surface.
    pub fn locator(&self) -> String {
        format!("file://{}", self.path.display())
    }

    /// The locator as a JSON document, the shape the client surface's data
    /// loader consumes.
    pub fn locator_json(&self) -> Result<String, PlumeError> {
        let doc = serde_json::json!({ "url": self.locator(), "key": self.key.to_string() });
        serde_json::to_string(&doc).map_err(Into::into)
    }
}

/// A content-addressed store rooted at one directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The final path an artifact with this key publishes to.
    pub fn artifact_path(&self, key: &ContentKey) -> PathBuf {
        self.root.join(format!("{key}.{ARTIFACT_EXT}"))
    }

    /// Whether an artifact with this key has already been published.
    pub fn contains(&self, key: &ContentKey) -> bool {
        self.artifact_path(key).exists()
    }

    /// Publishes bytes under their content key.
    ///
    /// Duplicates are the expected fast path: if the final path already
    /// exists, its reference is returned immediately with no read-back or
    /// re-hash, since content addressing makes existence sufficient.
    /// Otherwise the bytes are written to a uniquely named temp object under
    /// `tmp/` and renamed onto the final path. Transient I/O errors surface
    /// unretried; retry policy belongs to the caller.
    pub fn publish(&self, bytes: &[u8]) -> Result<ArtifactRef, PlumeError> {
        let key = ContentKey::from_bytes(bytes);
        let path = self.artifact_path(&key);

        if path.exists() {
            log::debug!("artifact {key} already published, reusing");
            return Ok(ArtifactRef { key, path });
        }

        let tmp_dir = self.root.join(TMP_DIR_NAME);
        fs::create_dir_all(&tmp_dir)?;

        // The nonce keeps same-process racers on the same key from colliding
        // on the temp name; each writes its own object and renames.
        let nonce: u64 = rand::random();
        let tmp_path = tmp_dir.join(format!("{key}-{nonce:016x}.partial"));

        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }

        if let Err(err) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        log_metric!("event" = "publish", "key" = &key, "bytes" = &bytes.len());
        Ok(ArtifactRef { key, path })
    }
}
