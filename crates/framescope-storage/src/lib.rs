//! Run output storage: atomic, hash-tracked file writes under a run directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    pub name: String,
    pub relative_path: PathBuf,
    #[serde(skip)]
    pub absolute_path: PathBuf,
    pub sha256: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub schema_version: u32,
    pub run_id: Uuid,
    pub files: Vec<StoredFile>,
}

#[derive(Debug, Clone)]
pub struct RunStore {
    root: PathBuf,
}

impl RunStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sha256_hex(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hex::encode(hasher.finalize())
    }

    /// Write bytes to `relative` via a temp file and rename, so readers never see a partial file.
    pub async fn store_bytes(
        &self,
        name: &str,
        relative: impl AsRef<Path>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredFile> {
        let relative_path = relative.as_ref().to_path_buf();
        let absolute_path = self.root.join(&relative_path);
        let parent = absolute_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());

        fs::create_dir_all(&parent)
            .await
            .with_context(|| format!("creating output directory {}", parent.display()))?;

        let temp_path = parent.join(format!(".{}.{}.tmp", Uuid::new_v4(), bytes.len()));
        let mut file = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&temp_path)
            .await
            .with_context(|| format!("opening temp output file {}", temp_path.display()))?;
        file.write_all(bytes)
            .await
            .with_context(|| format!("writing temp output file {}", temp_path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("flushing temp output file {}", temp_path.display()))?;
        drop(file);

        if let Err(err) = fs::rename(&temp_path, &absolute_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(err).with_context(|| {
                format!(
                    "atomically renaming {} -> {}",
                    temp_path.display(),
                    absolute_path.display()
                )
            });
        }

        debug!(path = %absolute_path.display(), bytes = bytes.len(), "stored output file");
        Ok(StoredFile {
            name: name.to_string(),
            relative_path,
            absolute_path,
            sha256: Self::sha256_hex(bytes),
            bytes: bytes.len() as u64,
        })
    }

    pub async fn write_manifest(
        &self,
        run_id: Uuid,
        files: Vec<StoredFile>,
    ) -> anyhow::Result<StoredFile> {
        let manifest = Manifest {
            schema_version: 1,
            run_id,
            files,
        };
        let bytes = serde_json::to_vec_pretty(&manifest).context("serializing run manifest")?;
        self.store_bytes("manifest", "manifest.json", &bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn hashing_is_stable() {
        let hash = RunStore::sha256_hex(b"hello world");
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[tokio::test]
    async fn store_creates_nested_directories_and_reports_hash() {
        let dir = tempdir().expect("tempdir");
        let store = RunStore::new(dir.path());

        let stored = store
            .store_bytes("full_csv", "corpora/full.csv", b"a,b\n1,2\n")
            .await
            .expect("store");

        assert!(stored.absolute_path.exists());
        assert_eq!(stored.bytes, 8);
        assert_eq!(stored.sha256, RunStore::sha256_hex(b"a,b\n1,2\n"));
        assert_eq!(stored.relative_path, PathBuf::from("corpora/full.csv"));
    }

    #[tokio::test]
    async fn rewriting_replaces_content_without_leaving_temp_files() {
        let dir = tempdir().expect("tempdir");
        let store = RunStore::new(dir.path());

        store.store_bytes("summary", "summary.md", b"first").await.expect("first");
        let second = store.store_bytes("summary", "summary.md", b"second").await.expect("second");

        let text = std::fs::read_to_string(&second.absolute_path).expect("read back");
        assert_eq!(text, "second");
        let leftovers = std::fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn manifest_lists_stored_files() {
        let dir = tempdir().expect("tempdir");
        let store = RunStore::new(dir.path());
        let run_id = Uuid::new_v4();

        let file = store.store_bytes("summary_json", "summary.json", b"{}").await.expect("store");
        let manifest = store.write_manifest(run_id, vec![file]).await.expect("manifest");

        let value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&manifest.absolute_path).expect("read"))
                .expect("parse");
        assert_eq!(value["run_id"], run_id.to_string());
        assert_eq!(value["files"][0]["name"], "summary_json");
        assert_eq!(value["files"][0]["bytes"], 2);
    }
}
