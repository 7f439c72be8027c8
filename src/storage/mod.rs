//! The folder/file collaborator. The core depends only on the five operations
//! of [`FolderStore`] plus the sidecar-existence probe; everything else about
//! persistence stays behind this seam.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::UNIX_EPOCH;

use async_trait::async_trait;

use crate::core::formats;
use crate::error::{Result, TaggerError};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    /// Milliseconds since the Unix epoch.
    pub last_modified: u64,
}

#[async_trait]
pub trait FolderStore: Send + Sync {
    async fn enumerate(&self) -> Result<Vec<FileInfo>>;
    async fn read(&self, name: &str) -> Result<Vec<u8>>;
    /// Creates the file if absent.
    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()>;
    async fn delete(&self, name: &str) -> Result<()>;
    async fn rename(&self, from: &str, to: &str) -> Result<()>;
    /// Case-insensitive probe for `<photo_name>.xmp`. Returns the actual
    /// filename when present.
    async fn sidecar_for(&self, photo_name: &str) -> Option<String>;
}

/// Production store over a local folder, using tokio's async file I/O.
pub struct FsFolderStore {
    root: PathBuf,
}

impl FsFolderStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(TaggerError::UnsupportedEnvironment(format!(
                "{} is not an accessible folder",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait]
impl FolderStore for FsFolderStore {
    async fn enumerate(&self) -> Result<Vec<FileInfo>> {
        let mut dir = tokio::fs::read_dir(&self.root).await?;
        let mut files = Vec::new();

        while let Some(entry) = dir.next_entry().await? {
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }

            let last_modified = meta
                .modified()
                .ok()
                .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                .map(|elapsed| elapsed.as_millis() as u64)
                .unwrap_or(0);

            files.push(FileInfo {
                name: entry.file_name().to_string_lossy().to_string(),
                size: meta.len(),
                last_modified,
            });
        }

        Ok(files)
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(self.path(name)).await?)
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::write(self.path(name), bytes)
            .await
            .map_err(|err| TaggerError::WriteFailed(format!("{name}: {err}")))
    }

    async fn delete(&self, name: &str) -> Result<()> {
        Ok(tokio::fs::remove_file(self.path(name)).await?)
    }

    async fn rename(&self, from: &str, to: &str) -> Result<()> {
        tokio::fs::rename(self.path(from), self.path(to))
            .await
            .map_err(|err| TaggerError::WriteFailed(format!("{from} -> {to}: {err}")))
    }

    async fn sidecar_for(&self, photo_name: &str) -> Option<String> {
        let wanted = formats::sidecar_name(photo_name).to_lowercase();
        let entries = self.enumerate().await.ok()?;
        entries
            .into_iter()
            .map(|info| info.name)
            .find(|name| name.to_lowercase() == wanted)
    }
}

/// In-memory store for headless tests and dry runs.
#[derive(Default)]
pub struct MemoryFolderStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryFolderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files
            .lock()
            .expect("store lock poisoned")
            .insert(name.into(), bytes.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files
            .lock()
            .expect("store lock poisoned")
            .contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .expect("store lock poisoned")
            .get(name)
            .cloned()
    }
}

#[async_trait]
impl FolderStore for MemoryFolderStore {
    async fn enumerate(&self) -> Result<Vec<FileInfo>> {
        let files = self.files.lock().expect("store lock poisoned");
        Ok(files
            .iter()
            .map(|(name, bytes)| FileInfo {
                name: name.clone(),
                size: bytes.len() as u64,
                last_modified: 0,
            })
            .collect())
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.get(name).ok_or_else(|| {
            TaggerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                name.to_string(),
            ))
        })
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        self.insert(name, bytes);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let removed = self
            .files
            .lock()
            .expect("store lock poisoned")
            .remove(name);
        match removed {
            Some(_) => Ok(()),
            None => Err(TaggerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                name.to_string(),
            ))),
        }
    }

    async fn rename(&self, from: &str, to: &str) -> Result<()> {
        let mut files = self.files.lock().expect("store lock poisoned");
        match files.remove(from) {
            Some(bytes) => {
                files.insert(to.to_string(), bytes);
                Ok(())
            }
            None => Err(TaggerError::WriteFailed(format!("{from}: not found"))),
        }
    }

    async fn sidecar_for(&self, photo_name: &str) -> Option<String> {
        let wanted = formats::sidecar_name(photo_name).to_lowercase();
        let files = self.files.lock().expect("store lock poisoned");
        files
            .keys()
            .find(|name| name.to_lowercase() == wanted)
            .cloned()
    }
}
