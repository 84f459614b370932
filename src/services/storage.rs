use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Creates the storage directory if it is missing. Safe to call repeatedly.
    async fn ensure_ready(&self) -> Result<(), StorageError>;

    /// Writes `data` under `name`, replacing any previous content. Returns bytes written.
    async fn save(&self, name: &str, data: &[u8]) -> Result<u64, StorageError>;

    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError>;

    fn root(&self) -> &Path;
}

/// Flat on-disk store. Callers are responsible for passing already validated names.
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn ensure_ready(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    async fn save(&self, name: &str, data: &[u8]) -> Result<u64, StorageError> {
        tokio::fs::write(self.path_for(name), data).await?;
        Ok(data.len() as u64)
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        match tokio::fs::read(self.path_for(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(name.to_string())),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_ready_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(tmp.path().join("nested").join("files"));

        storage.ensure_ready().await.unwrap();
        storage.ensure_ready().await.unwrap();

        assert!(storage.root().is_dir());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(tmp.path());

        storage.save("a.txt", b"first version").await.unwrap();
        let written = storage.save("a.txt", b"second").await.unwrap();

        assert_eq!(written, 6);
        assert_eq!(storage.read("a.txt").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(tmp.path());

        let err = storage.read("nope.py").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(ref name) if name == "nope.py"));
    }

    #[tokio::test]
    async fn test_read_directory_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        let storage = LocalStorageService::new(tmp.path());

        let err = storage.read("sub").await.unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
