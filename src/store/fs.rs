//! Filesystem-backed resource store.

use std::io;
use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use super::{content_type_for, validate_path, Representation, ResourceStore};

/// Serves documents from a directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        validate_path(path)?;
        Ok(self.root.join(path.trim_start_matches('/')))
    }

    async fn read(&self, path: &str) -> io::Result<Representation> {
        let file = self.resolve(path)?;
        let metadata = tokio::fs::metadata(&file).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a document: {path}"),
            ));
        }

        let data = tokio::fs::read(&file).await?;
        tracing::debug!(path = %path, bytes = data.len(), "Read resource");
        Ok(Representation {
            content_type: content_type_for(path).to_string(),
            data,
        })
    }

    async fn exists(&self, path: &str) -> io::Result<bool> {
        let file = self.resolve(path)?;
        match tokio::fs::metadata(&file).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl ResourceStore for FsStore {
    fn has_resource<'a>(&'a self, path: &'a str) -> BoxFuture<'a, io::Result<bool>> {
        self.exists(path).boxed()
    }

    fn get_representation<'a>(&'a self, path: &'a str) -> BoxFuture<'a, io::Result<Representation>> {
        self.read(path).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sensor-1")).unwrap();
        std::fs::write(dir.path().join("sensor-1/data.ttl"), "<a> <b> <c> .").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_get_representation() {
        let dir = fixture();
        let store = FsStore::new(dir.path());

        let rep = store.get_representation("/sensor-1/data.ttl").await.unwrap();
        assert_eq!(rep.content_type, "text/turtle");
        assert_eq!(rep.data, b"<a> <b> <c> .");
    }

    #[tokio::test]
    async fn test_missing_and_directories_are_not_found() {
        let dir = fixture();
        let store = FsStore::new(dir.path());

        let err = store.get_representation("/sensor-1/data.html").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let err = store.get_representation("/sensor-1").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_has_resource() {
        let dir = fixture();
        let store = FsStore::new(dir.path());

        assert!(store.has_resource("/sensor-1/data.ttl").await.unwrap());
        assert!(!store.has_resource("/sensor-1/data").await.unwrap());
        assert!(!store.has_resource("/sensor-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_traversal_refused() {
        let dir = fixture();
        let store = FsStore::new(dir.path().join("sensor-1"));

        let err = store.get_representation("/../sensor-1/data.ttl").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
