//! In-memory resource store.

use std::collections::HashMap;
use std::io;

use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt;

use super::{content_type_for, validate_path, Representation, ResourceStore};

/// A fixed set of documents keyed by request path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    resources: HashMap<String, Representation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document; the content type is guessed from the path.
    pub fn with(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        let content_type = content_type_for(&path).to_string();
        self.resources.insert(
            path,
            Representation {
                content_type,
                data: data.into(),
            },
        );
        self
    }

    fn lookup(&self, path: &str) -> io::Result<Representation> {
        validate_path(path)?;
        self.resources.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no resource at {path}"))
        })
    }
}

impl ResourceStore for MemoryStore {
    fn has_resource<'a>(&'a self, path: &'a str) -> BoxFuture<'a, io::Result<bool>> {
        let result = validate_path(path).map(|()| self.resources.contains_key(path));
        future::ready(result).boxed()
    }

    fn get_representation<'a>(&'a self, path: &'a str) -> BoxFuture<'a, io::Result<Representation>> {
        future::ready(self.lookup(path)).boxed()
    }
}
