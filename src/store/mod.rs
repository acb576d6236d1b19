//! Resource storage.
//!
//! # Responsibilities
//! - Answer whether a resource exists at a path
//! - Fetch a resource's bytes and content type
//!
//! # Design Decisions
//! - "Not found" is `io::ErrorKind::NotFound`; callers decide what it means
//! - Paths are request paths (`/a/b.ttl`), never filesystem paths
//! - Paths with `..` segments are refused with `InvalidInput`

pub mod fs;
pub mod memory;

use std::io;

use futures_util::future::BoxFuture;

pub use fs::FsStore;
pub use memory::MemoryStore;

/// A stored resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representation {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Resource lookup used by the serving handlers.
pub trait ResourceStore: Send + Sync + std::fmt::Debug {
    /// Whether a document exists at `path`.
    fn has_resource<'a>(&'a self, path: &'a str) -> BoxFuture<'a, io::Result<bool>>;

    /// Fetch the document at `path`.
    fn get_representation<'a>(&'a self, path: &'a str) -> BoxFuture<'a, io::Result<Representation>>;
}

/// Reject paths that try to leave the store root.
pub(crate) fn validate_path(path: &str) -> io::Result<()> {
    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("path escapes store root: {path}"),
        ));
    }
    Ok(())
}

/// Guess a content type from the file extension.
pub fn content_type_for(path: &str) -> &'static str {
    let extension = path
        .rsplit('/')
        .next()
        .and_then(|segment| segment.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("ttl") => "text/turtle",
        Some("nt") => "application/n-triples",
        Some("jsonld") => "application/ld+json",
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("txt") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",
        Some("rdf") => "application/rdf+xml",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
