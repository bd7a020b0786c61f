//! Sources for external buffer payloads.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::uri;

/// Fetches the bytes behind an external buffer URI.
///
/// The decoder only calls a loader for URIs that are neither a `data:` URI
/// nor the GLB binary chunk. Any closure `Fn(&str) -> io::Result<Vec<u8>>`
/// is a loader.
pub trait BufferLoader {
    fn load(&self, uri: &str) -> io::Result<Vec<u8>>;
}

impl<F> BufferLoader for F
where
    F: Fn(&str) -> io::Result<Vec<u8>>,
{
    fn load(&self, uri: &str) -> io::Result<Vec<u8>> {
        self(uri)
    }
}

/// Loads relative URIs from a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsLoader {
    base: PathBuf,
}

impl FsLoader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Maps a URI to a path below the base directory.
    ///
    /// `file:` URIs are accepted; any other scheme is rejected. Absolute
    /// paths and `..` segments are rejected with `InvalidInput`, so the
    /// result never leaves the base directory.
    pub fn resolve(&self, uri: &str) -> io::Result<PathBuf> {
        let relative = match uri::scheme(uri) {
            None => uri,
            Some(scheme) if scheme.eq_ignore_ascii_case("file") => {
                let rest = &uri[scheme.len() + 1..];
                rest.strip_prefix("//").unwrap_or(rest)
            }
            Some(scheme) => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("unsupported URI scheme `{}`", scheme),
                ))
            }
        };
        let decoded = String::from_utf8(uri::percent_decode(relative)).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "URI is not valid UTF-8")
        })?;
        let relative = Path::new(&decoded);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("URI `{}` points outside {}", uri, self.base.display()),
            ));
        }
        Ok(self.base.join(relative))
    }
}

impl BufferLoader for FsLoader {
    fn load(&self, uri: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve(uri)?;
        log::trace!("loading external buffer from {}", path.display());
        fs::read(path)
    }
}
