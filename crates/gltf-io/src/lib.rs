//! Streaming glTF 2.0 decoder.
//!
//! This crate turns glTF JSON (`.gltf`) or binary glTF (`.glb`) into a
//! validated [`Document`]: the strongly-typed [`gltf_core::Root`] plus the
//! resolved bytes of every buffer.
//!
//! # Pipeline
//!
//! | Stage      | Module       | Fails with |
//! |------------|--------------|------------|
//! | Container  | [`glb`]      | `InvalidContainerFormat` |
//! | Assembly   | `assemble`   | `MalformedJson`, `MissingRequiredField`, `InvalidEnumValue`, `InvalidFieldValue` |
//! | Validation | `validate`   | `DanglingReference`, `CyclicHierarchy`, `MultipleParents`, `UnsupportedExtension`, `UnsupportedVersion`, `InvalidFieldValue` |
//! | Buffers    | `resolve`    | `BufferUnavailable`, `Cancelled` |
//!
//! JSON is read token by token; unknown properties are skipped and reported
//! as [`Warning`]s, extension objects are kept verbatim.
//!
//! # Example
//!
//! ```
//! use gltf_io::{decode, DecodeOptions, WarningKind};
//!
//! let json = br#"{
//!     "asset": {"version": "2.0"},
//!     "samplers": [{"wrapS": 33071, "comment": "clamp"}]
//! }"#;
//! let document = decode(json, &DecodeOptions::default()).unwrap();
//!
//! let sampler = &document.root().samplers[0];
//! assert_eq!(sampler.wrap_s, gltf_io::gltf_core::WrapMode::ClampToEdge);
//! assert_eq!(
//!     document.warnings()[0].kind,
//!     WarningKind::UnknownProperty("comment".into())
//! );
//! ```
//!
//! Files are opened with [`open`], which resolves external buffers relative
//! to the file:
//!
//! ```ignore
//! let document = gltf_io::open("scene.gltf", DecodeOptions::default())?;
//! let positions: Vec<f32> = document.accessor_data(Index::new(0))?;
//! ```

use std::fs;
use std::path::Path;

mod accessor;
mod assemble;
mod decode;
mod document;
mod error;
pub mod glb;
mod loader;
mod options;
mod reader;
mod resolve;
mod uri;
mod validate;
mod warning;
pub mod writer;

pub use gltf_core;

pub use assemble::{parse_root, Parsed};
pub use document::Document;
pub use error::{GltfError, Location, Result};
pub use loader::{BufferLoader, FsLoader};
pub use options::DecodeOptions;
pub use warning::{Warning, WarningKind};

/// Decodes glTF JSON or a GLB container, telling them apart by the GLB
/// magic.
pub fn decode(data: &[u8], options: &DecodeOptions) -> Result<Document> {
    if glb::is_glb(data) {
        decode_glb(data, options)
    } else {
        decode_json(data, options)
    }
}

/// Decodes a plain glTF JSON document.
pub fn decode_json(json: &[u8], options: &DecodeOptions) -> Result<Document> {
    build(json, None, options)
}

/// Decodes a GLB container. The header is checked before any JSON is read.
pub fn decode_glb(data: &[u8], options: &DecodeOptions) -> Result<Document> {
    let container = glb::Glb::from_slice(data)?;
    log::debug!(
        "GLB container: {} bytes, JSON chunk {} bytes, BIN chunk {} bytes",
        container.length,
        container.json.len(),
        container.bin.map_or(0, <[u8]>::len)
    );
    build(container.json, container.bin, options)
}

/// Reads and decodes a `.gltf` or `.glb` file.
///
/// Unless `options` already carries a loader, external buffer URIs are
/// resolved against the file's directory with an [`FsLoader`].
pub fn open(path: impl AsRef<Path>, options: DecodeOptions) -> Result<Document> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let options = if options.has_loader() {
        options
    } else {
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        options.loader(FsLoader::new(base))
    };
    log::debug!("opened {} ({} bytes)", path.display(), data.len());
    decode(&data, &options)
}

fn build(json: &[u8], bin: Option<&[u8]>, options: &DecodeOptions) -> Result<Document> {
    let Parsed { root, mut warnings } = parse_root(json, options)?;
    if options.is_cancelled() {
        return Err(GltfError::Cancelled);
    }
    validate::validate(&root, options, &mut warnings)?;
    let buffers = resolve::resolve_buffers(&root, bin, options)?;
    Ok(Document::new(root, buffers, warnings))
}
