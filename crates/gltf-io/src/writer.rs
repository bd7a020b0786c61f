//! Serialization of a [`Root`] back to glTF JSON or GLB.
//!
//! Defaulted fields are written out explicitly, so the output is a
//! normalized form of the input: decoding it again yields an equal root.

use std::borrow::Cow;

use gltf_core::Root;

use crate::error::{GltfError, Result};
use crate::{glb, uri};

fn json_error(err: serde_json::Error) -> GltfError {
    GltfError::Io(err.into())
}

/// Compact glTF JSON.
pub fn to_json_string(root: &Root) -> Result<String> {
    serde_json::to_string(root).map_err(json_error)
}

/// Indented glTF JSON.
pub fn to_json_pretty(root: &Root) -> Result<String> {
    serde_json::to_string_pretty(root).map_err(json_error)
}

/// Self-contained glTF JSON: every buffer becomes a base64 `data:` URI.
pub fn to_embedded_json(root: &Root, buffers: &[Vec<u8>]) -> Result<String> {
    let mut root = root.clone();
    for (buffer, payload) in root.buffers.iter_mut().zip(buffers) {
        buffer.uri = Some(uri::encode_data_uri(payload));
    }
    to_json_pretty(&root)
}

/// A GLB container.
///
/// Buffer 0 goes into the BIN chunk when it has no `uri`. Any other buffer
/// without a `uri` is embedded as a `data:` URI, since only the first buffer
/// can refer to the binary chunk.
pub fn to_glb(root: &Root, buffers: &[Vec<u8>]) -> Result<Vec<u8>> {
    let mut root = Cow::Borrowed(root);
    let embed: Vec<usize> = root
        .buffers
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, buffer)| buffer.uri.is_none())
        .map(|(index, _)| index)
        .collect();
    for index in embed {
        if let Some(payload) = buffers.get(index) {
            root.to_mut().buffers[index].uri = Some(uri::encode_data_uri(payload));
        }
    }

    let bin = match root.buffers.first() {
        Some(first) if first.uri.is_none() => buffers.first().map(Vec::as_slice),
        _ => None,
    };
    let json = to_json_string(&root)?;
    Ok(glb::write(json.as_bytes(), bin)?)
}
