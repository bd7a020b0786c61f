//! Buffer payload resolution.

use gltf_core::{Buffer, Root};

use crate::error::{GltfError, Result};
use crate::options::DecodeOptions;
use crate::uri;

/// Fetches the payload of every buffer, index-aligned with `root.buffers`.
///
/// Sources are tried in order: the GLB binary chunk (buffer 0 without a
/// `uri`), a `data:` URI, then the caller's loader. Payloads longer than
/// `byteLength` are truncated to it.
pub(crate) fn resolve_buffers(
    root: &Root,
    bin: Option<&[u8]>,
    options: &DecodeOptions,
) -> Result<Vec<Vec<u8>>> {
    let mut payloads = Vec::with_capacity(root.buffers.len());
    for (index, buffer) in root.buffers.iter().enumerate() {
        if options.is_cancelled() {
            return Err(GltfError::Cancelled);
        }
        let (source, mut payload) = fetch(index, buffer, bin, options)?;
        let expected = buffer.byte_length;
        if (payload.len() as u64) < expected {
            return Err(unavailable(
                index,
                source,
                format!("payload has {} bytes, byteLength is {}", payload.len(), expected),
            ));
        }
        payload.truncate(expected as usize);
        log::trace!("buffer {}: {} bytes from {}", index, payload.len(), source);
        payloads.push(payload);
    }
    log::debug!("resolved {} buffers", payloads.len());
    Ok(payloads)
}

fn fetch<'a>(
    index: usize,
    buffer: &'a Buffer,
    bin: Option<&[u8]>,
    options: &DecodeOptions,
) -> Result<(&'a str, Vec<u8>)> {
    let uri = match &buffer.uri {
        Some(uri) => uri.as_str(),
        None => {
            return match bin {
                Some(bin) if index == 0 => Ok(("GLB binary chunk", bin.to_vec())),
                _ => Err(unavailable(
                    index,
                    "<no uri>",
                    "buffer has no uri and there is no GLB binary chunk for it",
                )),
            };
        }
    };

    if uri::is_data_uri(uri) {
        let payload =
            uri::decode_data_uri(uri).map_err(|reason| unavailable(index, "data URI", reason))?;
        return Ok(("data URI", payload));
    }

    let loader = options
        .buffer_loader()
        .ok_or_else(|| unavailable(index, uri, "no buffer loader is configured"))?;
    let payload = loader
        .load(uri)
        .map_err(|err| unavailable(index, uri, err.to_string()))?;
    Ok((uri, payload))
}

fn unavailable(index: usize, source: &str, reason: impl Into<String>) -> GltfError {
    GltfError::BufferUnavailable {
        index,
        source_name: source.to_string(),
        reason: reason.into(),
    }
}
