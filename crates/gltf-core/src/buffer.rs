use serde::Serialize;

use crate::coded::{gl_enum, Coded};
use crate::{Extensions, Extras, Index};

gl_enum! {
    /// GPU binding hint for a buffer view.
    pub enum BufferTarget: "buffer target" {
        ArrayBuffer = 34962 => "ARRAY_BUFFER",
        ElementArrayBuffer = 34963 => "ELEMENT_ARRAY_BUFFER",
    }
}

/// A buffer of raw binary data.
///
/// The payload itself is resolved by the decoder and owned by the document;
/// this entity only describes where it comes from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    pub byte_length: u64,
    /// External URI or `data:` URI. Absent for the GLB binary chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

/// A contiguous byte range of a buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub buffer: Index<Buffer>,
    pub byte_offset: u64,
    pub byte_length: u64,
    /// Distance in bytes between the starts of two consecutive elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte_stride: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Coded<BufferTarget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

impl BufferView {
    pub fn new(buffer: Index<Buffer>, byte_length: u64) -> Self {
        Self {
            buffer,
            byte_offset: 0,
            byte_length,
            byte_stride: None,
            target: None,
            name: None,
            extensions: Extensions::new(),
            extras: None,
        }
    }

    /// One past the last byte of the view within its buffer.
    pub fn byte_end(&self) -> Option<u64> {
        self.byte_offset.checked_add(self.byte_length)
    }
}
