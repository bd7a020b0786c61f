use gltf_core::{Accessor, Buffer, BufferView, Entity, Index, Root};
use num_traits::{NumCast, Zero};

use crate::accessor;
use crate::error::Result;
use crate::warning::Warning;
use crate::writer;

/// A decoded and validated glTF document.
///
/// Every index in [`root`](Document::root) refers to an existing entity, the
/// node hierarchy is a forest, and every buffer payload has been resolved.
#[derive(Debug, Clone)]
pub struct Document {
    root: Root,
    buffers: Vec<Vec<u8>>,
    warnings: Vec<Warning>,
}

impl Document {
    pub(crate) fn new(root: Root, buffers: Vec<Vec<u8>>, warnings: Vec<Warning>) -> Self {
        Self {
            root,
            buffers,
            warnings,
        }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn get<T: Entity>(&self, index: Index<T>) -> Option<&T> {
        self.root.get(index)
    }

    /// Resolved payload of a buffer, exactly `byteLength` bytes long.
    pub fn buffer_data(&self, index: Index<Buffer>) -> Option<&[u8]> {
        self.buffers.get(index.value()).map(Vec::as_slice)
    }

    pub fn view_data(&self, index: Index<BufferView>) -> Option<&[u8]> {
        accessor::view_bytes(&self.root, &self.buffers, index)
    }

    /// Reads every component of an accessor, converted to `T`.
    ///
    /// Fails with `InvalidFieldValue` if a component does not fit in `T`,
    /// for example a negative `BYTE` read as `u32`.
    ///
    /// ```
    /// use gltf_io::decode_json;
    /// use gltf_io::gltf_core::Index;
    ///
    /// let json = br#"{
    ///     "asset": {"version": "2.0"},
    ///     "buffers": [{"byteLength": 4, "uri": "data:application/octet-stream;base64,AAECAw=="}],
    ///     "bufferViews": [{"buffer": 0, "byteLength": 4}],
    ///     "accessors": [{"bufferView": 0, "componentType": 5121, "count": 2, "type": "VEC2"}]
    /// }"#;
    /// let document = decode_json(json, &Default::default()).unwrap();
    /// let values: Vec<u16> = document.accessor_data(Index::new(0)).unwrap();
    /// assert_eq!(values, [0, 1, 2, 3]);
    /// ```
    pub fn accessor_data<T>(&self, index: Index<Accessor>) -> Result<Vec<T>>
    where
        T: NumCast + Zero + Copy,
    {
        accessor::read(&self.root, &self.buffers, index)
    }

    pub fn buffers(&self) -> &[Vec<u8>] {
        &self.buffers
    }

    /// Non-fatal findings collected while decoding, in the order they were
    /// encountered.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Root, Vec<Vec<u8>>, Vec<Warning>) {
        (self.root, self.buffers, self.warnings)
    }

    /// Re-encodes the document as a GLB container.
    pub fn to_glb(&self) -> Result<Vec<u8>> {
        writer::to_glb(&self.root, &self.buffers)
    }

    /// Re-encodes the document as glTF JSON with embedded buffers.
    pub fn to_embedded_json(&self) -> Result<String> {
        writer::to_embedded_json(&self.root, &self.buffers)
    }
}
