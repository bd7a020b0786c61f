use gltf_core::{Buffer, BufferView};
use serde::de::MapAccess;

use crate::reader::{DecodeObject, ObjectReader};

impl DecodeObject for Buffer {
    const EXPECTING: &'static str = "a buffer object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut byte_length = None;
        let mut buffer = Buffer::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "byteLength" => byte_length = Some(obj.read()?),
                "uri" => buffer.uri = obj.read()?,
                "name" => buffer.name = obj.read()?,
                "extensions" => buffer.extensions = obj.read_extensions()?,
                "extras" => buffer.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        buffer.byte_length = byte_length.ok_or_else(|| obj.missing("byteLength"))?;
        Ok(buffer)
    }
}

impl DecodeObject for BufferView {
    const EXPECTING: &'static str = "a buffer view object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut buffer = None;
        let mut byte_length = None;
        let mut byte_offset = 0;
        let mut byte_stride = None;
        let mut target = None;
        let mut name = None;
        let mut extensions = Default::default();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "buffer" => buffer = Some(obj.read_index()?),
                "byteLength" => byte_length = Some(obj.read()?),
                "byteOffset" => byte_offset = obj.read()?,
                "byteStride" => byte_stride = obj.read()?,
                "target" => target = Some(obj.read_gl_enum("target")?),
                "name" => name = obj.read()?,
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        let buffer = buffer.ok_or_else(|| obj.missing("buffer"))?;
        let byte_length = byte_length.ok_or_else(|| obj.missing("byteLength"))?;
        Ok(BufferView {
            buffer,
            byte_offset,
            byte_length,
            byte_stride,
            target,
            name,
            extensions,
            extras,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::testing::{lenient, strict};
    use crate::error::GltfError;
    use gltf_core::{BufferTarget, Coded};

    #[test]
    fn test_buffer_view_defaults() {
        let view: BufferView = strict(r#"{"buffer": 1, "byteLength": 64}"#).unwrap();
        assert_eq!(view.buffer.value(), 1);
        assert_eq!(view.byte_offset, 0);
        assert_eq!(view.byte_length, 64);
        assert_eq!(view.byte_stride, None);
        assert_eq!(view.target, None);
    }

    #[test]
    fn test_buffer_view_target() {
        let view: BufferView =
            strict(r#"{"buffer": 0, "byteLength": 8, "target": 34963, "byteStride": 12}"#)
                .unwrap();
        assert_eq!(view.target, Some(Coded::Known(BufferTarget::ElementArrayBuffer)));
        assert_eq!(view.byte_stride, Some(12));

        let (view, warnings) =
            lenient::<BufferView>(r#"{"buffer": 0, "byteLength": 8, "target": 1}"#).unwrap();
        assert_eq!(view.target, Some(Coded::Unknown(1)));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_buffer_requires_byte_length() {
        match strict::<Buffer>(r#"{"uri": "a.bin"}"#) {
            Err(GltfError::MissingRequiredField { field, .. }) => assert_eq!(field, "byteLength"),
            other => panic!("unexpected {:?}", other),
        }
        match strict::<BufferView>(r#"{"byteLength": 4}"#) {
            Err(GltfError::MissingRequiredField { field, .. }) => assert_eq!(field, "buffer"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_negative_length_is_invalid() {
        assert!(matches!(
            strict::<Buffer>(r#"{"byteLength": -4}"#),
            Err(GltfError::InvalidFieldValue { .. })
        ));
    }
}
