use gltf_core::{Accessor, Extensions, Sparse, SparseIndices, SparseValues};
use serde::de::MapAccess;

use crate::reader::{DecodeObject, ObjectReader};

impl DecodeObject for Accessor {
    const EXPECTING: &'static str = "an accessor object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut component_type = None;
        let mut count = None;
        let mut element_type = None;
        let mut buffer_view = None;
        let mut byte_offset = 0;
        let mut normalized = false;
        let mut max = None;
        let mut min = None;
        let mut sparse = None;
        let mut name = None;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "componentType" => component_type = Some(obj.read_gl_enum("componentType")?),
                "count" => count = Some(obj.read()?),
                "type" => element_type = Some(obj.read_str_enum("type")?),
                "bufferView" => buffer_view = obj.read_optional_index()?,
                "byteOffset" => byte_offset = obj.read()?,
                "normalized" => normalized = obj.read()?,
                "max" => max = obj.read()?,
                "min" => min = obj.read()?,
                "sparse" => sparse = Some(obj.read_object()?),
                "name" => name = obj.read()?,
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(Accessor {
            buffer_view,
            byte_offset,
            component_type: component_type.ok_or_else(|| obj.missing("componentType"))?,
            normalized,
            count: count.ok_or_else(|| obj.missing("count"))?,
            element_type: element_type.ok_or_else(|| obj.missing("type"))?,
            max,
            min,
            sparse,
            name,
            extensions,
            extras,
        })
    }
}

impl DecodeObject for Sparse {
    const EXPECTING: &'static str = "a sparse storage object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut count = None;
        let mut indices = None;
        let mut values = None;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "count" => count = Some(obj.read()?),
                "indices" => indices = Some(obj.read_object()?),
                "values" => values = Some(obj.read_object()?),
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(Sparse {
            count: count.ok_or_else(|| obj.missing("count"))?,
            indices: indices.ok_or_else(|| obj.missing("indices"))?,
            values: values.ok_or_else(|| obj.missing("values"))?,
            extensions,
            extras,
        })
    }
}

impl DecodeObject for SparseIndices {
    const EXPECTING: &'static str = "a sparse indices object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut buffer_view = None;
        let mut component_type = None;
        let mut byte_offset = 0;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "bufferView" => buffer_view = Some(obj.read_index()?),
                "componentType" => component_type = Some(obj.read_gl_enum("componentType")?),
                "byteOffset" => byte_offset = obj.read()?,
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(SparseIndices {
            buffer_view: buffer_view.ok_or_else(|| obj.missing("bufferView"))?,
            byte_offset,
            component_type: component_type.ok_or_else(|| obj.missing("componentType"))?,
            extensions,
            extras,
        })
    }
}

impl DecodeObject for SparseValues {
    const EXPECTING: &'static str = "a sparse values object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut buffer_view = None;
        let mut byte_offset = 0;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "bufferView" => buffer_view = Some(obj.read_index()?),
                "byteOffset" => byte_offset = obj.read()?,
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(SparseValues {
            buffer_view: buffer_view.ok_or_else(|| obj.missing("bufferView"))?,
            byte_offset,
            extensions,
            extras,
        })
    }
}
