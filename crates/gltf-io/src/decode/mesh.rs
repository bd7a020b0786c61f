use gltf_core::{Coded, Extensions, Mesh, Mode, Primitive};
use serde::de::MapAccess;

use crate::reader::{DecodeObject, ObjectReader};

impl DecodeObject for Mesh {
    const EXPECTING: &'static str = "a mesh object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut primitives = None;
        let mut mesh = Mesh::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "primitives" => primitives = Some(obj.read_array()?),
                "weights" => mesh.weights = obj.read()?,
                "name" => mesh.name = obj.read()?,
                "extensions" => mesh.extensions = obj.read_extensions()?,
                "extras" => mesh.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        mesh.primitives = primitives.ok_or_else(|| obj.missing("primitives"))?;
        Ok(mesh)
    }
}

impl DecodeObject for Primitive {
    const EXPECTING: &'static str = "a primitive object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut attributes = None;
        let mut indices = None;
        let mut material = None;
        let mut mode: Coded<Mode> = Mode::Triangles.into();
        let mut targets = Vec::new();
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "attributes" => attributes = Some(obj.read_attributes()?),
                "indices" => indices = obj.read_optional_index()?,
                "material" => material = obj.read_optional_index()?,
                "mode" => mode = obj.read_gl_enum("mode")?,
                "targets" => targets = obj.read_attribute_sets()?,
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(Primitive {
            attributes: attributes.ok_or_else(|| obj.missing("attributes"))?,
            indices,
            material,
            mode,
            targets,
            extensions,
            extras,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::testing::strict;
    use crate::error::GltfError;

    #[test]
    fn test_primitive_defaults_to_triangles() {
        let mesh: Mesh = strict(r#"{"primitives": [{"attributes": {"POSITION": 0}}]}"#).unwrap();
        let primitive = &mesh.primitives[0];
        assert_eq!(primitive.mode, Mode::Triangles);
        assert_eq!(primitive.attributes["POSITION"].value(), 0);
        assert!(primitive.indices.is_none());
        assert!(primitive.targets.is_empty());
    }

    #[test]
    fn test_primitive_targets_and_mode() {
        let mesh: Mesh = strict(
            r#"{
                "primitives": [{
                    "attributes": {"POSITION": 0, "NORMAL": 1},
                    "indices": 2, "material": 0, "mode": 1,
                    "targets": [{"POSITION": 3}, {"POSITION": 4, "NORMAL": 5}]
                }],
                "weights": [0.0, 0.5]
            }"#,
        )
        .unwrap();
        let primitive = &mesh.primitives[0];
        assert_eq!(primitive.mode, Mode::Lines);
        assert_eq!(primitive.indices.map(|i| i.value()), Some(2));
        assert_eq!(primitive.targets.len(), 2);
        assert_eq!(primitive.targets[1]["NORMAL"].value(), 5);
        assert_eq!(mesh.weights, Some(vec![0.0, 0.5]));
    }

    #[test]
    fn test_mode_error_path() {
        let err = strict::<Mesh>(
            r#"{"primitives": [{"attributes": {}}, {"attributes": {}, "mode": 9}]}"#,
        )
        .unwrap_err();
        match err {
            GltfError::InvalidEnumValue { path, field, value, .. } => {
                assert_eq!(path, "primitives[1]");
                assert_eq!(field, "mode");
                assert_eq!(value, "9");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_mesh_requires_primitives() {
        assert!(matches!(
            strict::<Mesh>(r#"{"name": "empty"}"#),
            Err(GltfError::MissingRequiredField { field: "primitives", .. })
        ));
    }
}
