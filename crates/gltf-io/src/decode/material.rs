use gltf_core::{Material, PbrMetallicRoughness};
use serde::de::MapAccess;

use crate::reader::{DecodeObject, ObjectReader};

impl DecodeObject for Material {
    const EXPECTING: &'static str = "a material object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut material = Material::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "pbrMetallicRoughness" => material.pbr_metallic_roughness = obj.read_object()?,
                "normalTexture" => material.normal_texture = Some(obj.read_object()?),
                "occlusionTexture" => material.occlusion_texture = Some(obj.read_object()?),
                "emissiveTexture" => material.emissive_texture = Some(obj.read_object()?),
                "emissiveFactor" => material.emissive_factor = obj.read()?,
                "alphaMode" => material.alpha_mode = obj.read_str_enum("alphaMode")?,
                "alphaCutoff" => material.alpha_cutoff = obj.read()?,
                "doubleSided" => material.double_sided = obj.read()?,
                "name" => material.name = obj.read()?,
                "extensions" => material.extensions = obj.read_extensions()?,
                "extras" => material.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(material)
    }
}

impl DecodeObject for PbrMetallicRoughness {
    const EXPECTING: &'static str = "a PBR metallic-roughness object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut pbr = PbrMetallicRoughness::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "baseColorFactor" => pbr.base_color_factor = obj.read()?,
                "baseColorTexture" => pbr.base_color_texture = Some(obj.read_object()?),
                "metallicFactor" => pbr.metallic_factor = obj.read()?,
                "roughnessFactor" => pbr.roughness_factor = obj.read()?,
                "metallicRoughnessTexture" => {
                    pbr.metallic_roughness_texture = Some(obj.read_object()?)
                }
                "extensions" => pbr.extensions = obj.read_extensions()?,
                "extras" => pbr.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(pbr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::testing::strict;
    use crate::error::GltfError;
    use gltf_core::AlphaMode;

    #[test]
    fn test_material_defaults() {
        let material: Material = strict("{}").unwrap();
        assert_eq!(material, Material::default());
        assert_eq!(material.alpha_mode, AlphaMode::Opaque);
        assert_eq!(material.alpha_cutoff, 0.5);
        assert_eq!(material.pbr_metallic_roughness.base_color_factor, [1.0; 4]);
    }

    #[test]
    fn test_material_textures() {
        let material: Material = strict(
            r#"{
                "pbrMetallicRoughness": {
                    "baseColorFactor": [0.5, 0.5, 0.5, 1.0],
                    "baseColorTexture": {"index": 0, "texCoord": 1},
                    "metallicFactor": 0.0
                },
                "emissiveTexture": {"index": 2},
                "emissiveFactor": [1.0, 0.5, 0.0],
                "alphaMode": "MASK",
                "alphaCutoff": 0.3,
                "doubleSided": true
            }"#,
        )
        .unwrap();
        let pbr = &material.pbr_metallic_roughness;
        assert_eq!(pbr.base_color_factor, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(pbr.base_color_texture.as_ref().map(|t| t.tex_coord), Some(1));
        assert_eq!(pbr.metallic_factor, 0.0);
        assert_eq!(pbr.roughness_factor, 1.0);
        assert_eq!(material.alpha_mode, AlphaMode::Mask);
        assert!(material.double_sided);

        let slots: Vec<_> = material.texture_slots().map(|(path, i)| (path, i.value())).collect();
        assert_eq!(
            slots,
            [("pbrMetallicRoughness.baseColorTexture", 0), ("emissiveTexture", 2)]
        );
    }

    #[test]
    fn test_short_factor_array_is_invalid() {
        let err = strict::<Material>(r#"{"pbrMetallicRoughness": {"baseColorFactor": [1, 1]}}"#)
            .unwrap_err();
        match err {
            GltfError::InvalidFieldValue { path, .. } => {
                assert_eq!(path, "pbrMetallicRoughness.baseColorFactor")
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
