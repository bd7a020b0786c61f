use serde::Serialize;

use crate::coded::{str_enum, Coded};
use crate::texture::{NormalTexture, OcclusionTexture, TextureInfo};
use crate::{Extensions, Extras, Index, Texture};

str_enum! {
    /// How the alpha channel of the base color is interpreted.
    pub enum AlphaMode: "alpha mode" {
        Opaque = "OPAQUE",
        Mask = "MASK",
        Blend = "BLEND",
    }
}

/// Surface appearance of a primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub pbr_metallic_roughness: PbrMetallicRoughness,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_texture: Option<NormalTexture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occlusion_texture: Option<OcclusionTexture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_texture: Option<TextureInfo>,
    pub emissive_factor: [f32; 3],
    pub alpha_mode: Coded<AlphaMode>,
    pub alpha_cutoff: f32,
    pub double_sided: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            pbr_metallic_roughness: PbrMetallicRoughness::default(),
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            emissive_factor: [0.0; 3],
            alpha_mode: AlphaMode::Opaque.into(),
            alpha_cutoff: 0.5,
            double_sided: false,
            name: None,
            extensions: Extensions::new(),
            extras: None,
        }
    }
}

/// Metallic-roughness parameters of a material.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    pub base_color_factor: [f32; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_color_texture: Option<TextureInfo>,
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metallic_roughness_texture: Option<TextureInfo>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

impl Default for PbrMetallicRoughness {
    fn default() -> Self {
        Self {
            base_color_factor: [1.0; 4],
            base_color_texture: None,
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            metallic_roughness_texture: None,
            extensions: Extensions::new(),
            extras: None,
        }
    }
}

impl Material {
    /// Iterates over every texture slot that is set, with its JSON path
    /// relative to the material.
    pub fn texture_slots(&self) -> impl Iterator<Item = (&'static str, Index<Texture>)> {
        let pbr = &self.pbr_metallic_roughness;
        [
            (
                "pbrMetallicRoughness.baseColorTexture",
                pbr.base_color_texture.as_ref().map(|t| t.index),
            ),
            (
                "pbrMetallicRoughness.metallicRoughnessTexture",
                pbr.metallic_roughness_texture.as_ref().map(|t| t.index),
            ),
            ("normalTexture", self.normal_texture.as_ref().map(|t| t.index)),
            ("occlusionTexture", self.occlusion_texture.as_ref().map(|t| t.index)),
            ("emissiveTexture", self.emissive_texture.as_ref().map(|t| t.index)),
        ]
        .into_iter()
        .filter_map(|(path, index)| index.map(|index| (path, index)))
    }
}
