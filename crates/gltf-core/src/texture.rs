//! Samplers, textures and the texture references used by materials.

use serde::Serialize;

use crate::coded::{gl_enum, Coded};
use crate::{Extensions, Extras, Image, Index};

gl_enum! {
    /// Magnification filter.
    pub enum MagFilter: "magnification filter" {
        Nearest = 9728 => "NEAREST",
        Linear = 9729 => "LINEAR",
    }
}

gl_enum! {
    /// Minification filter.
    pub enum MinFilter: "minification filter" {
        Nearest = 9728 => "NEAREST",
        Linear = 9729 => "LINEAR",
        NearestMipmapNearest = 9984 => "NEAREST_MIPMAP_NEAREST",
        LinearMipmapNearest = 9985 => "LINEAR_MIPMAP_NEAREST",
        NearestMipmapLinear = 9986 => "NEAREST_MIPMAP_LINEAR",
        LinearMipmapLinear = 9987 => "LINEAR_MIPMAP_LINEAR",
    }
}

gl_enum! {
    /// Texture coordinate wrapping mode.
    pub enum WrapMode: "wrap mode" {
        ClampToEdge = 33071 => "CLAMP_TO_EDGE",
        MirroredRepeat = 33648 => "MIRRORED_REPEAT",
        Repeat = 10497 => "REPEAT",
    }
}

impl MinFilter {
    /// Returns true if this filter samples from mipmap levels.
    pub fn uses_mipmaps(self) -> bool {
        !matches!(self, MinFilter::Nearest | MinFilter::Linear)
    }
}

/// Texture sampler properties for filtering and wrapping modes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sampler {
    pub mag_filter: Coded<MagFilter>,
    pub min_filter: Coded<MinFilter>,
    pub wrap_s: Coded<WrapMode>,
    pub wrap_t: Coded<WrapMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            mag_filter: MagFilter::Linear.into(),
            min_filter: MinFilter::NearestMipmapLinear.into(),
            wrap_s: WrapMode::Repeat.into(),
            wrap_t: WrapMode::Repeat.into(),
            name: None,
            extensions: Extensions::new(),
            extras: None,
        }
    }
}

/// A texture: an image combined with a sampler.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Texture {
    /// Absent means repeat wrapping with automatic filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampler: Option<Index<Sampler>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Index<Image>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

/// Reference from a material slot to a texture.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureInfo {
    pub index: Index<Texture>,
    pub tex_coord: u32,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

impl TextureInfo {
    pub fn new(index: Index<Texture>) -> Self {
        Self {
            index,
            tex_coord: 0,
            extensions: Extensions::new(),
            extras: None,
        }
    }
}

/// Tangent-space normal map reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalTexture {
    pub index: Index<Texture>,
    pub tex_coord: u32,
    pub scale: f32,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

/// Ambient occlusion map reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcclusionTexture {
    pub index: Index<Texture>,
    pub tex_coord: u32,
    pub strength: f32,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}
