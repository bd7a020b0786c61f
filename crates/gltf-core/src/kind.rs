use std::fmt;

use crate::root::Root;
use crate::{
    Accessor, Animation, Buffer, BufferView, Camera, Image, Material, Mesh, Node, Sampler, Scene,
    Skin, Texture,
};

/// Tag for every top-level entity kind of a glTF document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Asset,
    Buffer,
    BufferView,
    Accessor,
    Sampler,
    Image,
    Texture,
    Material,
    Mesh,
    Node,
    Skin,
    Animation,
    Scene,
    Camera,
}

impl EntityKind {
    /// Every kind that lives in a top-level array.
    pub const INDEXED: [EntityKind; 13] = [
        EntityKind::Buffer,
        EntityKind::BufferView,
        EntityKind::Accessor,
        EntityKind::Sampler,
        EntityKind::Image,
        EntityKind::Texture,
        EntityKind::Material,
        EntityKind::Mesh,
        EntityKind::Node,
        EntityKind::Skin,
        EntityKind::Animation,
        EntityKind::Scene,
        EntityKind::Camera,
    ];

    /// Returns the name of the top-level JSON property holding this kind.
    pub const fn property(self) -> &'static str {
        match self {
            EntityKind::Asset => "asset",
            EntityKind::Buffer => "buffers",
            EntityKind::BufferView => "bufferViews",
            EntityKind::Accessor => "accessors",
            EntityKind::Sampler => "samplers",
            EntityKind::Image => "images",
            EntityKind::Texture => "textures",
            EntityKind::Material => "materials",
            EntityKind::Mesh => "meshes",
            EntityKind::Node => "nodes",
            EntityKind::Skin => "skins",
            EntityKind::Animation => "animations",
            EntityKind::Scene => "scenes",
            EntityKind::Camera => "cameras",
        }
    }

    /// Returns a singular human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            EntityKind::Asset => "asset",
            EntityKind::Buffer => "buffer",
            EntityKind::BufferView => "buffer view",
            EntityKind::Accessor => "accessor",
            EntityKind::Sampler => "sampler",
            EntityKind::Image => "image",
            EntityKind::Texture => "texture",
            EntityKind::Material => "material",
            EntityKind::Mesh => "mesh",
            EntityKind::Node => "node",
            EntityKind::Skin => "skin",
            EntityKind::Animation => "animation",
            EntityKind::Scene => "scene",
            EntityKind::Camera => "camera",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An entity stored in one of the root's top-level arrays.
pub trait Entity: Sized {
    const KIND: EntityKind;

    /// Returns the array holding every entity of this kind.
    fn all(root: &Root) -> &[Self];
}

macro_rules! impl_entity {
    ($($ty:ty => $kind:ident, $field:ident;)+) => {
        $(
            impl Entity for $ty {
                const KIND: EntityKind = EntityKind::$kind;

                fn all(root: &Root) -> &[Self] {
                    &root.$field
                }
            }
        )+
    };
}

impl_entity! {
    Buffer => Buffer, buffers;
    BufferView => BufferView, buffer_views;
    Accessor => Accessor, accessors;
    Sampler => Sampler, samplers;
    Image => Image, images;
    Texture => Texture, textures;
    Material => Material, materials;
    Mesh => Mesh, meshes;
    Node => Node, nodes;
    Skin => Skin, skins;
    Animation => Animation, animations;
    Scene => Scene, scenes;
    Camera => Camera, cameras;
}
