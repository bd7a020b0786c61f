use serde::Serialize;

use crate::kind::{Entity, EntityKind};
use crate::{
    Accessor, Animation, Asset, Buffer, BufferView, Camera, Extensions, Extras, Image, Index,
    Material, Mesh, Node, Sampler, Scene, Skin, Texture,
};

/// The root object of a glTF document.
///
/// Every entity array is kept in source order, so an entity's index is its
/// position in the JSON array it was read from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Root {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions_used: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions_required: Vec<String>,
    pub asset: Asset,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accessors: Vec<Accessor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub animations: Vec<Animation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buffers: Vec<Buffer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buffer_views: Vec<BufferView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cameras: Vec<Camera>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<Material>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meshes: Vec<Mesh>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub samplers: Vec<Sampler>,
    /// The scene to display by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Index<Scene>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scenes: Vec<Scene>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skins: Vec<Skin>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub textures: Vec<Texture>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

impl Root {
    pub fn new(asset: Asset) -> Self {
        Self {
            asset,
            ..Self::default()
        }
    }

    /// Looks up an entity by index.
    pub fn get<T: Entity>(&self, index: Index<T>) -> Option<&T> {
        T::all(self).get(index.value())
    }

    /// Returns the number of entities of `kind`. The asset counts as one.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Asset => 1,
            EntityKind::Buffer => self.buffers.len(),
            EntityKind::BufferView => self.buffer_views.len(),
            EntityKind::Accessor => self.accessors.len(),
            EntityKind::Sampler => self.samplers.len(),
            EntityKind::Image => self.images.len(),
            EntityKind::Texture => self.textures.len(),
            EntityKind::Material => self.materials.len(),
            EntityKind::Mesh => self.meshes.len(),
            EntityKind::Node => self.nodes.len(),
            EntityKind::Skin => self.skins.len(),
            EntityKind::Animation => self.animations.len(),
            EntityKind::Scene => self.scenes.len(),
            EntityKind::Camera => self.cameras.len(),
        }
    }

    /// Appends an entity and returns its index.
    pub fn push<T: Entity>(&mut self, value: T) -> Index<T>
    where
        Self: Extend<T>,
    {
        let index = Index::new(T::all(self).len() as u32);
        self.extend(std::iter::once(value));
        index
    }

    /// Returns the scene to display: the declared default, or the first one.
    pub fn default_scene(&self) -> Option<&Scene> {
        match self.scene {
            Some(index) => self.get(index),
            None => self.scenes.first(),
        }
    }

    /// Returns true if `name` is listed in `extensionsUsed`.
    pub fn uses_extension(&self, name: &str) -> bool {
        self.extensions_used.iter().any(|used| used == name)
    }
}

macro_rules! impl_extend {
    ($($ty:ty => $field:ident;)+) => {
        $(
            impl Extend<$ty> for Root {
                fn extend<I: IntoIterator<Item = $ty>>(&mut self, iter: I) {
                    self.$field.extend(iter);
                }
            }
        )+
    };
}

impl_extend! {
    Accessor => accessors;
    Animation => animations;
    Buffer => buffers;
    BufferView => buffer_views;
    Camera => cameras;
    Image => images;
    Material => materials;
    Mesh => meshes;
    Node => nodes;
    Sampler => samplers;
    Scene => scenes;
    Skin => skins;
    Texture => textures;
}
