//! glTF 2.0 document object model.
//!
//! This crate holds the strongly-typed entities a glTF document is made of,
//! the enum-by-code domains used by their fields, and the [`Root`] aggregate
//! that owns them. Parsing, validation and buffer loading live in `gltf-io`.
//!
//! # Example
//!
//! ```
//! use gltf_core::{Asset, Node, Root, Scene};
//!
//! let mut root = Root::new(Asset::new("2.0"));
//! let node = root.push(Node { name: Some("Camera".into()), ..Node::default() });
//! root.push(Scene { nodes: vec![node], ..Scene::default() });
//!
//! assert_eq!(root.default_scene().map(|s| s.nodes.len()), Some(1));
//! ```

use std::collections::BTreeMap;

pub mod accessor;
pub mod animation;
pub mod asset;
pub mod buffer;
pub mod camera;
pub mod coded;
pub mod image;
pub mod index;
pub mod kind;
pub mod material;
pub mod mesh;
pub mod root;
pub mod scene;
pub mod skin;
pub mod texture;

pub use accessor::{Accessor, AccessorType, ComponentType, Sparse, SparseIndices, SparseValues};
pub use animation::{Animation, AnimationSampler, Channel, Interpolation, Property, Target};
pub use asset::Asset;
pub use buffer::{Buffer, BufferTarget, BufferView};
pub use camera::{Camera, CameraType, Orthographic, Perspective};
pub use coded::{Coded, CodedEnum};
pub use image::Image;
pub use index::Index;
pub use kind::{Entity, EntityKind};
pub use material::{AlphaMode, Material, PbrMetallicRoughness};
pub use mesh::{Attributes, Mesh, Mode, Primitive};
pub use root::Root;
pub use scene::{Node, Scene};
pub use skin::Skin;
pub use texture::{
    MagFilter, MinFilter, NormalTexture, OcclusionTexture, Sampler, Texture, TextureInfo, WrapMode,
};

/// Extension objects keyed by extension name, kept uninterpreted.
pub type Extensions = BTreeMap<String, serde_json::Value>;

/// Application-specific data, kept uninterpreted.
pub type Extras = Option<serde_json::Value>;
