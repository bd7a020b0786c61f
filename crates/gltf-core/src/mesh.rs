use std::collections::BTreeMap;

use serde::Serialize;

use crate::coded::{gl_enum, Coded};
use crate::{Accessor, Extensions, Extras, Index, Material};

gl_enum! {
    /// Topology of a primitive.
    pub enum Mode: "primitive mode" {
        Points = 0 => "POINTS",
        Lines = 1 => "LINES",
        LineLoop = 2 => "LINE_LOOP",
        LineStrip = 3 => "LINE_STRIP",
        Triangles = 4 => "TRIANGLES",
        TriangleStrip = 5 => "TRIANGLE_STRIP",
        TriangleFan = 6 => "TRIANGLE_FAN",
    }
}

/// Vertex attribute semantic (`POSITION`, `TEXCOORD_0`, ...) to accessor.
pub type Attributes = BTreeMap<String, Index<Accessor>>;

/// A set of primitives to be rendered.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mesh {
    pub primitives: Vec<Primitive>,
    /// Default morph target weights.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

/// Geometry to be rendered with a single material.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Primitive {
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indices: Option<Index<Accessor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<Index<Material>>,
    pub mode: Coded<Mode>,
    /// Morph targets, each mapping attribute semantics to displacement accessors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Attributes>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

impl Primitive {
    pub fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            indices: None,
            material: None,
            mode: Mode::Triangles.into(),
            targets: Vec::new(),
            extensions: Extensions::new(),
            extras: None,
        }
    }
}
