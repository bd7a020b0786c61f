use serde::Serialize;

use crate::{Accessor, Extensions, Extras, Index, Node};

/// Joints and matrices defining a skin.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse_bind_matrices: Option<Index<Accessor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skeleton: Option<Index<Node>>,
    pub joints: Vec<Index<Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}
