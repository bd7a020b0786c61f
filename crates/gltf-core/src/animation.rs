use serde::Serialize;

use crate::coded::{str_enum, Coded};
use crate::{Accessor, Extensions, Extras, Index, Node};

str_enum! {
    /// Node property targeted by a channel.
    pub enum Property: "animated property" {
        Translation = "translation",
        Rotation = "rotation",
        Scale = "scale",
        Weights = "weights",
    }
}

str_enum! {
    /// Keyframe interpolation algorithm.
    pub enum Interpolation: "interpolation" {
        Linear = "LINEAR",
        Step = "STEP",
        CubicSpline = "CUBICSPLINE",
    }
}

/// A keyframe animation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub channels: Vec<Channel>,
    pub samplers: Vec<AnimationSampler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

/// Binds an animation sampler to a node property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Index into the owning animation's `samplers`.
    pub sampler: Index<AnimationSampler>,
    pub target: Target,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

/// The node and property animated by a channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Absent when the target is provided by an extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<Index<Node>>,
    pub path: Coded<Property>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

/// Keyframe times (`input`) and values (`output`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSampler {
    pub input: Index<Accessor>,
    pub interpolation: Coded<Interpolation>,
    pub output: Index<Accessor>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}
