use gltf_core::{Node, Scene, Skin};
use serde::de::MapAccess;

use crate::reader::{DecodeObject, ObjectReader};

impl DecodeObject for Node {
    const EXPECTING: &'static str = "a node object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut node = Node::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "camera" => node.camera = obj.read_optional_index()?,
                "children" => node.children = obj.read_indices()?,
                "skin" => node.skin = obj.read_optional_index()?,
                "mesh" => node.mesh = obj.read_optional_index()?,
                "matrix" => node.matrix = obj.read()?,
                "rotation" => node.rotation = obj.read()?,
                "scale" => node.scale = obj.read()?,
                "translation" => node.translation = obj.read()?,
                "weights" => node.weights = obj.read()?,
                "name" => node.name = obj.read()?,
                "extensions" => node.extensions = obj.read_extensions()?,
                "extras" => node.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(node)
    }
}

impl DecodeObject for Scene {
    const EXPECTING: &'static str = "a scene object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut scene = Scene::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "nodes" => scene.nodes = obj.read_indices()?,
                "name" => scene.name = obj.read()?,
                "extensions" => scene.extensions = obj.read_extensions()?,
                "extras" => scene.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(scene)
    }
}

impl DecodeObject for Skin {
    const EXPECTING: &'static str = "a skin object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut joints = None;
        let mut skin = Skin::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "joints" => joints = Some(obj.read_indices()?),
                "inverseBindMatrices" => skin.inverse_bind_matrices = obj.read_optional_index()?,
                "skeleton" => skin.skeleton = obj.read_optional_index()?,
                "name" => skin.name = obj.read()?,
                "extensions" => skin.extensions = obj.read_extensions()?,
                "extras" => skin.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        skin.joints = joints.ok_or_else(|| obj.missing("joints"))?;
        Ok(skin)
    }
}
