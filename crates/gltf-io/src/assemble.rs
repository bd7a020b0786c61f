//! Root object assembly.

use gltf_core::Root;
use serde::de::MapAccess;

use crate::error::Result;
use crate::options::DecodeOptions;
use crate::reader::{decode_slice, DecodeObject, ObjectReader};
use crate::warning::Warning;

/// An assembled but unvalidated root, as produced by [`parse_root`].
#[derive(Debug, Clone)]
pub struct Parsed {
    pub root: Root,
    pub warnings: Vec<Warning>,
}

/// Decodes glTF JSON into a [`Root`] without validating references or
/// resolving buffers.
///
/// Only the enum policy of `options` applies here.
pub fn parse_root(json: &[u8], options: &DecodeOptions) -> Result<Parsed> {
    let (root, warnings) = decode_slice::<Root>(json, options.is_strict())?;
    log::debug!(
        "assembled root: {} nodes, {} meshes, {} accessors, {} buffers, {} warnings",
        root.nodes.len(),
        root.meshes.len(),
        root.accessors.len(),
        root.buffers.len(),
        warnings.len()
    );
    Ok(Parsed { root, warnings })
}

impl DecodeObject for Root {
    const EXPECTING: &'static str = "a glTF root object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> std::result::Result<Self, A::Error> {
        let mut asset = None;
        let mut root = Root::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "asset" => asset = Some(obj.read_object()?),
                "buffers" => root.buffers = obj.read_array()?,
                "bufferViews" => root.buffer_views = obj.read_array()?,
                "accessors" => root.accessors = obj.read_array()?,
                "samplers" => root.samplers = obj.read_array()?,
                "images" => root.images = obj.read_array()?,
                "textures" => root.textures = obj.read_array()?,
                "materials" => root.materials = obj.read_array()?,
                "meshes" => root.meshes = obj.read_array()?,
                "nodes" => root.nodes = obj.read_array()?,
                "skins" => root.skins = obj.read_array()?,
                "animations" => root.animations = obj.read_array()?,
                "scenes" => root.scenes = obj.read_array()?,
                "cameras" => root.cameras = obj.read_array()?,
                "scene" => root.scene = obj.read_optional_index()?,
                "extensionsUsed" => root.extensions_used = obj.read()?,
                "extensionsRequired" => root.extensions_required = obj.read()?,
                "extensions" => root.extensions = obj.read_extensions()?,
                "extras" => root.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        root.asset = asset.ok_or_else(|| obj.missing("asset"))?;
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GltfError;
    use crate::warning::WarningKind;

    #[test]
    fn test_dispatch_keeps_source_order() {
        let json = br#"{
            "nodes": [{"name": "a"}, {"name": "b"}, {"name": "c"}],
            "asset": {"version": "2.0"},
            "scene": 0,
            "scenes": [{"nodes": [0]}],
            "extensionsUsed": ["KHR_lights_punctual"],
            "extras": [1, 2]
        }"#;
        let parsed = parse_root(json, &DecodeOptions::default()).unwrap();
        let names: Vec<_> = parsed
            .root
            .nodes
            .iter()
            .map(|n| n.name.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(parsed.root.scene.map(|s| s.value()), Some(0));
        assert_eq!(parsed.root.extensions_used, ["KHR_lights_punctual"]);
        assert_eq!(parsed.root.extras, Some(serde_json::json!([1, 2])));
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_missing_asset() {
        match parse_root(br#"{"nodes": []}"#, &DecodeOptions::default()) {
            Err(GltfError::MissingRequiredField { path, field, location }) => {
                assert_eq!(path, "");
                assert_eq!(field, "asset");
                assert!(location.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_asset_version() {
        match parse_root(br#"{"asset": {}}"#, &DecodeOptions::default()) {
            Err(GltfError::MissingRequiredField { path, field, .. }) => {
                assert_eq!(path, "asset");
                assert_eq!(field, "version");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_root_property_warns() {
        let parsed = parse_root(
            br#"{"asset": {"version": "2.0"}, "lights": [{"type": "point"}]}"#,
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].path, "");
        assert_eq!(parsed.warnings[0].kind, WarningKind::UnknownProperty("lights".into()));
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(matches!(
            parse_root(b"[1, 2]", &DecodeOptions::default()),
            Err(GltfError::InvalidFieldValue { .. })
        ));
        assert!(matches!(
            parse_root(br#"{"asset": {"version": "2.0"}} {}"#, &DecodeOptions::default()),
            Err(GltfError::MalformedJson { .. })
        ));
    }
}
