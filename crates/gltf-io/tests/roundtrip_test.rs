//! Decoding the serialized form of a document yields the same document.

use gltf_io::gltf_core::{
    Accessor, AccessorType, AlphaMode, Asset, ComponentType, Index, MagFilter, Material, Mesh,
    MinFilter, Node, Primitive, Root, Sampler, Scene, WrapMode,
};
use gltf_io::{decode_json, writer, DecodeOptions};
use proptest::array::{uniform3, uniform4};
use proptest::prelude::*;

/// Values exactly representable as `f32`, so text round trips are exact.
fn quarter() -> impl Strategy<Value = f32> {
    (-4000i32..4000).prop_map(|v| v as f32 / 4.0)
}

fn wrap_mode() -> impl Strategy<Value = WrapMode> {
    prop_oneof![
        Just(WrapMode::ClampToEdge),
        Just(WrapMode::MirroredRepeat),
        Just(WrapMode::Repeat),
    ]
}

prop_compose! {
    fn sampler()(
        mag in prop_oneof![Just(MagFilter::Nearest), Just(MagFilter::Linear)],
        min in prop_oneof![
            Just(MinFilter::Nearest),
            Just(MinFilter::LinearMipmapLinear),
            Just(MinFilter::NearestMipmapLinear),
        ],
        wrap_s in wrap_mode(),
        wrap_t in wrap_mode(),
        name in proptest::option::of("[a-zA-Z ]{0,12}"),
    ) -> Sampler {
        Sampler {
            mag_filter: mag.into(),
            min_filter: min.into(),
            wrap_s: wrap_s.into(),
            wrap_t: wrap_t.into(),
            name,
            ..Sampler::default()
        }
    }
}

prop_compose! {
    fn material()(
        color in uniform4(quarter()),
        metallic in quarter(),
        blend in any::<bool>(),
        double_sided in any::<bool>(),
    ) -> Material {
        let mut material = Material {
            double_sided,
            ..Material::default()
        };
        material.pbr_metallic_roughness.base_color_factor = color;
        material.pbr_metallic_roughness.metallic_factor = metallic;
        if blend {
            material.alpha_mode = AlphaMode::Blend.into();
        }
        material
    }
}

prop_compose! {
    /// A forest: every node picks at most one earlier node as its parent.
    fn nodes(max: usize)(
        specs in proptest::collection::vec(
            (
                proptest::option::of("[a-z]{1,8}"),
                proptest::option::of(uniform3(quarter())),
                any::<Option<u16>>(),
            ),
            0..max,
        )
    ) -> Vec<Node> {
        let mut nodes: Vec<Node> = Vec::with_capacity(specs.len());
        for (i, (name, translation, parent)) in specs.into_iter().enumerate() {
            if let Some(parent) = parent.filter(|_| i > 0) {
                nodes[parent as usize % i].children.push(Index::new(i as u32));
            }
            nodes.push(Node {
                name,
                translation,
                ..Node::default()
            });
        }
        nodes
    }
}

prop_compose! {
    fn root()(
        samplers in proptest::collection::vec(sampler(), 0..4),
        materials in proptest::collection::vec(material(), 1..3),
        nodes in nodes(12),
        counts in proptest::collection::vec(1u64..100, 1..4),
        primitives in proptest::collection::vec(any::<(u8, u8, bool)>(), 1..5),
        generator in proptest::option::of("[a-z0-9 .]{1,16}"),
    ) -> Root {
        let mut root = Root::new(Asset {
            generator,
            ..Asset::new("2.0")
        });
        root.samplers = samplers;
        root.accessors = counts
            .iter()
            .map(|&count| Accessor::new(ComponentType::F32, AccessorType::Vec3, count))
            .collect();
        let mut mesh = Mesh::default();
        for (attribute, material, indexed) in primitives {
            let accessor = Index::new(u32::from(attribute) % counts.len() as u32);
            let mut primitive = Primitive::new([("POSITION".to_string(), accessor)].into());
            primitive.material = Some(Index::new(u32::from(material) % materials.len() as u32));
            if indexed {
                primitive.indices = Some(accessor);
            }
            mesh.primitives.push(primitive);
        }
        root.meshes.push(mesh);
        root.materials = materials;
        if !nodes.is_empty() {
            let top = nodes
                .iter()
                .enumerate()
                .map(|(i, _)| Index::new(i as u32))
                .filter(|index| nodes.iter().all(|n| !n.children.contains(index)))
                .collect();
            root.scenes.push(Scene { nodes: top, ..Scene::default() });
            root.scene = Some(Index::new(0));
        }
        root.nodes = nodes;
        root
    }
}

proptest! {
    #[test]
    fn test_decode_of_serialized_root_is_identity(root in root()) {
        let json = writer::to_json_string(&root).unwrap();
        let document = decode_json(json.as_bytes(), &DecodeOptions::default()).unwrap();
        prop_assert_eq!(document.root(), &root);
        prop_assert!(document.warnings().is_empty());
    }

    #[test]
    fn test_pretty_and_compact_agree(root in root()) {
        let compact = writer::to_json_string(&root).unwrap();
        let pretty = writer::to_json_pretty(&root).unwrap();
        let a = decode_json(compact.as_bytes(), &DecodeOptions::default()).unwrap();
        let b = decode_json(pretty.as_bytes(), &DecodeOptions::default()).unwrap();
        prop_assert_eq!(a.root(), b.root());
    }

    #[test]
    fn test_arbitrary_bytes_never_panic(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = gltf_io::decode(&data, &DecodeOptions::default());
    }
}
