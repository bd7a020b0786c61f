//! Opening documents from disk with external buffers.

use std::fs;
use std::io;

use gltf_io::gltf_core::Index;
use gltf_io::{glb, open, DecodeOptions, GltfError};
use tempfile::tempdir;

const SCENE: &str = r#"{
    "asset": {"version": "2.0", "generator": "open_test"},
    "buffers": [{"byteLength": 12, "uri": "data/tri%20angle.bin"}],
    "bufferViews": [{"buffer": 0, "byteLength": 12}],
    "accessors": [{"bufferView": 0, "componentType": 5126, "count": 1, "type": "VEC3"}],
    "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
    "nodes": [{"mesh": 0}],
    "scenes": [{"nodes": [0]}]
}"#;

fn positions() -> Vec<u8> {
    [1.0f32, 2.0, 3.0]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect()
}

#[test]
fn test_open_resolves_relative_to_file() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data").join("tri angle.bin"), positions()).unwrap();
    let path = dir.path().join("scene.gltf");
    fs::write(&path, SCENE).unwrap();

    let document = open(&path, DecodeOptions::default()).unwrap();
    assert_eq!(document.root().asset.generator.as_deref(), Some("open_test"));
    let values: Vec<f32> = document.accessor_data(Index::new(0)).unwrap();
    assert_eq!(values, [1.0, 2.0, 3.0]);
}

#[test]
fn test_open_glb_file() {
    let dir = tempdir().unwrap();
    let json = SCENE.replace(r#", "uri": "data/tri%20angle.bin""#, "");
    let path = dir.path().join("scene.glb");
    let data = glb::write(json.as_bytes(), Some(positions().as_slice())).unwrap();
    fs::write(&path, data).unwrap();

    let document = open(&path, DecodeOptions::default()).unwrap();
    assert_eq!(document.buffer_data(Index::new(0)).map(<[u8]>::len), Some(12));
}

#[test]
fn test_caller_loader_takes_precedence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scene.gltf");
    fs::write(&path, SCENE).unwrap();

    let options = DecodeOptions::new().loader(|uri: &str| -> io::Result<Vec<u8>> {
        assert_eq!(uri, "data/tri%20angle.bin");
        Ok(vec![0; 12])
    });
    let document = open(&path, options).unwrap();
    let values: Vec<f32> = document.accessor_data(Index::new(0)).unwrap();
    assert_eq!(values, [0.0; 3]);
}

#[test]
fn test_missing_files() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        open(dir.path().join("absent.gltf"), DecodeOptions::default()),
        Err(GltfError::Io(_))
    ));

    let path = dir.path().join("scene.gltf");
    fs::write(&path, SCENE).unwrap();
    match open(&path, DecodeOptions::default()) {
        Err(GltfError::BufferUnavailable { source_name, .. }) => {
            assert_eq!(source_name, "data/tri%20angle.bin")
        }
        other => panic!("unexpected {:?}", other),
    }
}
