//! Typed accessor reads through a decoded document.

use gltf_io::gltf_core::{
    Accessor, AccessorType, Asset, Buffer, BufferView, ComponentType, Index, Root, Sparse,
    SparseIndices, SparseValues,
};
use gltf_io::{decode, writer, DecodeOptions, Document, GltfError};

/// Packs `root` with `payload` as its only buffer into a GLB and decodes it.
fn document(mut root: Root, payload: Vec<u8>) -> Document {
    root.asset = Asset::new("2.0");
    root.buffers = vec![Buffer {
        byte_length: payload.len() as u64,
        ..Buffer::default()
    }];
    let data = writer::to_glb(&root, &[payload]).unwrap();
    decode(&data, &DecodeOptions::default()).unwrap()
}

fn view(byte_offset: u64, byte_length: u64) -> BufferView {
    BufferView {
        byte_offset,
        ..BufferView::new(Index::new(0), byte_length)
    }
}

#[test]
fn test_interleaved_elements_follow_stride() {
    let mut payload = Vec::new();
    for i in 0..3u16 {
        payload.extend_from_slice(&(10 * i).to_le_bytes());
        payload.extend_from_slice(&(10 * i + 1).to_le_bytes());
        payload.extend_from_slice(&[0xEE; 4]);
    }
    let mut root = Root::default();
    root.buffer_views.push(BufferView {
        byte_stride: Some(8),
        ..view(0, 24)
    });
    root.accessors.push(Accessor {
        buffer_view: Some(Index::new(0)),
        ..Accessor::new(ComponentType::U16, AccessorType::Vec2, 3)
    });

    let document = document(root, payload);
    let values: Vec<u32> = document.accessor_data(Index::new(0)).unwrap();
    assert_eq!(values, [0, 1, 10, 11, 20, 21]);
}

#[test]
fn test_byte_offset_within_view() {
    let mut payload = vec![0xFF; 4];
    payload.extend_from_slice(&1.5f32.to_le_bytes());
    payload.extend_from_slice(&(-2.0f32).to_le_bytes());
    let mut root = Root::default();
    root.buffer_views.push(view(0, 12));
    root.accessors.push(Accessor {
        buffer_view: Some(Index::new(0)),
        byte_offset: 4,
        ..Accessor::new(ComponentType::F32, AccessorType::Scalar, 2)
    });

    let document = document(root, payload);
    let values: Vec<f64> = document.accessor_data(Index::new(0)).unwrap();
    assert_eq!(values, [1.5, -2.0]);
}

#[test]
fn test_sparse_values_replace_zeros() {
    let mut payload = vec![1u8, 3, 0, 0];
    payload.extend_from_slice(&5.0f32.to_le_bytes());
    payload.extend_from_slice(&7.0f32.to_le_bytes());
    let mut root = Root::default();
    root.buffer_views.push(view(0, 2));
    root.buffer_views.push(view(4, 8));
    root.accessors.push(Accessor {
        sparse: Some(Sparse {
            count: 2,
            indices: SparseIndices {
                buffer_view: Index::new(0),
                byte_offset: 0,
                component_type: ComponentType::U8.into(),
                extensions: Default::default(),
                extras: None,
            },
            values: SparseValues {
                buffer_view: Index::new(1),
                byte_offset: 0,
                extensions: Default::default(),
                extras: None,
            },
            extensions: Default::default(),
            extras: None,
        }),
        ..Accessor::new(ComponentType::F32, AccessorType::Scalar, 4)
    });

    let document = document(root, payload);
    let values: Vec<f32> = document.accessor_data(Index::new(0)).unwrap();
    assert_eq!(values, [0.0, 5.0, 0.0, 7.0]);
}

#[test]
fn test_accessor_without_view_is_zeros() {
    let mut root = Root::default();
    root.accessors
        .push(Accessor::new(ComponentType::F32, AccessorType::Vec3, 2));
    let document = document(root, Vec::new());
    let values: Vec<f32> = document.accessor_data(Index::new(0)).unwrap();
    assert_eq!(values, [0.0; 6]);
}

#[test]
fn test_matrix_columns_are_padded() {
    let payload = vec![1, 2, 0xAA, 0xAA, 3, 4, 0xAA, 0xAA];
    let mut root = Root::default();
    root.buffer_views.push(view(0, 8));
    root.accessors.push(Accessor {
        buffer_view: Some(Index::new(0)),
        ..Accessor::new(ComponentType::U8, AccessorType::Mat2, 1)
    });

    let document = document(root, payload);
    let values: Vec<u8> = document.accessor_data(Index::new(0)).unwrap();
    assert_eq!(values, [1, 2, 3, 4]);
}

#[test]
fn test_component_out_of_range_for_target_type() {
    let mut root = Root::default();
    root.buffer_views.push(view(0, 4));
    root.accessors.push(Accessor {
        buffer_view: Some(Index::new(0)),
        ..Accessor::new(ComponentType::I8, AccessorType::Vec4, 1)
    });

    let document = document(root, vec![1, 0xFF, 2, 3]);
    let signed: Vec<i32> = document.accessor_data(Index::new(0)).unwrap();
    assert_eq!(signed, [1, -1, 2, 3]);
    match document.accessor_data::<u32>(Index::new(0)) {
        Err(GltfError::InvalidFieldValue { path, .. }) => assert_eq!(path, "accessors[0]"),
        other => panic!("unexpected {:?}", other),
    }
    assert!(document.accessor_data::<f32>(Index::new(1)).is_err());
}

#[test]
fn test_huge_count_is_an_error_not_an_allocation() {
    let json = r#"{
        "asset": {"version": "2.0"},
        "accessors": [{"componentType": 5126, "count": 576460752303423487, "type": "MAT4"}]
    }"#;
    let document = decode(json.as_bytes(), &DecodeOptions::default()).unwrap();
    match document.accessor_data::<f32>(Index::new(0)) {
        Err(GltfError::InvalidFieldValue { path, message, .. }) => {
            assert_eq!(path, "accessors[0]");
            assert!(message.contains("too large"), "{}", message);
        }
        other => panic!("unexpected {:?}", other),
    }
}
