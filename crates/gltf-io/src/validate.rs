//! Reference and structure validation of an assembled [`Root`].
//!
//! Runs after the whole document has been read, so forward references
//! (a node listing a child that appears later) are fine. The first problem
//! found is returned; nothing is repaired.

use gltf_core::{CameraType, CodedEnum, ComponentType, Entity, EntityKind, Index, Root, Sparse};

use crate::accessor::Layout;
use crate::error::{GltfError, Result};
use crate::options::DecodeOptions;
use crate::warning::{Warning, WarningKind};

const SUPPORTED_MAJOR: u32 = 2;

/// Runs every check in order: version, references, node hierarchy,
/// required extensions, byte layout.
pub(crate) fn validate(
    root: &Root,
    options: &DecodeOptions,
    warnings: &mut Vec<Warning>,
) -> Result<()> {
    check_version(root)?;
    check_references(root)?;
    check_hierarchy(root)?;
    check_extensions(root, options, warnings)?;
    check_layout(root)?;
    log::debug!("validated {} nodes and {} accessors", root.nodes.len(), root.accessors.len());
    Ok(())
}

fn check_version(root: &Root) -> Result<()> {
    let asset = &root.asset;
    if asset.major_version() != Some(SUPPORTED_MAJOR) {
        return Err(GltfError::UnsupportedVersion(asset.version.clone()));
    }
    if let Some(min_version) = &asset.min_version {
        let major = min_version.split('.').next().and_then(|m| m.parse::<u32>().ok());
        if major != Some(SUPPORTED_MAJOR) {
            return Err(GltfError::UnsupportedVersion(min_version.clone()));
        }
    }
    Ok(())
}

// ============================================================================
// Pass 1: reference bounds
// ============================================================================

/// Fails unless `target` is a position in the array of `T`.
fn check<T: Entity>(
    root: &Root,
    owner: Option<(EntityKind, usize)>,
    field: impl FnOnce() -> String,
    target: Index<T>,
) -> Result<()> {
    if target.value() < T::all(root).len() {
        return Ok(());
    }
    Err(GltfError::DanglingReference {
        owner,
        field: field(),
        target: T::KIND.property(),
        value: target.raw(),
    })
}

fn check_references(root: &Root) -> Result<()> {
    if let Some(scene) = root.scene {
        check(root, None, || "scene".into(), scene)?;
    }

    for (i, view) in root.buffer_views.iter().enumerate() {
        check(root, Some((EntityKind::BufferView, i)), || "buffer".into(), view.buffer)?;
    }

    for (i, accessor) in root.accessors.iter().enumerate() {
        let owner = Some((EntityKind::Accessor, i));
        if let Some(view) = accessor.buffer_view {
            check(root, owner, || "bufferView".into(), view)?;
        }
        if let Some(sparse) = &accessor.sparse {
            check(root, owner, || "sparse.indices.bufferView".into(), sparse.indices.buffer_view)?;
            check(root, owner, || "sparse.values.bufferView".into(), sparse.values.buffer_view)?;
        }
    }

    for (i, image) in root.images.iter().enumerate() {
        if let Some(view) = image.buffer_view {
            check(root, Some((EntityKind::Image, i)), || "bufferView".into(), view)?;
        }
    }

    for (i, texture) in root.textures.iter().enumerate() {
        let owner = Some((EntityKind::Texture, i));
        if let Some(sampler) = texture.sampler {
            check(root, owner, || "sampler".into(), sampler)?;
        }
        if let Some(source) = texture.source {
            check(root, owner, || "source".into(), source)?;
        }
    }

    for (i, material) in root.materials.iter().enumerate() {
        for (slot, texture) in material.texture_slots() {
            check(root, Some((EntityKind::Material, i)), || format!("{}.index", slot), texture)?;
        }
    }

    for (i, mesh) in root.meshes.iter().enumerate() {
        let owner = Some((EntityKind::Mesh, i));
        for (p, primitive) in mesh.primitives.iter().enumerate() {
            for (semantic, &accessor) in &primitive.attributes {
                check(
                    root,
                    owner,
                    || format!("primitives[{}].attributes.{}", p, semantic),
                    accessor,
                )?;
            }
            if let Some(indices) = primitive.indices {
                check(root, owner, || format!("primitives[{}].indices", p), indices)?;
            }
            if let Some(material) = primitive.material {
                check(root, owner, || format!("primitives[{}].material", p), material)?;
            }
            for (t, target) in primitive.targets.iter().enumerate() {
                for (semantic, &accessor) in target {
                    check(
                        root,
                        owner,
                        || format!("primitives[{}].targets[{}].{}", p, t, semantic),
                        accessor,
                    )?;
                }
            }
        }
    }

    for (i, node) in root.nodes.iter().enumerate() {
        let owner = Some((EntityKind::Node, i));
        if let Some(camera) = node.camera {
            check(root, owner, || "camera".into(), camera)?;
        }
        for (c, &child) in node.children.iter().enumerate() {
            check(root, owner, || format!("children[{}]", c), child)?;
        }
        if let Some(skin) = node.skin {
            check(root, owner, || "skin".into(), skin)?;
        }
        if let Some(mesh) = node.mesh {
            check(root, owner, || "mesh".into(), mesh)?;
        }
    }

    for (i, skin) in root.skins.iter().enumerate() {
        let owner = Some((EntityKind::Skin, i));
        if let Some(matrices) = skin.inverse_bind_matrices {
            check(root, owner, || "inverseBindMatrices".into(), matrices)?;
        }
        if let Some(skeleton) = skin.skeleton {
            check(root, owner, || "skeleton".into(), skeleton)?;
        }
        for (j, &joint) in skin.joints.iter().enumerate() {
            check(root, owner, || format!("joints[{}]", j), joint)?;
        }
    }

    for (i, animation) in root.animations.iter().enumerate() {
        let owner = Some((EntityKind::Animation, i));
        for (c, channel) in animation.channels.iter().enumerate() {
            // Channel samplers index the animation's own sampler list.
            if channel.sampler.value() >= animation.samplers.len() {
                return Err(GltfError::DanglingReference {
                    owner,
                    field: format!("channels[{}].sampler", c),
                    target: "animation samplers",
                    value: channel.sampler.raw(),
                });
            }
            if let Some(node) = channel.target.node {
                check(root, owner, || format!("channels[{}].target.node", c), node)?;
            }
        }
        for (s, sampler) in animation.samplers.iter().enumerate() {
            check(root, owner, || format!("samplers[{}].input", s), sampler.input)?;
            check(root, owner, || format!("samplers[{}].output", s), sampler.output)?;
        }
    }

    for (i, scene) in root.scenes.iter().enumerate() {
        for (n, &node) in scene.nodes.iter().enumerate() {
            check(root, Some((EntityKind::Scene, i)), || format!("nodes[{}]", n), node)?;
        }
    }

    Ok(())
}

// ============================================================================
// Pass 2: structure
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Open,
    Closed,
}

/// Rejects cycles, then nodes with more than one parent.
///
/// Depth-first search with an explicit stack, so arbitrarily deep
/// hierarchies cannot overflow the call stack.
fn check_hierarchy(root: &Root) -> Result<()> {
    let nodes = &root.nodes;
    let mut state = vec![Visit::New; nodes.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..nodes.len() {
        if state[start] != Visit::New {
            continue;
        }
        state[start] = Visit::Open;
        stack.push((start, 0));

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            match nodes[node].children.get(next) {
                Some(child) => {
                    top.1 += 1;
                    let child = child.value();
                    match state[child] {
                        Visit::Open => return Err(GltfError::CyclicHierarchy { node: child }),
                        Visit::New => {
                            state[child] = Visit::Open;
                            stack.push((child, 0));
                        }
                        Visit::Closed => {}
                    }
                }
                None => {
                    state[node] = Visit::Closed;
                    stack.pop();
                }
            }
        }
    }

    let mut parents: Vec<Option<usize>> = vec![None; nodes.len()];
    for (parent, node) in nodes.iter().enumerate() {
        for child in &node.children {
            let slot = &mut parents[child.value()];
            match *slot {
                Some(first) => {
                    return Err(GltfError::MultipleParents {
                        node: child.value(),
                        first,
                        second: parent,
                    })
                }
                None => *slot = Some(parent),
            }
        }
    }

    Ok(())
}

fn check_extensions(
    root: &Root,
    options: &DecodeOptions,
    warnings: &mut Vec<Warning>,
) -> Result<()> {
    for name in &root.extensions_required {
        if !root.uses_extension(name) {
            let warning = Warning {
                path: "extensionsRequired".into(),
                kind: WarningKind::UndeclaredRequiredExtension(name.clone()),
            };
            log::warn!("{}", warning);
            warnings.push(warning);
        }
        if !options.is_extension_allowed(name) {
            return Err(GltfError::UnsupportedExtension(name.clone()));
        }
    }
    Ok(())
}

fn check_layout(root: &Root) -> Result<()> {
    for (i, view) in root.buffer_views.iter().enumerate() {
        let path = format!("bufferViews[{}]", i);
        let buffer = &root.buffers[view.buffer.value()];
        match view.byte_end() {
            Some(end) if end <= buffer.byte_length => {}
            _ => {
                return Err(GltfError::invalid(
                    path,
                    format!(
                        "byte range {}+{} exceeds buffer {} of {} bytes",
                        view.byte_offset, view.byte_length, view.buffer, buffer.byte_length
                    ),
                ))
            }
        }
        if let Some(stride) = view.byte_stride {
            if !(4..=252).contains(&stride) || stride % 4 != 0 {
                return Err(GltfError::invalid(
                    path,
                    format!("byteStride {} is not a multiple of 4 in [4, 252]", stride),
                ));
            }
        }
    }

    for (i, accessor) in root.accessors.iter().enumerate() {
        let path = format!("accessors[{}]", i);
        if accessor.count == 0 {
            return Err(GltfError::invalid(
                format!("{}.count", path),
                "an accessor needs at least one element",
            ));
        }
        let Some(layout) = Layout::for_accessor(accessor) else {
            continue;
        };
        let component_size = layout.component.size() as u64;
        if accessor.byte_offset % component_size != 0 {
            return Err(GltfError::invalid(
                format!("{}.byteOffset", path),
                format!(
                    "byteOffset {} is not a multiple of the {}-byte component",
                    accessor.byte_offset, component_size
                ),
            ));
        }
        if let Some(view_index) = accessor.buffer_view {
            let view = &root.buffer_views[view_index.value()];
            let stride = view.byte_stride.map_or(layout.element_size as u64, u64::from);
            if stride < layout.element_size as u64 {
                return Err(GltfError::invalid(
                    path,
                    format!(
                        "byteStride {} of buffer view {} is smaller than the {}-byte element",
                        stride, view_index, layout.element_size
                    ),
                ));
            }
            let end = last_element_end(
                accessor.byte_offset,
                stride,
                accessor.count,
                layout.element_size as u64,
            );
            if end.map_or(true, |end| end > view.byte_length) {
                return Err(GltfError::invalid(
                    path,
                    format!(
                        "{} elements at offset {} do not fit buffer view {} of {} bytes",
                        accessor.count, accessor.byte_offset, view_index, view.byte_length
                    ),
                ));
            }
        }
        if let Some(sparse) = &accessor.sparse {
            check_sparse(root, &path, accessor.count, sparse, layout)?;
        }
    }

    for (i, mesh) in root.meshes.iter().enumerate() {
        if mesh.primitives.is_empty() {
            return Err(GltfError::invalid(
                format!("meshes[{}].primitives", i),
                "a mesh needs at least one primitive",
            ));
        }
    }

    for (i, camera) in root.cameras.iter().enumerate() {
        let missing = match camera.camera_type.known() {
            Some(CameraType::Perspective) if camera.perspective.is_none() => {
                Some("perspective")
            }
            Some(CameraType::Orthographic) if camera.orthographic.is_none() => {
                Some("orthographic")
            }
            _ => None,
        };
        if let Some(object) = missing {
            return Err(GltfError::invalid(
                format!("cameras[{}]", i),
                format!("camera of type `{}` has no `{}` object", object, object),
            ));
        }
    }

    Ok(())
}

/// End of the last of `count` elements, or `None` on overflow. Zero
/// elements end at the offset.
fn last_element_end(offset: u64, stride: u64, count: u64, element_size: u64) -> Option<u64> {
    if count == 0 {
        return Some(offset);
    }
    stride
        .checked_mul(count - 1)?
        .checked_add(offset)?
        .checked_add(element_size)
}

fn check_sparse(
    root: &Root,
    path: &str,
    count: u64,
    sparse: &Sparse,
    layout: Layout,
) -> Result<()> {
    if sparse.count == 0 || sparse.count > count {
        return Err(GltfError::invalid(
            format!("{}.sparse.count", path),
            format!("sparse count {} must be in [1, {}]", sparse.count, count),
        ));
    }
    let index_size = match sparse.indices.component_type.known() {
        Some(ct @ (ComponentType::U8 | ComponentType::U16 | ComponentType::U32)) => ct.size(),
        Some(other) => {
            return Err(GltfError::invalid(
                format!("{}.sparse.indices.componentType", path),
                format!("sparse indices cannot be {}", other.name()),
            ))
        }
        None => return Ok(()),
    };

    let ranges = [
        ("indices", &sparse.indices.buffer_view, sparse.indices.byte_offset, index_size),
        ("values", &sparse.values.buffer_view, sparse.values.byte_offset, layout.element_size),
    ];
    for (name, view_index, offset, size) in ranges {
        let view = &root.buffer_views[view_index.value()];
        let end = last_element_end(offset, size as u64, sparse.count, size as u64);
        if end.map_or(true, |end| end > view.byte_length) {
            return Err(GltfError::invalid(
                format!("{}.sparse.{}", path, name),
                format!(
                    "{} entries at offset {} do not fit buffer view {} of {} bytes",
                    sparse.count, offset, view_index, view.byte_length
                ),
            ));
        }
    }
    Ok(())
}
