//! Typed reads of accessor data.
//!
//! Elements are read with the buffer view's stride. Matrix columns are
//! aligned to 4 bytes, so `MAT2`/`MAT3` with 1- or 2-byte components carry
//! padding between columns. Sparse storage is applied on top of the base
//! values, and accessors without a buffer view start out as zeros.

use byteorder::{ByteOrder, LittleEndian};
use gltf_core::{Accessor, AccessorType, BufferView, ComponentType, Index, Root};
use num_traits::{NumCast, Zero};

use crate::error::{GltfError, Result};

/// Byte layout of one accessor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    pub component: ComponentType,
    pub columns: usize,
    pub rows: usize,
    pub column_stride: usize,
    /// Size of one element including column padding.
    pub element_size: usize,
}

impl Layout {
    pub fn of(component: ComponentType, element: AccessorType) -> Layout {
        let (columns, rows) = match element {
            AccessorType::Mat2 => (2, 2),
            AccessorType::Mat3 => (3, 3),
            AccessorType::Mat4 => (4, 4),
            other => (1, other.multiplicity()),
        };
        let packed = rows * component.size();
        let column_stride = if columns > 1 { (packed + 3) & !3 } else { packed };
        Layout {
            component,
            columns,
            rows,
            column_stride,
            element_size: column_stride * columns,
        }
    }

    /// Returns `None` if either enum field holds an unrecognized code.
    pub fn for_accessor(accessor: &Accessor) -> Option<Layout> {
        Some(Layout::of(
            accessor.component_type.known()?,
            accessor.element_type.known()?,
        ))
    }

    pub fn components(&self) -> usize {
        self.columns * self.rows
    }

    /// Decodes one element starting at `bytes[0]` into `out`.
    fn read_element<T: NumCast>(&self, bytes: &[u8], out: &mut [T]) -> Option<()> {
        let size = self.component.size();
        for column in 0..self.columns {
            for row in 0..self.rows {
                let at = column * self.column_stride + row * size;
                out[column * self.rows + row] =
                    read_component(bytes.get(at..at + size)?, self.component)?;
            }
        }
        Some(())
    }
}

fn read_component<T: NumCast>(bytes: &[u8], component: ComponentType) -> Option<T> {
    match component {
        ComponentType::I8 => T::from(bytes[0] as i8),
        ComponentType::U8 => T::from(bytes[0]),
        ComponentType::I16 => T::from(LittleEndian::read_i16(bytes)),
        ComponentType::U16 => T::from(LittleEndian::read_u16(bytes)),
        ComponentType::U32 => T::from(LittleEndian::read_u32(bytes)),
        ComponentType::F32 => T::from(LittleEndian::read_f32(bytes)),
    }
}

/// Returns `data[start..start + len]` with overflow-checked bounds.
fn window(data: &[u8], start: u64, len: u64) -> Option<&[u8]> {
    let start = usize::try_from(start).ok()?;
    let end = start.checked_add(usize::try_from(len).ok()?)?;
    data.get(start..end)
}

/// Reads the components of accessor `index` as `T`, one element after the
/// other, `count * components` values in total.
pub(crate) fn read<T>(root: &Root, buffers: &[Vec<u8>], index: Index<Accessor>) -> Result<Vec<T>>
where
    T: NumCast + Zero + Copy,
{
    let path = format!("accessors[{}]", index);
    let fail = |message: String| GltfError::invalid(path.clone(), message);

    let accessor = root
        .get(index)
        .ok_or_else(|| fail("accessor does not exist".into()))?;
    let layout = Layout::for_accessor(accessor)
        .ok_or_else(|| fail("accessor has an unrecognized component or element type".into()))?;
    let width = layout.components();
    let too_large = || fail(format!("count {} is too large", accessor.count));
    let count = usize::try_from(accessor.count).map_err(|_| too_large())?;
    let total = count
        .checked_mul(width)
        .filter(|&total| {
            total
                .checked_mul(std::mem::size_of::<T>())
                .map_or(false, |bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(too_large)?;
    let mut values = Vec::new();
    values.try_reserve_exact(total).map_err(|_| too_large())?;
    values.resize(total, T::zero());

    if let Some(view_index) = accessor.buffer_view {
        let view = view_bytes(root, buffers, view_index)
            .ok_or_else(|| fail("buffer view is unavailable".into()))?;
        let stride = root
            .get(view_index)
            .and_then(|v| v.byte_stride)
            .map_or(layout.element_size, |s| s as usize);
        for (i, out) in values.chunks_exact_mut(width).enumerate() {
            let start = accessor
                .byte_offset
                .saturating_add((i as u64).saturating_mul(stride as u64));
            window(view, start, layout.element_size as u64)
                .and_then(|bytes| layout.read_element(bytes, out))
                .ok_or_else(|| {
                    fail(format!("element {} cannot be read as the requested type", i))
                })?;
        }
    }

    if let Some(sparse) = &accessor.sparse {
        let sparse_count = usize::try_from(sparse.count)
            .map_err(|_| fail(format!("sparse count {} is too large", sparse.count)))?;
        let index_type = sparse
            .indices
            .component_type
            .known()
            .ok_or_else(|| fail("sparse indices have an unrecognized component type".into()))?;
        let indices = view_bytes(root, buffers, sparse.indices.buffer_view)
            .ok_or_else(|| fail("sparse indices buffer view is unavailable".into()))?;
        let replacements = view_bytes(root, buffers, sparse.values.buffer_view)
            .ok_or_else(|| fail("sparse values buffer view is unavailable".into()))?;

        for i in 0..sparse_count {
            let at = sparse.indices.byte_offset.saturating_add((i * index_type.size()) as u64);
            let target: usize = window(indices, at, index_type.size() as u64)
                .and_then(|bytes| read_component(bytes, index_type))
                .ok_or_else(|| fail(format!("sparse index {} cannot be read", i)))?;
            if target >= count {
                return Err(fail(format!(
                    "sparse index {} points at element {} of {}",
                    i, target, count
                )));
            }
            let at = sparse.values.byte_offset.saturating_add((i * layout.element_size) as u64);
            let out = &mut values[target * width..(target + 1) * width];
            window(replacements, at, layout.element_size as u64)
                .and_then(|bytes| layout.read_element(bytes, out))
                .ok_or_else(|| {
                    fail(format!("sparse value {} cannot be read as the requested type", i))
                })?;
        }
    }

    Ok(values)
}

/// Bytes of a buffer view, if the view and its buffer are present.
pub(crate) fn view_bytes<'a>(
    root: &Root,
    buffers: &'a [Vec<u8>],
    index: Index<BufferView>,
) -> Option<&'a [u8]> {
    let view = root.get(index)?;
    let buffer = buffers.get(view.buffer.value())?;
    window(buffer, view.byte_offset, view.byte_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_pads_matrix_columns() {
        let layout = Layout::of(ComponentType::U8, AccessorType::Mat2);
        assert_eq!((layout.column_stride, layout.element_size), (4, 8));

        let layout = Layout::of(ComponentType::I16, AccessorType::Mat3);
        assert_eq!((layout.column_stride, layout.element_size), (8, 24));

        let layout = Layout::of(ComponentType::U8, AccessorType::Mat3);
        assert_eq!((layout.column_stride, layout.element_size), (4, 12));

        let layout = Layout::of(ComponentType::F32, AccessorType::Mat4);
        assert_eq!((layout.column_stride, layout.element_size), (16, 64));

        let layout = Layout::of(ComponentType::U8, AccessorType::Vec3);
        assert_eq!(layout.element_size, 3);
        assert_eq!(layout.components(), 3);
    }

    #[test]
    fn test_read_element_skips_padding() {
        let layout = Layout::of(ComponentType::U8, AccessorType::Mat2);
        let bytes = [1, 2, 0xFF, 0xFF, 3, 4, 0xFF, 0xFF];
        let mut out = [0u32; 4];
        layout.read_element(&bytes, &mut out).unwrap();
        assert_eq!(out, [1, 2, 3, 4]);
    }

    #[test]
    fn test_read_component_range() {
        assert_eq!(read_component::<i32>(&[0xFF], ComponentType::I8), Some(-1));
        assert_eq!(read_component::<u8>(&[0xFF, 0xFF], ComponentType::I16), None);
        assert_eq!(
            read_component::<f32>(&1.5f32.to_le_bytes(), ComponentType::F32),
            Some(1.5)
        );
    }

    #[test]
    fn test_window_checks_bounds() {
        let data = [0u8; 8];
        assert_eq!(window(&data, 4, 4).map(|w| w.len()), Some(4));
        assert!(window(&data, 5, 4).is_none());
        assert!(window(&data, u64::MAX, 1).is_none());
    }
}
