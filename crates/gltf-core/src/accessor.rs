use serde::Serialize;

use crate::coded::{gl_enum, str_enum, Coded};
use crate::{BufferView, Extensions, Extras, Index};

gl_enum! {
    /// Data type of a single accessor component.
    pub enum ComponentType: "component type" {
        I8 = 5120 => "BYTE",
        U8 = 5121 => "UNSIGNED_BYTE",
        I16 = 5122 => "SHORT",
        U16 = 5123 => "UNSIGNED_SHORT",
        U32 = 5125 => "UNSIGNED_INT",
        F32 = 5126 => "FLOAT",
    }
}

impl ComponentType {
    /// Returns the size of one component in bytes.
    pub const fn size(self) -> usize {
        match self {
            ComponentType::I8 | ComponentType::U8 => 1,
            ComponentType::I16 | ComponentType::U16 => 2,
            ComponentType::U32 | ComponentType::F32 => 4,
        }
    }
}

str_enum! {
    /// Shape of one accessor element.
    pub enum AccessorType: "accessor type" {
        Scalar = "SCALAR",
        Vec2 = "VEC2",
        Vec3 = "VEC3",
        Vec4 = "VEC4",
        Mat2 = "MAT2",
        Mat3 = "MAT3",
        Mat4 = "MAT4",
    }
}

impl AccessorType {
    /// Returns the number of components per element.
    pub const fn multiplicity(self) -> usize {
        match self {
            AccessorType::Scalar => 1,
            AccessorType::Vec2 => 2,
            AccessorType::Vec3 => 3,
            AccessorType::Vec4 | AccessorType::Mat2 => 4,
            AccessorType::Mat3 => 9,
            AccessorType::Mat4 => 16,
        }
    }
}

/// A typed view into a buffer view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    /// Absent when the accessor is all zeros (optionally patched by `sparse`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<Index<BufferView>>,
    pub byte_offset: u64,
    pub component_type: Coded<ComponentType>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub normalized: bool,
    pub count: u64,
    #[serde(rename = "type")]
    pub element_type: Coded<AccessorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparse: Option<Sparse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

impl Accessor {
    pub fn new(
        component_type: ComponentType,
        element_type: AccessorType,
        count: u64,
    ) -> Self {
        Self {
            buffer_view: None,
            byte_offset: 0,
            component_type: component_type.into(),
            normalized: false,
            count,
            element_type: element_type.into(),
            max: None,
            min: None,
            sparse: None,
            name: None,
            extensions: Extensions::new(),
            extras: None,
        }
    }

    /// Size of one tightly packed element in bytes, when both enum fields
    /// are recognized.
    pub fn element_size(&self) -> Option<usize> {
        let component = self.component_type.known()?;
        let element = self.element_type.known()?;
        Some(component.size() * element.multiplicity())
    }
}

/// Sparse storage of accessor values that deviate from their base.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sparse {
    pub count: u64,
    pub indices: SparseIndices,
    pub values: SparseValues,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

/// Location and type of the sparse element indices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseIndices {
    pub buffer_view: Index<BufferView>,
    pub byte_offset: u64,
    pub component_type: Coded<ComponentType>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

/// Location of the sparse replacement values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseValues {
    pub buffer_view: Index<BufferView>,
    pub byte_offset: u64,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_size() {
        let accessor = Accessor::new(ComponentType::F32, AccessorType::Vec3, 4);
        assert_eq!(accessor.element_size(), Some(12));

        let accessor = Accessor::new(ComponentType::U16, AccessorType::Mat4, 1);
        assert_eq!(accessor.element_size(), Some(32));

        let mut accessor = Accessor::new(ComponentType::U8, AccessorType::Scalar, 1);
        accessor.element_type = Coded::Unknown("VEC5".to_string());
        assert_eq!(accessor.element_size(), None);
    }
}
