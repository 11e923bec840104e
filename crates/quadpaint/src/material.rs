//! Material vertex layout descriptions
//!
//! A material declares how its raw vertex bytes are to be interpreted: an
//! ordered list of attribute slots (shader location, component type, byte
//! offset) plus the total per-vertex stride. The layout is read-only input
//! to the painter, supplied per draw by the material system; this core never
//! owns or mutates it.

use crate::device::ScalarKind;

/// Component type of a single vertex attribute
///
/// Closed set matching the shader parameter types the material system can
/// declare. Each variant fixes both the scalar kind and the component count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// One 32-bit float
    Float,
    /// Two 32-bit floats
    Float2,
    /// Three 32-bit floats
    Float3,
    /// Four 32-bit floats
    Float4,
    /// One 32-bit integer
    Int,
    /// Two 32-bit integers
    Int2,
    /// Three 32-bit integers
    Int3,
    /// Four 32-bit integers
    Int4,
}

impl AttributeType {
    /// Number of scalar components in this attribute
    pub fn component_count(self) -> i32 {
        match self {
            AttributeType::Float | AttributeType::Int => 1,
            AttributeType::Float2 | AttributeType::Int2 => 2,
            AttributeType::Float3 | AttributeType::Int3 => 3,
            AttributeType::Float4 | AttributeType::Int4 => 4,
        }
    }

    /// Scalar kind of this attribute's components
    pub fn scalar_kind(self) -> ScalarKind {
        match self {
            AttributeType::Float
            | AttributeType::Float2
            | AttributeType::Float3
            | AttributeType::Float4 => ScalarKind::Float,
            AttributeType::Int
            | AttributeType::Int2
            | AttributeType::Int3
            | AttributeType::Int4 => ScalarKind::Int,
        }
    }

    /// Size of this attribute in bytes (all components are 32-bit)
    pub fn byte_size(self) -> usize {
        self.component_count() as usize * 4
    }
}

/// A single attribute slot within a vertex layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute location this slot binds to
    pub location: u32,
    /// Component type of the attribute
    pub ty: AttributeType,
    /// Byte offset of the attribute within one vertex
    pub offset: usize,
}

impl VertexAttribute {
    /// Create an attribute slot description
    pub const fn new(location: u32, ty: AttributeType, offset: usize) -> Self {
        Self {
            location,
            ty,
            offset,
        }
    }
}

/// Ordered vertex attribute layout plus total per-vertex stride
///
/// Immutable for the lifetime of the material that declares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: usize,
}

impl VertexLayout {
    /// Create a layout from explicit attribute slots and stride
    pub fn new(attributes: Vec<VertexAttribute>, stride: usize) -> Self {
        Self { attributes, stride }
    }

    /// Create a tightly-packed layout from an ordered list of types
    ///
    /// Locations are assigned in declaration order starting at 0, offsets are
    /// accumulated with no padding, and the stride is the total byte size.
    pub fn packed(types: &[AttributeType]) -> Self {
        let mut attributes = Vec::with_capacity(types.len());
        let mut offset = 0;
        for (location, &ty) in types.iter().enumerate() {
            attributes.push(VertexAttribute::new(location as u32, ty, offset));
            offset += ty.byte_size();
        }
        Self {
            attributes,
            stride: offset,
        }
    }

    /// Attribute slots in declaration order
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Total size of one vertex in bytes
    pub fn stride(&self) -> usize {
        self.stride
    }
}
