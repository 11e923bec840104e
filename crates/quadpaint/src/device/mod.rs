//! Graphics device abstraction
//!
//! This module defines the trait that concrete graphics backends implement
//! to provide a consistent interface for the painter. The device is the
//! explicit rendering-session handle: every driver side effect the painter
//! causes goes through a `&mut` reference to it, so correctness never
//! depends on ambient global binding state.
//!
//! Handles returned by the device are generational keys. A handle that has
//! been released (or belongs to another device) is rejected with
//! [`DeviceError::InvalidHandle`] rather than aliasing a live resource.

use thiserror::Error;

use crate::primitives::{BlendMode, Color, Viewport};

#[cfg(test)]
pub(crate) mod recording;

slotmap::new_key_type! {
    /// Generational handle to a GPU data buffer
    pub struct BufferId;

    /// Generational handle to a GPU binding-state (vertex array) object
    pub struct VertexArrayId;
}

/// Binding target of a GPU data buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data
    Vertex,
    /// Triangle index data
    Index,
}

/// Scalar kind of a vertex attribute's components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// 32-bit floating point
    Float,
    /// 32-bit signed integer
    Int,
}

/// Errors reported by a graphics device
///
/// Any of these indicates a corrupted or exhausted GPU resource. The painter
/// performs no recovery and no retries; callers should treat a device error
/// as unrecoverable for the rendering session.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The driver could not create a GPU object
    #[error("failed to create {what}: {reason}")]
    Create {
        /// Kind of object being created
        what: &'static str,
        /// Driver-reported reason
        reason: String,
    },

    /// The driver reported an error after a state-mutating operation
    #[error("{op} failed with driver error 0x{code:04X}")]
    Graphics {
        /// The operation that failed
        op: &'static str,
        /// Driver error code
        code: u32,
    },

    /// An operation was given an invalid or already-released handle
    #[error("invalid or already-released GPU handle in {op}")]
    InvalidHandle {
        /// The operation that rejected the handle
        op: &'static str,
    },
}

/// Result type for device operations
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Low-level graphics operations required by the painter
///
/// Implementations issue the corresponding driver command synchronously on
/// the calling thread and check for driver errors before returning. The
/// production implementation is [`crate::backends::gl::GlDevice`].
pub trait GraphicsDevice {
    /// Create an empty GPU data buffer
    fn create_buffer(&mut self) -> DeviceResult<BufferId>;

    /// Release a GPU data buffer
    fn delete_buffer(&mut self, buffer: BufferId) -> DeviceResult<()>;

    /// Create a binding-state object capturing buffer/attribute association
    fn create_vertex_array(&mut self) -> DeviceResult<VertexArrayId>;

    /// Release a binding-state object
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) -> DeviceResult<()>;

    /// Bind a buffer to a target, or unbind with `None`
    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>) -> DeviceResult<()>;

    /// Bind a binding-state object, or unbind with `None`
    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) -> DeviceResult<()>;

    /// Replace the bound buffer's contents using a streaming upload
    ///
    /// The streaming hint tells the driver that prior contents may be
    /// discarded, so the CPU never stalls on in-flight GPU reads of the
    /// same buffer.
    fn stream_buffer_data(&mut self, target: BufferTarget, bytes: &[u8]) -> DeviceResult<()>;

    /// Enable a vertex attribute slot
    fn enable_attribute(&mut self, location: u32) -> DeviceResult<()>;

    /// Disable a vertex attribute slot
    fn disable_attribute(&mut self, location: u32) -> DeviceResult<()>;

    /// Configure an enabled attribute slot against the bound vertex buffer
    fn attribute_pointer(
        &mut self,
        location: u32,
        components: i32,
        kind: ScalarKind,
        stride: i32,
        offset: usize,
    ) -> DeviceResult<()>;

    /// Clear the color and depth targets
    fn clear(&mut self, color: Color) -> DeviceResult<()>;

    /// Apply a blend mode to the pipeline
    fn apply_blend(&mut self, mode: BlendMode) -> DeviceResult<()>;

    /// Apply a viewport and scissor configuration
    fn apply_viewport(&mut self, viewport: Viewport) -> DeviceResult<()>;

    /// Issue one indexed triangle-list draw covering `index_count` indices
    ///
    /// Indices are read as 16-bit unsigned integers from the bound index
    /// buffer, starting at offset zero.
    fn draw_indexed_triangles(&mut self, index_count: usize) -> DeviceResult<()>;
}
