//! GPU buffer lifecycle
//!
//! [`RenderBufferSet`] owns the vertex buffer, index buffer, and
//! binding-state handles a painter draws with. Allocation is lazy (a valid
//! GPU context may not exist when the painter is constructed) and happens
//! for all three handles together on the first render-frame start; release
//! resets every handle to the invalid sentinel and is safe to repeat.

use crate::device::{
    BufferId, BufferTarget, DeviceError, DeviceResult, GraphicsDevice, VertexArrayId,
};

/// The painter's GPU buffer triad
///
/// `None` is the invalid sentinel for each handle; either all three handles
/// are live or none are.
#[derive(Debug, Default)]
pub(crate) struct RenderBufferSet {
    vertex: Option<BufferId>,
    index: Option<BufferId>,
    binding: Option<VertexArrayId>,
}

impl RenderBufferSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the triad is currently allocated
    pub fn is_allocated(&self) -> bool {
        self.binding.is_some()
    }

    /// Allocate the triad if needed and bind it as the active target set
    ///
    /// Idempotent: once allocated, subsequent calls only rebind. Handles are
    /// stored only after all three allocations succeed.
    pub fn ensure_allocated<D: GraphicsDevice>(&mut self, device: &mut D) -> DeviceResult<()> {
        if let Some(binding) = self.binding {
            return device.bind_vertex_array(Some(binding));
        }

        let vertex = device.create_buffer()?;
        let index = device.create_buffer()?;
        let binding = device.create_vertex_array()?;

        // Bind the buffers with the binding state active so the index buffer
        // association is captured by it.
        device.bind_vertex_array(Some(binding))?;
        device.bind_buffer(BufferTarget::Vertex, Some(vertex))?;
        device.bind_buffer(BufferTarget::Index, Some(index))?;

        log::debug!("allocated vertex buffer, index buffer, and binding state");
        self.vertex = Some(vertex);
        self.index = Some(index);
        self.binding = Some(binding);
        Ok(())
    }

    /// Replace the vertex buffer's contents with a streaming upload
    pub fn upload_vertices<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        bytes: &[u8],
    ) -> DeviceResult<()> {
        let vertex = self.vertex.ok_or(DeviceError::InvalidHandle {
            op: "upload_vertices",
        })?;
        device.bind_buffer(BufferTarget::Vertex, Some(vertex))?;
        device.stream_buffer_data(BufferTarget::Vertex, bytes)
    }

    /// Replace the index buffer's contents with a streaming upload
    pub fn upload_indices<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        bytes: &[u8],
    ) -> DeviceResult<()> {
        let index = self.index.ok_or(DeviceError::InvalidHandle {
            op: "upload_indices",
        })?;
        device.bind_buffer(BufferTarget::Index, Some(index))?;
        device.stream_buffer_data(BufferTarget::Index, bytes)
    }

    /// Release all handles if allocated and reset them to invalid
    ///
    /// Safe to call any number of times, including when nothing was ever
    /// allocated.
    pub fn release<D: GraphicsDevice>(&mut self, device: &mut D) -> DeviceResult<()> {
        if !self.is_allocated() {
            return Ok(());
        }

        if let Some(vertex) = self.vertex.take() {
            device.bind_buffer(BufferTarget::Vertex, None)?;
            device.delete_buffer(vertex)?;
        }
        if let Some(index) = self.index.take() {
            device.bind_buffer(BufferTarget::Index, None)?;
            device.delete_buffer(index)?;
        }
        if let Some(binding) = self.binding.take() {
            device.bind_vertex_array(None)?;
            device.delete_vertex_array(binding)?;
        }

        log::debug!("released render buffer set");
        Ok(())
    }
}
