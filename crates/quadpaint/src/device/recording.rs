//! Recording device for unit tests
//!
//! A [`GraphicsDevice`] that records every issued command instead of talking
//! to a driver. Tests assert on the command log to verify what the painter
//! actually asked the GPU to do: how many buffers were allocated, which
//! uploads happened, whether redundant state changes were suppressed.
//!
//! Clones share one command log, so a test can keep a handle while the
//! painter owns the device, and inspect the log after the painter is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SlotMap;

use super::{
    BufferId, BufferTarget, DeviceError, DeviceResult, GraphicsDevice, ScalarKind, VertexArrayId,
};
use crate::primitives::{BlendMode, Color, Viewport};

/// One recorded device command
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    CreateBuffer(BufferId),
    DeleteBuffer(BufferId),
    CreateVertexArray(VertexArrayId),
    DeleteVertexArray(VertexArrayId),
    BindBuffer(BufferTarget, Option<BufferId>),
    BindVertexArray(Option<VertexArrayId>),
    StreamData {
        target: BufferTarget,
        bytes: Vec<u8>,
    },
    EnableAttribute(u32),
    DisableAttribute(u32),
    AttributePointer {
        location: u32,
        components: i32,
        kind: ScalarKind,
        stride: i32,
        offset: usize,
    },
    Clear(Color),
    ApplyBlend(BlendMode),
    ApplyViewport(Viewport),
    DrawIndexedTriangles(usize),
}

#[derive(Default)]
struct Inner {
    commands: Vec<Command>,
    buffers: SlotMap<BufferId, ()>,
    vertex_arrays: SlotMap<VertexArrayId, ()>,
}

/// Command-logging graphics device
#[derive(Clone, Default)]
pub(crate) struct RecordingDevice {
    inner: Rc<RefCell<Inner>>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all commands recorded so far
    pub fn commands(&self) -> Vec<Command> {
        self.inner.borrow().commands.clone()
    }

    /// Drain the command log, returning everything recorded so far
    pub fn take_commands(&self) -> Vec<Command> {
        std::mem::take(&mut self.inner.borrow_mut().commands)
    }

    /// Number of buffers currently allocated and not yet deleted
    pub fn live_buffers(&self) -> usize {
        self.inner.borrow().buffers.len()
    }

    /// Number of vertex arrays currently allocated and not yet deleted
    pub fn live_vertex_arrays(&self) -> usize {
        self.inner.borrow().vertex_arrays.len()
    }

    fn record(&self, command: Command) {
        self.inner.borrow_mut().commands.push(command);
    }
}

impl GraphicsDevice for RecordingDevice {
    fn create_buffer(&mut self) -> DeviceResult<BufferId> {
        let id = self.inner.borrow_mut().buffers.insert(());
        self.record(Command::CreateBuffer(id));
        Ok(id)
    }

    fn delete_buffer(&mut self, buffer: BufferId) -> DeviceResult<()> {
        if self.inner.borrow_mut().buffers.remove(buffer).is_none() {
            return Err(DeviceError::InvalidHandle {
                op: "delete_buffer",
            });
        }
        self.record(Command::DeleteBuffer(buffer));
        Ok(())
    }

    fn create_vertex_array(&mut self) -> DeviceResult<VertexArrayId> {
        let id = self.inner.borrow_mut().vertex_arrays.insert(());
        self.record(Command::CreateVertexArray(id));
        Ok(id)
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) -> DeviceResult<()> {
        if self
            .inner
            .borrow_mut()
            .vertex_arrays
            .remove(vertex_array)
            .is_none()
        {
            return Err(DeviceError::InvalidHandle {
                op: "delete_vertex_array",
            });
        }
        self.record(Command::DeleteVertexArray(vertex_array));
        Ok(())
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>) -> DeviceResult<()> {
        if let Some(id) = buffer {
            if !self.inner.borrow().buffers.contains_key(id) {
                return Err(DeviceError::InvalidHandle { op: "bind_buffer" });
            }
        }
        self.record(Command::BindBuffer(target, buffer));
        Ok(())
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) -> DeviceResult<()> {
        if let Some(id) = vertex_array {
            if !self.inner.borrow().vertex_arrays.contains_key(id) {
                return Err(DeviceError::InvalidHandle {
                    op: "bind_vertex_array",
                });
            }
        }
        self.record(Command::BindVertexArray(vertex_array));
        Ok(())
    }

    fn stream_buffer_data(&mut self, target: BufferTarget, bytes: &[u8]) -> DeviceResult<()> {
        self.record(Command::StreamData {
            target,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    fn enable_attribute(&mut self, location: u32) -> DeviceResult<()> {
        self.record(Command::EnableAttribute(location));
        Ok(())
    }

    fn disable_attribute(&mut self, location: u32) -> DeviceResult<()> {
        self.record(Command::DisableAttribute(location));
        Ok(())
    }

    fn attribute_pointer(
        &mut self,
        location: u32,
        components: i32,
        kind: ScalarKind,
        stride: i32,
        offset: usize,
    ) -> DeviceResult<()> {
        self.record(Command::AttributePointer {
            location,
            components,
            kind,
            stride,
            offset,
        });
        Ok(())
    }

    fn clear(&mut self, color: Color) -> DeviceResult<()> {
        self.record(Command::Clear(color));
        Ok(())
    }

    fn apply_blend(&mut self, mode: BlendMode) -> DeviceResult<()> {
        self.record(Command::ApplyBlend(mode));
        Ok(())
    }

    fn apply_viewport(&mut self, viewport: Viewport) -> DeviceResult<()> {
        self.record(Command::ApplyViewport(viewport));
        Ok(())
    }

    fn draw_indexed_triangles(&mut self, index_count: usize) -> DeviceResult<()> {
        self.record(Command::DrawIndexedTriangles(index_count));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_one_log() {
        let device = RecordingDevice::new();
        let mut handle = device.clone();

        handle.enable_attribute(3).unwrap();

        assert_eq!(device.commands(), vec![Command::EnableAttribute(3)]);
    }

    #[test]
    fn test_stale_handles_are_rejected() {
        let mut device = RecordingDevice::new();
        let buffer = device.create_buffer().unwrap();
        device.delete_buffer(buffer).unwrap();

        assert!(matches!(
            device.delete_buffer(buffer),
            Err(DeviceError::InvalidHandle { .. })
        ));
        assert!(matches!(
            device.bind_buffer(BufferTarget::Vertex, Some(buffer)),
            Err(DeviceError::InvalidHandle { .. })
        ));
        assert_eq!(device.live_buffers(), 0);
    }
}
