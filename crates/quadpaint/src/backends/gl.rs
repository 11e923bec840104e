//! OpenGL graphics device
//!
//! [`GlDevice`] implements [`GraphicsDevice`] over raw GL calls issued
//! through [glow]. Construction requires a valid OpenGL context that is
//! current on the calling thread, and every method must be called from that
//! same thread; the painter's single-threaded ownership model guarantees
//! this once the device is handed over.
//!
//! Every state-mutating call is followed by a `glGetError` check. A reported
//! error is mapped to [`DeviceError::Graphics`] naming the failing operation;
//! no retries are attempted.
//!
//! [glow]: https://docs.rs/glow

use glow::HasContext;
use slotmap::SlotMap;

use crate::device::{
    BufferId, BufferTarget, DeviceError, DeviceResult, GraphicsDevice, ScalarKind, VertexArrayId,
};
use crate::primitives::{BlendMode, Color, Rect, Viewport};

/// OpenGL implementation of [`GraphicsDevice`]
///
/// Owns the glow context and the tables mapping generational handles to
/// native GL objects. Handles passed in after their object was deleted are
/// rejected with [`DeviceError::InvalidHandle`] instead of touching a
/// recycled GL name.
pub struct GlDevice {
    gl: glow::Context,
    buffers: SlotMap<BufferId, glow::Buffer>,
    vertex_arrays: SlotMap<VertexArrayId, glow::VertexArray>,
}

impl GlDevice {
    /// Wrap an OpenGL context
    ///
    /// The context must already be current on the calling thread and stay
    /// current for the lifetime of this device.
    pub fn new(gl: glow::Context) -> Self {
        Self {
            gl,
            buffers: SlotMap::with_key(),
            vertex_arrays: SlotMap::with_key(),
        }
    }

    /// Access the underlying glow context
    pub fn context(&self) -> &glow::Context {
        &self.gl
    }

    fn check(&self, op: &'static str) -> DeviceResult<()> {
        let code = unsafe { self.gl.get_error() };
        if code == glow::NO_ERROR {
            Ok(())
        } else {
            Err(DeviceError::Graphics { op, code })
        }
    }

    fn buffer(&self, id: BufferId, op: &'static str) -> DeviceResult<glow::Buffer> {
        self.buffers
            .get(id)
            .copied()
            .ok_or(DeviceError::InvalidHandle { op })
    }

    fn vertex_array(&self, id: VertexArrayId, op: &'static str) -> DeviceResult<glow::VertexArray> {
        self.vertex_arrays
            .get(id)
            .copied()
            .ok_or(DeviceError::InvalidHandle { op })
    }
}

/// Map a buffer target to its GL binding point
fn gl_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Vertex => glow::ARRAY_BUFFER,
        BufferTarget::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

/// Blend factors for a blend mode, or `None` when blending is disabled
fn blend_factors(mode: BlendMode) -> Option<(u32, u32)> {
    match mode {
        BlendMode::Opaque => None,
        BlendMode::Alpha => Some((glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA)),
        BlendMode::Additive => Some((glow::SRC_ALPHA, glow::ONE)),
        BlendMode::Multiply => Some((glow::DST_COLOR, glow::ZERO)),
    }
}

impl GraphicsDevice for GlDevice {
    fn create_buffer(&mut self) -> DeviceResult<BufferId> {
        let raw = unsafe { self.gl.create_buffer() }
            .map_err(|reason| DeviceError::Create {
                what: "buffer",
                reason,
            })?;
        Ok(self.buffers.insert(raw))
    }

    fn delete_buffer(&mut self, buffer: BufferId) -> DeviceResult<()> {
        let raw = self
            .buffers
            .remove(buffer)
            .ok_or(DeviceError::InvalidHandle {
                op: "delete_buffer",
            })?;
        unsafe { self.gl.delete_buffer(raw) };
        self.check("delete_buffer")
    }

    fn create_vertex_array(&mut self) -> DeviceResult<VertexArrayId> {
        let raw = unsafe { self.gl.create_vertex_array() }
            .map_err(|reason| DeviceError::Create {
                what: "vertex array",
                reason,
            })?;
        Ok(self.vertex_arrays.insert(raw))
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) -> DeviceResult<()> {
        let raw = self
            .vertex_arrays
            .remove(vertex_array)
            .ok_or(DeviceError::InvalidHandle {
                op: "delete_vertex_array",
            })?;
        unsafe { self.gl.delete_vertex_array(raw) };
        self.check("delete_vertex_array")
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>) -> DeviceResult<()> {
        let raw = match buffer {
            Some(id) => Some(self.buffer(id, "bind_buffer")?),
            None => None,
        };
        unsafe { self.gl.bind_buffer(gl_target(target), raw) };
        self.check("bind_buffer")
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) -> DeviceResult<()> {
        let raw = match vertex_array {
            Some(id) => Some(self.vertex_array(id, "bind_vertex_array")?),
            None => None,
        };
        unsafe { self.gl.bind_vertex_array(raw) };
        self.check("bind_vertex_array")
    }

    fn stream_buffer_data(&mut self, target: BufferTarget, bytes: &[u8]) -> DeviceResult<()> {
        unsafe {
            self.gl
                .buffer_data_u8_slice(gl_target(target), bytes, glow::STREAM_DRAW);
        }
        self.check("stream_buffer_data")
    }

    fn enable_attribute(&mut self, location: u32) -> DeviceResult<()> {
        unsafe { self.gl.enable_vertex_attrib_array(location) };
        self.check("enable_attribute")
    }

    fn disable_attribute(&mut self, location: u32) -> DeviceResult<()> {
        unsafe { self.gl.disable_vertex_attrib_array(location) };
        self.check("disable_attribute")
    }

    fn attribute_pointer(
        &mut self,
        location: u32,
        components: i32,
        kind: ScalarKind,
        stride: i32,
        offset: usize,
    ) -> DeviceResult<()> {
        unsafe {
            match kind {
                ScalarKind::Float => self.gl.vertex_attrib_pointer_f32(
                    location,
                    components,
                    glow::FLOAT,
                    false,
                    stride,
                    offset as i32,
                ),
                // Integer attributes take the integer pointer path so they
                // reach int shader inputs unconverted.
                ScalarKind::Int => self.gl.vertex_attrib_pointer_i32(
                    location,
                    components,
                    glow::INT,
                    stride,
                    offset as i32,
                ),
            }
        }
        self.check("attribute_pointer")
    }

    fn clear(&mut self, color: Color) -> DeviceResult<()> {
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        self.check("clear")
    }

    fn apply_blend(&mut self, mode: BlendMode) -> DeviceResult<()> {
        unsafe {
            match blend_factors(mode) {
                Some((src, dst)) => {
                    self.gl.enable(glow::BLEND);
                    self.gl.blend_func(src, dst);
                }
                None => self.gl.disable(glow::BLEND),
            }
        }
        self.check("apply_blend")
    }

    fn apply_viewport(&mut self, viewport: Viewport) -> DeviceResult<()> {
        let Rect {
            x,
            y,
            width,
            height,
        } = viewport.rect;
        unsafe {
            self.gl.viewport(x, y, width, height);
            if viewport.scissor {
                self.gl.enable(glow::SCISSOR_TEST);
                self.gl.scissor(x, y, width, height);
            } else {
                self.gl.disable(glow::SCISSOR_TEST);
            }
        }
        self.check("apply_viewport")
    }

    fn draw_indexed_triangles(&mut self, index_count: usize) -> DeviceResult<()> {
        unsafe {
            self.gl.draw_elements(
                glow::TRIANGLES,
                index_count as i32,
                glow::UNSIGNED_SHORT,
                0,
            );
        }
        self.check("draw_indexed_triangles")
    }
}
