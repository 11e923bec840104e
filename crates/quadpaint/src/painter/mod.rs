//! # Painter
//!
//! The frame coordinator of the rendering core. A [`Painter`] owns a
//! [`GraphicsDevice`] exclusively and drives the render-frame state machine,
//! composing the leaf components in this module:
//!
//! - **`buffers`**: GPU buffer triad lifecycle (lazy allocation, streaming
//!   uploads, teardown)
//! - **`attributes`**: per-draw vertex attribute binding from a material's
//!   declared layout
//! - **`quad_indices`**: cached quad triangulation index stream
//! - **`state_cache`**: blend/viewport caching to suppress redundant state
//!   transitions
//!
//! ## Frame state machine
//!
//! A painter is in exactly one of two states, `Idle` or `Rendering`. Every
//! mutating operation other than [`Painter::start_render`] and
//! [`Painter::end_render`] is defined only while `Rendering`; calling one
//! from `Idle` is a programmer error and panics. GPU buffers and the cached
//! state are constructed at the first `Idle` → `Rendering` transition, not at
//! painter construction, because a valid GPU execution context may not exist
//! yet when the painter is created.
//!
//! ## Resource model
//!
//! Single-threaded and synchronous: every operation is a direct call into
//! the driver through the owned device, and data passed to
//! [`Painter::set_vertices`] is consumed before the call returns. GPU
//! resources persist across frames and are released exactly once, on drop.

mod attributes;
mod buffers;
mod quad_indices;
mod state_cache;

use crate::device::{DeviceResult, GraphicsDevice};
use crate::material::VertexLayout;
use crate::primitives::{BlendMode, Color, Rect, Viewport};

use attributes::AttributeBinder;
use buffers::RenderBufferSet;
use quad_indices::QuadIndexTable;
use state_cache::RenderStateCache;

/// Render-frame state of a painter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    /// No frame in progress; only `start_render` is valid
    Idle,
    /// Between `start_render` and `end_render`
    Rendering,
}

/// Sub-state constructed lazily at the first frame start
#[derive(Debug, Default)]
struct SessionState {
    cache: RenderStateCache,
    binder: AttributeBinder,
}

impl SessionState {
    fn new() -> Self {
        Self::default()
    }
}

/// Batched 2D painter over an exclusively-owned graphics device
///
/// Expands quad draw requests into an indexed-triangle stream, derives
/// attribute bindings from material vertex layouts, and caches blend and
/// viewport state so unchanged state never reaches the driver.
///
/// Driver failures surface as [`DeviceError`](crate::device::DeviceError);
/// there is no recovery path inside the painter and no retries are performed.
pub struct Painter<D: GraphicsDevice> {
    device: D,
    state: FrameState,
    buffers: RenderBufferSet,
    quad_indices: QuadIndexTable,
    session: Option<SessionState>,
}

impl<D: GraphicsDevice> Painter<D> {
    /// Create an idle painter over a device
    ///
    /// Performs no GPU work; buffers are allocated on the first
    /// [`start_render`](Painter::start_render).
    pub fn new(device: D) -> Self {
        Self {
            device,
            state: FrameState::Idle,
            buffers: RenderBufferSet::new(),
            quad_indices: QuadIndexTable::new(),
            session: None,
        }
    }

    /// Access the underlying device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Whether a frame is currently in progress
    pub fn is_rendering(&self) -> bool {
        self.state == FrameState::Rendering
    }

    /// Begin a render frame
    ///
    /// Constructs the lazily-initialized sub-state on the first call,
    /// allocates the GPU buffer set if needed, and binds it as the active
    /// target set.
    ///
    /// # Panics
    ///
    /// Panics if a frame is already in progress.
    pub fn start_render(&mut self) -> DeviceResult<()> {
        assert!(
            self.state == FrameState::Idle,
            "start_render called while a frame is already in progress"
        );

        self.session.get_or_insert_with(SessionState::new);
        self.buffers.ensure_allocated(&mut self.device)?;
        self.state = FrameState::Rendering;
        Ok(())
    }

    /// End the current render frame and unbind the active target set
    ///
    /// GPU resources are not released; they persist for reuse by the next
    /// frame.
    ///
    /// # Panics
    ///
    /// Panics if no frame is in progress.
    pub fn end_render(&mut self) -> DeviceResult<()> {
        self.require_rendering("end_render");
        self.device.bind_vertex_array(None)?;
        self.state = FrameState::Idle;
        Ok(())
    }

    /// Clear the color and depth targets
    ///
    /// Always executes; clears are never cached.
    ///
    /// # Panics
    ///
    /// Panics if no frame is in progress.
    pub fn clear(&mut self, color: Color) -> DeviceResult<()> {
        self.require_rendering("clear");
        self.device.clear(color)
    }

    /// Upload vertex data and rebind attributes against `layout`
    ///
    /// Exactly `num_vertices * layout.stride()` bytes are uploaded from the
    /// front of `data`; supplying at least that many bytes is the caller's
    /// contract. Attribute bindings are reissued even if the layout is
    /// unchanged from the previous draw. `data` is consumed before the call
    /// returns and may be reused immediately.
    ///
    /// # Panics
    ///
    /// Panics if no frame is in progress, or if `data` is shorter than
    /// `num_vertices * layout.stride()` bytes.
    pub fn set_vertices(
        &mut self,
        layout: &VertexLayout,
        num_vertices: usize,
        data: &[u8],
    ) -> DeviceResult<()> {
        self.require_rendering("set_vertices");

        let byte_len = num_vertices * layout.stride();
        self.buffers
            .upload_vertices(&mut self.device, &data[..byte_len])?;

        let session = self.session.get_or_insert_with(SessionState::new);
        session.binder.bind(&mut self.device, layout)
    }

    /// Set the blend mode, suppressing the change if it is already active
    ///
    /// # Panics
    ///
    /// Panics if no frame is in progress.
    pub fn set_blend(&mut self, mode: BlendMode) -> DeviceResult<()> {
        self.require_rendering("set_blend");
        let session = self.session.get_or_insert_with(SessionState::new);
        session.cache.set_blend(&mut self.device, mode)
    }

    /// Set the viewport and scissor state, suppressing redundant changes
    ///
    /// # Panics
    ///
    /// Panics if no frame is in progress.
    pub fn set_viewport(&mut self, rect: Rect, scissor: bool) -> DeviceResult<()> {
        self.require_rendering("set_viewport");
        let session = self.session.get_or_insert_with(SessionState::new);
        session
            .cache
            .set_viewport(&mut self.device, Viewport::new(rect, scissor))
    }

    /// Draw `quads` quads from the uploaded vertices as indexed triangles
    ///
    /// Obtains the cached triangulation indices, uploads the `6 * quads`
    /// index range to the GPU, and issues one indexed triangle-list draw.
    /// A count of zero is a legal no-op: nothing is uploaded and no draw
    /// command is issued.
    ///
    /// # Panics
    ///
    /// Panics if no frame is in progress.
    pub fn draw_quads(&mut self, quads: usize) -> DeviceResult<()> {
        self.require_rendering("draw_quads");
        if quads == 0 {
            return Ok(());
        }

        let indices = self.quad_indices.indices_for(quads);
        self.buffers
            .upload_indices(&mut self.device, bytemuck::cast_slice(indices))?;
        self.device.draw_indexed_triangles(indices.len())
    }

    fn require_rendering(&self, op: &str) {
        assert!(
            self.state == FrameState::Rendering,
            "{op} is only valid between start_render and end_render"
        );
    }
}

impl<D: GraphicsDevice> Drop for Painter<D> {
    fn drop(&mut self) {
        if let Err(err) = self.buffers.release(&mut self.device) {
            log::error!("failed to release GPU buffers on painter teardown: {err}");
        }
    }
}
