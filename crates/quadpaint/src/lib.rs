//! # Quadpaint
//!
//! A batched 2D rendering core with an OpenGL backend.
//!
//! ## Features
//!
//! - **Quad Batching**: quad draw requests expand into an indexed-triangle
//!   stream backed by a cached, monotonically-growing index table
//! - **Layout-Driven Binding**: vertex attribute bindings derive from a
//!   material's declared vertex layout, reissued per draw
//! - **State Caching**: redundant blend and viewport changes never reach
//!   the driver
//! - **Lazy GPU Resources**: buffers allocate on first frame start and
//!   release exactly once on painter teardown
//! - **Backend Seam**: all driver traffic flows through the
//!   [`GraphicsDevice`] trait; OpenGL via [glow] is the production backend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quadpaint::{BlendMode, Color, GlDevice, Painter, Rect};
//!
//! # fn acquire_context() -> glow::Context { unimplemented!() }
//! # fn main() -> Result<(), quadpaint::DeviceError> {
//! // The window layer owns context creation; hand the current context over.
//! let gl = acquire_context();
//! let mut painter = Painter::new(GlDevice::new(gl));
//!
//! painter.start_render()?;
//! painter.set_viewport(Rect::new(0, 0, 1280, 720), false)?;
//! painter.set_blend(BlendMode::Alpha)?;
//! painter.clear(Color::rgb(0.05, 0.05, 0.08))?;
//! // upload vertices against a material's layout, then draw batched quads
//! painter.end_render()?;
//! # Ok(())
//! # }
//! ```
//!
//! [glow]: https://docs.rs/glow

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod backends;
pub mod device;
pub mod material;
pub mod painter;
pub mod primitives;

pub use backends::gl::GlDevice;
pub use device::{
    BufferId, BufferTarget, DeviceError, DeviceResult, GraphicsDevice, ScalarKind, VertexArrayId,
};
pub use material::{AttributeType, VertexAttribute, VertexLayout};
pub use painter::Painter;
pub use primitives::{BlendMode, Color, Rect, Viewport};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        AttributeType, BlendMode, Color, DeviceError, DeviceResult, GlDevice, GraphicsDevice,
        Painter, Rect, VertexAttribute, VertexLayout, Viewport,
    };
}
