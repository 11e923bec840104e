//! Graphics backend implementations
//!
//! Contains concrete [`GraphicsDevice`](crate::device::GraphicsDevice)
//! implementations. Currently supports OpenGL via glow, with potential for
//! additional backends in the future.

pub mod gl;
