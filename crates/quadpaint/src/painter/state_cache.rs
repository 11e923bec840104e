//! Blend and viewport state caching
//!
//! Blend mode and viewport changes are hot-path GPU state transitions issued
//! every frame. [`RenderStateCache`] remembers the last value applied through
//! it and drops requests that match, so an unchanged state never reaches the
//! driver.

use crate::device::{DeviceResult, GraphicsDevice};
use crate::primitives::{BlendMode, Viewport};

/// Last-applied blend and viewport state
///
/// Both values start unset, so the first set of each always issues a driver
/// command. Cached values are updated only after the driver accepted the
/// change.
#[derive(Debug, Default)]
pub(crate) struct RenderStateCache {
    blend: Option<BlendMode>,
    viewport: Option<Viewport>,
}

impl RenderStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a blend mode unless it is already active
    pub fn set_blend<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        mode: BlendMode,
    ) -> DeviceResult<()> {
        if self.blend == Some(mode) {
            return Ok(());
        }
        device.apply_blend(mode)?;
        self.blend = Some(mode);
        Ok(())
    }

    /// Apply a viewport unless an identical one is already active
    ///
    /// Equality covers the rectangle bounds and the scissor flag together.
    pub fn set_viewport<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        viewport: Viewport,
    ) -> DeviceResult<()> {
        if self.viewport == Some(viewport) {
            return Ok(());
        }
        device.apply_viewport(viewport)?;
        self.viewport = Some(viewport);
        Ok(())
    }
}
