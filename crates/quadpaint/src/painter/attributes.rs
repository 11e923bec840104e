//! Vertex attribute binding
//!
//! Configures the attribute slots of the bound vertex buffer against a
//! material's declared layout. Binding is reissued on every vertex upload
//! rather than cached across draws: a stale-binding bug on a material switch
//! costs far more than the redundant rebind of an unchanged material.

use crate::device::{DeviceResult, GraphicsDevice};
use crate::material::VertexLayout;

/// Per-draw attribute binder
///
/// Remembers which slots the previous layout enabled so that slots absent
/// from the current layout can be disabled; left enabled, they would feed
/// undefined data to the next draw's shader.
#[derive(Debug, Default)]
pub(crate) struct AttributeBinder {
    enabled: Vec<u32>,
}

impl AttributeBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable and configure every slot in `layout`, in declaration order,
    /// then disable slots the previous layout enabled that are now unused
    pub fn bind<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        layout: &VertexLayout,
    ) -> DeviceResult<()> {
        let stride = layout.stride() as i32;
        for attribute in layout.attributes() {
            device.enable_attribute(attribute.location)?;
            device.attribute_pointer(
                attribute.location,
                attribute.ty.component_count(),
                attribute.ty.scalar_kind(),
                stride,
                attribute.offset,
            )?;
        }

        for &location in &self.enabled {
            let still_used = layout
                .attributes()
                .iter()
                .any(|attribute| attribute.location == location);
            if !still_used {
                device.disable_attribute(location)?;
            }
        }

        self.enabled.clear();
        self.enabled
            .extend(layout.attributes().iter().map(|attribute| attribute.location));
        Ok(())
    }
}
