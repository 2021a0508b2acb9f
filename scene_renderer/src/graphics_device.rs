use vek::Rgba;

use crate::error::ContextInitError;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BlendState {
    Disabled,
    /// Color: `src_alpha, 1 - src_alpha`, alpha: `1, 0`, both added.
    AlphaBlend,
}

/// GPU-resident vertex/index data.
///
/// Vertices use the interleaved layout described in [`crate::geometry`].
/// Dropping the buffer releases the GPU memory.
pub trait GeometryBuffer {
    fn bind(&self);
    fn index_count(&self) -> usize;

    /// Binds the buffer and draws all of its indices as triangles.
    fn draw(&self);
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeviceError {
    pub code: u32,
    pub description: String,
}

/// The GPU context the renderer drives.
///
/// Everything here runs synchronously on the calling thread.
pub trait GraphicsDevice {
    /// Creates the context, loads the GPU functions and brings up image
    /// decoding. The device is unusable if this fails.
    fn initialize(&mut self) -> Result<(), ContextInitError>;

    fn create_geometry(&mut self, vertices: &[f32], indices: &[u32]) -> Box<dyn GeometryBuffer>;

    fn set_viewport(&mut self, width: u32, height: u32);
    fn set_clear_color(&mut self, color: Rgba<f32>);
    fn clear(&mut self);

    fn set_depth_test(&mut self, enabled: bool);
    fn set_blend_state(&mut self, blend_state: BlendState);

    fn draw_indexed_triangles(&mut self, index_count: usize);

    fn swap_buffers(&mut self);

    fn destroy_context(&mut self);

    /// Drains errors recorded since the last call.
    fn take_errors(&mut self) -> Vec<DeviceError> {
        Vec::new()
    }
}
