use vek::Rgba;

#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub clear_color: Rgba<f32>,
    pub field_of_view_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Drain and log device errors after initialization and each frame phase.
    pub validate_gpu_calls: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 768,
            clear_color: Rgba::new(0.45, 0.45, 1.0, 1.0),
            field_of_view_degrees: 70.0,
            near_plane: 25.0,
            far_plane: 10000.0,
            validate_gpu_calls: cfg!(debug_assertions),
        }
    }
}
