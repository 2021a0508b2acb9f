use sdl2::{
    video::{GLContext, GLProfile, Window},
    VideoSubsystem,
};
use vek::Rgba;

use scene_renderer::{
    error::ContextInitError,
    graphics_device::{BlendState, DeviceError, GeometryBuffer, GraphicsDevice},
};

use crate::{
    gl_geometry_buffer::GLGeometryBuffer,
    opengl_utils::{gl_get_error, index_buffer_object::draw_elements},
};

const GL_MAJOR_VERSION: u8 = 3;
const GL_MINOR_VERSION: u8 = 3;

/// A 1x1 transparent png, decoded once to prove the image codecs work.
#[rustfmt::skip]
const PROBE_PNG: [u8; 68] = [
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
    0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00,
    0x0b, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0xf8, 0x0f, 0x04, 0x00,
    0x09, 0xfb, 0x03, 0xfd, 0xfb, 0x5e, 0x6b, 0x2b, 0x00, 0x00, 0x00, 0x00,
    0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// OpenGL 3.3 core context on an SDL2 window.
///
/// The window is built in [`GraphicsDevice::initialize`], after the pixel
/// format attributes are set.
pub struct GLDevice {
    sdl_video: VideoSubsystem,
    window_title: String,
    window_width: u32,
    window_height: u32,
    // the context is dropped before its window
    gl_context: Option<GLContext>,
    sdl_window: Option<Window>,
}

impl GLDevice {
    pub fn new(
        sdl_video: VideoSubsystem,
        window_title: impl Into<String>,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        Self {
            sdl_video,
            window_title: window_title.into(),
            window_width,
            window_height,
            gl_context: None,
            sdl_window: None,
        }
    }

    fn set_gl_attributes(&self) {
        let gl_attr = self.sdl_video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(GL_MAJOR_VERSION, GL_MINOR_VERSION);
        gl_attr.set_red_size(8);
        gl_attr.set_green_size(8);
        gl_attr.set_blue_size(8);
        gl_attr.set_alpha_size(8);
        gl_attr.set_depth_size(24);
        gl_attr.set_double_buffer(true);
        gl_attr.set_accelerated_visual(true);
    }

    fn has_context(&self) -> bool {
        self.gl_context.is_some()
    }
}

fn probe_image_decoding() -> Result<(), ContextInitError> {
    image::load_from_memory_with_format(&PROBE_PNG, image::ImageFormat::Png)
        .map(|_| ())
        .map_err(|e| ContextInitError::ImageSubsystem(e.to_string()))
}

impl GraphicsDevice for GLDevice {
    fn initialize(&mut self) -> Result<(), ContextInitError> {
        self.set_gl_attributes();

        let sdl_window = self
            .sdl_video
            .window(&self.window_title, self.window_width, self.window_height)
            .opengl()
            .build()
            .map_err(|e| ContextInitError::ContextCreation(e.to_string()))?;

        let gl_context = sdl_window
            .gl_create_context()
            .map_err(ContextInitError::ContextCreation)?;

        if self.sdl_video.gl_attr().context_profile() != GLProfile::Core {
            return Err(ContextInitError::ContextCreation(format!(
                "could not get an OpenGL {GL_MAJOR_VERSION}.{GL_MINOR_VERSION} core context"
            )));
        }

        gl::load_with(|name| self.sdl_video.gl_get_proc_address(name) as *const _);

        if !gl::Clear::is_loaded()
            || !gl::DrawElements::is_loaded()
            || !gl::GenVertexArrays::is_loaded()
            || !gl::BlendFuncSeparate::is_loaded()
        {
            return Err(ContextInitError::FunctionLoading(
                "required OpenGL functions are missing".to_string(),
            ));
        }

        // loading can leave a benign error flag behind
        unsafe {
            gl::GetError();
        }

        probe_image_decoding()?;

        log::info!(
            "OpenGL context created, window width = {}, window height = {}",
            self.window_width,
            self.window_height
        );

        self.sdl_window = Some(sdl_window);
        self.gl_context = Some(gl_context);

        Ok(())
    }

    fn create_geometry(&mut self, vertices: &[f32], indices: &[u32]) -> Box<dyn GeometryBuffer> {
        Box::new(GLGeometryBuffer::new(vertices, indices))
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;

        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    fn set_clear_color(&mut self, color: Rgba<f32>) {
        unsafe {
            gl::ClearColor(color.r, color.g, color.b, color.a);
        }
    }

    fn clear(&mut self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    fn set_depth_test(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                gl::Enable(gl::DEPTH_TEST);
            } else {
                gl::Disable(gl::DEPTH_TEST);
            }
        }
    }

    fn set_blend_state(&mut self, blend_state: BlendState) {
        unsafe {
            match blend_state {
                BlendState::Disabled => gl::Disable(gl::BLEND),
                BlendState::AlphaBlend => {
                    gl::Enable(gl::BLEND);
                    gl::BlendEquationSeparate(gl::FUNC_ADD, gl::FUNC_ADD);
                    gl::BlendFuncSeparate(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA, gl::ONE, gl::ZERO);
                }
            }
        }
    }

    fn draw_indexed_triangles(&mut self, index_count: usize) {
        draw_elements(gl::TRIANGLES, index_count);
    }

    fn swap_buffers(&mut self) {
        if !self.has_context() {
            return;
        }

        if let Some(sdl_window) = &self.sdl_window {
            sdl_window.gl_swap_window();
        }
    }

    /// The window stays open until the device itself is dropped.
    fn destroy_context(&mut self) {
        if self.gl_context.take().is_some() {
            log::info!("OpenGL context destroyed");
        }
    }

    fn take_errors(&mut self) -> Vec<DeviceError> {
        let mut errors = Vec::new();

        if !self.has_context() {
            return errors;
        }

        while let Err(e) = gl_get_error() {
            errors.push(DeviceError {
                code: e.code(),
                description: format!("{e:?}"),
            });
        }

        errors
    }
}
