use std::ffi::c_void;

use gl::types::GLuint;
use image::RgbaImage;

#[derive(Debug, Clone, Copy)]
pub enum GLTextureSamplingMode {
    Nearest,
    Linear,
}

pub struct Texture2D {
    texture_id: GLuint,
    width: u32,
    height: u32,
}

impl Texture2D {
    /// Uploads the pixels row by row, so the first image row lands at `v = 0`.
    pub fn new(image: &RgbaImage) -> Self {
        let mut texture_id = 0;

        unsafe {
            gl::GenTextures(1, &mut texture_id);
            gl::BindTexture(gl::TEXTURE_2D, texture_id);

            if image.width() % 4 != 0 {
                gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            }

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as i32,
                image.width() as i32,
                image.height() as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                image.as_raw().as_ptr() as *const c_void,
            );

            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 4);

            // source rectangles must not bleed across the texture edge
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
        }

        let texture = Self {
            texture_id,
            width: image.width(),
            height: image.height(),
        };

        texture.set_texture_sampling_mode(GLTextureSamplingMode::Linear);

        texture
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn use_texture(&self, texture_unit: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + texture_unit);
            gl::BindTexture(gl::TEXTURE_2D, self.texture_id);
        }
    }

    pub fn set_texture_sampling_mode(&self, mode: GLTextureSamplingMode) {
        let filter = match mode {
            GLTextureSamplingMode::Nearest => gl::NEAREST,
            GLTextureSamplingMode::Linear => gl::LINEAR,
        };

        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.texture_id);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter as i32);
        }
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.texture_id);
        }
    }
}
