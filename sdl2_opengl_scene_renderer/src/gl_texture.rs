use std::path::Path;

use image::DynamicImage;
use scene_renderer::texture::Texture;

use crate::opengl_utils::texture_2d::{GLTextureSamplingMode, Texture2D};

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("could not load image, path = {path}, msg = {error}")]
    ImageLoad {
        error: image::ImageError,
        path: String,
    },
}

pub struct GLTexture {
    texture: Texture2D,
}

impl GLTexture {
    pub fn new(image: &DynamicImage) -> Self {
        let texture = Texture2D::new(&image.to_rgba8());

        log::trace!(
            "Created texture, width = {}, height = {}",
            texture.width(),
            texture.height()
        );

        Self { texture }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|error| TextureError::ImageLoad {
            error,
            path: path.display().to_string(),
        })?;

        Ok(Self::new(&image))
    }

    /// Nearest sampling keeps pixel art crisp.
    pub fn set_sampling_mode(&self, mode: GLTextureSamplingMode) {
        self.texture.set_texture_sampling_mode(mode);
    }
}

impl Texture for GLTexture {
    fn set_active(&self) {
        self.texture.use_texture(0);
    }

    fn width(&self) -> u32 {
        self.texture.width()
    }

    fn height(&self) -> u32 {
        self.texture.height()
    }
}
