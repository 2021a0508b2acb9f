use std::sync::Arc;

use vek::{Mat4, Rect, Vec2};

use crate::{shader::ShaderProgram, texture::Texture};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Flip::Horizontal | Flip::Both)
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Flip::Vertical | Flip::Both)
    }
}

/// Depth-tested 3D drawable. Uploads its own per-object uniforms.
pub trait MeshDrawable {
    fn draw(&self, shader: &dyn ShaderProgram);
}

/// Everything the renderer needs to put one sprite on screen.
#[derive(Clone)]
pub struct SpriteInstance {
    pub world_transform: Mat4<f32>,
    pub texture: Arc<dyn Texture>,
    /// Sub-rectangle of the texture in pixels; the whole texture when `None`.
    pub source_rect: Option<Rect<f32, f32>>,
    pub origin: Vec2<f32>,
    pub flip: Flip,
}

/// Blended 2D drawable, composited in ascending draw order.
pub trait SpriteDrawable {
    fn draw_order(&self) -> i32;
    fn sprite_instance(&self) -> SpriteInstance;
}
