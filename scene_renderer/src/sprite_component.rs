use std::sync::Arc;

use vek::{Rect, Vec2};

use crate::{
    actor::Actor,
    drawable::{Flip, SpriteDrawable, SpriteInstance},
    prelude::ArcRwLock,
    texture::Texture,
};

pub struct SpriteComponent {
    owner: ArcRwLock<dyn Actor>,
    texture: Arc<dyn Texture>,
    draw_order: i32,
    source_rect: Option<Rect<f32, f32>>,
    origin: Vec2<f32>,
    flip: Flip,
}

impl SpriteComponent {
    pub fn new(owner: ArcRwLock<dyn Actor>, texture: Arc<dyn Texture>, draw_order: i32) -> Self {
        Self {
            owner,
            texture,
            draw_order,
            source_rect: None,
            origin: Vec2::zero(),
            flip: Flip::None,
        }
    }

    pub fn with_source_rect(mut self, source_rect: Rect<f32, f32>) -> Self {
        self.source_rect = Some(source_rect);
        self
    }

    pub fn with_origin(mut self, origin: Vec2<f32>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_flip(mut self, flip: Flip) -> Self {
        self.flip = flip;
        self
    }

    pub fn set_texture(&mut self, texture: Arc<dyn Texture>) {
        self.texture = texture;
    }

    pub fn set_source_rect(&mut self, source_rect: Option<Rect<f32, f32>>) {
        self.source_rect = source_rect;
    }

    pub fn set_flip(&mut self, flip: Flip) {
        self.flip = flip;
    }

    pub fn texture_dimensions(&self) -> Vec2<u32> {
        Vec2::new(self.texture.width(), self.texture.height())
    }
}

impl SpriteDrawable for SpriteComponent {
    fn draw_order(&self) -> i32 {
        self.draw_order
    }

    fn sprite_instance(&self) -> SpriteInstance {
        SpriteInstance {
            world_transform: self.owner.read().world_transform(),
            texture: self.texture.clone(),
            source_rect: self.source_rect,
            origin: self.origin,
            flip: self.flip,
        }
    }
}
