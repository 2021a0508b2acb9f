use std::sync::Arc;

use crate::{
    actor::Actor, drawable::MeshDrawable, graphics_device::GeometryBuffer, prelude::ArcRwLock,
    shader::ShaderProgram, texture::Texture,
};

pub struct MeshComponent {
    owner: ArcRwLock<dyn Actor>,
    geometry: Arc<dyn GeometryBuffer>,
    texture: Option<Arc<dyn Texture>>,
    spec_power: f32,
    visible: bool,
}

impl MeshComponent {
    pub fn new(owner: ArcRwLock<dyn Actor>, geometry: Arc<dyn GeometryBuffer>) -> Self {
        Self {
            owner,
            geometry,
            texture: None,
            spec_power: 100.0,
            visible: true,
        }
    }

    pub fn with_texture(mut self, texture: Arc<dyn Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_spec_power(mut self, spec_power: f32) -> Self {
        self.spec_power = spec_power;
        self
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl MeshDrawable for MeshComponent {
    fn draw(&self, shader: &dyn ShaderProgram) {
        if !self.is_visible() {
            return;
        }

        shader.set_matrix4("uWorldTransform", &self.owner.read().world_transform());
        shader.set_float("uSpecPower", self.spec_power);

        if let Some(texture) = &self.texture {
            texture.set_active();
        }

        self.geometry.draw();
    }
}
