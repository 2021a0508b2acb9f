use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use crate::{
    error::{RendererError, ResourceKind},
    shader::ShaderProgram,
    texture::Texture,
};

/// Lookup of pre-built GPU assets by name.
pub trait AssetRegistry {
    fn shader(&self, name: &str) -> Result<Arc<dyn ShaderProgram>, RendererError>;
    fn texture(&self, name: &str) -> Result<Arc<dyn Texture>, RendererError>;
}

#[derive(Default)]
pub struct Assets {
    shaders: RwLock<HashMap<String, Arc<dyn ShaderProgram>>>,
    textures: RwLock<HashMap<String, Arc<dyn Texture>>>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_shader(&self, name: impl Into<String>, shader: Arc<dyn ShaderProgram>) {
        let name = name.into();
        log::debug!("Registering shader, name = {name}");
        self.shaders.write().insert(name, shader);
    }

    pub fn insert_texture(&self, name: impl Into<String>, texture: Arc<dyn Texture>) {
        let name = name.into();
        log::debug!("Registering texture, name = {name}");
        self.textures.write().insert(name, texture);
    }

    /// Drops every asset. Must happen while the GPU context is still alive.
    pub fn clear(&self) {
        self.shaders.write().clear();
        self.textures.write().clear();
    }
}

impl AssetRegistry for Assets {
    fn shader(&self, name: &str) -> Result<Arc<dyn ShaderProgram>, RendererError> {
        self.shaders
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RendererError::ResourceNotFound {
                kind: ResourceKind::Shader,
                name: name.to_string(),
            })
    }

    fn texture(&self, name: &str) -> Result<Arc<dyn Texture>, RendererError> {
        self.textures
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RendererError::ResourceNotFound {
                kind: ResourceKind::Texture,
                name: name.to_string(),
            })
    }
}
