#[cfg(test)]
pub(crate) mod tests;

mod sprite_transform;

pub use sprite_transform::{pixel_translation, sprite_world_transform, texture_rect};

use std::sync::Arc;

use vek::{Mat4, Vec2, Vec3};

use crate::{
    asset_container::AssetRegistry,
    config::RendererConfig,
    drawable::{MeshDrawable, SpriteDrawable, SpriteInstance},
    drawable_registry::{DrawableRegistry, MeshHandle, SpriteHandle},
    error::RendererError,
    geometry::{SPRITE_QUAD_INDICES, SPRITE_QUAD_VERTICES},
    graphics_device::{BlendState, GeometryBuffer, GraphicsDevice},
    lighting::{self, DirectionalLight, LightingState},
    prelude::ArcRwLock,
    shader::ShaderProgram,
};

pub const PHONG_SHADER_NAME: &str = "Phong";
pub const SPRITE_SHADER_NAME: &str = "Sprite";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FramePhase {
    Idle,
    Begun,
    Drawn,
}

/// Single-pass forward renderer: opaque meshes first, then sprites on top.
///
/// A frame is `begin_frame`, `draw`, `end_frame`, in that order.
pub struct SceneRenderer {
    device: Box<dyn GraphicsDevice>,
    assets: Arc<dyn AssetRegistry>,
    config: RendererConfig,

    window_dimensions: Vec2<u32>,
    view_matrix: Mat4<f32>,
    projection_matrix: Mat4<f32>,
    sprite_view_projection: Mat4<f32>,
    lighting: LightingState,

    registry: DrawableRegistry,
    sprite_quad: Option<Box<dyn GeometryBuffer>>,

    frame_phase: FramePhase,
    closed: bool,
}

impl SceneRenderer {
    pub fn initialize(
        mut device: Box<dyn GraphicsDevice>,
        assets: Arc<dyn AssetRegistry>,
        config: RendererConfig,
    ) -> Result<Self, RendererError> {
        device
            .initialize()
            .inspect_err(|e| log::error!("Initializing renderer, msg = {e}"))?;

        let window_dimensions =
            clamp_window_dimensions(config.window_width, config.window_height);
        device.set_viewport(window_dimensions.x, window_dimensions.y);

        let sprite_quad = device.create_geometry(&SPRITE_QUAD_VERTICES, &SPRITE_QUAD_INDICES);

        let mut renderer = Self {
            device,
            assets,

            window_dimensions,
            view_matrix: Mat4::look_at_rh(Vec3::zero(), Vec3::unit_x(), Vec3::unit_z()),
            projection_matrix: perspective_projection(&config, window_dimensions),
            sprite_view_projection: simple_view_projection(window_dimensions),
            lighting: LightingState::default(),

            registry: DrawableRegistry::new(),
            sprite_quad: Some(sprite_quad),

            frame_phase: FramePhase::Idle,
            closed: false,

            config,
        };

        renderer.validate("initialize");

        log::debug!(
            "Renderer initialized, window dimensions = {}x{}",
            window_dimensions.x,
            window_dimensions.y
        );

        Ok(renderer)
    }

    pub fn begin_frame(&mut self) {
        if self.closed {
            log::error!("Beginning frame, msg = renderer is closed");
            return;
        }

        if self.frame_phase != FramePhase::Idle {
            log::warn!(
                "Beginning frame out of order, current phase = {:?}",
                self.frame_phase
            );
        }
        self.frame_phase = FramePhase::Begun;

        self.device.set_clear_color(self.config.clear_color);
        self.device.clear();

        self.validate("begin frame");
    }

    pub fn draw(&mut self) -> Result<(), RendererError> {
        if self.closed {
            return Err(RendererError::Closed);
        }

        if self.frame_phase != FramePhase::Begun {
            log::warn!(
                "Drawing frame out of order, current phase = {:?}",
                self.frame_phase
            );
        }

        let phong_shader = self.assets.shader(PHONG_SHADER_NAME)?;
        let sprite_shader = self.assets.shader(SPRITE_SHADER_NAME)?;

        self.draw_meshes(&*phong_shader);
        self.validate("mesh phase");

        self.draw_sprites(&*sprite_shader)?;
        self.validate("sprite phase");

        self.frame_phase = FramePhase::Drawn;

        Ok(())
    }

    pub fn end_frame(&mut self) {
        if self.closed {
            log::error!("Ending frame, msg = renderer is closed");
            return;
        }

        if self.frame_phase != FramePhase::Drawn {
            log::warn!(
                "Ending frame out of order, current phase = {:?}",
                self.frame_phase
            );
        }
        self.frame_phase = FramePhase::Idle;

        self.device.swap_buffers();
    }

    fn draw_meshes(&mut self, shader: &dyn ShaderProgram) {
        self.device.set_depth_test(true);
        self.device.set_blend_state(BlendState::Disabled);

        shader.use_program();
        shader.set_matrix4("uViewProj", &(self.projection_matrix * self.view_matrix));
        self.set_light_uniforms(shader);

        for mesh in self.registry.meshes() {
            mesh.read().draw(shader);
        }
    }

    fn draw_sprites(&mut self, shader: &dyn ShaderProgram) -> Result<(), RendererError> {
        let sprite_quad = self.sprite_quad.as_ref().ok_or(RendererError::Closed)?;

        self.device.set_depth_test(false);
        self.device.set_blend_state(BlendState::AlphaBlend);

        shader.use_program();
        shader.set_matrix4("uViewProj", &self.sprite_view_projection);
        sprite_quad.bind();

        for sprite in self.registry.sprites() {
            let instance = sprite.read().sprite_instance();

            draw_sprite(
                &mut *self.device,
                shader,
                &instance,
                self.window_dimensions,
                sprite_quad.index_count(),
            );
        }

        Ok(())
    }

    /// Uploads camera position and lighting. Called once per mesh phase.
    pub fn set_light_uniforms(&self, shader: &dyn ShaderProgram) {
        self.lighting.upload_uniforms(shader, &self.view_matrix);
    }

    pub fn add_mesh(&mut self, mesh: ArcRwLock<dyn MeshDrawable>) -> MeshHandle {
        let handle = self.registry.add_mesh(mesh);
        log::debug!("Mesh added, handle = {handle:?}");
        handle
    }

    pub fn remove_mesh(&mut self, handle: MeshHandle) -> Option<ArcRwLock<dyn MeshDrawable>> {
        self.registry.remove_mesh(handle)
    }

    pub fn add_sprite(&mut self, sprite: ArcRwLock<dyn SpriteDrawable>) -> SpriteHandle {
        let handle = self.registry.add_sprite(sprite);
        log::debug!("Sprite added, handle = {handle:?}");
        handle
    }

    pub fn remove_sprite(
        &mut self,
        handle: SpriteHandle,
    ) -> Option<ArcRwLock<dyn SpriteDrawable>> {
        self.registry.remove_sprite(handle)
    }

    pub fn registry(&self) -> &DrawableRegistry {
        &self.registry
    }

    pub fn set_view_matrix(&mut self, view_matrix: Mat4<f32>) {
        self.view_matrix = view_matrix;
    }

    pub fn view_matrix(&self) -> &Mat4<f32> {
        &self.view_matrix
    }

    pub fn set_projection_matrix(&mut self, projection_matrix: Mat4<f32>) {
        self.projection_matrix = projection_matrix;
    }

    pub fn projection_matrix(&self) -> &Mat4<f32> {
        &self.projection_matrix
    }

    pub fn sprite_view_projection(&self) -> &Mat4<f32> {
        &self.sprite_view_projection
    }

    pub fn camera_position(&self) -> Vec3<f32> {
        lighting::camera_position(&self.view_matrix)
    }

    pub fn set_ambient_light(&mut self, ambient_light: Vec3<f32>) {
        self.lighting.ambient_light = ambient_light;
    }

    pub fn set_directional_light(&mut self, directional_light: DirectionalLight) {
        self.lighting.directional_light = directional_light;
    }

    pub fn lighting(&self) -> &LightingState {
        &self.lighting
    }

    /// A zero width or height (e.g. a minimized window) is raised to 1.
    pub fn set_window_dimensions(&mut self, window_width: u32, window_height: u32) {
        self.window_dimensions = clamp_window_dimensions(window_width, window_height);
        self.projection_matrix = perspective_projection(&self.config, self.window_dimensions);
        self.sprite_view_projection = simple_view_projection(self.window_dimensions);

        if !self.closed {
            self.device
                .set_viewport(self.window_dimensions.x, self.window_dimensions.y);
        }
    }

    pub fn window_dimensions(&self) -> Vec2<u32> {
        self.window_dimensions
    }

    pub fn frame_phase(&self) -> FramePhase {
        self.frame_phase
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Unregisters every drawable, releases the sprite quad and destroys the
    /// GPU context.
    ///
    /// Assets holding GPU objects must be dropped before this is called.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        self.registry = DrawableRegistry::new();
        self.sprite_quad = None;
        self.device.destroy_context();

        log::debug!("Renderer closed");
    }

    fn validate(&mut self, stage: &str) {
        if !self.config.validate_gpu_calls {
            return;
        }

        for error in self.device.take_errors() {
            log::error!(
                "GPU error after {stage}, code = {:#x}, msg = {}",
                error.code,
                error.description
            );
        }
    }
}

impl Drop for SceneRenderer {
    fn drop(&mut self) {
        self.close();
    }
}

fn draw_sprite(
    device: &mut dyn GraphicsDevice,
    shader: &dyn ShaderProgram,
    instance: &SpriteInstance,
    window_dimensions: Vec2<u32>,
    index_count: usize,
) {
    let texture_size = Vec2::new(
        instance.texture.width() as f32,
        instance.texture.height() as f32,
    );

    let world_transform = sprite_world_transform(
        &instance.world_transform,
        texture_size,
        instance.origin,
        instance.flip,
        window_dimensions,
    );

    shader.set_matrix4("uWorldTransform", &world_transform);
    shader.set_vector4f("uTexRect", texture_rect(instance.source_rect, texture_size));
    instance.texture.set_active();

    device.draw_indexed_triangles(index_count);
}

fn clamp_window_dimensions(window_width: u32, window_height: u32) -> Vec2<u32> {
    if window_width == 0 || window_height == 0 {
        log::warn!(
            "Clamping window dimensions, requested dimensions = {window_width}x{window_height}"
        );
    }

    Vec2::new(window_width.max(1), window_height.max(1))
}

fn perspective_projection(config: &RendererConfig, window_dimensions: Vec2<u32>) -> Mat4<f32> {
    Mat4::perspective_fov_rh_no(
        config.field_of_view_degrees.to_radians(),
        window_dimensions.x as f32,
        window_dimensions.y as f32,
        config.near_plane,
        config.far_plane,
    )
}

/// Maps pixel space centered on the screen to clip space.
fn simple_view_projection(window_dimensions: Vec2<u32>) -> Mat4<f32> {
    Mat4::scaling_3d(Vec3::new(
        2.0 / window_dimensions.x as f32,
        2.0 / window_dimensions.y as f32,
        1.0,
    ))
}
