use vek::{Mat4, Vec3};

use crate::shader::ShaderProgram;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3<f32>,
    pub diffuse_color: Vec3<f32>,
    pub spec_color: Vec3<f32>,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::zero(),
            diffuse_color: Vec3::zero(),
            spec_color: Vec3::zero(),
        }
    }
}

/// Frame-global lighting: one ambient term and one directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingState {
    pub ambient_light: Vec3<f32>,
    pub directional_light: DirectionalLight,
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            ambient_light: Vec3::one(),
            directional_light: DirectionalLight::default(),
        }
    }
}

/// World-space camera position: the translation of the inverted view matrix.
pub fn camera_position(view_matrix: &Mat4<f32>) -> Vec3<f32> {
    view_matrix.inverted().cols.w.xyz()
}

impl LightingState {
    pub fn upload_uniforms(&self, shader: &dyn ShaderProgram, view_matrix: &Mat4<f32>) {
        shader.set_vector3f("uCameraPos", camera_position(view_matrix));

        shader.set_vector3f("uAmbientLight", self.ambient_light);

        shader.set_vector3f("uDirLight.direction", self.directional_light.direction);
        shader.set_vector3f(
            "uDirLight.diffuseColor",
            self.directional_light.diffuse_color,
        );
        shader.set_vector3f("uDirLight.specColor", self.directional_light.spec_color);
    }
}
