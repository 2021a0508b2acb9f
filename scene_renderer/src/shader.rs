use vek::{Mat4, Vec3, Vec4};

/// A linked shader program as seen by the renderer.
///
/// Setting a uniform the program does not declare is silently ignored.
pub trait ShaderProgram {
    fn use_program(&self);

    fn set_matrix4(&self, name: &str, value: &Mat4<f32>);
    fn set_vector3f(&self, name: &str, value: Vec3<f32>);
    fn set_vector4f(&self, name: &str, value: Vec4<f32>);
    fn set_float(&self, name: &str, value: f32);
}
