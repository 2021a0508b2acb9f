use gl::types::GLint;
use vek::{Mat4, Vec3, Vec4};

#[derive(Debug, Clone)]
pub struct ShaderInput {
    pub name: String,
    pub location: GLint,
}

#[derive(Debug, Clone)]
pub struct ShaderUniform(pub(super) ShaderInput);

impl ShaderUniform {
    pub fn new(shader_input: ShaderInput) -> Self {
        Self(shader_input)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    // The send_* calls write into the program bound with use_program.

    pub fn send_uniform_1f(&self, value: f32) {
        unsafe {
            gl::Uniform1f(self.0.location, value);
        }
    }

    pub fn send_uniform_3fv(&self, value: Vec3<f32>) {
        unsafe {
            gl::Uniform3fv(self.0.location, 1, value.as_slice().as_ptr());
        }
    }

    pub fn send_uniform_4fv(&self, value: Vec4<f32>) {
        unsafe {
            gl::Uniform4fv(self.0.location, 1, value.as_slice().as_ptr());
        }
    }

    pub fn send_uniform_matrix_4fv(&self, value: &Mat4<f32>) {
        unsafe {
            gl::UniformMatrix4fv(self.0.location, 1, gl::FALSE, value.as_col_slice().as_ptr());
        }
    }
}
