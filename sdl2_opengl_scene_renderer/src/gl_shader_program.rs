use std::{collections::HashMap, path::Path};

use scene_renderer::shader::ShaderProgram as SceneShaderProgram;
use vek::{Mat4, Vec3, Vec4};

use super::opengl_utils::{
    shader::{Shader, ShaderCreationError, ShaderType},
    shader_input::ShaderUniform,
    shader_program::{ShaderProgram, ShaderProgramError},
};

#[derive(Debug, thiserror::Error)]
pub enum GLShaderProgramError {
    #[error("could not read shader source, path = {path}, msg = {error}")]
    SourceReadError { error: std::io::Error, path: String },
    #[error("could not create {shader_type:?} shader, path = {shader_path}, msg = {shader_creation_error}")]
    ShaderCreationError {
        shader_type: ShaderType,
        shader_path: String,
        shader_creation_error: ShaderCreationError,
    },
    #[error(transparent)]
    ShaderProgramError(#[from] ShaderProgramError),
}

/// A linked vertex + fragment program with its active uniforms looked up once.
pub struct GLShaderProgram {
    shader_program: ShaderProgram,
    uniforms: HashMap<String, ShaderUniform>,
}

fn read_source(path: &str) -> Result<String, GLShaderProgramError> {
    std::fs::read_to_string(path).map_err(|error| GLShaderProgramError::SourceReadError {
        error,
        path: path.to_string(),
    })
}

impl GLShaderProgram {
    /// Loads `<shader_base_path>.vert` and `<shader_base_path>.frag`.
    pub fn load(shader_base_path: impl AsRef<Path>) -> Result<Self, GLShaderProgramError> {
        let shader_base_path = shader_base_path.as_ref().to_string_lossy().into_owned();
        let vertex_shader_path = shader_base_path.clone() + ".vert";
        let fragment_shader_path = shader_base_path.clone() + ".frag";

        let vertex_shader_source = read_source(&vertex_shader_path)?;
        let fragment_shader_source = read_source(&fragment_shader_path)?;

        let vertex_shader =
            Shader::new(ShaderType::Vertex, &vertex_shader_source).map_err(|e| {
                GLShaderProgramError::ShaderCreationError {
                    shader_type: ShaderType::Vertex,
                    shader_path: vertex_shader_path,
                    shader_creation_error: e,
                }
            })?;

        let fragment_shader =
            Shader::new(ShaderType::Fragment, &fragment_shader_source).map_err(|e| {
                GLShaderProgramError::ShaderCreationError {
                    shader_type: ShaderType::Fragment,
                    shader_path: fragment_shader_path,
                    shader_creation_error: e,
                }
            })?;

        let mut shader_program = ShaderProgram::new();
        shader_program.attach_shader(vertex_shader);
        shader_program.attach_shader(fragment_shader);
        shader_program.link_program()?;

        let uniforms = shader_program
            .active_uniforms()
            .into_iter()
            .map(|uniform| (uniform.name().to_string(), uniform))
            .collect::<HashMap<_, _>>();

        log::debug!(
            "Loaded shader program, path = {shader_base_path}, number of uniforms = {}",
            uniforms.len()
        );

        Ok(Self {
            shader_program,
            uniforms,
        })
    }

    pub fn uniform(&self, name: &str) -> Option<&ShaderUniform> {
        self.uniforms.get(name)
    }
}

impl SceneShaderProgram for GLShaderProgram {
    fn use_program(&self) {
        self.shader_program.use_program();
    }

    fn set_matrix4(&self, name: &str, value: &Mat4<f32>) {
        if let Some(uniform) = self.uniform(name) {
            uniform.send_uniform_matrix_4fv(value);
        }
    }

    fn set_vector3f(&self, name: &str, value: Vec3<f32>) {
        if let Some(uniform) = self.uniform(name) {
            uniform.send_uniform_3fv(value);
        }
    }

    fn set_vector4f(&self, name: &str, value: Vec4<f32>) {
        if let Some(uniform) = self.uniform(name) {
            uniform.send_uniform_4fv(value);
        }
    }

    fn set_float(&self, name: &str, value: f32) {
        if let Some(uniform) = self.uniform(name) {
            uniform.send_uniform_1f(value);
        }
    }
}
