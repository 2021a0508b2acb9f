use std::string::FromUtf8Error;

use gl::types::{GLchar, GLint, GLuint};

#[derive(Debug, Clone, Copy)]
pub enum ShaderType {
    Vertex,
    Fragment,
}

impl ShaderType {
    pub fn to_gl_shader_type(&self) -> u32 {
        match self {
            ShaderType::Vertex => gl::VERTEX_SHADER,
            ShaderType::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderCreationError {
    #[error("compilation log is not valid utf-8: {0}")]
    CompilationErrorToString(FromUtf8Error),
    #[error("compilation failed: {error_msg}")]
    CompilationError { error_msg: String },
}

pub struct Shader {
    pub(super) shader_id: GLuint,
}

impl Shader {
    pub fn new(shader_type: ShaderType, source_code: &str) -> Result<Self, ShaderCreationError> {
        let shader_id = unsafe {
            let shader_id = gl::CreateShader(shader_type.to_gl_shader_type());
            let lengths = [source_code.len() as GLint];
            gl::ShaderSource(
                shader_id,
                1,
                &(source_code.as_ptr() as *const GLchar),
                lengths.as_ptr(),
            );

            gl::CompileShader(shader_id);

            let mut compile_status = 0;
            gl::GetShaderiv(shader_id, gl::COMPILE_STATUS, &mut compile_status);

            let info_log = get_shader_info_log(shader_id);

            if compile_status == 0 {
                gl::DeleteShader(shader_id);

                let error_msg = info_log.map_err(ShaderCreationError::CompilationErrorToString)?;
                return Err(ShaderCreationError::CompilationError { error_msg });
            }

            match info_log {
                Ok(msg) if !msg.is_empty() => log::warn!("Shader compiled with warnings, msg = {msg}"),
                _ => (),
            }

            shader_id
        };
        Ok(Self { shader_id })
    }
}

unsafe fn get_shader_info_log(shader_id: GLuint) -> Result<String, FromUtf8Error> {
    let mut info_log_length = 0;
    let mut actual_info_log_length: GLint = 0;

    gl::GetShaderiv(shader_id, gl::INFO_LOG_LENGTH, &mut info_log_length);

    if info_log_length > 0 {
        let mut error_log = vec![0u8; info_log_length as usize + 1];
        gl::GetShaderInfoLog(
            shader_id,
            info_log_length,
            &mut actual_info_log_length,
            error_log.as_mut_ptr() as *mut GLchar,
        );
        error_log.resize(actual_info_log_length as usize, 0);

        String::from_utf8(error_log)
    } else {
        Ok(String::new())
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.shader_id);
        }
    }
}
