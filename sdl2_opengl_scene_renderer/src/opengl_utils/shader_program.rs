use std::{ffi::CString, string::FromUtf8Error};

use gl::types::{GLchar, GLint, GLuint};

use super::{
    shader::Shader,
    shader_input::{ShaderInput, ShaderUniform},
};

#[derive(Debug, thiserror::Error)]
pub enum ShaderProgramError {
    #[error("link log is not valid utf-8: {0}")]
    LinkErrorToString(FromUtf8Error),
    #[error("link failed: {error_msg}")]
    LinkError { error_msg: String },
}

pub struct ShaderProgram {
    attached_shaders: Vec<Shader>,
    program_id: GLuint,
}

impl ShaderProgram {
    pub fn new() -> Self {
        let program_id = unsafe { gl::CreateProgram() };

        Self {
            program_id,
            attached_shaders: Vec::new(),
        }
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.program_id) }
    }

    pub fn attach_shader(&mut self, shader: Shader) {
        unsafe { gl::AttachShader(self.program_id, shader.shader_id) }
        self.attached_shaders.push(shader);
    }

    unsafe fn get_program_info_log(&self) -> Result<String, ShaderProgramError> {
        let mut info_log_length = 0;
        let mut actual_info_log_length: GLint = 0;

        gl::GetProgramiv(self.program_id, gl::INFO_LOG_LENGTH, &mut info_log_length);

        if info_log_length > 0 {
            let mut error_log = vec![0u8; info_log_length as usize + 1];
            gl::GetProgramInfoLog(
                self.program_id,
                info_log_length,
                &mut actual_info_log_length,
                error_log.as_mut_ptr() as *mut GLchar,
            );
            error_log.resize(actual_info_log_length as usize, 0);

            String::from_utf8(error_log).map_err(ShaderProgramError::LinkErrorToString)
        } else {
            Ok(String::new())
        }
    }

    pub fn link_program(&mut self) -> Result<(), ShaderProgramError> {
        unsafe {
            gl::LinkProgram(self.program_id);

            let mut link_status = 0;
            gl::GetProgramiv(self.program_id, gl::LINK_STATUS, &mut link_status);

            if link_status == 0 {
                let error_msg = self.get_program_info_log()?;
                return Err(ShaderProgramError::LinkError { error_msg });
            }
        }

        // shaders are no longer needed once the program is linked
        self.attached_shaders.clear();

        Ok(())
    }

    /// Lists the uniforms the linker kept. Array uniforms are reported under
    /// their base name, without the trailing `[0]`.
    pub fn active_uniforms(&self) -> Vec<ShaderUniform> {
        let mut uniforms = Vec::new();

        unsafe {
            let mut number_of_uniforms = 0;
            gl::GetProgramiv(self.program_id, gl::ACTIVE_UNIFORMS, &mut number_of_uniforms);

            let mut max_name_length = 0;
            gl::GetProgramiv(
                self.program_id,
                gl::ACTIVE_UNIFORM_MAX_LENGTH,
                &mut max_name_length,
            );

            for index in 0..number_of_uniforms.max(0) as GLuint {
                let mut name_buffer = vec![0u8; max_name_length.max(1) as usize];
                let mut name_length = 0;
                let mut array_size = 0;
                let mut data_type = 0;

                gl::GetActiveUniform(
                    self.program_id,
                    index,
                    max_name_length,
                    &mut name_length,
                    &mut array_size,
                    &mut data_type,
                    name_buffer.as_mut_ptr() as *mut GLchar,
                );
                name_buffer.truncate(name_length.max(0) as usize);

                let raw_name = String::from_utf8_lossy(&name_buffer).into_owned();
                let location = match CString::new(raw_name.clone()) {
                    Ok(c_name) => gl::GetUniformLocation(self.program_id, c_name.as_ptr()),
                    Err(_) => continue,
                };

                // members of uniform blocks have no location of their own
                if location < 0 {
                    continue;
                }

                let name = raw_name
                    .strip_suffix("[0]")
                    .map(str::to_string)
                    .unwrap_or(raw_name);

                uniforms.push(ShaderUniform::new(ShaderInput { name, location }));
            }
        }

        uniforms
    }
}

impl Default for ShaderProgram {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.program_id);
        }
    }
}
