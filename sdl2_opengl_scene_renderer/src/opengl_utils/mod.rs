pub mod index_buffer_object;
pub mod shader;
pub mod shader_input;
pub mod shader_program;
pub mod texture_2d;
pub mod vertex_array_object;
pub mod vertex_buffer_object;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GlError {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    InvalidFramebufferOperation,
    Unknown(u32),
}

impl GlError {
    pub fn code(&self) -> u32 {
        match self {
            GlError::InvalidEnum => gl::INVALID_ENUM,
            GlError::InvalidValue => gl::INVALID_VALUE,
            GlError::InvalidOperation => gl::INVALID_OPERATION,
            GlError::StackOverflow => gl::STACK_OVERFLOW,
            GlError::StackUnderflow => gl::STACK_UNDERFLOW,
            GlError::OutOfMemory => gl::OUT_OF_MEMORY,
            GlError::InvalidFramebufferOperation => gl::INVALID_FRAMEBUFFER_OPERATION,
            GlError::Unknown(code) => *code,
        }
    }
}

pub fn gl_get_error() -> Result<(), GlError> {
    let error = unsafe { gl::GetError() };

    match error {
        gl::NO_ERROR => Ok(()),
        gl::INVALID_ENUM => Err(GlError::InvalidEnum),
        gl::INVALID_VALUE => Err(GlError::InvalidValue),
        gl::INVALID_OPERATION => Err(GlError::InvalidOperation),
        gl::STACK_OVERFLOW => Err(GlError::StackOverflow),
        gl::STACK_UNDERFLOW => Err(GlError::StackUnderflow),
        gl::OUT_OF_MEMORY => Err(GlError::OutOfMemory),
        gl::INVALID_FRAMEBUFFER_OPERATION => Err(GlError::InvalidFramebufferOperation),
        e => Err(GlError::Unknown(e)),
    }
}
