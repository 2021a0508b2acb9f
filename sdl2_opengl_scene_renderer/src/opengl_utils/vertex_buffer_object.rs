use std::{ffi::c_void, mem::size_of};

use gl::types::GLuint;

pub struct VertexBufferObject {
    pub(super) buffer_id: GLuint,
    number_of_floats: usize,
}

impl VertexBufferObject {
    pub fn new(data: &[f32]) -> Self {
        let mut buffer_id = 0;
        unsafe {
            gl::GenBuffers(1, &mut buffer_id);
            gl::BindBuffer(gl::ARRAY_BUFFER, buffer_id);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (size_of::<f32>() * data.len()) as isize,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        };
        Self {
            buffer_id,
            number_of_floats: data.len(),
        }
    }

    pub fn number_of_floats(&self) -> usize {
        self.number_of_floats
    }
}

impl Drop for VertexBufferObject {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.buffer_id);
        }
    }
}
