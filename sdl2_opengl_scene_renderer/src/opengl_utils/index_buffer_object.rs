use std::{ffi::c_void, mem::size_of, ptr::null};

use gl::types::{GLenum, GLuint};

pub struct IndexBufferObject {
    pub(super) buffer_id: GLuint,
    number_of_elements: usize,
}

impl IndexBufferObject {
    pub fn new(indices: &[u32]) -> Self {
        let mut buffer_id = 0;
        unsafe {
            gl::GenBuffers(1, &mut buffer_id);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, buffer_id);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (size_of::<u32>() * indices.len()) as isize,
                indices.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        };
        Self {
            buffer_id,
            number_of_elements: indices.len(),
        }
    }

    pub fn number_of_elements(&self) -> usize {
        self.number_of_elements
    }
}

/// Draws from whatever element buffer the bound vertex array refers to.
pub fn draw_elements(primitive_mode: GLenum, number_of_elements: usize) {
    unsafe {
        gl::DrawElements(
            primitive_mode,
            number_of_elements as i32,
            gl::UNSIGNED_INT,
            null::<c_void>(),
        );
    }
}

impl Drop for IndexBufferObject {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.buffer_id);
        }
    }
}
