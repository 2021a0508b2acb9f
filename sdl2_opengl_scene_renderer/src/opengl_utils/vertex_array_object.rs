use std::{ffi::c_void, marker::PhantomData, mem::size_of};

use gl::types::GLuint;

use super::{index_buffer_object::IndexBufferObject, vertex_buffer_object::VertexBufferObject};

pub struct VertexArrayObjectInterface {
    _phantom: PhantomData<()>,
}

impl VertexArrayObjectInterface {
    /// Points attribute `location` at `component_count` floats of every
    /// vertex, starting `offset` floats into it.
    pub fn bind_vbo_to_attrib_location(
        &self,
        vbo: &VertexBufferObject,
        location: u32,
        component_count: usize,
        floats_per_vertex: usize,
        offset: usize,
    ) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo.buffer_id);
            gl::EnableVertexAttribArray(location);

            gl::VertexAttribPointer(
                location,
                component_count as i32,
                gl::FLOAT,
                gl::FALSE,
                (floats_per_vertex * size_of::<f32>()) as i32,
                (offset * size_of::<f32>()) as *const c_void,
            );
        }
    }

    pub fn use_index_buffer_object(&self, ibo: &IndexBufferObject) {
        unsafe {
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo.buffer_id);
        }
    }
}

pub struct VertexArrayObject {
    vao_id: GLuint,
}

impl VertexArrayObject {
    /// Runs `setup_fn` with the new vertex array bound, so buffers created
    /// inside it are recorded in this vertex array only.
    pub fn new<T>(setup_fn: impl FnOnce(VertexArrayObjectInterface) -> T) -> (Self, T) {
        let (vao_id, setup_result) = unsafe {
            let mut vao_id = 0;
            gl::GenVertexArrays(1, &mut vao_id);
            gl::BindVertexArray(vao_id);

            let setup_result = setup_fn(VertexArrayObjectInterface {
                _phantom: PhantomData,
            });

            gl::BindVertexArray(0);

            (vao_id, setup_result)
        };

        (Self { vao_id }, setup_result)
    }

    /// Leaves the vertex array bound.
    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.vao_id);
        }
    }
}

impl Drop for VertexArrayObject {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao_id);
        }
    }
}
