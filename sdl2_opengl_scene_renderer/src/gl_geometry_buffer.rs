use scene_renderer::{geometry::FLOATS_PER_VERTEX, graphics_device::GeometryBuffer};

use crate::opengl_utils::{
    index_buffer_object::{draw_elements, IndexBufferObject},
    vertex_array_object::VertexArrayObject,
    vertex_buffer_object::VertexBufferObject,
};

pub const POSITION_ATTRIB_LOCATION: u32 = 0;
pub const NORMAL_ATTRIB_LOCATION: u32 = 1;
pub const UV_ATTRIB_LOCATION: u32 = 2;

/// Interleaved vertices and their indices, wired into one vertex array.
pub struct GLGeometryBuffer {
    // the vertex array goes first so it is deleted before its buffers
    vertex_array_object: VertexArrayObject,
    _vertex_buffer_object: VertexBufferObject,
    index_buffer_object: IndexBufferObject,
}

impl GLGeometryBuffer {
    pub fn new(vertices: &[f32], indices: &[u32]) -> Self {
        let (vertex_array_object, (vertex_buffer_object, index_buffer_object)) =
            VertexArrayObject::new(|vao_interface| {
                let vbo = VertexBufferObject::new(vertices);
                let ibo = IndexBufferObject::new(indices);

                vao_interface.bind_vbo_to_attrib_location(
                    &vbo,
                    POSITION_ATTRIB_LOCATION,
                    3,
                    FLOATS_PER_VERTEX,
                    0,
                );
                vao_interface.bind_vbo_to_attrib_location(
                    &vbo,
                    NORMAL_ATTRIB_LOCATION,
                    3,
                    FLOATS_PER_VERTEX,
                    3,
                );
                vao_interface.bind_vbo_to_attrib_location(
                    &vbo,
                    UV_ATTRIB_LOCATION,
                    2,
                    FLOATS_PER_VERTEX,
                    6,
                );
                vao_interface.use_index_buffer_object(&ibo);

                (vbo, ibo)
            });

        log::trace!(
            "Created geometry buffer, number of vertices = {}, number of indices = {}",
            vertex_buffer_object.number_of_floats() / FLOATS_PER_VERTEX,
            index_buffer_object.number_of_elements()
        );

        Self {
            vertex_array_object,
            _vertex_buffer_object: vertex_buffer_object,
            index_buffer_object,
        }
    }
}

impl GeometryBuffer for GLGeometryBuffer {
    fn bind(&self) {
        self.vertex_array_object.bind();
    }

    fn index_count(&self) -> usize {
        self.index_buffer_object.number_of_elements()
    }

    fn draw(&self) {
        self.vertex_array_object.bind();
        draw_elements(gl::TRIANGLES, self.index_count());
    }
}
