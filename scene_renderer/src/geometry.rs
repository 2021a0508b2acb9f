//! Vertex data shared by the renderer and its drawables.
//!
//! Every vertex is eight interleaved `f32`s: position (3), normal (3), uv (2).

use vek::{Vec2, Vec3};

pub const FLOATS_PER_VERTEX: usize = 8;

/// Unit quad centered on the origin, uv (0, 0) at the top-left corner.
#[rustfmt::skip]
pub const SPRITE_QUAD_VERTICES: [f32; 4 * FLOATS_PER_VERTEX] = [
    -0.5,  0.5, 0.0,   0.0, 0.0, 0.0,   0.0, 0.0, // top left
     0.5,  0.5, 0.0,   0.0, 0.0, 0.0,   1.0, 0.0, // top right
     0.5, -0.5, 0.0,   0.0, 0.0, 0.0,   1.0, 1.0, // bottom right
    -0.5, -0.5, 0.0,   0.0, 0.0, 0.0,   0.0, 1.0, // bottom left
];

pub const SPRITE_QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl VertexData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    pub fn add_vertex(&mut self, position: Vec3<f32>, normal: Vec3<f32>, uv: Vec2<f32>) {
        self.vertices.extend_from_slice(position.as_slice());
        self.vertices.extend_from_slice(normal.as_slice());
        self.vertices.extend_from_slice(uv.as_slice());
    }

    pub fn add_face(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Adds a quad given its corners in counter-clockwise order.
    fn add_quad(&mut self, corners: [Vec3<f32>; 4], normal: Vec3<f32>) {
        let uvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];

        for (corner, uv) in corners.into_iter().zip(uvs) {
            self.add_vertex(corner, normal, uv);
        }

        let first = (self.number_of_vertices() - 4) as u32;
        self.add_face(first, first + 1, first + 2);
        self.add_face(first, first + 2, first + 3);
    }
}

pub fn create_cuboid(width: f32, height: f32, depth: f32) -> VertexData {
    let mut data = VertexData::new();

    let x = width / 2.0;
    let y = height / 2.0;
    let z = depth / 2.0;

    // left
    data.add_quad(
        [
            Vec3::new(-x, -y, -z),
            Vec3::new(-x, -y, z),
            Vec3::new(-x, y, z),
            Vec3::new(-x, y, -z),
        ],
        Vec3::new(-1.0, 0.0, 0.0),
    );
    // right
    data.add_quad(
        [
            Vec3::new(x, -y, z),
            Vec3::new(x, -y, -z),
            Vec3::new(x, y, -z),
            Vec3::new(x, y, z),
        ],
        Vec3::new(1.0, 0.0, 0.0),
    );
    // bottom
    data.add_quad(
        [
            Vec3::new(-x, -y, -z),
            Vec3::new(x, -y, -z),
            Vec3::new(x, -y, z),
            Vec3::new(-x, -y, z),
        ],
        Vec3::new(0.0, -1.0, 0.0),
    );
    // top
    data.add_quad(
        [
            Vec3::new(-x, y, z),
            Vec3::new(x, y, z),
            Vec3::new(x, y, -z),
            Vec3::new(-x, y, -z),
        ],
        Vec3::new(0.0, 1.0, 0.0),
    );
    // back
    data.add_quad(
        [
            Vec3::new(x, -y, -z),
            Vec3::new(-x, -y, -z),
            Vec3::new(-x, y, -z),
            Vec3::new(x, y, -z),
        ],
        Vec3::new(0.0, 0.0, -1.0),
    );
    // front
    data.add_quad(
        [
            Vec3::new(-x, -y, z),
            Vec3::new(x, -y, z),
            Vec3::new(x, y, z),
            Vec3::new(-x, y, z),
        ],
        Vec3::new(0.0, 0.0, 1.0),
    );

    data
}
