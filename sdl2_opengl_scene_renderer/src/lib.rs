#![allow(
    clippy::comparison_chain,
    clippy::let_and_return,
    clippy::identity_op,
    clippy::needless_bool,
    clippy::collapsible_if
)]

pub mod gl_device;
pub mod gl_geometry_buffer;
pub mod gl_shader_program;
pub mod gl_texture;
pub mod opengl_utils;
