#![allow(
    clippy::comparison_chain,
    clippy::let_and_return,
    clippy::identity_op,
    clippy::needless_bool,
    clippy::collapsible_if
)]

pub mod actor;
pub mod asset_container;
pub mod config;
pub mod containers;
pub mod drawable;
pub mod drawable_registry;
pub mod error;
pub mod geometry;
pub mod graphics_device;
pub mod lighting;
pub mod mesh_component;
pub mod prelude;
pub mod renderer;
pub mod shader;
pub mod sprite_component;
pub mod texture;
