use vek::{Mat4, Transform};

/// Anything with a position in the world that drawables can be attached to.
pub trait Actor {
    fn world_transform(&self) -> Mat4<f32>;
}

impl Actor for Mat4<f32> {
    fn world_transform(&self) -> Mat4<f32> {
        *self
    }
}

impl Actor for Transform<f32, f32, f32> {
    fn world_transform(&self) -> Mat4<f32> {
        (*self).into()
    }
}
