use vek::{Mat4, Rect, Vec2, Vec3, Vec4};

use crate::drawable::Flip;

/// Translation from centered world space to top-left pixel space.
pub fn pixel_translation(origin: Vec2<f32>, window_dimensions: Vec2<u32>) -> Mat4<f32> {
    let half_width = (window_dimensions.x / 2) as f32;
    let half_height = (window_dimensions.y / 2) as f32;

    Mat4::<f32>::translation_3d(Vec3::<f32>::new(
        -half_width - origin.x,
        -half_height - origin.y,
        0.0,
    ))
}

/// World transform of a sprite quad.
///
/// The unit quad is scaled to the texture size (mirrored on flipped axes),
/// placed by the owner's world transform, then shifted into pixel space.
pub fn sprite_world_transform(
    owner_world_transform: &Mat4<f32>,
    texture_size: Vec2<f32>,
    origin: Vec2<f32>,
    flip: Flip,
    window_dimensions: Vec2<u32>,
) -> Mat4<f32> {
    let mut scale = Vec3::new(texture_size.x, texture_size.y, 1.0);
    if flip.is_horizontal() {
        scale.x = -scale.x;
    }
    if flip.is_vertical() {
        scale.y = -scale.y;
    }

    let world = *owner_world_transform * Mat4::scaling_3d(scale);

    pixel_translation(origin, window_dimensions) * world
}

/// Source rectangle in uv units as `(x, y, w, h)`.
pub fn texture_rect(source_rect: Option<Rect<f32, f32>>, texture_size: Vec2<f32>) -> Vec4<f32> {
    match source_rect {
        Some(rect) if texture_size.x > 0.0 && texture_size.y > 0.0 => Vec4::new(
            rect.x / texture_size.x,
            rect.y / texture_size.y,
            rect.w / texture_size.x,
            rect.h / texture_size.y,
        ),
        _ => Vec4::new(0.0, 0.0, 1.0, 1.0),
    }
}
