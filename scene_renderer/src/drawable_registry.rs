use crate::{
    containers::object_pool::{ObjectPool, ObjectPoolIndex},
    drawable::{MeshDrawable, SpriteDrawable},
    prelude::ArcRwLock,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MeshHandle(ObjectPoolIndex);

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SpriteHandle(ObjectPoolIndex);

#[derive(Debug, Clone, Copy)]
struct SpriteOrderEntry {
    draw_order: i32,
    handle: SpriteHandle,
}

/// Drawables registered for rendering.
///
/// Meshes are kept in no particular order. Sprites are kept sorted ascending
/// by the draw order they had when registered; equal draw orders keep their
/// registration order.
///
/// Sprite insertion is a linear scan, which is fine for the sprite counts a
/// single scene has. A binary search over `sprite_order` would be the first
/// thing to reach for if that stops being true.
#[derive(Default)]
pub struct DrawableRegistry {
    meshes: ObjectPool<ArcRwLock<dyn MeshDrawable>>,
    sprites: ObjectPool<ArcRwLock<dyn SpriteDrawable>>,
    sprite_order: Vec<SpriteOrderEntry>,
}

impl DrawableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: ArcRwLock<dyn MeshDrawable>) -> MeshHandle {
        MeshHandle(self.meshes.create_object(mesh))
    }

    /// Returns `None` if the handle is not registered, which is a caller bug.
    pub fn remove_mesh(&mut self, handle: MeshHandle) -> Option<ArcRwLock<dyn MeshDrawable>> {
        let removed = self.meshes.release_object(handle.0);
        if removed.is_none() {
            log::warn!("Removing mesh, msg = mesh is not registered, handle = {handle:?}");
        }

        removed
    }

    pub fn add_sprite(&mut self, sprite: ArcRwLock<dyn SpriteDrawable>) -> SpriteHandle {
        let draw_order = sprite.read().draw_order();
        let handle = SpriteHandle(self.sprites.create_object(sprite));

        let position = self
            .sprite_order
            .iter()
            .position(|entry| draw_order < entry.draw_order)
            .unwrap_or(self.sprite_order.len());

        self.sprite_order
            .insert(position, SpriteOrderEntry { draw_order, handle });

        handle
    }

    /// Returns `None` if the handle is not registered, which is a caller bug.
    pub fn remove_sprite(
        &mut self,
        handle: SpriteHandle,
    ) -> Option<ArcRwLock<dyn SpriteDrawable>> {
        let Some(position) = self
            .sprite_order
            .iter()
            .position(|entry| entry.handle == handle)
        else {
            log::warn!("Removing sprite, msg = sprite is not registered, handle = {handle:?}");
            return None;
        };

        self.sprite_order.remove(position);
        self.sprites.release_object(handle.0)
    }

    pub fn meshes(&self) -> impl Iterator<Item = &ArcRwLock<dyn MeshDrawable>> {
        self.meshes.iter().map(|(_, mesh)| mesh)
    }

    pub fn mesh_handles(&self) -> Vec<MeshHandle> {
        self.meshes.iter().map(|(index, _)| MeshHandle(index)).collect()
    }

    /// Sprites in compositing order.
    pub fn sprites(&self) -> impl Iterator<Item = &ArcRwLock<dyn SpriteDrawable>> {
        self.sprite_order
            .iter()
            .filter_map(|entry| self.sprites.get_ref(entry.handle.0))
    }

    pub fn sprite_handles(&self) -> Vec<SpriteHandle> {
        self.sprite_order.iter().map(|entry| entry.handle).collect()
    }

    pub fn sprite_draw_orders(&self) -> Vec<i32> {
        self.sprite_order
            .iter()
            .map(|entry| entry.draw_order)
            .collect()
    }

    pub fn number_of_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn number_of_sprites(&self) -> usize {
        self.sprite_order.len()
    }
}
