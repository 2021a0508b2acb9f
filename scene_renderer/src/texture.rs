pub trait Texture {
    /// Binds the texture to the first texture unit.
    fn set_active(&self);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
}
