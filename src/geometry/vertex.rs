use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Anything the BVH can read a 3D position from.
pub trait Position {
    fn position(&self) -> Vec3;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub fn new(position: [f32; 3]) -> Self {
        Self { position }
    }
}

impl Position for Vertex {
    fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

impl Position for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

impl Position for [f32; 3] {
    fn position(&self) -> Vec3 {
        Vec3::from_array(*self)
    }
}
