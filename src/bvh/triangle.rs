use glam::Vec3;

use crate::geometry::{Aabb, Position};

/// A triangle of the working set during a build.
///
/// The triangle itself is only the `offset` of its first index; bounds and
/// centroid are cached so the partition step does not re-read vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhTriangle {
    pub offset: u32,
    pub bounds: Aabb,
    pub centroid: Vec3,
}

impl BvhTriangle {
    pub fn new<V: Position>(vertices: &[V], indices: &[u32], offset: u32) -> Self {
        let [a, b, c] = positions(vertices, indices, offset);
        Self {
            offset,
            bounds: Aabb::from_points([a, b, c]),
            centroid: (a + b + c) / 3.0,
        }
    }
}

/// Vertex positions of the triangle starting at `offset`.
///
/// Panics if the triangle or one of its vertices is out of range.
pub fn positions<V: Position>(vertices: &[V], indices: &[u32], offset: u32) -> [Vec3; 3] {
    let offset = offset as usize;
    let t = &indices[offset..offset + 3];
    [
        vertices[t[0] as usize].position(),
        vertices[t[1] as usize].position(),
        vertices[t[2] as usize].position(),
    ]
}
