mod aabb;
mod mesh;
mod vertex;
pub use aabb::Aabb;
pub use mesh::Mesh;
pub use vertex::{Position, Vertex};
