pub mod bvh;
pub mod error;
pub mod geometry;
pub use bvh::{Bvh, BvhConfig, BvhNode, BvhStats, FlatBvh, GpuBvhNode};
pub use error::{BuildError, MeshError};
pub use geometry::{Aabb, Mesh, Position, Vertex};
