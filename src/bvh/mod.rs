pub mod config;
pub mod gpu;
pub mod node;
pub mod tree;
pub mod triangle;
pub use config::BvhConfig;
pub use gpu::{FlatBvh, GpuBvhNode};
pub use node::BvhNode;
pub use tree::{Bvh, BvhStats};
pub use triangle::BvhTriangle;
