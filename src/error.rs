//! Error types for BVH construction and mesh loading.

use thiserror::Error;

/// Reasons a BVH build is rejected.
///
/// A rejected build leaves the tree empty; every query on it returns nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("vertex buffer is empty")]
    EmptyVertices,

    #[error("index buffer is empty")]
    EmptyIndices,

    /// Triangles are consecutive index triples.
    #[error("index count {count} is not a multiple of 3")]
    IndexCountNotMultipleOfThree { count: usize },

    /// Triangle offsets are `u32`, so the whole index buffer must be addressable by one.
    #[error("index count {count} exceeds the u32 range")]
    TooManyIndices { count: usize },

    #[error("index {index} references a vertex out of range (vertex count: {vertex_count})")]
    VertexOutOfRange { index: u32, vertex_count: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while importing a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse OBJ: {0}")]
    Obj(#[from] tobj::LoadError),
}
