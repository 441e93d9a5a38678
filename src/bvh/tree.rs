use glam::Vec3;

use crate::bvh::{triangle, BvhConfig, BvhNode, BvhTriangle, FlatBvh, GpuBvhNode};
use crate::error::BuildError;
use crate::geometry::{Aabb, Mesh, Position, Vertex};

/// Bounding volume hierarchy over a borrowed triangle mesh.
///
/// Triangles are identified by the offset of their first index in the index
/// buffer. The vertex and index buffers are borrowed, never copied, and stay
/// borrowed for as long as the tree lives.
///
/// A tree whose build was rejected is empty: every query on it yields nothing.
#[derive(Debug)]
pub struct Bvh<'a, V> {
    vertices: &'a [V],
    indices: &'a [u32],
    config: BvhConfig,
    root: Option<BvhNode>,
}

/// Shape of a built tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BvhStats {
    pub nodes: usize,
    pub leaves: usize,
    pub triangles: usize,
    /// Depth of the deepest leaf; the root is at depth 0.
    pub max_depth: usize,
    pub max_leaf_size: usize,
}

impl<'a, V> Default for Bvh<'a, V> {
    fn default() -> Self {
        Self::with_config(BvhConfig::default())
    }
}

impl<'a> TryFrom<&'a Mesh> for Bvh<'a, Vertex> {
    type Error = BuildError;

    fn try_from(mesh: &'a Mesh) -> Result<Self, Self::Error> {
        let mut ret = Self::new();
        ret.build(&mesh.vertices, &mesh.indices)?;
        Ok(ret)
    }
}

impl<'a, V> Bvh<'a, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BvhConfig) -> Self {
        Self {
            vertices: &[],
            indices: &[],
            config,
            root: None,
        }
    }

    pub fn config(&self) -> &BvhConfig {
        &self.config
    }

    pub fn root(&self) -> Option<&BvhNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Bounds of the whole tree, `None` when empty.
    pub fn bounds(&self) -> Option<Aabb> {
        self.root.as_ref().map(|root| *root.bounds())
    }

    /// Replaces `out` with the triangles of every leaf whose bounds, grown by
    /// `radius` on every axis, contain `point`.
    ///
    /// The result over-approximates: it holds every triangle within `radius`
    /// of `point`, and possibly others. Negative radii are treated as zero.
    pub fn query_nearby_triangles(&self, point: Vec3, radius: f32, out: &mut Vec<u32>) {
        out.clear();
        let radius = radius.max(0.0);
        if let Some(root) = &self.root {
            root.collect(
                &|bounds: &Aabb| bounds.expanded(radius).contains_point(point),
                out,
            );
        }
    }

    /// Replaces `out` with the triangles of every leaf whose bounds overlap
    /// `query`.
    pub fn query_intersecting_triangles(&self, query: &Aabb, out: &mut Vec<u32>) {
        out.clear();
        if let Some(root) = &self.root {
            root.collect(&|bounds: &Aabb| bounds.intersects(query), out);
        }
    }

    /// Writes the tree in pre-order into `nodes`, and the triangles of every
    /// leaf into `triangles`. Both are cleared first; an empty tree leaves
    /// them empty.
    pub fn flatten_for_gpu(&self, nodes: &mut Vec<GpuBvhNode>, triangles: &mut Vec<u32>) {
        nodes.clear();
        triangles.clear();
        if let Some(root) = &self.root {
            GpuBvhNode::serialize(root, nodes, triangles);
        }
    }

    pub fn flatten(&self) -> FlatBvh {
        let mut ret = FlatBvh::default();
        self.flatten_for_gpu(&mut ret.nodes, &mut ret.triangles);
        ret
    }

    pub fn stats(&self) -> BvhStats {
        fn walk(node: &BvhNode, depth: usize, stats: &mut BvhStats) {
            stats.nodes += 1;
            match node {
                BvhNode::Internal { left, right, .. } => {
                    walk(left, depth + 1, stats);
                    walk(right, depth + 1, stats);
                }
                BvhNode::Leaf { triangles, .. } => {
                    stats.leaves += 1;
                    stats.triangles += triangles.len();
                    stats.max_depth = stats.max_depth.max(depth);
                    stats.max_leaf_size = stats.max_leaf_size.max(triangles.len());
                }
            }
        }

        let mut stats = BvhStats::default();
        if let Some(root) = &self.root {
            walk(root, 0, &mut stats);
        }
        stats
    }
}

impl<'a, V: Position> Bvh<'a, V> {
    /// Builds the tree over `vertices` / `indices`, discarding any previous
    /// tree.
    ///
    /// Malformed input is rejected with an error and logged; the tree is then
    /// left empty.
    pub fn build(&mut self, vertices: &'a [V], indices: &'a [u32]) -> Result<(), BuildError> {
        self.root = None;
        self.vertices = &[];
        self.indices = &[];

        if let Err(err) = Self::validate(&self.config, vertices, indices) {
            log::warn!("BVH build rejected: {err}");
            return Err(err);
        }

        self.vertices = vertices;
        self.indices = indices;

        let triangles: Vec<BvhTriangle> = (0..indices.len() as u32)
            .step_by(3)
            .map(|offset| BvhTriangle::new(vertices, indices, offset))
            .collect();
        self.root = Some(BvhNode::build(&self.config, triangles, 0));

        let stats = self.stats();
        log::debug!(
            "built BVH: {} triangles, {} nodes, {} leaves, depth {}, largest leaf {}",
            stats.triangles,
            stats.nodes,
            stats.leaves,
            stats.max_depth,
            stats.max_leaf_size
        );
        Ok(())
    }

    /// Vertex positions of the triangle starting at `offset`.
    ///
    /// Panics if `offset` does not name a triangle of the built mesh.
    pub fn triangle(&self, offset: u32) -> [Vec3; 3] {
        assert!(
            offset % 3 == 0 && (offset as usize) + 3 <= self.indices.len(),
            "triangle offset {offset} out of range (index count: {})",
            self.indices.len()
        );
        triangle::positions(self.vertices, self.indices, offset)
    }

    fn validate(config: &BvhConfig, vertices: &[V], indices: &[u32]) -> Result<(), BuildError> {
        config.validate()?;
        if vertices.is_empty() {
            return Err(BuildError::EmptyVertices);
        }
        validate_index_count(indices.len())?;
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(BuildError::VertexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }
        Ok(())
    }
}

fn validate_index_count(count: usize) -> Result<(), BuildError> {
    if count == 0 {
        return Err(BuildError::EmptyIndices);
    }
    if u32::try_from(count).is_err() {
        return Err(BuildError::TooManyIndices { count });
    }
    if count % 3 != 0 {
        return Err(BuildError::IndexCountNotMultipleOfThree { count });
    }
    Ok(())
}
