use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::bvh::BvhNode;
use crate::geometry::Aabb;

/// Packed node record for device upload (32 bytes, std430 compatible).
///
/// `tri_count == 0` marks an internal node, whose left child is always the
/// next record (`left_first`); its right child follows the left subtree. For
/// leaves, `left_first` is the position of the leaf's first triangle in the
/// flat triangle array.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuBvhNode {
    pub bounds_min: Vec3,
    pub left_first: u32,
    pub bounds_max: Vec3,
    pub tri_count: u32,
}

impl GpuBvhNode {
    fn new(bounds: &Aabb, left_first: u32, tri_count: u32) -> Self {
        Self {
            bounds_min: bounds.min(),
            left_first,
            bounds_max: bounds.max(),
            tri_count,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.tri_count > 0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.bounds_min, self.bounds_max)
    }

    /// Pre-order emission of `node` and its subtree.
    pub(crate) fn serialize(node: &BvhNode, nodes: &mut Vec<Self>, triangles: &mut Vec<u32>) {
        match node {
            BvhNode::Internal {
                bounds,
                left,
                right,
            } => {
                let left_ptr = nodes.len() as u32 + 1;
                nodes.push(Self::new(bounds, left_ptr, 0));
                Self::serialize(left, nodes, triangles);
                Self::serialize(right, nodes, triangles);
            }

            BvhNode::Leaf {
                bounds,
                triangles: leaf,
            } => {
                debug_assert!(!leaf.is_empty());
                nodes.push(Self::new(bounds, triangles.len() as u32, leaf.len() as u32));
                triangles.extend_from_slice(leaf);
            }
        }
    }
}

/// Index-addressed copy of a [`crate::Bvh`], as produced by
/// [`crate::Bvh::flatten`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatBvh {
    pub nodes: Vec<GpuBvhNode>,
    pub triangles: Vec<u32>,
}

impl FlatBvh {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `[node count, triangle count]`, the header a shader reads before
    /// walking the buffers.
    pub fn sizes(&self) -> [u32; 2] {
        [self.nodes.len() as u32, self.triangles.len() as u32]
    }

    pub fn node_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Triangles referenced by the leaf at `index`; empty for internal nodes.
    pub fn leaf_triangles(&self, index: usize) -> &[u32] {
        let node = &self.nodes[index];
        if !node.is_leaf() {
            return &[];
        }
        let first = node.left_first as usize;
        &self.triangles[first..first + node.tri_count as usize]
    }

    /// Number of records taken by the subtree rooted at `index`.
    pub fn subtree_len(&self, index: usize) -> usize {
        let mut pending = 1;
        let mut i = index;
        while pending > 0 {
            if self.nodes[i].is_leaf() {
                pending -= 1;
            } else {
                pending += 1;
            }
            i += 1;
        }
        i - index
    }

    pub fn left_child(&self, index: usize) -> Option<usize> {
        let node = &self.nodes[index];
        (!node.is_leaf()).then_some(node.left_first as usize)
    }

    pub fn right_child(&self, index: usize) -> Option<usize> {
        self.left_child(index).map(|left| left + self.subtree_len(left))
    }

    /// Box query over the flat arrays, walking them in emission order.
    ///
    /// Visits leaves in the same order as
    /// [`crate::Bvh::query_intersecting_triangles`] and yields the same result.
    pub fn query_intersecting_triangles(&self, query: &Aabb, out: &mut Vec<u32>) {
        out.clear();
        let mut i = 0;
        while i < self.nodes.len() {
            let node = &self.nodes[i];
            if !node.bounds().intersects(query) {
                i += self.subtree_len(i);
                continue;
            }
            if node.is_leaf() {
                out.extend_from_slice(self.leaf_triangles(i));
            }
            i += 1;
        }
    }
}
