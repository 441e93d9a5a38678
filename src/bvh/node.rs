use std::cmp::Ordering;

use crate::bvh::{BvhConfig, BvhTriangle};
use crate::geometry::Aabb;

#[derive(Clone, Debug, PartialEq)]
pub enum BvhNode {
    Internal {
        bounds: Aabb,
        left: Box<Self>,
        right: Box<Self>,
    },

    Leaf {
        bounds: Aabb,
        /// Offsets into the index buffer, one per triangle.
        triangles: Vec<u32>,
    },
}

impl BvhNode {
    /// Median-split build over `triangles`.
    ///
    /// `triangles` must not be empty.
    pub(crate) fn build(
        config: &BvhConfig,
        mut triangles: Vec<BvhTriangle>,
        depth: usize,
    ) -> Self {
        let bounds: Aabb = triangles.iter().map(|t| t.bounds).collect();

        if triangles.len() <= config.max_triangles_per_leaf || depth >= config.max_depth {
            return Self::Leaf {
                bounds,
                triangles: triangles.iter().map(|t| t.offset).collect(),
            };
        }

        let axis = bounds.longest_axis();
        triangles.sort_by(|a, b| {
            a.centroid[axis]
                .partial_cmp(&b.centroid[axis])
                .unwrap_or(Ordering::Equal)
        });

        // At least two triangles reach this point, so both halves are non-empty.
        let right = triangles.split_off(triangles.len() / 2);

        Self::Internal {
            bounds,
            left: Box::new(Self::build(config, triangles, depth + 1)),
            right: Box::new(Self::build(config, right, depth + 1)),
        }
    }

    pub fn bounds(&self) -> &Aabb {
        match self {
            Self::Internal { bounds, .. } | Self::Leaf { bounds, .. } => bounds,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Depth-first walk appending the triangles of every leaf reached.
    ///
    /// Subtrees whose bounds are rejected by `accept` are pruned; accepted
    /// internal nodes descend into both children.
    pub(crate) fn collect<F>(&self, accept: &F, out: &mut Vec<u32>)
    where
        F: Fn(&Aabb) -> bool,
    {
        if !accept(self.bounds()) {
            return;
        }

        match self {
            Self::Internal { left, right, .. } => {
                left.collect(accept, out);
                right.collect(accept, out);
            }

            Self::Leaf { triangles, .. } => {
                out.extend_from_slice(triangles);
            }
        }
    }
}
