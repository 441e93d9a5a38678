use crate::error::BuildError;

/// Largest working set that is stored in a single leaf.
pub const MAX_TRIANGLES_PER_LEAF: usize = 16;

/// Recursion ceiling; sets deeper than this become leaves regardless of size.
pub const MAX_DEPTH: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BvhConfig {
    pub max_triangles_per_leaf: usize,
    pub max_depth: usize,
}

impl BvhConfig {
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.max_triangles_per_leaf == 0 {
            return Err(BuildError::InvalidConfig(
                "max_triangles_per_leaf must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            max_triangles_per_leaf: MAX_TRIANGLES_PER_LEAF,
            max_depth: MAX_DEPTH,
        }
    }
}
