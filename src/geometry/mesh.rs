use std::io::BufReader;
use std::path::Path;

use crate::error::MeshError;
use crate::geometry::Vertex;

/// Owned vertex and index buffers, the input a [`crate::Bvh`] borrows.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn load_obj_file(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let source = std::fs::read(path)?;
        Self::load_obj(&source)
    }

    /// Loads every model of an OBJ document into a single mesh.
    ///
    /// Material libraries are ignored.
    pub fn load_obj(source: &[u8]) -> Result<Self, MeshError> {
        let mut reader = BufReader::new(source);
        let (models, _materials) = tobj::load_obj_buf(
            &mut reader,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
            |_matpath| Err(tobj::LoadError::GenericFailure),
        )?;
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        for model in models {
            let mesh = model.mesh;
            let offset = vertices.len() as u32;
            let n = mesh.positions.len();
            for i in 0..n / 3 {
                let i = i * 3;
                let pos = [
                    mesh.positions[i],
                    mesh.positions[i + 1],
                    mesh.positions[i + 2],
                ];
                vertices.push(Vertex::new(pos));
            }
            indices.extend(mesh.indices.iter().map(|i| offset + i));
        }
        log::debug!(
            "loaded OBJ with {} vertices, {} triangles",
            vertices.len(),
            indices.len() / 3
        );
        Ok(Self::new(vertices, indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_cube() {
        let mesh = Mesh::load_obj(include_bytes!("../../assets/cube.obj")).unwrap();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn quads_are_triangulated() {
        let mesh = Mesh::load_obj(include_bytes!("../../assets/quad.obj")).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }
}
