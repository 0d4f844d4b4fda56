//! Mesh validation utilities.
//!
//! `MeshValidator` checks imported garment meshes before they are
//! normalized: correct stride, in-range indices, finite positions, unit
//! normals.

use crate::viewport::mesh::{MeshData, STRIDE};
use crate::viewport::picking::Aabb;

/// Validator for `MeshData` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    /// Create a new validator for the given mesh.
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    /// Number of complete vertices in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len() / STRIDE
    }

    /// Number of triangles (indices buffer length / 3).
    pub fn triangle_count(&self) -> usize {
        self.mesh.indices.len() / 3
    }

    /// Check that the vertex buffer length is a multiple of the stride.
    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % STRIDE == 0
    }

    /// Check that the index buffer length is a multiple of 3.
    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    /// Check that no position component is NaN or infinite.
    pub fn are_positions_finite(&self) -> bool {
        self.mesh
            .vertices
            .chunks_exact(STRIDE)
            .all(|v| v[..3].iter().all(|c| c.is_finite()))
    }

    /// Check that all vertex normals have unit length (within epsilon).
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        self.mesh
            .vertices
            .chunks_exact(STRIDE)
            .all(|v| {
                let len = (v[3] * v[3] + v[4] * v[4] + v[5] * v[5]).sqrt();
                (len - 1.0).abs() <= epsilon
            })
    }

    /// Axis-aligned bounding box, None for an empty mesh.
    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_mesh(self.mesh)
    }

    /// Dimensions (width, height, depth) of the bounding box.
    pub fn dimensions(&self) -> [f32; 3] {
        self.aabb().map(|aabb| aabb.size().to_array()).unwrap_or([0.0; 3])
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of {STRIDE}",
                self.mesh.vertices.len()
            ));
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
        }

        if !self.are_positions_finite() {
            errors.push("Some positions are NaN or infinite".to_string());
        }

        if self.vertex_count() > 0 && !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length (epsilon=0.1)".to_string());
        }

        errors
    }
}
