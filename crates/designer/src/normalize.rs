//! Geometry normalization.
//!
//! Every garment, whatever the units of its source asset, is scaled
//! uniformly so that its height equals [`TARGET_HEIGHT`] and re-centred on
//! the origin. Placement and pointer mapping work in that normalized space.

use glam::{Mat4, Vec3};
use shared::ModelBounds;
use thiserror::Error;

use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Aabb;

/// On-screen height of any garment in model units
pub const TARGET_HEIGHT: f32 = 2.0;

/// Raw heights at or below this are treated as flat geometry
const MIN_RAW_HEIGHT: f32 = 1e-6;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NormalizeError {
    /// The mesh has no vertices
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// Zero (or non-finite) height: no scale can be derived
    #[error("mesh has degenerate height {0}")]
    DegenerateHeight(f32),
}

/// Compute normalized bounds for a mesh.
///
/// A degenerate mesh is an error for that asset; no fallback scale is
/// substituted.
pub fn normalize(mesh: &MeshData) -> Result<ModelBounds, NormalizeError> {
    let aabb = Aabb::from_mesh(mesh).ok_or(NormalizeError::EmptyMesh)?;
    let bounds = normalize_aabb(&aabb)?;
    tracing::debug!(
        vertices = mesh.vertex_count(),
        scale = bounds.scale,
        "normalized mesh to {:.3} x {:.3} x {:.3}",
        bounds.width,
        bounds.height,
        bounds.depth
    );
    Ok(bounds)
}

/// Normalize from a precomputed bounding box
pub fn normalize_aabb(aabb: &Aabb) -> Result<ModelBounds, NormalizeError> {
    let size = aabb.size();
    if !size.is_finite() || size.y <= MIN_RAW_HEIGHT {
        return Err(NormalizeError::DegenerateHeight(size.y));
    }

    let scale = TARGET_HEIGHT / size.y;
    let center = aabb.center();

    Ok(ModelBounds {
        width: size.x * scale,
        height: TARGET_HEIGHT,
        depth: size.z * scale,
        center: center.to_array(),
        scale,
    })
}

/// Matrix taking raw asset coordinates into normalized model space
pub fn model_matrix(bounds: &ModelBounds) -> Mat4 {
    Mat4::from_scale(Vec3::splat(bounds.scale)) * Mat4::from_translation(-Vec3::from(bounds.center))
}

/// Inverse of [`model_matrix`], back to raw asset coordinates
pub fn raw_point(bounds: &ModelBounds, normalized: Vec3) -> Vec3 {
    normalized / bounds.scale + Vec3::from(bounds.center)
}
