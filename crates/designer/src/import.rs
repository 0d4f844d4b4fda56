//! glTF / GLB garment import.
//!
//! Walks the default scene, bakes every node's world transform into the
//! vertex positions and merges all triangle primitives into one `MeshData`.

use std::path::Path;

use glam::{Mat3, Mat4, Vec3};
use thiserror::Error;

use crate::viewport::mesh::{MeshData, STRIDE};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read glTF: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("glTF document has no scene")]
    NoScene,

    #[error("glTF scene contains no triangle geometry")]
    NoGeometry,
}

/// Import a `.gltf` or `.glb` file from disk
pub fn import_gltf(path: impl AsRef<Path>) -> Result<MeshData, ImportError> {
    let path = path.as_ref();
    let (document, buffers, _images) = gltf::import(path)?;
    let mesh = collect_scene(&document, &buffers)?;
    tracing::info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "imported garment model"
    );
    Ok(mesh)
}

/// Import from an in-memory `.glb` or self-contained `.gltf`
pub fn import_gltf_slice(bytes: &[u8]) -> Result<MeshData, ImportError> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;
    collect_scene(&document, &buffers)
}

fn collect_scene(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<MeshData, ImportError> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(ImportError::NoScene)?;

    let mut out = MeshData::default();
    for node in scene.nodes() {
        collect_node(&node, Mat4::IDENTITY, buffers, &mut out);
    }

    if out.triangle_count() == 0 {
        return Err(ImportError::NoGeometry);
    }
    Ok(out)
}

fn collect_node(node: &gltf::Node, parent: Mat4, buffers: &[gltf::buffer::Data], out: &mut MeshData) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                tracing::debug!(mode = ?primitive.mode(), "skipping non-triangle primitive");
                continue;
            }
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<Vec3> = positions.map(Vec3::from).collect();
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            if indices.iter().any(|&i| i as usize >= positions.len()) {
                tracing::warn!(mesh = mesh.index(), "skipping primitive with out-of-range indices");
                continue;
            }
            let normals: Vec<Vec3> = match reader.read_normals() {
                Some(normals) => normals.map(Vec3::from).collect(),
                None => smooth_normals(&positions, &indices),
            };

            out.append(&bake(&positions, &normals, &indices, world));
        }
    }

    for child in node.children() {
        collect_node(&child, world, buffers, out);
    }
}

fn bake(positions: &[Vec3], normals: &[Vec3], indices: &[u32], world: Mat4) -> MeshData {
    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
    let mut vertices = Vec::with_capacity(positions.len() * STRIDE);
    for (i, p) in positions.iter().enumerate() {
        let p = world.transform_point3(*p);
        let n = normals.get(i).copied().unwrap_or(Vec3::Y);
        let n = unit_or_up(normal_matrix * n);
        vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
    }
    MeshData {
        vertices,
        indices: indices.to_vec(),
    }
}

/// Area-weighted vertex normals for primitives shipped without them
fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals.into_iter().map(unit_or_up).collect()
}

fn unit_or_up(n: Vec3) -> Vec3 {
    let n = n.normalize_or_zero();
    if n == Vec3::ZERO {
        Vec3::Y
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::NESTED_TRIANGLE_GLTF;
    use crate::validation::MeshValidator;

    #[test]
    fn test_node_transforms_are_baked() {
        let mesh = import_gltf_slice(NESTED_TRIANGLE_GLTF.as_bytes()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        let expected = [Vec3::new(0.0, 10.0, 0.0), Vec3::new(2.0, 10.0, 0.0), Vec3::new(0.0, 14.0, 0.0)];
        for (i, e) in expected.iter().enumerate() {
            assert!((mesh.position(i) - *e).length() < 1e-5, "vertex {i}: {:?}", mesh.position(i));
        }
    }

    #[test]
    fn test_missing_normals_are_generated() {
        let mesh = import_gltf_slice(NESTED_TRIANGLE_GLTF.as_bytes()).unwrap();
        assert!(MeshValidator::new(&mesh).validate_all().is_empty());
        assert!((mesh.normal(0) - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_scene_without_meshes_is_rejected() {
        let json = r#"{"asset": {"version": "2.0"}, "scene": 0, "scenes": [{"nodes": [0]}], "nodes": [{}]}"#;
        let err = import_gltf_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::NoGeometry));
    }

    #[test]
    fn test_garbage_is_a_gltf_error() {
        let err = import_gltf_slice(b"not a model").unwrap_err();
        assert!(matches!(err, ImportError::Gltf(_)));
    }
}
