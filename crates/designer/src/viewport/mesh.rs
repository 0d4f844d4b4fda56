use glam::{Mat3, Mat4, Vec3};

/// Floats per vertex: position(3) + normal(3)
pub const STRIDE: usize = 6;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Position of vertex `i`
    pub fn position(&self, i: usize) -> Vec3 {
        let base = i * STRIDE;
        Vec3::new(self.vertices[base], self.vertices[base + 1], self.vertices[base + 2])
    }

    pub fn normal(&self, i: usize) -> Vec3 {
        let base = i * STRIDE;
        Vec3::new(self.vertices[base + 3], self.vertices[base + 4], self.vertices[base + 5])
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(STRIDE)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    }

    /// Corner positions of triangle `tri`
    pub fn triangle(&self, tri: usize) -> [Vec3; 3] {
        let i = tri * 3;
        [
            self.position(self.indices[i] as usize),
            self.position(self.indices[i + 1] as usize),
            self.position(self.indices[i + 2] as usize),
        ]
    }

    /// Copy with every vertex transformed (normals by the inverse-transpose)
    pub fn transformed(&self, matrix: Mat4) -> MeshData {
        let normal_matrix = Mat3::from_mat4(matrix).inverse().transpose();
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for i in 0..self.vertex_count() {
            let p = matrix.transform_point3(self.position(i));
            let n = (normal_matrix * self.normal(i)).normalize_or_zero();
            vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
        }
        MeshData {
            vertices,
            indices: self.indices.clone(),
        }
    }

    /// Append another mesh, re-basing its indices
    pub fn append(&mut self, other: &MeshData) {
        let base = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

// ── Primitive generation ─────────────────────────────────────

/// Axis-aligned box centred at the origin
pub fn cuboid(w: f32, h: f32, d: f32) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * STRIDE);
    let mut indices = Vec::with_capacity(36);

    for (corners, normal) in &faces {
        let base = (vertices.len() / STRIDE) as u32;
        for v in corners {
            push_vert(&mut vertices, *v, *normal);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Open-ended flat rectangle spanned by `u` and `v` around `center`
pub fn quad(center: Vec3, u: Vec3, v: Vec3, half_u: f32, half_v: f32) -> MeshData {
    let normal = u.cross(v).normalize_or_zero();
    let du = u.normalize_or_zero() * half_u;
    let dv = v.normalize_or_zero() * half_v;

    let mut vertices = Vec::with_capacity(4 * STRIDE);
    for corner in [center - du - dv, center + du - dv, center + du + dv, center - du + dv] {
        push_vert(&mut vertices, corner, normal);
    }

    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Cylinder along Y with different top/bottom radii (sleeves)
pub fn tapered_cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let hh = height * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let slope = (radius_bottom - radius_top) / height;
    for i in 0..segments {
        let a0 = (i as f32) * std::f32::consts::TAU / segments as f32;
        let a1 = ((i + 1) as f32) * std::f32::consts::TAU / segments as f32;

        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();

        let n0 = Vec3::new(c0, slope, s0).normalize();
        let n1 = Vec3::new(c1, slope, s1).normalize();

        let base = (vertices.len() / STRIDE) as u32;

        push_vert(&mut vertices, Vec3::new(radius_bottom * c0, -hh, radius_bottom * s0), n0);
        push_vert(&mut vertices, Vec3::new(radius_bottom * c1, -hh, radius_bottom * s1), n1);
        push_vert(&mut vertices, Vec3::new(radius_top * c1, hh, radius_top * s1), n1);
        push_vert(&mut vertices, Vec3::new(radius_top * c0, hh, radius_top * s0), n0);

        indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    add_cap(&mut vertices, &mut indices, radius_top, hh, segments, Vec3::Y);
    add_cap(&mut vertices, &mut indices, radius_bottom, -hh, segments, Vec3::NEG_Y);

    MeshData { vertices, indices }
}

pub fn sphere(radius: f32, rings: u32, sectors: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let (sp, cp) = phi.sin_cos();

        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            let (st, ct) = theta.sin_cos();

            let n = Vec3::new(sp * ct, cp, sp * st);
            push_vert(&mut vertices, n * radius, n);
        }
    }

    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    MeshData { vertices, indices }
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, p: Vec3, n: Vec3) {
    v.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
}

fn add_cap(vertices: &mut Vec<f32>, indices: &mut Vec<u32>, radius: f32, y: f32, segments: u32, normal: Vec3) {
    let center_idx = (vertices.len() / STRIDE) as u32;
    push_vert(vertices, Vec3::new(0.0, y, 0.0), normal);

    for i in 0..segments {
        let angle = (i as f32) * std::f32::consts::TAU / segments as f32;
        push_vert(vertices, Vec3::new(radius * angle.cos(), y, radius * angle.sin()), normal);
    }

    // Winding follows the cap normal
    let upward = normal.y > 0.0;
    for i in 0..segments {
        let next = (i + 1) % segments;
        if upward {
            indices.extend_from_slice(&[center_idx, center_idx + 1 + next, center_idx + 1 + i]);
        } else {
            indices.extend_from_slice(&[center_idx, center_idx + 1 + i, center_idx + 1 + next]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_counts() {
        let m = cuboid(1.8, 2.0, 0.55);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
        let max_z = m.positions().map(|p| p.z).fold(f32::MIN, f32::max);
        assert!((max_z - 0.275).abs() < 1e-6);
    }

    #[test]
    fn test_quad_normal_follows_axes() {
        let m = quad(Vec3::new(0.0, 0.0, 0.3), Vec3::X, Vec3::Y, 0.5, 0.6);
        assert_eq!(m.triangle_count(), 2);
        assert!((m.normal(0) - Vec3::Z).length() < 1e-6);
        assert!((m.position(2) - Vec3::new(0.5, 0.6, 0.3)).length() < 1e-6);
    }

    #[test]
    fn test_transformed_moves_positions() {
        let m = cuboid(1.0, 1.0, 1.0).transformed(Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)));
        let min_y = m.positions().map(|p| p.y).fold(f32::MAX, f32::min);
        assert!((min_y - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_append_rebases_indices() {
        let mut a = cuboid(1.0, 1.0, 1.0);
        let b = quad(Vec3::ZERO, Vec3::X, Vec3::Y, 1.0, 1.0);
        a.append(&b);
        assert_eq!(a.vertex_count(), 28);
        assert_eq!(*a.indices.last().unwrap(), 24 + 3);
        assert!(a.indices.iter().all(|&i| (i as usize) < a.vertex_count()));
    }

    #[test]
    fn test_tapered_cylinder_extent() {
        let m = tapered_cylinder(0.25, 0.3, 1.3, 16);
        let max_y = m.positions().map(|p| p.y).fold(f32::MIN, f32::max);
        let max_x = m.positions().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!((max_y - 0.65).abs() < 1e-6);
        assert!((max_x - 0.3).abs() < 1e-6);
    }
}
