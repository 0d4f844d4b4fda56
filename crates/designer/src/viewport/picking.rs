use glam::Vec3;

use super::mesh::MeshData;

/// Bounds margin for the broad phase, so flat meshes keep a volume
const PICK_PADDING: f32 = 1e-4;

/// A ray in model space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB over a set of points. Returns None for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut any = false;

        for p in points {
            min = min.min(p);
            max = max.max(p);
            any = true;
        }

        any.then_some(Self { min, max })
    }

    /// Compute AABB from MeshData vertex positions
    pub fn from_mesh(data: &MeshData) -> Option<Self> {
        Self::from_points(data.positions())
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Grown by `margin` on every side; flat boxes get a thickness
    pub fn padded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
/// Both faces count as hits; carriers are picked from either side.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Result of picking a triangle in a mesh
#[derive(Clone, Debug)]
pub struct TriangleHit {
    /// Index of the triangle (into mesh.indices / 3)
    pub triangle_index: usize,
    /// Distance from ray origin to hit point
    pub distance: f32,
    /// Hit point in mesh space
    pub point: Vec3,
}

/// Find the nearest triangle in a mesh intersected by the ray.
pub fn pick_triangle(ray: &Ray, mesh: &MeshData) -> Option<TriangleHit> {
    // Broad phase: a ray that misses the bounds misses every triangle
    let bounds = Aabb::from_mesh(mesh)?;
    ray_aabb(ray, &bounds.padded(PICK_PADDING))?;

    let mut best: Option<TriangleHit> = None;

    for tri_idx in 0..mesh.triangle_count() {
        let [v0, v1, v2] = mesh.triangle(tri_idx);

        if let Some(dist) = ray_triangle_intersect(ray, v0, v1, v2) {
            if best.as_ref().is_none_or(|b| dist < b.distance) {
                best = Some(TriangleHit {
                    triangle_index: tri_idx,
                    distance: dist,
                    point: ray.at(dist),
                });
            }
        }
    }

    best
}

/// Nearest hit point of the ray on a mesh
pub fn pick_point(ray: &Ray, mesh: &MeshData) -> Option<Vec3> {
    pick_triangle(ray, mesh).map(|hit| hit.point)
}
