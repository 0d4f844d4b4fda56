//! Procedural stand-in garments built from primitives.
//!
//! Only the torso box takes part in normalization: decals sit on it, and the
//! sleeves and hood would otherwise skew the width the zone spans are
//! measured against.

use glam::{Mat4, Vec3};
use shared::{GarmentType, ModelBounds};

use crate::normalize::TARGET_HEIGHT;
use crate::viewport::mesh::{cuboid, sphere, tapered_cylinder, MeshData};

const CYLINDER_SEGMENTS: u32 = 32;

/// Torso box size (width, height, depth) in proxy units
pub fn torso_size(garment: GarmentType) -> Vec3 {
    match garment {
        GarmentType::Hoodie => Vec3::new(1.8, 2.2, 0.7),
        GarmentType::Tshirt | GarmentType::Polo => Vec3::new(1.8, 2.0, 0.55),
    }
}

/// Torso box only
pub fn proxy_torso(garment: GarmentType) -> MeshData {
    let size = torso_size(garment);
    cuboid(size.x, size.y, size.z)
}

/// Normalized bounds of the proxy torso. Infallible: the sizes are fixed.
pub fn proxy_bounds(garment: GarmentType) -> ModelBounds {
    let size = torso_size(garment);
    let scale = TARGET_HEIGHT / size.y;
    ModelBounds {
        width: size.x * scale,
        height: TARGET_HEIGHT,
        depth: size.z * scale,
        center: [0.0; 3],
        scale,
    }
}

/// Full proxy: torso, sleeves and the garment's extra part (hood or collar)
pub fn proxy_mesh(garment: GarmentType) -> MeshData {
    let mut mesh = proxy_torso(garment);

    // (radius top, radius bottom, length, x offset, y, tilt)
    let (r_top, r_bottom, length, x, y, tilt) = match garment {
        GarmentType::Hoodie => (0.25, 0.3, 1.3, 1.15, 0.3, 0.25),
        GarmentType::Tshirt | GarmentType::Polo => (0.3, 0.35, 0.7, 1.05, 0.45, 0.15),
    };
    let sleeve = tapered_cylinder(r_top, r_bottom, length, CYLINDER_SEGMENTS);
    for side in [-1.0_f32, 1.0] {
        let m = Mat4::from_translation(Vec3::new(side * x, y, 0.0)) * Mat4::from_rotation_z(side * tilt);
        mesh.append(&sleeve.transformed(m));
    }

    match garment {
        GarmentType::Hoodie => {
            let hood = sphere(0.55, 16, 32);
            mesh.append(&hood.transformed(Mat4::from_translation(Vec3::new(0.0, 1.35, -0.15))));
        }
        GarmentType::Polo => {
            let collar = cuboid(0.7, 0.25, 0.6);
            mesh.append(&collar.transformed(Mat4::from_translation(Vec3::new(0.0, 1.05, 0.08))));
        }
        GarmentType::Tshirt => {}
    }

    mesh
}
