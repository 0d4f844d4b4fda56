//! Factory functions for creating test data.
//!
//! Bounds, meshes, images and pre-populated sessions used by unit tests,
//! integration tests and scripted runs.

use glam::{Mat4, Vec3};
use shared::{GarmentType, ModelBounds, Zone};

use crate::harness::DesignerSession;
use crate::viewport::mesh::{cuboid, MeshData};

// ── Images ──────────────────────────────────────────────────────

/// 1x1 transparent PNG as a data URL.
pub const PNG_DATA_URL: &str =
    "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// Small SVG logo carrying every construct the sanitizer strips.
pub const HOSTILE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" onload="alert(1)"><script>alert(2)</script><foreignObject><div>x</div></foreignObject><a href="javascript:alert(3)"><circle cx="5" cy="5" r="4" fill="red" onclick="alert(4)"/></a></svg>"#;

/// Self-contained glTF: one triangle (0,0,0) (1,0,0) (0,2,0) under a parent
/// node translated by (0, 10, 0) and a child node scaled by 2.
pub const NESTED_TRIANGLE_GLTF: &str = r#"{
    "asset": {"version": "2.0"},
    "scene": 0,
    "scenes": [{"nodes": [0]}],
    "nodes": [
        {"translation": [0.0, 10.0, 0.0], "children": [1]},
        {"scale": [2.0, 2.0, 2.0], "mesh": 0}
    ],
    "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
    "buffers": [{
        "byteLength": 36,
        "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAAEAAAAAA"
    }],
    "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 36}],
    "accessors": [{
        "bufferView": 0,
        "componentType": 5126,
        "count": 3,
        "type": "VEC3",
        "min": [0.0, 0.0, 0.0],
        "max": [1.0, 2.0, 0.0]
    }]
}"#;

// ── Geometry ────────────────────────────────────────────────────

/// Normalized bounds with the given size, centred at the origin.
pub fn bounds(width: f32, height: f32, depth: f32) -> ModelBounds {
    ModelBounds {
        width,
        height,
        depth,
        center: [0.0; 3],
        scale: 1.0,
    }
}

/// Bounds of the t-shirt proxy (1.8 x 2.0 x 0.55).
pub fn tshirt_bounds() -> ModelBounds {
    bounds(1.8, 2.0, 0.55)
}

/// Box shaped like a scanned garment in centimetres, standing on y = 0.
pub fn scanned_garment(height_cm: f32) -> MeshData {
    cuboid(height_cm * 0.55, height_cm, height_cm * 0.2)
        .transformed(Mat4::from_translation(Vec3::new(0.0, height_cm * 0.5, 0.0)))
}

// ── Sessions ────────────────────────────────────────────────────

/// Session on the given garment with a PNG uploaded to each listed zone.
pub fn session_with_images(garment: GarmentType, zones: &[Zone]) -> DesignerSession {
    let mut session = DesignerSession::new();
    session.set_garment(garment);
    for &zone in zones {
        // Fixture data is always a valid PNG upload
        let _ = session.upload(zone, "image/png", 68, PNG_DATA_URL.to_string());
    }
    session
}
