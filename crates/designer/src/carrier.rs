//! Invisible per-zone surfaces that pointer rays are cast against while a
//! decal is dragged.

use glam::Vec3;
use shared::{ModelBounds, Zone, SCALE_RANGE};

use crate::tuning::ZonePlacement;
use crate::viewport::mesh::{quad, MeshData};
use crate::viewport::picking::{pick_point, Ray};

/// Tolerance for treating a point as lying on the carrier plane
const PLANE_EPSILON: f32 = 1e-3;

/// Flat rectangle through a zone's anchor, spanning its travel range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarrierSurface {
    pub zone: Zone,
    pub center: Vec3,
    /// Direction driven by positionX
    pub u: Vec3,
    /// Direction driven by positionY (always +Y)
    pub v: Vec3,
    pub half_u: f32,
    pub half_v: f32,
}

impl CarrierSurface {
    /// Carrier for a zone. The rectangle covers the full [-1, 1] travel
    /// plus half the largest decal so edge drags still land.
    pub fn for_zone(zone: Zone, bounds: &ModelBounds, placement: &ZonePlacement) -> Self {
        let margin = 0.5 * placement.scale * SCALE_RANGE.1;
        Self {
            zone,
            center: placement.anchor_point(bounds),
            u: placement.horizontal_axis(zone),
            v: Vec3::Y,
            half_u: placement.horizontal_extent(zone, bounds) + margin,
            half_v: placement.vertical_extent(bounds) + margin,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.u.cross(self.v).normalize_or_zero()
    }

    /// Triangle mesh used for picking
    pub fn mesh(&self) -> MeshData {
        quad(self.center, self.u, self.v, self.half_u, self.half_v)
    }

    /// Nearest hit of a ray on this carrier
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        pick_point(ray, &self.mesh())
    }

    /// Whether a point lies on the carrier rectangle
    pub fn contains(&self, point: Vec3) -> bool {
        let offset = point - self.center;
        offset.dot(self.normal()).abs() <= PLANE_EPSILON
            && offset.dot(self.u).abs() <= self.half_u + PLANE_EPSILON
            && offset.dot(self.v).abs() <= self.half_v + PLANE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::map_intersection;
    use crate::tuning::ZoneTable;
    use crate::viewport::camera::{ViewportRect, ZoneCamera};

    fn bounds() -> ModelBounds {
        ModelBounds { width: 1.8, height: 2.0, depth: 0.55, center: [0.0; 3], scale: 1.0 }
    }

    #[test]
    fn test_front_carrier_faces_camera() {
        let placement = ZoneTable::box_proxy().front;
        let carrier = CarrierSurface::for_zone(Zone::Front, &bounds(), &placement);
        assert!((carrier.normal() - Vec3::Z).length() < 1e-6);
        assert!((carrier.center.z - 0.33).abs() < 1e-6);
    }

    #[test]
    fn test_ray_from_zone_camera_hits_each_carrier() {
        let table = ZoneTable::box_proxy();
        let rect = ViewportRect::new(0.0, 0.0, 800.0, 600.0);
        for zone in Zone::ALL {
            let carrier = CarrierSurface::for_zone(zone, &bounds(), table.get(zone));
            let mut camera = ZoneCamera::new();
            camera.focus(zone);
            let screen = camera.project(carrier.center, rect).unwrap();
            let hit = carrier.intersect(&camera.screen_ray(screen, rect)).unwrap();
            assert!(carrier.contains(hit), "{zone}");

            let (x, y) = map_intersection(zone, hit, &bounds(), table.get(zone));
            assert!(x.abs() < 1e-3 && y.abs() < 1e-3, "{zone}: ({x}, {y})");
        }
    }

    #[test]
    fn test_ray_outside_rectangle_misses() {
        let placement = ZoneTable::box_proxy().front;
        let carrier = CarrierSurface::for_zone(Zone::Front, &bounds(), &placement);
        let ray = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(carrier.intersect(&ray).is_none());
    }

    #[test]
    fn test_contains_rejects_off_plane_points() {
        let placement = ZoneTable::box_proxy().left_sleeve;
        let carrier = CarrierSurface::for_zone(Zone::LeftSleeve, &bounds(), &placement);
        assert!(carrier.contains(carrier.center + Vec3::Z * 0.1));
        assert!(!carrier.contains(carrier.center + Vec3::X * 0.1));
    }
}
