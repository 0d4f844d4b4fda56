//! Pointer-to-surface mapping: the inverse of the resolver for position.
//!
//! A hit point on a zone's carrier surface (normalized model space) is
//! turned back into (positionX, positionY) settings values.

use glam::Vec3;
use shared::{ModelBounds, Zone, POSITION_RANGE};

use crate::tuning::ZonePlacement;

/// Extents below this cannot be inverted; the axis maps to 0
const MIN_EXTENT: f32 = 1e-6;

/// Map an intersection point to clamped zone-local coordinates
pub fn map_intersection(
    zone: Zone,
    point: Vec3,
    bounds: &ModelBounds,
    placement: &ZonePlacement,
) -> (f32, f32) {
    let offset = point - placement.anchor_point(bounds);
    let x = ratio(
        offset.dot(placement.horizontal_axis(zone)),
        placement.horizontal_extent(zone, bounds),
    );
    let y = ratio(offset.y, placement.vertical_extent(bounds));
    (x, y)
}

fn ratio(distance: f32, extent: f32) -> f32 {
    if !extent.is_finite() || extent.abs() < MIN_EXTENT || !distance.is_finite() {
        return 0.0;
    }
    (distance / extent).clamp(POSITION_RANGE.0, POSITION_RANGE.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use crate::tuning::ZoneTable;
    use shared::DecalSettings;

    fn hoodie_bounds() -> ModelBounds {
        ModelBounds {
            width: 1.8 * 2.0 / 2.2,
            height: 2.0,
            depth: 0.7 * 2.0 / 2.2,
            center: [0.0, 0.0, 0.0],
            scale: 2.0 / 2.2,
        }
    }

    #[test]
    fn test_roundtrip_through_resolver() {
        let bounds = hoodie_bounds();
        let table = ZoneTable::box_proxy();
        for zone in Zone::ALL {
            for (x, y) in [(0.0, 0.0), (0.5, -0.25), (-0.9, 0.9), (1.0, -1.0)] {
                let settings = DecalSettings::new(x, y, 0.8, 0.0);
                let placed = resolve(zone, &settings, &bounds, table.get(zone));
                let (mx, my) = map_intersection(zone, Vec3::from(placed.position), &bounds, table.get(zone));
                assert!((mx - x).abs() < 1e-5, "{zone} x: {mx} vs {x}");
                assert!((my - y).abs() < 1e-5, "{zone} y: {my} vs {y}");
            }
        }
    }

    #[test]
    fn test_surface_point_roundtrips_in_plane() {
        let bounds = hoodie_bounds();
        let placement = ZoneTable::box_proxy().front;
        let anchor = placement.anchor_point(&bounds);
        let p = anchor + Vec3::new(0.1, -0.2, 0.0);

        let (x, y) = map_intersection(Zone::Front, p, &bounds, &placement);
        let placed = resolve(Zone::Front, &DecalSettings::new(x, y, 0.8, 0.0), &bounds, &placement);
        assert!((placed.position[0] - p.x).abs() < 1e-5);
        assert!((placed.position[1] - p.y).abs() < 1e-5);
    }

    #[test]
    fn test_far_points_clamp_to_range() {
        let bounds = hoodie_bounds();
        let placement = ZoneTable::box_proxy().back;
        let (x, y) = map_intersection(Zone::Back, Vec3::new(50.0, -50.0, -0.3), &bounds, &placement);
        assert_eq!((x, y), (1.0, -1.0));
    }

    #[test]
    fn test_flat_depth_maps_sleeve_x_to_zero() {
        let bounds = ModelBounds { depth: 0.0, ..hoodie_bounds() };
        let placement = ZoneTable::box_proxy().left_sleeve;
        let (x, _) = map_intersection(Zone::LeftSleeve, Vec3::new(-0.6, 0.4, 0.3), &bounds, &placement);
        assert_eq!(x, 0.0);
    }
}
