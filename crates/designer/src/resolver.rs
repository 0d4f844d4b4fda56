//! Zone transform resolver.
//!
//! Pure function of (zone, settings, bounds, tuning): the same inputs always
//! give the same transform, and the result is never cached between calls.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use shared::{DecalSettings, ModelBounds, PlacementTransform, Zone, ZoneDecals};

use crate::tuning::{ZonePlacement, ZoneTable};

/// Compute where a decal sits for one zone.
///
/// Position is the zone anchor plus the settings offsets scaled by the zone
/// spans; rotation faces the projector out of the zone's surface; flips only
/// negate the matching scale component.
pub fn resolve(
    zone: Zone,
    settings: &DecalSettings,
    bounds: &ModelBounds,
    placement: &ZonePlacement,
) -> PlacementTransform {
    let horizontal = placement.horizontal_axis(zone)
        * settings.position_x()
        * placement.horizontal_extent(zone, bounds);
    let vertical = Vec3::Y * settings.position_y() * placement.vertical_extent(bounds);
    let position = placement.anchor_point(bounds) + horizontal + vertical;

    let size = settings.scale() * placement.scale;
    let flip = |flipped: bool| if flipped { -1.0 } else { 1.0 };

    PlacementTransform {
        position: position.to_array(),
        rotation: zone_rotation(zone, settings.rotation()),
        scale: [
            size * flip(settings.flip_x),
            size * flip(settings.flip_y),
            placement.projection_depth,
        ],
    }
}

/// Euler XYZ rotation (radians) for a zone's projector
pub fn zone_rotation(zone: Zone, degrees: f32) -> [f32; 3] {
    let r = degrees.to_radians();
    match zone {
        Zone::Front => [0.0, 0.0, r],
        // Facing -Z: in-plane rotation reverses to keep clockwise on screen
        Zone::Back => [0.0, PI, -r],
        Zone::LeftSleeve => [0.0, -FRAC_PI_2, r],
        Zone::RightSleeve => [0.0, FRAC_PI_2, -r],
    }
}

/// Resolve every zone that currently holds an image
pub fn resolve_all(
    decals: &ZoneDecals,
    bounds: &ModelBounds,
    table: &ZoneTable,
) -> Vec<(Zone, PlacementTransform)> {
    decals
        .iter()
        .filter(|(_, decal)| decal.image.is_some())
        .map(|(zone, decal)| (zone, resolve(zone, &decal.settings, bounds, table.get(zone))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DecalSettingsPatch;

    fn tshirt_bounds() -> ModelBounds {
        ModelBounds { width: 1.8, height: 2.0, depth: 0.55, center: [0.0; 3], scale: 1.0 }
    }

    fn front_placement(scale: f32) -> ZonePlacement {
        ZonePlacement { scale, ..ZoneTable::box_proxy().front }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let settings = DecalSettings::new(0.3, -0.7, 1.1, 45.0);
        let bounds = tshirt_bounds();
        let table = ZoneTable::box_proxy();
        for zone in Zone::ALL {
            let a = resolve(zone, &settings, &bounds, table.get(zone));
            let b = resolve(zone, &settings, &bounds, table.get(zone));
            assert_eq!(a, b, "{zone}");
        }
    }

    #[test]
    fn test_default_front_on_tshirt() {
        let bounds = tshirt_bounds();
        let placement = front_placement(0.75);
        let t = resolve(Zone::Front, &DecalSettings::default(), &bounds, &placement);

        assert!((t.scale[0] - 0.8 * 0.75).abs() < 1e-6);
        assert!((t.scale[1] - 0.8 * 0.75).abs() < 1e-6);
        assert!(t.position[2] > 0.0 && t.position[2] < bounds.depth);
        assert_eq!(t.rotation, [0.0, 0.0, 0.0]);
        assert_eq!(t.position[0], 0.0);
    }

    #[test]
    fn test_flip_changes_only_scale_sign() {
        let bounds = tshirt_bounds();
        let table = ZoneTable::box_proxy();
        let base = DecalSettings::new(0.4, 0.2, 0.9, 30.0);
        let flipped_x = base.with(&DecalSettingsPatch { flip_x: Some(true), ..Default::default() });
        let flipped_y = base.with(&DecalSettingsPatch { flip_y: Some(true), ..Default::default() });

        for zone in Zone::ALL {
            let p = table.get(zone);
            let t = resolve(zone, &base, &bounds, p);
            let fx = resolve(zone, &flipped_x, &bounds, p);
            let fy = resolve(zone, &flipped_y, &bounds, p);

            assert_eq!(fx.position, t.position);
            assert_eq!(fx.rotation, t.rotation);
            assert_eq!(fx.scale, [-t.scale[0], t.scale[1], t.scale[2]]);
            assert_eq!(fy.scale, [t.scale[0], -t.scale[1], t.scale[2]]);
        }
    }

    #[test]
    fn test_back_faces_away_and_reverses_rotation() {
        let bounds = tshirt_bounds();
        let table = ZoneTable::box_proxy();
        let settings = DecalSettings::new(0.0, 0.0, 0.8, 90.0);
        let t = resolve(Zone::Back, &settings, &bounds, &table.back);
        assert!(t.position[2] < 0.0);
        assert!((t.rotation[1] - PI).abs() < 1e-6);
        assert!((t.rotation[2] + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_back_mirror_flag_flips_horizontal_direction() {
        let bounds = tshirt_bounds();
        let mut placement = ZoneTable::box_proxy().back;
        let settings = DecalSettings::new(0.5, 0.0, 0.8, 0.0);

        let plain = resolve(Zone::Back, &settings, &bounds, &placement);
        placement.mirror_horizontal = true;
        let mirrored = resolve(Zone::Back, &settings, &bounds, &placement);

        assert!(plain.position[0] > 0.0);
        assert!((mirrored.position[0] + plain.position[0]).abs() < 1e-6);
    }

    #[test]
    fn test_sleeves_move_along_depth() {
        let bounds = tshirt_bounds();
        let table = ZoneTable::box_proxy();
        let centred = resolve(Zone::LeftSleeve, &DecalSettings::default(), &bounds, &table.left_sleeve);
        let moved = resolve(
            Zone::LeftSleeve,
            &DecalSettings::new(1.0, 0.0, 0.8, 0.0),
            &bounds,
            &table.left_sleeve,
        );
        assert_eq!(moved.position[0], centred.position[0]);
        assert!((moved.position[2] - centred.position[2] - 0.36 * 0.55).abs() < 1e-6);
        assert!(centred.position[0] < 0.0);
        assert!((centred.rotation[1] + FRAC_PI_2).abs() < 1e-6);

        let right = resolve(Zone::RightSleeve, &DecalSettings::default(), &bounds, &table.right_sleeve);
        assert_eq!(right.position[0], -centred.position[0]);
    }

    #[test]
    fn test_resolve_all_skips_empty_zones() {
        let mut decals = ZoneDecals::default();
        decals.get_mut(Zone::Back).image = Some("data:image/png;base64,AAAA".into());
        decals.get_mut(Zone::RightSleeve).image = Some("data:image/png;base64,BBBB".into());

        let resolved = resolve_all(&decals, &tshirt_bounds(), &ZoneTable::box_proxy());
        let zones: Vec<Zone> = resolved.iter().map(|(z, _)| *z).collect();
        assert_eq!(zones, vec![Zone::Back, Zone::RightSleeve]);
    }
}
