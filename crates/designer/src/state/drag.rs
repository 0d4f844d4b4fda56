//! Drag-to-position state.
//!
//! A drag belongs to one zone. While it is active, pointer rays are cast
//! against that zone's carrier and hits are mapped back to settings
//! coordinates; misses are ignored.

use glam::{Vec2, Vec3};
use shared::{ModelBounds, Zone, POSITION_RANGE};

use crate::carrier::CarrierSurface;
use crate::mapper::map_intersection;
use crate::tuning::ZonePlacement;
use crate::viewport::camera::ViewportRect;
use crate::viewport::picking::Ray;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragController {
    active: Option<Zone>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_zone(&self) -> Option<Zone> {
        self.active
    }

    pub fn is_dragging(&self, zone: Zone) -> bool {
        self.active == Some(zone)
    }

    /// Start dragging. Zones without an image cannot be dragged.
    pub fn on_drag_start(&mut self, zone: Zone, has_image: bool) -> bool {
        if !has_image {
            return false;
        }
        tracing::debug!(%zone, "drag start");
        self.active = Some(zone);
        true
    }

    /// New position for a pointer ray, if the drag is live and the ray hits
    pub fn on_drag_move(
        &self,
        zone: Zone,
        ray: &Ray,
        bounds: &ModelBounds,
        placement: &ZonePlacement,
    ) -> Option<(f32, f32)> {
        if !self.is_dragging(zone) {
            return None;
        }
        let hit = CarrierSurface::for_zone(zone, bounds, placement).intersect(ray)?;
        Some(map_intersection(zone, hit, bounds, placement))
    }

    /// Same as [`Self::on_drag_move`] for a hit point the renderer already
    /// computed. Points off the carrier are ignored.
    pub fn on_drag_move_point(
        &self,
        zone: Zone,
        point: Vec3,
        bounds: &ModelBounds,
        placement: &ZonePlacement,
    ) -> Option<(f32, f32)> {
        if !self.is_dragging(zone) {
            return None;
        }
        if !CarrierSurface::for_zone(zone, bounds, placement).contains(point) {
            tracing::debug!(%zone, ?point, "drag point off carrier");
            return None;
        }
        Some(map_intersection(zone, point, bounds, placement))
    }

    /// Finish the drag. Returns false if no drag was active for the zone.
    pub fn on_drag_end(&mut self, zone: Zone) -> bool {
        if !self.is_dragging(zone) {
            return false;
        }
        self.active = None;
        true
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}

/// Map a pointer inside the 2D position grid to settings coordinates
/// (+Y up), clamped to the range.
pub fn grid_to_position(pointer: Vec2, rect: ViewportRect) -> (f32, f32) {
    let axis = |p: f32, min: f32, size: f32| {
        if size <= 0.0 {
            return 0.0;
        }
        (((p - min) / size) * 2.0 - 1.0).clamp(POSITION_RANGE.0, POSITION_RANGE.1)
    };
    let x = axis(pointer.x, rect.min.x, rect.size.x);
    let y = -axis(pointer.y, rect.min.y, rect.size.y);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::ZoneTable;

    fn bounds() -> ModelBounds {
        ModelBounds { width: 1.8, height: 2.0, depth: 0.55, center: [0.0; 3], scale: 1.0 }
    }

    #[test]
    fn test_start_requires_image() {
        let mut drag = DragController::new();
        assert!(!drag.on_drag_start(Zone::Front, false));
        assert_eq!(drag.active_zone(), None);
        assert!(drag.on_drag_start(Zone::Front, true));
        assert!(drag.is_dragging(Zone::Front));
    }

    #[test]
    fn test_move_only_for_active_zone() {
        let table = ZoneTable::box_proxy();
        let mut drag = DragController::new();
        drag.on_drag_start(Zone::Front, true);

        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(drag.on_drag_move(Zone::Back, &ray, &bounds(), &table.back).is_none());

        let ray = Ray::new(Vec3::new(0.252, -0.3, 5.0), Vec3::NEG_Z);
        let (x, y) = drag.on_drag_move(Zone::Front, &ray, &bounds(), &table.front).unwrap();
        assert!((x - 0.5).abs() < 1e-4);
        assert!((y + 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_miss_is_ignored() {
        let table = ZoneTable::box_proxy();
        let mut drag = DragController::new();
        drag.on_drag_start(Zone::Front, true);
        let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(drag.on_drag_move(Zone::Front, &away, &bounds(), &table.front).is_none());
    }

    #[test]
    fn test_point_off_carrier_is_ignored() {
        let table = ZoneTable::box_proxy();
        let mut drag = DragController::new();
        drag.on_drag_start(Zone::Front, true);
        let behind = Vec3::new(0.0, 0.0, -0.33);
        assert!(drag.on_drag_move_point(Zone::Front, behind, &bounds(), &table.front).is_none());
    }

    #[test]
    fn test_end_stops_updates() {
        let table = ZoneTable::box_proxy();
        let mut drag = DragController::new();
        drag.on_drag_start(Zone::Front, true);
        assert!(!drag.on_drag_end(Zone::Back));
        assert!(drag.on_drag_end(Zone::Front));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(drag.on_drag_move(Zone::Front, &ray, &bounds(), &table.front).is_none());
    }

    #[test]
    fn test_grid_to_position() {
        let rect = ViewportRect::new(10.0, 20.0, 100.0, 100.0);
        assert_eq!(grid_to_position(Vec2::new(60.0, 70.0), rect), (0.0, 0.0));
        assert_eq!(grid_to_position(Vec2::new(10.0, 20.0), rect), (-1.0, 1.0));
        assert_eq!(grid_to_position(Vec2::new(500.0, 500.0), rect), (1.0, -1.0));
        assert_eq!(grid_to_position(Vec2::new(5.0, 5.0), ViewportRect::new(0.0, 0.0, 0.0, 0.0)), (0.0, -0.0));
    }
}
