//! Per-garment placement constants.
//!
//! Each (archetype, zone) pair has one [`ZonePlacement`]. The numbers are
//! tuned by eye against a particular asset and are meant to be overridden
//! from `settings.json` for new models; nothing downstream depends on their
//! exact values.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shared::{GarmentArchetype, ModelBounds, Zone};
use thiserror::Error;

/// Placement parameters for one zone of one garment archetype.
///
/// All lengths are fractions of the normalized model bounds, so a table
/// stays valid when the asset is rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZonePlacement {
    /// Horizontal travel at |positionX| = 1: fraction of the width for
    /// front/back, of the depth for sleeves (the sleeve wraps around Z)
    pub span_x: f32,
    /// Vertical travel at |positionY| = 1, fraction of the height
    pub span_y: f32,
    /// Zone origin as fractions of (width, height, depth): surface offset,
    /// vertical bias and sleeve attachment point
    pub anchor: [f32; 3],
    /// Decal size at settings scale 1.0
    pub scale: f32,
    /// Thickness of the decal projector
    pub projection_depth: f32,
    /// Back-zone convention: positive positionX moves toward -X
    #[serde(default)]
    pub mirror_horizontal: bool,
}

impl ZonePlacement {
    /// Zone origin in normalized model space
    pub fn anchor_point(&self, bounds: &ModelBounds) -> Vec3 {
        Vec3::from(self.anchor) * Vec3::new(bounds.width, bounds.height, bounds.depth)
    }

    /// Model-space direction driven by positionX
    pub fn horizontal_axis(&self, zone: Zone) -> Vec3 {
        match zone {
            Zone::LeftSleeve | Zone::RightSleeve => Vec3::Z,
            Zone::Front | Zone::Back if self.mirror_horizontal => Vec3::NEG_X,
            Zone::Front | Zone::Back => Vec3::X,
        }
    }

    /// Model-space distance covered by positionX in [0, 1]
    pub fn horizontal_extent(&self, zone: Zone, bounds: &ModelBounds) -> f32 {
        let base = if zone.is_sleeve() { bounds.depth } else { bounds.width };
        self.span_x * base
    }

    /// Model-space distance covered by positionY in [0, 1]
    pub fn vertical_extent(&self, bounds: &ModelBounds) -> f32 {
        self.span_y * bounds.height
    }

    fn check(&self, archetype: GarmentArchetype, zone: Zone) -> Result<(), TuningError> {
        let fields = [
            ("span_x", self.span_x),
            ("span_y", self.span_y),
            ("scale", self.scale),
            ("projection_depth", self.projection_depth),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::NonPositive { archetype, zone, field, value });
            }
        }
        if !self.anchor.iter().all(|a| a.is_finite()) {
            return Err(TuningError::NonFiniteAnchor { archetype, zone });
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TuningError {
    #[error("{archetype:?}/{zone}: {field} must be positive, got {value}")]
    NonPositive {
        archetype: GarmentArchetype,
        zone: Zone,
        field: &'static str,
        value: f32,
    },

    #[error("{archetype:?}/{zone}: anchor must be finite")]
    NonFiniteAnchor { archetype: GarmentArchetype, zone: Zone },
}

/// Placements for all four zones of one archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTable {
    pub front: ZonePlacement,
    pub back: ZonePlacement,
    pub left_sleeve: ZonePlacement,
    pub right_sleeve: ZonePlacement,
}

impl ZoneTable {
    pub fn get(&self, zone: Zone) -> &ZonePlacement {
        match zone {
            Zone::Front => &self.front,
            Zone::Back => &self.back,
            Zone::LeftSleeve => &self.left_sleeve,
            Zone::RightSleeve => &self.right_sleeve,
        }
    }

    pub fn get_mut(&mut self, zone: Zone) -> &mut ZonePlacement {
        match zone {
            Zone::Front => &mut self.front,
            Zone::Back => &mut self.back,
            Zone::LeftSleeve => &mut self.left_sleeve,
            Zone::RightSleeve => &mut self.right_sleeve,
        }
    }

    /// Built-in box proxies (1.8 x 2.0 x 0.55 torso at scale 1)
    pub fn box_proxy() -> Self {
        let torso = ZonePlacement {
            span_x: 0.28,
            span_y: 0.3,
            anchor: [0.0, 0.0, 0.6],
            scale: 1.0,
            projection_depth: 1.0,
            mirror_horizontal: false,
        };
        let sleeve = ZonePlacement {
            span_x: 0.36,
            span_y: 0.15,
            anchor: [-0.36, 0.2, 0.0],
            scale: 0.5,
            projection_depth: 1.0,
            mirror_horizontal: false,
        };
        Self::symmetric(torso, sleeve)
    }

    /// Imported, fitted garment meshes: chest print sits higher and the
    /// projector is shallower so it does not bleed through to the back
    pub fn imported_mesh() -> Self {
        let torso = ZonePlacement {
            span_x: 0.22,
            span_y: 0.18,
            anchor: [0.0, 0.08, 0.52],
            scale: 0.55,
            projection_depth: 0.6,
            mirror_horizontal: false,
        };
        let sleeve = ZonePlacement {
            span_x: 0.3,
            span_y: 0.08,
            anchor: [-0.4, 0.22, 0.0],
            scale: 0.25,
            projection_depth: 0.4,
            mirror_horizontal: false,
        };
        Self::symmetric(torso, sleeve)
    }

    /// Build a table from the front and left-sleeve placements,
    /// mirroring them onto the back and right sleeve
    pub fn symmetric(front: ZonePlacement, left_sleeve: ZonePlacement) -> Self {
        let mut back = front;
        back.anchor[2] = -front.anchor[2];
        let mut right_sleeve = left_sleeve;
        right_sleeve.anchor[0] = -left_sleeve.anchor[0];
        Self {
            front,
            back,
            left_sleeve,
            right_sleeve,
        }
    }
}

/// Tuning for every garment archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuningTable {
    pub box_proxy: ZoneTable,
    pub imported_mesh: ZoneTable,
}

impl Default for TuningTable {
    fn default() -> Self {
        Self {
            box_proxy: ZoneTable::box_proxy(),
            imported_mesh: ZoneTable::imported_mesh(),
        }
    }
}

impl TuningTable {
    pub fn zones(&self, archetype: GarmentArchetype) -> &ZoneTable {
        match archetype {
            GarmentArchetype::BoxProxy => &self.box_proxy,
            GarmentArchetype::ImportedMesh => &self.imported_mesh,
        }
    }

    pub fn zones_mut(&mut self, archetype: GarmentArchetype) -> &mut ZoneTable {
        match archetype {
            GarmentArchetype::BoxProxy => &mut self.box_proxy,
            GarmentArchetype::ImportedMesh => &mut self.imported_mesh,
        }
    }

    pub fn get(&self, archetype: GarmentArchetype, zone: Zone) -> &ZonePlacement {
        self.zones(archetype).get(zone)
    }

    /// Reject tables the mapper could divide by zero with
    pub fn validate(&self) -> Result<(), TuningError> {
        for archetype in [GarmentArchetype::BoxProxy, GarmentArchetype::ImportedMesh] {
            for zone in Zone::ALL {
                self.get(archetype, zone).check(archetype, zone)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tshirt_bounds() -> ModelBounds {
        ModelBounds { width: 1.8, height: 2.0, depth: 0.55, center: [0.0; 3], scale: 1.0 }
    }

    #[test]
    fn test_defaults_are_valid() {
        TuningTable::default().validate().unwrap();
    }

    #[test]
    fn test_symmetric_mirrors_back_and_right_sleeve() {
        let table = ZoneTable::box_proxy();
        assert_eq!(table.back.anchor[2], -table.front.anchor[2]);
        assert_eq!(table.right_sleeve.anchor[0], -table.left_sleeve.anchor[0]);
        assert_eq!(table.back.span_x, table.front.span_x);
    }

    #[test]
    fn test_box_proxy_anchor_sits_outside_front_surface() {
        let bounds = tshirt_bounds();
        let anchor = ZoneTable::box_proxy().front.anchor_point(&bounds);
        assert!(anchor.z > bounds.depth * 0.5);
        assert!(anchor.z < bounds.depth);
    }

    #[test]
    fn test_sleeve_extent_uses_depth() {
        let bounds = tshirt_bounds();
        let sleeve = ZoneTable::box_proxy().left_sleeve;
        assert!((sleeve.horizontal_extent(Zone::LeftSleeve, &bounds) - 0.36 * 0.55).abs() < 1e-6);
        assert_eq!(sleeve.horizontal_axis(Zone::LeftSleeve), Vec3::Z);
    }

    #[test]
    fn test_validate_rejects_zero_span() {
        let mut table = TuningTable::default();
        table.zones_mut(GarmentArchetype::ImportedMesh).get_mut(Zone::Back).span_y = 0.0;
        let err = table.validate().unwrap_err();
        assert!(matches!(err, TuningError::NonPositive { zone: Zone::Back, field: "span_y", .. }));
    }

    #[test]
    fn test_table_serde_roundtrip_keeps_mirror_flag() {
        let mut table = TuningTable::default();
        table.box_proxy.back.mirror_horizontal = true;
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("boxProxy"));
        let back: TuningTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
