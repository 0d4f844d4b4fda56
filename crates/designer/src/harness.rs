//! Headless designer session.
//!
//! Holds everything the 3D editor needs between frames (garment, zones,
//! decals, drag state, camera) without a renderer, so the command runner,
//! the tests and the bindings drive exactly the same logic.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use shared::{
    DecalSettingsPatch, GarmentArchetype, GarmentType, ImageRef, ModelBounds, PlacementTransform, Zone,
    ZoneDecal,
};
use thiserror::Error;

use crate::carrier::CarrierSurface;
use crate::normalize::{normalize, NormalizeError};
use crate::proxy::proxy_bounds;
use crate::resolver::{resolve, resolve_all};
use crate::state::{grid_to_position, DecalStore, DesignerSettings, DragController};
use crate::tuning::{TuningTable, ZonePlacement};
use crate::upload::{validate_upload, UploadError};
use crate::validation::MeshValidator;
use crate::viewport::camera::{ViewportRect, ZoneCamera};
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Ray;

use shared::upload::ImageKind;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid mesh: {}", .0.join("; "))]
    InvalidMesh(Vec<String>),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// An imported asset already normalized
#[derive(Debug, Clone)]
struct LoadedModel {
    mesh: MeshData,
    bounds: ModelBounds,
}

/// Headless designer: garment, decals, drag and camera state
pub struct DesignerSession {
    pub garment: GarmentType,
    pub color: String,
    pub active_zone: Zone,
    pub store: DecalStore,
    pub drag: DragController,
    pub camera: ZoneCamera,
    tuning: TuningTable,
    models: HashMap<GarmentType, LoadedModel>,
}

impl Default for DesignerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignerSession {
    /// Session with built-in defaults
    pub fn new() -> Self {
        Self::with_settings(&DesignerSettings::default())
    }

    pub fn with_settings(settings: &DesignerSettings) -> Self {
        let mut camera = ZoneCamera::new();
        camera.focus(Zone::Front);
        Self {
            garment: settings.default_garment,
            color: settings.default_color.clone(),
            active_zone: Zone::Front,
            store: DecalStore::new(),
            drag: DragController::new(),
            camera,
            tuning: settings.tuning.clone(),
            models: HashMap::new(),
        }
    }

    // ── Garment ─────────────────────────────────────────────

    pub fn set_garment(&mut self, garment: GarmentType) {
        self.garment = garment;
        self.drag.cancel();
        tracing::info!(?garment, archetype = ?self.archetype(), "garment changed");
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Install an imported mesh for a garment type. The mesh is validated
    /// and normalized first; a failure leaves the previous model in place.
    pub fn load_model(&mut self, garment: GarmentType, mesh: MeshData) -> Result<ModelBounds, SessionError> {
        let errors = MeshValidator::new(&mesh).validate_all();
        if !errors.is_empty() {
            return Err(SessionError::InvalidMesh(errors));
        }
        let bounds = normalize(&mesh)?;
        tracing::info!(?garment, scale = bounds.scale, "model installed");
        self.models.insert(garment, LoadedModel { mesh, bounds });
        Ok(bounds)
    }

    /// Drop an imported mesh; the garment falls back to its proxy
    pub fn clear_model(&mut self, garment: GarmentType) -> bool {
        self.models.remove(&garment).is_some()
    }

    /// Raw imported mesh for the current garment, if any
    pub fn model(&self) -> Option<&MeshData> {
        self.models.get(&self.garment).map(|m| &m.mesh)
    }

    pub fn archetype(&self) -> GarmentArchetype {
        if self.models.contains_key(&self.garment) {
            GarmentArchetype::ImportedMesh
        } else {
            GarmentArchetype::BoxProxy
        }
    }

    /// Normalized bounds of whatever is displayed for the current garment
    pub fn bounds(&self) -> ModelBounds {
        match self.models.get(&self.garment) {
            Some(model) => model.bounds,
            None => proxy_bounds(self.garment),
        }
    }

    pub fn tuning(&self) -> &TuningTable {
        &self.tuning
    }

    pub fn placement(&self, zone: Zone) -> &ZonePlacement {
        self.tuning.get(self.archetype(), zone)
    }

    // ── Zones ───────────────────────────────────────────────

    pub fn select_zone(&mut self, zone: Zone) {
        self.active_zone = zone;
        self.camera.focus(zone);
    }

    pub fn decal(&self, zone: Zone) -> &ZoneDecal {
        self.store.get(zone)
    }

    /// Validate an upload and attach it. A rejected upload changes nothing.
    pub fn upload(
        &mut self,
        zone: Zone,
        content_type: &str,
        size: u64,
        image: ImageRef,
    ) -> Result<ImageKind, UploadError> {
        let kind = validate_upload(content_type, size)?;
        self.store.set_image(zone, image);
        Ok(kind)
    }

    pub fn remove_image(&mut self, zone: Zone) -> bool {
        if self.drag.is_dragging(zone) {
            self.drag.cancel();
        }
        self.store.clear_image(zone)
    }

    pub fn update_settings(&mut self, zone: Zone, patch: &DecalSettingsPatch) {
        self.store.update_settings(zone, patch);
    }

    pub fn reset_settings(&mut self, zone: Zone) {
        self.store.reset_settings(zone);
    }

    /// Clear every zone and return to the front view
    pub fn reset_all(&mut self) {
        self.store.reset_all();
        self.drag.cancel();
        self.select_zone(Zone::Front);
    }

    // ── Drag ────────────────────────────────────────────────

    pub fn drag_start(&mut self, zone: Zone) -> bool {
        let has_image = self.store.has_image(zone);
        self.drag.on_drag_start(zone, has_image)
    }

    /// Apply a pointer ray; returns the new position if it was applied
    pub fn drag_move(&mut self, zone: Zone, ray: &Ray) -> Option<(f32, f32)> {
        let (x, y) = self.drag.on_drag_move(zone, ray, &self.bounds(), self.placement(zone))?;
        self.store.update_settings(zone, &DecalSettingsPatch::position(x, y));
        Some((x, y))
    }

    /// Apply a carrier hit point the caller already computed
    pub fn drag_move_point(&mut self, zone: Zone, point: Vec3) -> Option<(f32, f32)> {
        let (x, y) = self.drag.on_drag_move_point(zone, point, &self.bounds(), self.placement(zone))?;
        self.store.update_settings(zone, &DecalSettingsPatch::position(x, y));
        Some((x, y))
    }

    pub fn drag_end(&mut self, zone: Zone) -> bool {
        self.drag.on_drag_end(zone)
    }

    /// Click or drag inside the 2D position grid; applies with or without
    /// an image, like the settings sliders
    pub fn grid_move(&mut self, zone: Zone, pointer: Vec2, rect: ViewportRect) -> (f32, f32) {
        let (x, y) = grid_to_position(pointer, rect);
        self.store.update_settings(zone, &DecalSettingsPatch::position(x, y));
        (x, y)
    }

    // ── Placement ───────────────────────────────────────────

    pub fn carrier(&self, zone: Zone) -> CarrierSurface {
        CarrierSurface::for_zone(zone, &self.bounds(), self.placement(zone))
    }

    /// Projector transform for one zone, recomputed on every call
    pub fn placement_for(&self, zone: Zone) -> PlacementTransform {
        resolve(zone, &self.store.get(zone).settings, &self.bounds(), self.placement(zone))
    }

    /// Transforms of every zone holding an image
    pub fn placements(&self) -> Vec<(Zone, PlacementTransform)> {
        resolve_all(self.store.decals(), &self.bounds(), self.tuning.zones(self.archetype()))
    }
}
