//! Per-zone decal store.

use shared::{DecalSettings, DecalSettingsPatch, ImageRef, Zone, ZoneDecal, ZoneDecals};

/// Owns the image and settings of every zone. Operations on one zone
/// never touch another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecalStore {
    decals: ZoneDecals,
}

impl DecalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, zone: Zone) -> &ZoneDecal {
        self.decals.get(zone)
    }

    pub fn decals(&self) -> &ZoneDecals {
        &self.decals
    }

    pub fn has_image(&self, zone: Zone) -> bool {
        self.decals.get(zone).image.is_some()
    }

    /// Attach an image to a zone. Existing settings are kept.
    pub fn set_image(&mut self, zone: Zone, image: ImageRef) {
        tracing::debug!(%zone, "image set");
        self.decals.get_mut(zone).image = Some(image);
    }

    /// Detach the image. Settings stay so a re-upload lands in place.
    pub fn clear_image(&mut self, zone: Zone) -> bool {
        self.decals.get_mut(zone).image.take().is_some()
    }

    /// Merge a patch; each field is clamped independently
    pub fn update_settings(&mut self, zone: Zone, patch: &DecalSettingsPatch) -> DecalSettings {
        let settings = &mut self.decals.get_mut(zone).settings;
        settings.apply(patch);
        *settings
    }

    pub fn reset_settings(&mut self, zone: Zone) {
        self.decals.get_mut(zone).settings = DecalSettings::default();
    }

    /// Back to the initial state: no images, default settings everywhere
    pub fn reset_all(&mut self) {
        self.decals = ZoneDecals::default();
    }
}
