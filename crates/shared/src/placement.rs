//! Запрос и ответ расчёта размещения принтов (`POST /api/placements`)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{GarmentArchetype, GarmentType, ModelBounds, PlacementTransform, Zone, ZoneDecals};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementsRequest {
    pub garment_type: GarmentType,
    /// По умолчанию — процедурная заглушка
    #[serde(default)]
    pub archetype: GarmentArchetype,
    /// Габариты импортированной модели; для заглушки можно не указывать
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<ModelBounds>,
    pub decals: ZoneDecals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementsResponse {
    pub bounds: ModelBounds,
    /// Только зоны с изображением
    pub placements: HashMap<Zone, PlacementTransform>,
}
