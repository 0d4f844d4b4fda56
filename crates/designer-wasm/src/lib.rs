use glam::Vec3;
use wasm_bindgen::prelude::*;

use designer_lib::command::{execute_json, execute_json_batch};
use designer_lib::harness::DesignerSession;
use designer_lib::import::import_gltf_slice;
use designer_lib::mapper::map_intersection;
use designer_lib::normalize::normalize;
use designer_lib::proxy::proxy_bounds;
use designer_lib::resolver::resolve_all;
use designer_lib::state::DesignerSettings;
use designer_lib::tuning::TuningTable;
use designer_lib::viewport::mesh::MeshData;
use shared::placement::{PlacementsRequest, PlacementsResponse};
use shared::{GarmentArchetype, GarmentType, ModelBounds, Zone};

/// Ошибка привязок; в JS превращается в `Error` с текстом
#[derive(Debug)]
struct BindingError(String);

impl<E: std::fmt::Display> From<E> for BindingError {
    fn from(e: E) -> Self {
        BindingError(e.to_string())
    }
}

impl From<BindingError> for JsError {
    fn from(e: BindingError) -> Self {
        JsError::new(&e.0)
    }
}

fn parse_enum<T: serde::de::DeserializeOwned>(value: &str) -> Result<T, BindingError> {
    Ok(serde_json::from_value(serde_json::Value::String(value.to_string()))?)
}

/// Таблица размещения из JSON (как `tuning` в settings.json) или встроенная
fn tuning_table(tuning_json: Option<&str>) -> Result<TuningTable, BindingError> {
    let Some(json) = tuning_json else {
        return Ok(TuningTable::default());
    };
    let table: TuningTable = serde_json::from_str(json)?;
    table.validate()?;
    Ok(table)
}

fn resolve_placements(request_json: &str, tuning_json: Option<&str>) -> Result<String, BindingError> {
    let request: PlacementsRequest = serde_json::from_str(request_json)?;
    let bounds = match request.bounds {
        Some(bounds) => bounds,
        None if request.archetype == GarmentArchetype::BoxProxy => proxy_bounds(request.garment_type),
        None => return Err(BindingError("bounds are required for an imported mesh".into())),
    };
    if !bounds.is_valid() {
        return Err(BindingError("invalid model bounds".into()));
    }

    let table = tuning_table(tuning_json)?;
    let placements = resolve_all(&request.decals, &bounds, table.zones(request.archetype))
        .into_iter()
        .collect();
    Ok(serde_json::to_string(&PlacementsResponse { bounds, placements })?)
}

fn map_pointer(
    zone: &str,
    archetype: &str,
    bounds_json: &str,
    point: &[f32],
    tuning_json: Option<&str>,
) -> Result<Vec<f32>, BindingError> {
    let zone: Zone = parse_enum(zone)?;
    let archetype: GarmentArchetype = parse_enum(archetype)?;
    let bounds: ModelBounds = serde_json::from_str(bounds_json)?;
    let [x, y, z] = <[f32; 3]>::try_from(point)
        .map_err(|_| BindingError(format!("point must have 3 components, got {}", point.len())))?;

    let table = tuning_table(tuning_json)?;
    let (u, v) = map_intersection(zone, Vec3::new(x, y, z), &bounds, table.get(archetype, zone));
    Ok(vec![u, v])
}

/// Позиции `[x, y, z, ...]`; нормали для габаритов не нужны
fn normalize_positions(positions: &[f32]) -> Result<String, BindingError> {
    if positions.len() % 3 != 0 {
        return Err(BindingError(format!("positions length {} is not a multiple of 3", positions.len())));
    }
    let vertices = positions
        .chunks_exact(3)
        .flat_map(|p| [p[0], p[1], p[2], 0.0, 1.0, 0.0])
        .collect();
    let mesh = MeshData { vertices, indices: Vec::new() };
    Ok(serde_json::to_string(&normalize(&mesh)?)?)
}

fn garment_bounds(garment: &str) -> Result<String, BindingError> {
    let garment: GarmentType = parse_enum(garment)?;
    Ok(serde_json::to_string(&proxy_bounds(garment))?)
}

/// Размещение принтов по запросу `/api/placements`, без обращения к серверу.
/// Без `tuning_json` используются встроенные таблицы.
#[wasm_bindgen]
pub fn resolve_placements_json(request_json: &str, tuning_json: Option<String>) -> Result<String, JsError> {
    Ok(resolve_placements(request_json, tuning_json.as_deref())?)
}

/// Точка пересечения луча с поверхностью зоны → `[positionX, positionY]`
#[wasm_bindgen]
pub fn map_pointer_json(
    zone: &str,
    archetype: &str,
    bounds_json: &str,
    point: &[f32],
    tuning_json: Option<String>,
) -> Result<Vec<f32>, JsError> {
    Ok(map_pointer(zone, archetype, bounds_json, point, tuning_json.as_deref())?)
}

/// Габариты произвольной модели после нормализации к высоте 2
#[wasm_bindgen]
pub fn normalize_positions_json(positions: &[f32]) -> Result<String, JsError> {
    Ok(normalize_positions(positions)?)
}

/// Нормализованные габариты процедурной модели изделия
#[wasm_bindgen]
pub fn proxy_bounds_json(garment: &str) -> Result<String, JsError> {
    Ok(garment_bounds(garment)?)
}

/// Сессия конструктора для фронтенда: те же JSON-команды, что и у CLI
#[wasm_bindgen]
pub struct Designer {
    session: DesignerSession,
}

#[wasm_bindgen]
impl Designer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Designer {
        Designer { session: DesignerSession::new() }
    }

    /// Сессия с собственной таблицей размещения
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(tuning_json: &str) -> Result<Designer, JsError> {
        Ok(Self::from_tuning(tuning_json)?)
    }

    /// Одна команда или массив команд; ответ — JSON
    pub fn execute(&mut self, json: &str) -> Result<String, JsError> {
        Ok(self.run(json)?)
    }

    /// Загрузить glTF/GLB для изделия; возвращает габариты
    pub fn load_model(&mut self, garment: &str, bytes: &[u8]) -> Result<String, JsError> {
        Ok(self.install_model(garment, bytes)?)
    }
}

impl Default for Designer {
    fn default() -> Self {
        Self::new()
    }
}

impl Designer {
    fn from_tuning(tuning_json: &str) -> Result<Designer, BindingError> {
        let settings = DesignerSettings {
            tuning: tuning_table(Some(tuning_json))?,
            ..DesignerSettings::default()
        };
        Ok(Designer { session: DesignerSession::with_settings(&settings) })
    }

    fn run(&mut self, json: &str) -> Result<String, BindingError> {
        if json.trim_start().starts_with('[') {
            let responses = execute_json_batch(&mut self.session, json).map_err(BindingError)?;
            Ok(serde_json::to_string(&responses)?)
        } else {
            let response = execute_json(&mut self.session, json).map_err(BindingError)?;
            Ok(serde_json::to_string(&response)?)
        }
    }

    fn install_model(&mut self, garment: &str, bytes: &[u8]) -> Result<String, BindingError> {
        let garment: GarmentType = parse_enum(garment)?;
        let mesh = import_gltf_slice(bytes)?;
        let bounds = self.session.load_model(garment, mesh)?;
        Ok(serde_json::to_string(&bounds)?)
    }
}
