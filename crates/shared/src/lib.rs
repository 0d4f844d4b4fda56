use serde::{Deserialize, Serialize};

pub mod placement;
pub mod preview;
pub mod upload;

/// Ссылка на загруженное изображение (object URL, data URL или путь на сервере)
pub type ImageRef = String;

/// Зона размещения принта на изделии
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Zone {
    Front,
    Back,
    LeftSleeve,
    RightSleeve,
}

impl Zone {
    /// Все зоны в порядке отображения
    pub const ALL: [Zone; 4] = [Zone::Front, Zone::Back, Zone::LeftSleeve, Zone::RightSleeve];

    /// Подпись зоны в интерфейсе
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Front => "Front",
            Zone::Back => "Back",
            Zone::LeftSleeve => "Left Sleeve",
            Zone::RightSleeve => "Right Sleeve",
        }
    }

    /// Рукав адресуется по окружности, а не по плоскости
    pub fn is_sleeve(&self) -> bool {
        matches!(self, Zone::LeftSleeve | Zone::RightSleeve)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Zone::Front => "front",
            Zone::Back => "back",
            Zone::LeftSleeve => "leftSleeve",
            Zone::RightSleeve => "rightSleeve",
        };
        f.write_str(id)
    }
}

// ============================================================================
// Настройки принта
// ============================================================================

/// Допустимый диапазон смещения по обеим осям
pub const POSITION_RANGE: (f32, f32) = (-1.0, 1.0);
/// Допустимый диапазон масштаба
pub const SCALE_RANGE: (f32, f32) = (0.2, 1.5);
/// Допустимый диапазон поворота (градусы)
pub const ROTATION_RANGE: (f32, f32) = (-180.0, 180.0);

/// Масштаб принта по умолчанию
pub const DEFAULT_SCALE: f32 = 0.8;

/// NaN не записывается (остаётся прежнее значение), ±∞ прижимаются к границе
fn clamp_into(current: f32, value: f32, range: (f32, f32)) -> f32 {
    if value.is_nan() {
        current
    } else {
        value.clamp(range.0, range.1)
    }
}

/// Параметры размещения принта в одной зоне.
///
/// Все числовые поля приводятся к своим диапазонам в момент записи,
/// поэтому чтение никогда не требует дополнительной проверки.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "DecalSettingsWire")]
pub struct DecalSettings {
    position_x: f32,
    position_y: f32,
    scale: f32,
    rotation: f32,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Default for DecalSettings {
    fn default() -> Self {
        Self {
            position_x: 0.0,
            position_y: 0.0,
            scale: DEFAULT_SCALE,
            rotation: 0.0,
            flip_x: false,
            flip_y: false,
        }
    }
}

impl DecalSettings {
    /// Создать настройки, прижав значения к допустимым диапазонам
    pub fn new(position_x: f32, position_y: f32, scale: f32, rotation: f32) -> Self {
        let mut settings = Self::default();
        settings.set_position_x(position_x);
        settings.set_position_y(position_y);
        settings.set_scale(scale);
        settings.set_rotation(rotation);
        settings
    }

    pub fn position_x(&self) -> f32 {
        self.position_x
    }

    pub fn position_y(&self) -> f32 {
        self.position_y
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Поворот в градусах
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_position_x(&mut self, value: f32) {
        self.position_x = clamp_into(self.position_x, value, POSITION_RANGE);
    }

    pub fn set_position_y(&mut self, value: f32) {
        self.position_y = clamp_into(self.position_y, value, POSITION_RANGE);
    }

    pub fn set_scale(&mut self, value: f32) {
        self.scale = clamp_into(self.scale, value, SCALE_RANGE);
    }

    pub fn set_rotation(&mut self, value: f32) {
        self.rotation = clamp_into(self.rotation, value, ROTATION_RANGE);
    }

    /// Применить частичное обновление; каждое поле прижимается при записи
    pub fn apply(&mut self, patch: &DecalSettingsPatch) {
        if let Some(x) = patch.position_x {
            self.set_position_x(x);
        }
        if let Some(y) = patch.position_y {
            self.set_position_y(y);
        }
        if let Some(s) = patch.scale {
            self.set_scale(s);
        }
        if let Some(r) = patch.rotation {
            self.set_rotation(r);
        }
        if let Some(fx) = patch.flip_x {
            self.flip_x = fx;
        }
        if let Some(fy) = patch.flip_y {
            self.flip_y = fy;
        }
    }

    /// Вернуть копию с применённым обновлением
    pub fn with(mut self, patch: &DecalSettingsPatch) -> Self {
        self.apply(patch);
        self
    }
}

/// Входной формат: значения из JSON тоже проходят через сеттеры
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DecalSettingsWire {
    position_x: f32,
    position_y: f32,
    scale: f32,
    rotation: f32,
    flip_x: bool,
    flip_y: bool,
}

impl Default for DecalSettingsWire {
    fn default() -> Self {
        let d = DecalSettings::default();
        Self {
            position_x: d.position_x,
            position_y: d.position_y,
            scale: d.scale,
            rotation: d.rotation,
            flip_x: d.flip_x,
            flip_y: d.flip_y,
        }
    }
}

impl From<DecalSettingsWire> for DecalSettings {
    fn from(wire: DecalSettingsWire) -> Self {
        let mut settings = DecalSettings::new(wire.position_x, wire.position_y, wire.scale, wire.rotation);
        settings.flip_x = wire.flip_x;
        settings.flip_y = wire.flip_y;
        settings
    }
}

/// Частичное обновление `DecalSettings` (отсутствующие поля не меняются)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecalSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip_x: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip_y: Option<bool>,
}

impl DecalSettingsPatch {
    /// Обновление только позиции (сетка, перетаскивание по модели)
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            position_x: Some(x),
            position_y: Some(y),
            ..Default::default()
        }
    }
}

/// Принт одной зоны: изображение (может отсутствовать) и его настройки
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneDecal {
    #[serde(default, rename = "imageUrl")]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub settings: DecalSettings,
}

/// Принты всех четырёх зон. Частичная карта непредставима.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDecals {
    pub front: ZoneDecal,
    pub back: ZoneDecal,
    pub left_sleeve: ZoneDecal,
    pub right_sleeve: ZoneDecal,
}

impl ZoneDecals {
    pub fn get(&self, zone: Zone) -> &ZoneDecal {
        match zone {
            Zone::Front => &self.front,
            Zone::Back => &self.back,
            Zone::LeftSleeve => &self.left_sleeve,
            Zone::RightSleeve => &self.right_sleeve,
        }
    }

    pub fn get_mut(&mut self, zone: Zone) -> &mut ZoneDecal {
        match zone {
            Zone::Front => &mut self.front,
            Zone::Back => &mut self.back,
            Zone::LeftSleeve => &mut self.left_sleeve,
            Zone::RightSleeve => &mut self.right_sleeve,
        }
    }

    /// Обойти зоны в порядке `Zone::ALL`
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &ZoneDecal)> {
        Zone::ALL.into_iter().map(move |zone| (zone, self.get(zone)))
    }
}

// ============================================================================
// Геометрия
// ============================================================================

/// Габариты модели после нормализации.
///
/// `width/height/depth` уже умножены на `scale`, `center` — в исходных
/// единицах ассета. Инвариант: `height == TARGET_HEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelBounds {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub center: [f32; 3],
    pub scale: f32,
}

impl ModelBounds {
    /// Все размеры конечны, высота и масштаб положительны
    pub fn is_valid(&self) -> bool {
        let finite = [self.width, self.height, self.depth, self.scale]
            .iter()
            .chain(self.center.iter())
            .all(|v| v.is_finite());
        finite && self.height > 0.0 && self.scale > 0.0 && self.width >= 0.0 && self.depth >= 0.0
    }
}

/// Трансформация проектора принта (позиция, поворот XYZ в радианах, масштаб)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementTransform {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for PlacementTransform {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

// ============================================================================
// Изделия
// ============================================================================

/// Тип изделия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentType {
    #[default]
    Hoodie,
    Tshirt,
    Polo,
}

impl GarmentType {
    pub const ALL: [GarmentType; 3] = [GarmentType::Hoodie, GarmentType::Tshirt, GarmentType::Polo];

    pub fn display_name(&self) -> &'static str {
        match self {
            GarmentType::Hoodie => "Hoodie",
            GarmentType::Tshirt => "T-Shirt",
            GarmentType::Polo => "Polo",
        }
    }

    /// Базовая цена в долларах
    pub fn base_price(&self) -> u32 {
        match self {
            GarmentType::Hoodie => 149,
            GarmentType::Tshirt => 69,
            GarmentType::Polo => 119,
        }
    }
}

/// Источник геометрии изделия: процедурная коробка или импортированная модель.
/// Определяет, какой набор констант размещения используется.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GarmentArchetype {
    #[default]
    BoxProxy,
    ImportedMesh,
}

/// Цвет ткани из палитры магазина
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub hex: &'static str,
}

/// Палитра, доступная в дизайнере
pub const PALETTE: [Swatch; 8] = [
    Swatch { name: "Obsidian", hex: "#1a1a1a" },
    Swatch { name: "Bone", hex: "#f5f5dc" },
    Swatch { name: "Sage", hex: "#8a9a7b" },
    Swatch { name: "Navy", hex: "#0a1128" },
    Swatch { name: "Gold", hex: "#D4AF37" },
    Swatch { name: "Burgundy", hex: "#722F37" },
    Swatch { name: "Forest", hex: "#228b22" },
    Swatch { name: "Charcoal", hex: "#36454f" },
];

/// Название цвета палитры по hex (регистр не важен)
pub fn swatch_name(hex: &str) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|s| s.hex.eq_ignore_ascii_case(hex))
        .map(|s| s.name)
}
