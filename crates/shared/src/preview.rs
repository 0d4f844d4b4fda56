//! Типы запроса AI-превью (фото модели в изделии с принтом)

use serde::{Deserialize, Serialize};

use crate::GarmentType;

/// Допустимый рост, см
pub const HEIGHT_RANGE_CM: (f32, f32) = (140.0, 220.0);
/// Допустимый вес, кг
pub const WEIGHT_RANGE_KG: (f32, f32) = (30.0, 200.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Neutral,
}

/// Телосложение, выводится из ИМТ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Slim,
    Average,
    Athletic,
    Plus,
}

impl BodyType {
    /// Классификация по индексу массы тела
    pub fn from_bmi(height_cm: f32, weight_kg: f32) -> Self {
        let meters = height_cm / 100.0;
        let bmi = weight_kg / (meters * meters);
        if bmi < 18.5 {
            BodyType::Slim
        } else if bmi < 25.0 {
            BodyType::Average
        } else if bmi < 30.0 {
            BodyType::Athletic
        } else {
            BodyType::Plus
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BodyType::Slim => "Slim / Lean",
            BodyType::Average => "Average / Standard",
            BodyType::Athletic => "Athletic / Muscular",
            BodyType::Plus => "Plus Size / Broad",
        }
    }
}

/// Параметры тела для генерации превью
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurements {
    /// Рост, см
    pub height: f32,
    /// Вес, кг
    pub weight: f32,
    #[serde(default)]
    pub gender: Gender,
    /// Если не указано — вычисляется по ИМТ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<BodyType>,
}

impl BodyMeasurements {
    /// Рост и вес в допустимых диапазонах формы
    pub fn is_valid(&self) -> bool {
        (HEIGHT_RANGE_CM.0..=HEIGHT_RANGE_CM.1).contains(&self.height)
            && (WEIGHT_RANGE_KG.0..=WEIGHT_RANGE_KG.1).contains(&self.weight)
    }

    pub fn resolved_body_type(&self) -> BodyType {
        self.body_type
            .unwrap_or_else(|| BodyType::from_bmi(self.height, self.weight))
    }
}

/// Запрос на генерацию превью
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub measurements: BodyMeasurements,
    pub garment_type: GarmentType,
    /// Цвет ткани, hex (`#1a1a1a`)
    pub garment_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
    /// Изображение принта (URL или data URL), передаётся модели как референс
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_image: Option<String>,
}

/// Успешный ответ: ссылка на изображение и итоговый промпт
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub image_url: String,
    pub prompt: String,
}

/// Ответ с ошибкой, показывается пользователю как есть
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_type_from_bmi_bands() {
        // 180 см: ИМТ 18.5 ≈ 59.9 кг, 25 ≈ 81 кг, 30 ≈ 97.2 кг
        assert_eq!(BodyType::from_bmi(180.0, 55.0), BodyType::Slim);
        assert_eq!(BodyType::from_bmi(180.0, 70.0), BodyType::Average);
        assert_eq!(BodyType::from_bmi(180.0, 90.0), BodyType::Athletic);
        assert_eq!(BodyType::from_bmi(180.0, 110.0), BodyType::Plus);
    }

    #[test]
    fn test_measurements_validation() {
        let m = BodyMeasurements { height: 170.0, weight: 70.0, gender: Gender::Neutral, body_type: None };
        assert!(m.is_valid());
        assert!(!BodyMeasurements { height: 139.0, ..m }.is_valid());
        assert!(!BodyMeasurements { weight: 201.0, ..m }.is_valid());
        assert_eq!(m.resolved_body_type(), BodyType::Average);
    }

    #[test]
    fn test_request_wire_format() {
        let json = r##"{
            "measurements": {"height": 182, "weight": 80, "gender": "male", "bodyType": "athletic"},
            "garmentType": "polo",
            "garmentColor": "#722F37",
            "customText": "ATELIER"
        }"##;
        let req: PreviewRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.garment_type, GarmentType::Polo);
        assert_eq!(req.measurements.gender, Gender::Male);
        assert_eq!(req.measurements.body_type, Some(BodyType::Athletic));
        assert_eq!(req.custom_text.as_deref(), Some("ATELIER"));
        assert!(req.design_image.is_none());
    }

    #[test]
    fn test_response_camel_case() {
        let resp = PreviewResponse { image_url: "data:image/png;base64,AA".into(), prompt: "p".into() };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""imageUrl""#));
    }
}
