//! Текст запроса к модели генерации изображений

use shared::preview::{BodyMeasurements, BodyType, Gender, PreviewRequest};
use shared::GarmentType;

pub fn height_description(height_cm: f32) -> &'static str {
    if height_cm < 160.0 {
        "short"
    } else if height_cm < 175.0 {
        "average height"
    } else {
        "tall"
    }
}

pub fn body_type_phrase(body_type: BodyType) -> &'static str {
    match body_type {
        BodyType::Slim => "slim and lean body",
        BodyType::Average => "average build body",
        BodyType::Athletic => "athletic and muscular body",
        BodyType::Plus => "plus-size body with broad shoulders",
    }
}

pub fn gender_phrase(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male",
        Gender::Female => "female",
        Gender::Neutral => "androgynous",
    }
}

/// Название цвета палитры; неизвестный hex передаётся как есть
pub fn color_name(hex: &str) -> String {
    let name = match hex.to_ascii_lowercase().as_str() {
        "#1a1a1a" => "black",
        "#f5f5dc" => "cream/bone white",
        "#8a9a7b" => "sage green",
        "#0a1128" => "deep navy blue",
        "#d4af37" => "gold",
        "#722f37" => "burgundy",
        "#228b22" => "forest green",
        "#36454f" => "charcoal gray",
        _ => return hex.to_string(),
    };
    name.to_string()
}

pub fn garment_phrase(garment: GarmentType, hex: &str) -> String {
    let color = color_name(hex);
    match garment {
        GarmentType::Hoodie => format!("{color} hoodie with hood down"),
        GarmentType::Tshirt => format!("{color} t-shirt with crew neck"),
        GarmentType::Polo => format!("{color} polo shirt with collar"),
    }
}

pub fn body_description(m: &BodyMeasurements) -> String {
    format!(
        "{} {} person with {}",
        height_description(m.height),
        gender_phrase(m.gender),
        body_type_phrase(m.resolved_body_type())
    )
}

pub fn compose_prompt(request: &PreviewRequest) -> String {
    let mut prompt = format!(
        "Ultra-realistic fashion photography of a {} wearing a {}. ",
        body_description(&request.measurements),
        garment_phrase(request.garment_type, &request.garment_color)
    );
    prompt.push_str("The model is standing in a front-facing pose in a professional studio with neutral gray background. ");
    prompt.push_str("The clothing fits naturally with realistic folds, shadows, and fabric texture. ");

    if let Some(text) = request.custom_text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        prompt.push_str(&format!("The garment has \"{text}\" text printed on the front. "));
    }

    prompt.push_str("High-end fashion photography, 4K quality, soft studio lighting, professional model pose. ");
    prompt.push_str("The person is 100% AI-generated, photorealistic but not a real human. ");
    prompt.push_str("Full body shot showing the garment clearly. Clean, minimal aesthetic.");
    prompt
}
