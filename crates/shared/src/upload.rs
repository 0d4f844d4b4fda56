//! Ограничения на загружаемые изображения принтов

use serde::{Deserialize, Serialize};

/// Максимальный размер файла — 5 МБ
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Поддерживаемый формат изображения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Png,
    Jpeg,
    Svg,
}

impl ImageKind {
    /// Определить формат по MIME-типу (`image/jpg` принимается как JPEG)
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "image/png" => Some(ImageKind::Png),
            "image/jpeg" | "image/jpg" => Some(ImageKind::Jpeg),
            "image/svg+xml" => Some(ImageKind::Svg),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Svg => "image/svg+xml",
        }
    }

    /// SVG нужно очистить от скриптов до использования как текстуры
    pub fn needs_sanitizing(&self) -> bool {
        matches!(self, ImageKind::Svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_parsing() {
        assert_eq!(ImageKind::from_content_type("image/png"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_content_type("image/jpg"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_content_type("IMAGE/JPEG"), Some(ImageKind::Jpeg));
        assert_eq!(
            ImageKind::from_content_type("image/svg+xml; charset=utf-8"),
            Some(ImageKind::Svg)
        );
        assert_eq!(ImageKind::from_content_type("image/gif"), None);
        assert_eq!(ImageKind::from_content_type(""), None);
    }

    #[test]
    fn test_only_svg_needs_sanitizing() {
        assert!(ImageKind::Svg.needs_sanitizing());
        assert!(!ImageKind::Png.needs_sanitizing());
        assert!(!ImageKind::Jpeg.needs_sanitizing());
    }
}
