//! Image upload checks, run before any decal state changes.

use shared::upload::{ImageKind, MAX_UPLOAD_BYTES};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload a PNG, JPG, or SVG file.")]
    UnsupportedType(String),

    #[error("File size must be less than 5MB.")]
    TooLarge { size: u64, max: u64 },
}

/// Accept PNG, JPEG and SVG images up to 5 MiB
pub fn validate_upload(content_type: &str, size: u64) -> Result<ImageKind, UploadError> {
    let kind = ImageKind::from_content_type(content_type).ok_or_else(|| {
        tracing::warn!(content_type, "rejected upload: unsupported type");
        UploadError::UnsupportedType(content_type.to_string())
    })?;

    if size > MAX_UPLOAD_BYTES {
        tracing::warn!(size, "rejected upload: too large");
        return Err(UploadError::TooLarge { size, max: MAX_UPLOAD_BYTES });
    }

    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_supported_types() {
        assert_eq!(validate_upload("image/png", 1024), Ok(ImageKind::Png));
        assert_eq!(validate_upload("image/jpg", 1024), Ok(ImageKind::Jpeg));
        assert_eq!(validate_upload("image/svg+xml", 0), Ok(ImageKind::Svg));
    }

    #[test]
    fn test_rejects_other_types() {
        let err = validate_upload("image/gif", 10).unwrap_err();
        assert_eq!(err, UploadError::UnsupportedType("image/gif".into()));
        assert_eq!(err.to_string(), "Please upload a PNG, JPG, or SVG file.");
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_upload("image/png", MAX_UPLOAD_BYTES).is_ok());
        let err = validate_upload("image/png", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
    }
}
