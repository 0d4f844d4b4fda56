use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::ai::{self, PreviewError};
use crate::sanitize::{self, SanitizeError};
use crate::AppState;
use designer_lib::proxy::proxy_bounds;
use designer_lib::resolver::resolve_all;
use designer_lib::upload::{validate_upload, UploadError};
use shared::placement::{PlacementsRequest, PlacementsResponse};
use shared::preview::{PreviewErrorBody, PreviewRequest, PreviewResponse};
use shared::upload::ImageKind;
use shared::GarmentArchetype;

/// Ошибка обработчика, отдаётся клиенту как `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    #[error(transparent)]
    Preview(#[from] PreviewError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upload(UploadError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upload(UploadError::UnsupportedType(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Sanitize(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Preview(e) => e.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = PreviewErrorBody { error: self.to_string() };
        (self.status(), Json(body)).into_response()
    }
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Размещение принтов для всех зон с изображением
pub async fn placements(
    State(state): State<AppState>,
    Json(request): Json<PlacementsRequest>,
) -> Result<Json<PlacementsResponse>, ApiError> {
    let bounds = match (request.bounds, request.archetype) {
        (Some(bounds), _) => bounds,
        (None, GarmentArchetype::BoxProxy) => proxy_bounds(request.garment_type),
        (None, GarmentArchetype::ImportedMesh) => {
            return Err(ApiError::BadRequest("bounds are required for an imported mesh".into()));
        }
    };
    if !bounds.is_valid() {
        return Err(ApiError::BadRequest("invalid model bounds".into()));
    }

    let table = state.tuning.zones(request.archetype);
    let placements = resolve_all(&request.decals, &bounds, table)
        .into_iter()
        .collect();

    Ok(Json(PlacementsResponse { bounds, placements }))
}

/// Очистка загруженного SVG
pub async fn upload_svg(headers: HeaderMap, body: String) -> Result<Response, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(ImageKind::Svg.content_type());

    let kind = validate_upload(content_type, body.len() as u64)?;
    if kind != ImageKind::Svg {
        return Err(UploadError::UnsupportedType(content_type.to_string()).into());
    }

    let clean = sanitize::sanitize_svg(&body)?;
    Ok(([(header::CONTENT_TYPE, kind.content_type())], clean).into_response())
}

/// Генерация AI-превью
pub async fn preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, ApiError> {
    if !request.measurements.is_valid() {
        return Err(ApiError::BadRequest(
            "Height must be 140-220 cm and weight 30-200 kg".into(),
        ));
    }

    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, garment = ?request.garment_type, "preview requested");

    match ai::generate_preview(&state.http, &state.ai, &request).await {
        Ok(response) => {
            tracing::info!(%request_id, "preview generated");
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!(%request_id, "preview failed: {e}");
            Err(e.into())
        }
    }
}
