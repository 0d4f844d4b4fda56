pub mod prompt;

use reqwest::StatusCode;
use serde_json::{json, Value};
use shared::preview::{PreviewRequest, PreviewResponse};
use thiserror::Error;

use crate::config::AiConfig;

/// Ошибки генерации превью; текст показывается пользователю
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("AI_GATEWAY_API_KEY is not configured")]
    MissingApiKey,

    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    #[error("AI credits exhausted. Please add more credits.")]
    QuotaExhausted,

    #[error("AI Gateway error: {0}")]
    Upstream(u16),

    #[error("No image generated by AI")]
    NoImage,

    #[error("AI Gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl PreviewError {
    /// Классификация неуспешного ответа шлюза
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => PreviewError::RateLimited,
            StatusCode::PAYMENT_REQUIRED => PreviewError::QuotaExhausted,
            other => PreviewError::Upstream(other.as_u16()),
        }
    }

    /// 429 и 402 передаются клиенту как есть, остальное — 500
    pub fn status(&self) -> StatusCode {
        match self {
            PreviewError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            PreviewError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Тело запроса chat-completions. Изображение принта, если есть,
/// передаётся вторым элементом содержимого.
pub fn request_body(model: &str, prompt: &str, design_image: Option<&str>) -> Value {
    let content = match design_image {
        Some(url) => json!([
            { "type": "text", "text": prompt },
            { "type": "image_url", "image_url": { "url": url } }
        ]),
        None => json!(prompt),
    };
    json!({
        "model": model,
        "messages": [{ "role": "user", "content": content }],
        "modalities": ["image", "text"],
    })
}

/// `choices[0].message.images[0].image_url.url`
pub fn extract_image_url(body: &Value) -> Option<&str> {
    body.pointer("/choices/0/message/images/0/image_url/url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
}

/// Один запрос к шлюзу, без повторов
pub async fn generate_preview(
    client: &reqwest::Client,
    config: &AiConfig,
    request: &PreviewRequest,
) -> Result<PreviewResponse, PreviewError> {
    let api_key = config.api_key.as_deref().ok_or(PreviewError::MissingApiKey)?;

    let prompt = prompt::compose_prompt(request);
    tracing::debug!("Generating image with prompt: {prompt}");

    let response = client
        .post(&config.gateway_url)
        .bearer_auth(api_key)
        .json(&request_body(&config.model, &prompt, request.design_image.as_deref()))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), "AI gateway error: {text}");
        return Err(PreviewError::from_status(status));
    }

    let body: Value = response.json().await?;
    let Some(image_url) = extract_image_url(&body) else {
        tracing::error!("No image in response: {body}");
        return Err(PreviewError::NoImage);
    };

    Ok(PreviewResponse {
        image_url: image_url.to_string(),
        prompt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(PreviewError::from_status(StatusCode::TOO_MANY_REQUESTS), PreviewError::RateLimited));
        assert!(matches!(PreviewError::from_status(StatusCode::PAYMENT_REQUIRED), PreviewError::QuotaExhausted));
        let other = PreviewError::from_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(other.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(other.to_string(), "AI Gateway error: 503");
    }

    #[test]
    fn test_extract_image_url() {
        let body = json!({"choices": [{"message": {"images": [{"image_url": {"url": "data:image/png;base64,AA"}}]}}]});
        assert_eq!(extract_image_url(&body), Some("data:image/png;base64,AA"));
        assert_eq!(extract_image_url(&json!({"choices": [{"message": {"content": "sorry"}}]})), None);
    }

    #[test]
    fn test_request_body_shapes() {
        let plain = request_body("m", "a prompt", None);
        assert_eq!(plain["messages"][0]["content"], "a prompt");
        assert_eq!(plain["modalities"], json!(["image", "text"]));

        let with_image = request_body("m", "a prompt", Some("data:image/png;base64,AA"));
        let content = with_image["messages"][0]["content"].as_array().unwrap();
        assert_eq!(content[1]["image_url"]["url"], "data:image/png;base64,AA");
    }
}
