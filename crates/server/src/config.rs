use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3001";
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_IMAGE_MODEL: &str = "google/gemini-2.5-flash-image-preview";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DESIGNER_ADDR is not a socket address: {0}")]
    Addr(#[from] std::net::AddrParseError),
}

/// Подключение к OpenAI-совместимому шлюзу генерации изображений
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub gateway_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub ai: AiConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Пустые значения считаются отсутствующими
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = get("DESIGNER_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()?;

        Ok(Self {
            addr,
            ai: AiConfig {
                api_key: get("AI_GATEWAY_API_KEY"),
                gateway_url: get("AI_GATEWAY_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
                model: get("AI_IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            },
        })
    }
}
