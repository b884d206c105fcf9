//! Env-driven configuration for the service and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for convenience during development.
//! API keys are optional at startup; routes that need a missing key fail per
//! request instead of preventing the process from serving.
use std::env;
use dotenv;


#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub openai_chat_model: String,
    pub openai_image_model: String,
    pub fal_api_key: Option<String>,
    pub fal_queue_url: String,
    pub public_dir: String,
    pub api_host: String,
    pub api_port: String,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }
    pub fn new() -> Result<Self, env::VarError> {
        Ok(Config {
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|v| !v.is_empty()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_chat_model: env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_image_model: env::var("OPENAI_IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".to_string()),
            fal_api_key: env::var("FAL_KEY")
                .or_else(|_| env::var("FAL_API_KEY"))
                .ok()
                .filter(|v| !v.is_empty()),
            fal_queue_url: env::var("FAL_QUEUE_URL").unwrap_or_else(|_| "https://queue.fal.run".to_string()),
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| "./public".to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_port: env::var("API_PORT").unwrap_or_else(|_| "2000".to_string()),
        })
    }
    /// Log the effective configuration. Secrets are reported by presence only.
    pub fn log_summary(&self) {
        tracing::info!("OPENAI_API_KEY: {}", if self.openai_api_key.is_some() { "<set>" } else { "<unset>" });
        tracing::info!("OPENAI_API_BASE: {}", self.openai_api_base);
        tracing::info!("OPENAI_CHAT_MODEL: {}", self.openai_chat_model);
        tracing::info!("OPENAI_IMAGE_MODEL: {}", self.openai_image_model);
        tracing::info!("FAL_KEY: {}", if self.fal_api_key.is_some() { "<set>" } else { "<unset>" });
        tracing::info!("FAL_QUEUE_URL: {}", self.fal_queue_url);
        tracing::info!("PUBLIC_DIR: {}", self.public_dir);
        tracing::info!("API_HOST: {}", self.api_host);
        tracing::info!("API_PORT: {}", self.api_port);
    }
}
