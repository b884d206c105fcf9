//! Thin HTTP client for the OpenAI endpoints the proxy fronts.
//!
//! - `complete` posts a single-message chat completion to `/chat/completions`.
//! - `generate_image` posts to `/images/generations` and returns the typed
//!   result object.
use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::openai::models::{
    ChatMessage, ChatRequest, ChatResponse, ImageGenerationRequest, ImageGenerationResponse,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const IMAGE_SIZE: &str = "1024x1024";

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    chat_model: String,
    image_model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        OpenAiClient {
            client: Client::new(),
            base_url: config.openai_api_base.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            chat_model: config.openai_chat_model.clone(),
            image_model: config.openai_image_model.clone(),
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or(AppError::MissingApiKey("openai"))
    }

    /// Run a chat completion and return the first choice's content.
    pub async fn complete(&self, prompt: &str, temperature: f32) -> AppResult<String> {
        let api_key = self.api_key()?;
        let url = format!("{}/chat/completions", self.base_url);
        tracing::info!("Sending chat completion to {}", url);

        let body = ChatRequest {
            model: &self.chat_model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature,
        };
        let response = self.client.post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            let error_message = format!("chat completion failed. Status: {}, Body: {}", status, error_body);
            tracing::error!("{}", error_message);
            return Err(AppError::OpenAi(error_message));
        }

        let parsed: ChatResponse = response.json().await.map_err(AppError::HttpClient)?;
        parsed
            .into_first_content()
            .ok_or_else(|| AppError::OpenAi("completion contained no choices".to_string()))
    }

    /// Generate a single image and return the provider's result object.
    pub async fn generate_image(&self, prompt: &str) -> AppResult<ImageGenerationResponse> {
        let api_key = self.api_key()?;
        let url = format!("{}/images/generations", self.base_url);
        tracing::info!("Sending image generation to {}", url);

        let body = ImageGenerationRequest {
            model: &self.image_model,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
        };
        let response = self.client.post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            let error_message = format!("image generation failed. Status: {}, Body: {}", status, error_body);
            tracing::error!("{}", error_message);
            return Err(AppError::OpenAi(error_message));
        }

        response.json().await.map_err(AppError::HttpClient)
    }
}
