use crate::config::ApiConfig;
use anyhow::Result;
use serde_json::json;
use std::sync::{Arc, RwLock};

const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Thin client for the hosted Gemini `generateContent` endpoint. The system
/// only assembles a prompt and forwards it; conversation state, safety and
/// model behavior stay on the provider side.
pub struct GeminiClient {
    http: reqwest::Client,
    config: Arc<RwLock<ApiConfig>>,
}

impl GeminiClient {
    pub fn new(config: Arc<RwLock<ApiConfig>>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn api_key(&self) -> Result<String> {
        let config = self
            .config
            .read()
            .map_err(|_| anyhow::anyhow!("Config lock poisoned"))?;

        config
            .api_keys
            .as_ref()
            .and_then(|keys| keys.gemini_api_key.clone())
            .ok_or_else(|| anyhow::anyhow!("Gemini API key is not configured"))
    }

    pub async fn generate_reply(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let api_key = self.api_key()?;

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            GEMINI_MODEL, api_key
        );

        let body = json!({
            "systemInstruction": {
                "parts": [{ "text": system_prompt }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": user_message }]
            }]
        });

        let response = self.http.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini request failed with {}: {}", status, detail);
        }

        let payload: serde_json::Value = response.json().await?;

        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Gemini response had no text candidate"))
    }
}
