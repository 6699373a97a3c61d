use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::Translator;
use crate::error::{CaptureError, Result};

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

/// Translator speaking the LibreTranslate JSON API
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CaptureError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/translate", base_url.trim_end_matches('/')),
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target_locale: &str) -> Result<String> {
        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: target_locale,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        debug!(endpoint = %self.endpoint, target_locale, chars = text.len(), "Requesting translation");
        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        let body: TranslateResponse = response.json().await?;

        interpret_response(status.is_success(), status.as_u16(), body)
    }
}

fn interpret_response(success: bool, status: u16, body: TranslateResponse) -> Result<String> {
    if let Some(error) = body.error {
        return Err(CaptureError::TranslationFailed(format!("HTTP {}: {}", status, error)));
    }
    if !success {
        return Err(CaptureError::TranslationFailed(format!("HTTP {}", status)));
    }
    body.translated_text
        .ok_or_else(|| CaptureError::TranslationFailed("Response had no translatedText".to_string()))
}
