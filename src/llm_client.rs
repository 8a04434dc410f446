use actix_web::mime;
use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::errors::AnalysisError;
use crate::models::request::{ChatCompletionCreate, Message};
use crate::models::response::ChatCompletion;

/// Text-in/text-out access to the model; the crew only ever talks to this.
#[async_trait]
pub trait LLMClientTrait: Send + Sync {
    async fn chat(&self, messages: Vec<Message>) -> Result<String, AnalysisError>;
}

pub struct LLMClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model_name: String,
    temperature: Option<f32>,
    max_tokens: Option<i32>,
}

impl LLMClient {
    pub fn new(client: reqwest::Client, llm: &LlmConfig) -> Self {
        Self {
            client,
            base_url: llm.api_url.trim_end_matches('/').to_string(),
            api_key: llm.api_key.to_string(),
            model_name: llm.model_name.to_string(),
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub async fn request_chat_completion(
        &self,
        request: ChatCompletionCreate,
    ) -> Result<ChatCompletion, AnalysisError> {
        let mut builder = self
            .client
            .post(format!("{}{}", self.base_url, "/chat/completions"))
            .json(&request);
        if !self.api_key.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {}", self.api_key));
        }
        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(AnalysisError::ApiError(format!(
                "status {status}, text {text}"
            )));
        }

        let content_type: mime::Mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .ok_or_else(|| AnalysisError::ParseError("missing content-type".to_string()))?
            .to_str()?
            .parse()?;
        if content_type.essence_str() != mime::APPLICATION_JSON.essence_str() {
            return Err(AnalysisError::ParseError(format!(
                "content-type: {content_type}, expected: {}",
                mime::APPLICATION_JSON
            )));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl LLMClientTrait for LLMClient {
    async fn chat(&self, messages: Vec<Message>) -> Result<String, AnalysisError> {
        let request = ChatCompletionCreate {
            model: self.model_name.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: Some(false),
        };

        let completion = self.request_chat_completion(request).await?;
        if let Some(usage) = &completion.usage {
            log::debug!(
                "usage: prompt {} completion {} total {}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::ParseError("error: empty choices".to_string()))?
            .message
            .content
            .ok_or_else(|| AnalysisError::ParseError("error: missing message content".to_string()))
    }
}
