#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use analysis_crew::config::{Config, ConfigLoader};
use analysis_crew::errors::AnalysisError;
use analysis_crew::llm_client::LLMClientTrait;
use analysis_crew::models::request::Message;

#[derive(Clone, Default)]
pub struct MockLLMClient {
    responses: Arc<Mutex<VecDeque<Result<String, AnalysisError>>>>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockLLMClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&self, response: Result<String, AnalysisError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn get_calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClientTrait for MockLLMClient {
    async fn chat(&self, messages: Vec<Message>) -> Result<String, AnalysisError> {
        self.calls.lock().unwrap().push(messages);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AnalysisError::ApiError("no mock response".to_string())))
    }
}

pub struct InMemoryConfigLoader {
    config: Config,
}

impl InMemoryConfigLoader {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for InMemoryConfigLoader {
    fn load_config(&self) -> Result<Config, AnalysisError> {
        Ok(self.config.clone())
    }
}
