use std::sync::Arc;

use reqwest::Client;

use analysis_crew::config::{Config, LlmConfig};
use analysis_crew::llm_client::LLMClient;
use analysis_crew::service::AnalysisService;

pub fn create_test_config(api_url: &str) -> Config {
    Config {
        llm: LlmConfig {
            model_name: "test-model".to_string(),
            api_url: api_url.to_string(),
            api_key: "test-key".to_string(),
            temperature: None,
            max_tokens: None,
        },
        ..Config::default()
    }
}

pub fn create_test_app_components(api_url: &str) -> (Arc<Config>, Arc<AnalysisService>) {
    let config = create_test_config(api_url);
    let llm_client = LLMClient::new(Client::new(), &config.llm);
    let service = Arc::new(AnalysisService::new(
        Arc::new(llm_client),
        config.summary.clone(),
    ));

    (Arc::new(config), service)
}
