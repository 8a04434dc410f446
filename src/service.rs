use std::sync::Arc;

use crate::crew::{TaskOutput, analysis_crew};
use crate::dataset::Dataset;
use crate::errors::AnalysisError;
use crate::extract::extract_code;
use crate::llm_client::LLMClientTrait;
use crate::summary::{SummaryOptions, build_csv_summary};

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub summary: String,
    pub outputs: Vec<TaskOutput>,
    pub code: String,
}

impl AnalysisOutcome {
    /// Raw text produced by the agent with `key`, empty if it did not run.
    pub fn output(&self, key: &str) -> &str {
        self.outputs
            .iter()
            .find(|o| o.agent_key == key)
            .map(|o| o.raw.as_str())
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct AnalysisService {
    client: Arc<dyn LLMClientTrait>,
    summary_options: SummaryOptions,
}

impl AnalysisService {
    pub fn new(client: Arc<dyn LLMClientTrait>, summary_options: SummaryOptions) -> Self {
        Self {
            client,
            summary_options,
        }
    }

    pub async fn analyze(&self, dataset: &Dataset) -> Result<AnalysisOutcome, AnalysisError> {
        let summary = build_csv_summary(dataset, &self.summary_options);
        log::info!(
            "analyzing dataset: {} rows, {} cols, summary {} chars",
            dataset.rows(),
            dataset.cols(),
            summary.chars().count()
        );
        log::debug!("summary: {}", summary);

        let outputs = analysis_crew(&summary)?
            .kickoff(self.client.as_ref())
            .await?;
        let code = outputs
            .last()
            .map(|o| extract_code(&o.raw))
            .unwrap_or_default();

        Ok(AnalysisOutcome {
            summary,
            outputs,
            code,
        })
    }
}
