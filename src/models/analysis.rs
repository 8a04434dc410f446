use serde::{self, Deserialize, Serialize};

use crate::agents;
use crate::service::AnalysisOutcome;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AgentOutput {
    pub role: String,
    pub content: String,
}

/// Body of `POST /run`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisResponse {
    pub agents: Vec<AgentOutput>,
    pub code: String,
}

impl From<AnalysisOutcome> for AnalysisResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        let agents = outcome
            .outputs
            .into_iter()
            .map(|output| AgentOutput {
                role: output.role.to_string(),
                content: output.raw,
            })
            .collect();
        Self {
            agents,
            code: outcome.code,
        }
    }
}

/// Body of `POST /api/run`: one field per agent.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoleKeyedResponse {
    pub data_cleaner: String,
    pub algorithm_selector: String,
    pub code_generator: String,
}

impl From<AnalysisOutcome> for RoleKeyedResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        Self {
            data_cleaner: outcome.output(agents::DATA_CLEANER.key).to_string(),
            algorithm_selector: outcome.output(agents::ALGORITHM_SELECTOR.key).to_string(),
            code_generator: outcome.output(agents::CODE_GENERATOR.key).to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
}
