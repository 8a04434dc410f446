use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::dataset::Dataset;
use crate::errors::AnalysisError;
use crate::llm_client::LLMClientTrait;
use crate::models::request::Message;

pub fn dataset_from_csv(csv: &str) -> Dataset {
    Dataset::from_csv_bytes(csv.as_bytes()).expect("test csv should parse")
}

/// Long column names and alternating numeric/text columns, so that wide
/// tables push the summary past its budget.
pub fn wide_csv(cols: usize, rows: usize) -> String {
    let header: Vec<String> = (0..cols)
        .map(|i| format!("measurement_column_with_long_name_{:03}", i))
        .collect();
    let mut csv = header.join(",");
    csv.push('\n');
    for r in 0..rows {
        let row: Vec<String> = (0..cols)
            .map(|i| {
                if i % 2 == 0 {
                    format!("{}.5", r * (i + 1))
                } else {
                    format!("value_{}_{}_{}", r, i, "z".repeat(40))
                }
            })
            .collect();
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

/// Replays canned answers in order and records every prompt it receives.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String, AnalysisError>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<String, AnalysisError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClientTrait for ScriptedClient {
    async fn chat(&self, messages: Vec<Message>) -> Result<String, AnalysisError> {
        self.calls.lock().unwrap().push(messages);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AnalysisError::ApiError("no scripted response".to_string())))
    }
}
