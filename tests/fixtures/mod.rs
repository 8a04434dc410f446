#![allow(dead_code)]

use analysis_crew::models::FinishReason;
use analysis_crew::models::Role;
use analysis_crew::models::Usage;
use analysis_crew::models::response::{ChatCompletion, Choice, ResponseMessage};

pub const SAMPLE_CSV: &str = "sepal_length,sepal_width,species\n\
5.1,3.5,setosa\n\
4.9,,setosa\n\
6.3,3.3,virginica\n";

pub const CLEANER_ANSWER: &str = "sepal_width has 33% missing values; consider scaling.";
pub const SELECTOR_ANSWER: &str =
    r#"{"task": "classification", "model": "RandomForestClassifier", "reason": "small tabular dataset"}"#;
pub const GENERATOR_ANSWER: &str = "Here is the script:\n```python\nfrom sklearn.ensemble import RandomForestClassifier\nmodel = RandomForestClassifier()\n```\nEnjoy!";
pub const GENERATED_CODE: &str =
    "from sklearn.ensemble import RandomForestClassifier\nmodel = RandomForestClassifier()";

pub fn chat_completion(id: &str, content: &str) -> ChatCompletion {
    ChatCompletion {
        id: id.to_string(),
        object: "chat.completion".to_string(),
        created: 1234567890,
        model: "test-model".to_string(),
        choices: vec![Choice {
            index: 0,
            message: ResponseMessage {
                role: Some(Role::Assistant),
                content: Some(content.to_string()),
            },
            finish_reason: Some(FinishReason::Stop),
        }],
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 20,
            total_tokens: 30,
        }),
    }
}

pub fn empty_completion() -> ChatCompletion {
    ChatCompletion {
        id: "chatcmpl-empty".to_string(),
        object: "chat.completion".to_string(),
        created: 1234567892,
        model: "test-model".to_string(),
        choices: vec![],
        usage: None,
    }
}
