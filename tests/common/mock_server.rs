use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use crate::fixtures::chat_completion;

pub async fn setup_chat_completion_mock(status: u16, body: impl Into<Value>) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body.into()))
        .mount(&mock_server)
        .await;

    mock_server
}

/// One mock per answer, each served once and in order.
pub async fn setup_sequential_mocks(answers: &[&str]) -> MockServer {
    let mock_server = MockServer::start().await;

    for (idx, answer) in answers.iter().enumerate() {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(chat_completion(&format!("chatcmpl-test-{}", idx + 1), answer)),
            )
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    mock_server
}

pub async fn setup_error_mock(
    status_code: u16,
    error_message: &str,
    error_type: &str,
) -> MockServer {
    let error_body = json!({
        "error": {
            "message": error_message,
            "type": error_type
        }
    });

    setup_chat_completion_mock(status_code, error_body).await
}
