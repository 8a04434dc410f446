use actix_multipart::Multipart;
use actix_web::web::{Data, Path};
use actix_web::{HttpResponse, Responder};
use futures_util::StreamExt;

use crate::agents;
use crate::config;
use crate::consts;
use crate::dataset::Dataset;
use crate::errors::AnalysisError;
use crate::models::agent_list::{AgentInfo, AgentList};
use crate::models::analysis::{AnalysisResponse, ErrorResponse, RoleKeyedResponse};
use crate::service::{AnalysisOutcome, AnalysisService};

pub async fn list_agents() -> impl Responder {
    let data = agents::ANALYSIS_AGENTS.iter().map(AgentInfo::from).collect();

    HttpResponse::Ok().json(AgentList { data })
}

pub async fn get_agent(key: Path<String>) -> impl Responder {
    match agents::find_agent(&key) {
        Some(agent) => HttpResponse::Ok().json(AgentInfo::from(agent)),
        None => {
            log::info!("error: agent not found: {:?}", key.as_str());
            HttpResponse::NotFound().json(ErrorResponse {
                error: format!("Unknown agent: {}", key.as_str()),
            })
        }
    }
}

pub async fn run(
    service: Data<AnalysisService>,
    config: Data<config::Config>,
    payload: Multipart,
) -> impl Responder {
    match analyze_upload(&service, &config, payload).await {
        Ok(outcome) => HttpResponse::Ok().json(AnalysisResponse::from(outcome)),
        Err(e) => error_response(e),
    }
}

pub async fn run_role_keyed(
    service: Data<AnalysisService>,
    config: Data<config::Config>,
    payload: Multipart,
) -> impl Responder {
    match analyze_upload(&service, &config, payload).await {
        Ok(outcome) => HttpResponse::Ok().json(RoleKeyedResponse::from(outcome)),
        Err(e) => error_response(e),
    }
}

async fn analyze_upload(
    service: &AnalysisService,
    config: &config::Config,
    payload: Multipart,
) -> Result<AnalysisOutcome, AnalysisError> {
    let content = read_upload(payload, config.limits.max_upload_bytes).await?;
    log::debug!("received upload: {} bytes", content.len());

    let dataset = Dataset::from_csv_bytes(&content)?;
    service.analyze(&dataset).await
}

/// Reads the `file` field of a multipart body, skipping any other fields.
async fn read_upload(mut payload: Multipart, max_bytes: usize) -> Result<Vec<u8>, AnalysisError> {
    while let Some(field) = payload.next().await {
        let mut field = field?;
        let is_file = field.name() == Some(consts::UPLOAD_FIELD_NAME);

        let mut content = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if !is_file {
                continue;
            }
            if content.len() + chunk.len() > max_bytes {
                return Err(AnalysisError::InvalidUpload(format!(
                    "file exceeds {} bytes",
                    max_bytes
                )));
            }
            content.extend_from_slice(&chunk);
        }

        if is_file {
            return Ok(content);
        }
    }

    Err(AnalysisError::InvalidUpload(format!(
        "missing multipart field `{}`",
        consts::UPLOAD_FIELD_NAME
    )))
}

fn error_response(e: AnalysisError) -> HttpResponse {
    let status = e.status_code();
    if status.is_client_error() {
        log::info!("rejected upload: {}", e);
    } else {
        log::error!("analysis error: {:?}", e);
    }

    HttpResponse::build(status).json(ErrorResponse {
        error: e.to_string(),
    })
}
