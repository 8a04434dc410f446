use std::sync::Arc;
use std::time::Duration;

use analysis_crew::app::create_app;
use analysis_crew::config;
use analysis_crew::consts;
use analysis_crew::llm_client::LLMClient;
use analysis_crew::service::AnalysisService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    log::info!("Initializing analysis crew service...");

    let config = config::load_config().map_err(|e| std::io::Error::other(e.to_string()))?;

    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(consts::CONNECT_TIMEOUT_SECS))
        .read_timeout(Duration::from_secs(consts::READ_TIMEOUT_SECS))
        .build()
        .map_err(std::io::Error::other)?;

    let llm_client = LLMClient::new(http_client, &config.llm);
    log::info!(
        "using model {} at {}",
        llm_client.model_name(),
        config.llm.api_url
    );

    let analysis_service = Arc::new(AnalysisService::new(
        Arc::new(llm_client),
        config.summary.clone(),
    ));
    let bind_addr = (config.server.host.clone(), config.server.port);
    let config = Arc::new(config);

    let server = actix_web::HttpServer::new(move || {
        create_app(analysis_service.clone(), config.clone())
    });

    server.bind(bind_addr)?.run().await
}
