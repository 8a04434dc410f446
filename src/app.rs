use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, Error, web};

use crate::{config, handlers, service};

pub fn create_app(
    analysis_service: Arc<service::AnalysisService>,
    config: Arc<config::Config>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Cors::permissive())
        .wrap(Logger::default())
        .app_data(Data::from(analysis_service))
        .app_data(Data::from(config))
        .route("/run", web::post().to(handlers::run))
        .service(
            web::scope("/api")
                .route("/run", web::post().to(handlers::run_role_keyed))
                .route("/agents", web::get().to(handlers::list_agents))
                .route("/agents/{key}", web::get().to(handlers::get_agent)),
        )
}
