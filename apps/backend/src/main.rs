use actix_web::{web, App, HttpServer};
use gazbot_backend::config::{AppConfig, DbProfile};
use gazbot_backend::config::db::sanitize_db_url;
use gazbot_backend::infra::state::build_state;
use gazbot_backend::middleware::cors::cors_middleware;
use gazbot_backend::middleware::request_trace::RequestTrace;
use gazbot_backend::middleware::structured_logger::StructuredLogger;
use gazbot_backend::middleware::trace_span::TraceSpan;
use gazbot_backend::routes;
use gazbot_backend::state::security_config::SecurityConfig;
use tracing::{error, info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    if config.dev_auth_bypass {
        warn!(
            default_telegram_id = config.dev_user_telegram_id,
            "DEV_AUTH_BYPASS is enabled; init data is not required"
        );
    }
    if config.admins.is_empty() {
        warn!("ADMIN_TELEGRAM_IDS is empty; admin endpoints will reject everyone");
    }

    let app_state = match build_state()
        .with_db(DbProfile::Url(config.database_url.clone()))
        .with_security(SecurityConfig::from_config(&config))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        database = %sanitize_db_url(&config.database_url),
        host = %config.host,
        port = config.port,
        "Starting GazBot backend"
    );

    let data = web::Data::new(app_state);
    let allowed_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&allowed_origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
