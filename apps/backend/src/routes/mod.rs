use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod admin;
pub mod events;
pub mod health;
pub mod registrations;
pub mod users;

fn query_error(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
}

fn path_error(err: actix_web::error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid path parameter: {err}")).into()
}

/// Register every route. `main` and the tests share this, so the wiring
/// they exercise is identical; middleware is added by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));

    cfg.route("/", web::get().to(health::root));
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(web::scope("/api/users").configure(users::configure_routes));
    cfg.service(web::scope("/api/events").configure(events::configure_routes));
    cfg.service(web::scope("/api/registrations").configure(registrations::configure_routes));
    cfg.service(web::scope("/api/admin").configure(admin::configure_routes));
}
