use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::{debug, warn};

use crate::auth::identity::{AuthSource, TelegramIdentity};
use crate::auth::init_data::InitDataError;
use crate::error::AppError;
use crate::middleware::cors::INIT_DATA_HEADER;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::trace_ctx;

/// The verified (or bypassed) Telegram identity of the caller.
///
/// Does not touch the database; `CurrentUser` builds on it.
#[derive(Debug, Clone)]
pub struct TelegramAuth(pub TelegramIdentity);

impl TelegramAuth {
    pub fn into_inner(self) -> TelegramIdentity {
        self.0
    }
}

/// Decide who the caller is from the raw init-data header.
///
/// With the development bypass on, a missing header or a bare positive
/// integer stands in for a Telegram account. Anything else is verified.
pub fn resolve_identity(
    security: &SecurityConfig,
    header: Option<&str>,
) -> Result<TelegramIdentity, InitDataError> {
    let header = header.map(str::trim).filter(|h| !h.is_empty());

    if let Some(bypass) = security.dev_bypass {
        match header {
            None => return Ok(TelegramIdentity::dev_bypass(bypass.default_telegram_id)),
            Some(raw) => {
                if let Ok(id) = raw.parse::<i64>() {
                    if id > 0 {
                        return Ok(TelegramIdentity::dev_bypass(id));
                    }
                }
            }
        }
    }

    match header {
        Some(raw) => security.verifier.verify(raw),
        None => Err(InitDataError::MissingHeader),
    }
}

fn authenticate(req: &HttpRequest) -> Result<TelegramIdentity, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let header = match req.headers().get(INIT_DATA_HEADER) {
        Some(value) => match value.to_str() {
            Ok(s) => Some(s),
            Err(_) => {
                warn!(
                    trace_id = %trace_ctx::trace_id(),
                    reason = InitDataError::MalformedPayload.reason(),
                    "Init data rejected"
                );
                return Err(AppError::unauthorized());
            }
        },
        None => None,
    };

    match resolve_identity(&state.security, header) {
        Ok(identity) => {
            match identity.source {
                AuthSource::DevBypass => warn!(
                    trace_id = %trace_ctx::trace_id(),
                    auth_source = identity.source.as_str(),
                    telegram_id = identity.telegram_id,
                    "Request authenticated by development bypass"
                ),
                AuthSource::Telegram => debug!(
                    trace_id = %trace_ctx::trace_id(),
                    auth_source = identity.source.as_str(),
                    telegram_id = identity.telegram_id,
                    "Init data verified"
                ),
            }
            Ok(identity)
        }
        Err(err) => {
            warn!(
                trace_id = %trace_ctx::trace_id(),
                reason = err.reason(),
                "Init data rejected"
            );
            Err(AppError::unauthorized())
        }
    }
}

impl FromRequest for TelegramAuth {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(TelegramAuth))
    }
}
