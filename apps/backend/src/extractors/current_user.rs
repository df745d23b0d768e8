use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use super::telegram_auth::TelegramAuth;
use crate::db::require_db;
use crate::error::AppError;
use crate::repos::users::User;
use crate::services::users::{SeaUserDirectory, UserDirectory};
use crate::state::app_state::AppState;

/// The durable user behind the request's Telegram identity.
///
/// First contact creates the user row.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // headers only; the body stays with later extractors such as `ValidatedJson`
        let req = req.clone();

        Box::pin(async move {
            let identity = TelegramAuth::from_request(&req, &mut Payload::None)
                .await?
                .into_inner();

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;
            let db = require_db(app_state)?;

            let user = SeaUserDirectory::new(db).get_or_create(&identity).await?;
            Ok(CurrentUser(user))
        })
    }
}
