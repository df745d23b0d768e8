use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use tracing::warn;

use super::current_user::CurrentUser;
use crate::error::AppError;
use crate::repos::users::User;
use crate::state::app_state::AppState;

/// A `CurrentUser` whose telegram id is on the admin allowlist.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub User);

impl Deref for CurrentAdmin {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentAdmin {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // headers only; the body stays with later extractors such as `ValidatedJson`
        let req = req.clone();

        Box::pin(async move {
            let CurrentUser(user) = CurrentUser::from_request(&req, &mut Payload::None).await?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            if !app_state.security.admins.is_admin(user.telegram_id) {
                warn!(user_id = user.id, "Admin access denied");
                return Err(AppError::forbidden());
            }

            Ok(CurrentAdmin(user))
        })
    }
}
