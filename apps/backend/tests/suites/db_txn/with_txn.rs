use gazbot_backend::db::txn::with_txn;
use gazbot_backend::errors::ErrorCode;
use gazbot_backend::repos::users::{self, UserCreate};
use gazbot_backend::AppError;
use tracing::debug;

use crate::support::{build_state_without_db, build_test_state, security};

#[actix_web::test]
async fn commits_on_ok() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(security()).await;

    let user_id = with_txn(&state, |txn| {
        Box::pin(async move {
            let (user, _) = users::ensure_user(txn, UserCreate::new(300)).await?;
            Ok::<_, AppError>(user.id)
        })
    })
    .await?;

    let db = state.db().expect("db");
    let stored = users::find_user_by_telegram_id(db, 300).await?;
    assert_eq!(stored.map(|u| u.id), Some(user_id));
    Ok(())
}

#[actix_web::test]
async fn rolls_back_on_error() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(security()).await;

    let result = with_txn(&state, |txn| {
        Box::pin(async move {
            users::ensure_user(txn, UserCreate::new(301)).await?;
            debug!("inserted user inside txn before error");
            Err::<(), _>(AppError::internal("forced failure"))
        })
    })
    .await;
    assert!(result.is_err());

    let db = state.db().expect("db");
    assert!(users::find_user_by_telegram_id(db, 301).await?.is_none());
    Ok(())
}

#[actix_web::test]
async fn without_db_is_unavailable() {
    let state = build_state_without_db().await;

    let err = with_txn(&state, |_txn| Box::pin(async move { Ok::<_, AppError>(()) }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DbUnavailable);
}
