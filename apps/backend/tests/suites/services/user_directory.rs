use backend_test_support::unique_helpers::unique_telegram_id;
use gazbot_backend::auth::identity::{AuthSource, TelegramIdentity};
use gazbot_backend::repos::users::{self, UserCreate};
use gazbot_backend::services::users::{SeaUserDirectory, UserDirectory};

use crate::support::{build_test_state, security};

fn identity(telegram_id: i64) -> TelegramIdentity {
    TelegramIdentity {
        telegram_id,
        username: Some("ann_tg".into()),
        first_name: Some("Ann".into()),
        last_name: Some("Lee".into()),
        language_code: Some("en".into()),
        is_premium: true,
        source: AuthSource::Telegram,
    }
}

#[tokio::test]
async fn get_or_create_creates_from_identity() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(security()).await;
    let db = state.db().expect("db");

    let user = SeaUserDirectory::new(db).get_or_create(&identity(100)).await?;

    assert_eq!(user.telegram_id, 100);
    assert_eq!(user.telegram_username.as_deref(), Some("ann_tg"));
    assert_eq!(user.first_name.as_deref(), Some("Ann"));
    assert_eq!(user.last_name.as_deref(), Some("Lee"));
    assert_eq!(user.phone, None);
    Ok(())
}

#[tokio::test]
async fn get_or_create_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(security()).await;
    let db = state.db().expect("db");
    let directory = SeaUserDirectory::new(db);

    let first = directory.get_or_create(&identity(101)).await?;
    let mut renamed = identity(101);
    renamed.first_name = Some("Someone else".into());
    let second = directory.get_or_create(&renamed).await?;

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn ensure_user_reports_insertion() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(security()).await;
    let db = state.db().expect("db");

    let telegram_id = unique_telegram_id();

    let (created, inserted) = users::ensure_user(db, UserCreate::new(telegram_id)).await?;
    assert!(inserted);

    let (again, inserted_again) = users::ensure_user(db, UserCreate::new(telegram_id)).await?;
    assert!(!inserted_again);
    assert_eq!(created.id, again.id);
    Ok(())
}

#[tokio::test]
async fn dev_bypass_identity_gets_dev_username() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(security()).await;
    let db = state.db().expect("db");

    let user = SeaUserDirectory::new(db)
        .get_or_create(&TelegramIdentity::dev_bypass(1))
        .await?;
    assert_eq!(user.telegram_username.as_deref(), Some("dev_user"));
    Ok(())
}
