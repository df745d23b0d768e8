use gazbot_backend::entities::registrations::RegistrationStatus;
use gazbot_backend::errors::ErrorCode;
use gazbot_backend::repos::registrations::{self, RegistrationCreate};
use gazbot_backend::repos::users::{self, UserCreate};
use gazbot_backend::services::registrations::{
    bulk_update_statuses, register_for_event, registration_for_active_event,
};
use gazbot_backend::services::users::UserUpdate;

use crate::support::{build_test_state, open_event, security, seed_event};

#[tokio::test]
async fn register_then_lookup_active() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(security()).await;
    let event = seed_event(&state, open_event("Party")).await;
    let db = state.db().expect("db");
    let (user, _) = users::ensure_user(db, UserCreate::new(200)).await?;

    let update = UserUpdate {
        phone: Some(Some("+7 999 000-00-00".into())),
        ..Default::default()
    };
    let registration = register_for_event(&state, user.id, event.id, update).await?;
    assert_eq!(registration.status, RegistrationStatus::Pending);

    let found = registration_for_active_event(db, user.id).await?;
    assert_eq!(found, registration);

    let stored = users::find_user_by_id(db, user.id).await?.expect("user");
    assert_eq!(stored.phone.as_deref(), Some("+7 999 000-00-00"));
    Ok(())
}

#[tokio::test]
async fn duplicate_insert_maps_to_already_registered() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(security()).await;
    let event = seed_event(&state, open_event("Party")).await;
    let db = state.db().expect("db");
    let (user, _) = users::ensure_user(db, UserCreate::new(201)).await?;

    registrations::create_registration(db, RegistrationCreate::new(user.id, event.id, "token-a"))
        .await?;

    // bypasses the service check, so the unique index has to catch it
    let err = registrations::create_registration(
        db,
        RegistrationCreate::new(user.id, event.id, "token-b"),
    )
    .await
    .unwrap_err();
    let app_err: gazbot_backend::AppError = err.into();
    assert_eq!(app_err.code(), ErrorCode::AlreadyRegistered);
    Ok(())
}

#[tokio::test]
async fn registration_for_unknown_user_is_bad_reference() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(security()).await;
    let event = seed_event(&state, open_event("Party")).await;
    let db = state.db().expect("db");

    let err = registrations::create_registration(db, RegistrationCreate::new(9999, event.id, "t"))
        .await
        .unwrap_err();
    let app_err: gazbot_backend::AppError = err.into();
    assert_eq!(app_err.code(), ErrorCode::BadRequest);
    Ok(())
}

#[tokio::test]
async fn bulk_update_counts_only_existing_rows() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(security()).await;
    let event = seed_event(&state, open_event("Party")).await;
    let db = state.db().expect("db");
    let (user, _) = users::ensure_user(db, UserCreate::new(202)).await?;
    let registration = registrations::create_registration(
        db,
        RegistrationCreate::new(user.id, event.id, "token-c"),
    )
    .await?;

    let updated =
        bulk_update_statuses(&state, &[registration.id, 123_456], RegistrationStatus::Payment)
            .await?;
    assert_eq!(updated, 1);

    let stored = registrations::find_registration(db, user.id, event.id)
        .await?
        .expect("registration");
    assert_eq!(stored.status, RegistrationStatus::Payment);
    Ok(())
}
