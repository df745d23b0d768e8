//! SeaORM adapters. Each returns `DbErr`; the `repos` layer maps errors.

pub mod events_sea;
pub mod registrations_sea;
pub mod users_sea;
