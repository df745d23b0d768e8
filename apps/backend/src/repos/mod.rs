//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod events;
pub mod registrations;
pub mod users;
