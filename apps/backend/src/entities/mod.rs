pub mod events;
pub mod registrations;
pub mod users;

pub use events::Entity as Events;
pub use events::Model as Event;
pub use registrations::Entity as Registrations;
pub use registrations::Model as Registration;
pub use registrations::RegistrationStatus;
pub use users::Entity as Users;
pub use users::Model as User;
