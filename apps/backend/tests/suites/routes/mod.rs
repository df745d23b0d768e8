mod admin;
mod events;
mod extractors;
mod health;
mod users;
