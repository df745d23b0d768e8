mod registrations;
mod user_directory;
