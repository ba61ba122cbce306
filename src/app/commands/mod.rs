pub mod create_repo;
pub mod setup;
