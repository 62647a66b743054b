pub mod failing_repo;
pub mod setup;
