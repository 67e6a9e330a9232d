//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod periodic_check_repo;

pub use periodic_check_repo::PeriodicCheckRepo;
