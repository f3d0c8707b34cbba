//! MySQL repository implementations

pub mod verification_repository;

pub use verification_repository::{MySqlVerificationRepository, CREATE_VERIFICATION_TABLE};
