//! Domain entities representing core business objects.

pub mod verification_record;

// Re-export commonly used types
pub use verification_record::{
    VerificationRecord, VerificationState, CODE_LENGTH, CODE_MAX, CODE_MIN,
    DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};
