//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    CleanupResult, EmailServiceTrait, IssuedCode, PendingVerification, SendCodeResult,
    VerificationCleanupConfig, VerificationCleanupService, VerificationService,
    VerificationServiceConfig,
};
