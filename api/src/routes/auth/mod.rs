//! Email verification endpoints
//!
//! - `POST /api/v1/auth/send-code` issues a code and emails it
//! - `POST /api/v1/auth/verify-code` checks a submitted code
//! - `GET /api/v1/auth/verification-status` reports the pending record

pub mod send_code;
pub mod status;
pub mod verify_code;

pub use send_code::send_code;
pub use status::verification_status;
pub use verify_code::verify_code;
