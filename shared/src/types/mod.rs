//! Type definitions shared by the API layer
//!
//! - `response` - API response envelope and error body

pub mod response;

pub use response::{ApiResponse, ErrorResponse};
