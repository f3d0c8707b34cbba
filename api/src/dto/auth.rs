use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crm_shared::utils::{is_valid_email, normalize_email};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Address to send the code to
    #[validate(custom = "validate_email_address")]
    pub email: String,
}

impl SendCodeRequest {
    /// Trim and lowercase the address before validation
    pub fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// Address the code was sent to
    #[validate(custom = "validate_email_address")]
    pub email: String,

    /// 6-digit verification code
    #[validate(length(equal = 6), custom = "validate_numeric_code")]
    pub code: String,
}

impl VerifyCodeRequest {
    /// Normalize the address; the code is left exactly as submitted
    pub fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }
}

/// Query string for the verification status lookup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerificationStatusQuery {
    #[validate(custom = "validate_email_address")]
    pub email: String,
}

// Same rule the email senders apply, so an accepted address is deliverable
fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

fn validate_numeric_code(code: &str) -> Result<(), ValidationError> {
    if code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("numeric_code"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub email: String,
    pub expires_at: DateTime<Utc>,
    /// Seconds until the code expires
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub email: String,
    pub verified: bool,
}
