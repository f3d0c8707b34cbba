//! Request and response bodies

pub mod auth;

pub use auth::{
    SendCodeRequest, SendCodeResponse, VerificationStatusQuery, VerifyCodeRequest,
    VerifyCodeResponse,
};
