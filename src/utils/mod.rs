//! Shared utilities.
//!
//! - [`credential`]: reversible password codec (token encode/decode/verify)
//! - [`errors`]: application error type and HTTP mapping
//! - [`otp`]: one-time passcode generation, expiry and verification
//! - [`pagination`]: list pagination parameters and metadata
//! - [`sms`]: outbound SMS stub for OTP delivery

pub mod credential;
pub mod errors;
pub mod otp;
pub mod pagination;
pub mod sms;
