//! One-time passcode issue and verification.
//!
//! The OTP state is the pair `(otp, otp_sent_at)` on the student row,
//! always set and cleared together. Verification is a pure check over
//! that pair; the service layer applies the clear-on-success side effect.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// How long an issued code stays valid. Exactly this many minutes after
/// issue is still valid; one millisecond later is not.
pub const OTP_VALIDITY_MINUTES: i64 = 5;

/// Generate a uniformly random 6-digit code.
///
/// The range [100000, 999999] guarantees six characters with no leading
/// zero, matching what is stored in the 6-character column.
pub fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    code.to_string()
}

/// True when no code was ever issued or the window has elapsed.
pub fn is_otp_expired(sent_at: Option<DateTime<Utc>>) -> bool {
    is_otp_expired_at(sent_at, Utc::now())
}

/// Expiry check against an explicit clock, strict greater-than: the
/// boundary instant `sent_at + 5min` is NOT expired.
pub fn is_otp_expired_at(sent_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match sent_at {
        Some(sent_at) => now > sent_at + Duration::minutes(OTP_VALIDITY_MINUTES),
        None => true,
    }
}

/// Outcome of checking a submitted code against stored OTP state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    /// Code matched within the validity window. The caller must clear
    /// both stored fields so the code cannot be replayed.
    Verified,
    /// No code on record (either field absent).
    NotGenerated,
    /// The window elapsed. Stored state is intentionally left in place;
    /// the next issue overwrites it.
    Expired,
    /// Exact string comparison failed. State unchanged.
    Invalid,
}

impl OtpCheck {
    pub fn is_verified(self) -> bool {
        matches!(self, OtpCheck::Verified)
    }

    /// Human-readable reason reported to the client.
    pub fn reason(self) -> &'static str {
        match self {
            OtpCheck::Verified => "OTP verified successfully",
            OtpCheck::NotGenerated => "OTP not generated",
            OtpCheck::Expired => "OTP expired",
            OtpCheck::Invalid => "Invalid OTP",
        }
    }
}

/// Check a submitted code against the stored `(code, sent_at)` pair.
pub fn check_otp(
    stored: Option<&str>,
    sent_at: Option<DateTime<Utc>>,
    submitted: &str,
) -> OtpCheck {
    check_otp_at(stored, sent_at, submitted, Utc::now())
}

/// [`check_otp`] against an explicit clock.
pub fn check_otp_at(
    stored: Option<&str>,
    sent_at: Option<DateTime<Utc>>,
    submitted: &str,
    now: DateTime<Utc>,
) -> OtpCheck {
    let Some(stored) = stored else {
        return OtpCheck::NotGenerated;
    };
    if sent_at.is_none() {
        return OtpCheck::NotGenerated;
    }

    if is_otp_expired_at(sent_at, now) {
        return OtpCheck::Expired;
    }

    // Exact string equality, no normalization.
    if submitted != stored {
        return OtpCheck::Invalid;
    }

    OtpCheck::Verified
}
