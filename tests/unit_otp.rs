use chrono::{DateTime, Duration, TimeZone, Utc};
use rollbook::utils::otp::{
    OTP_VALIDITY_MINUTES, OtpCheck, check_otp_at, generate_otp, is_otp_expired_at,
};

fn issued_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_generate_otp_format() {
    for _ in 0..200 {
        let code = generate_otp();

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let value: u32 = code.parse().unwrap();
        assert!((100_000..=999_999).contains(&value));
    }
}

#[test]
fn test_not_expired_before_window_ends() {
    let sent = issued_at();
    let now = sent + Duration::minutes(4) + Duration::seconds(59);

    assert!(!is_otp_expired_at(Some(sent), now));
}

#[test]
fn test_not_expired_at_exact_boundary() {
    let sent = issued_at();
    let now = sent + Duration::minutes(OTP_VALIDITY_MINUTES);

    assert!(!is_otp_expired_at(Some(sent), now));
}

#[test]
fn test_expired_one_millisecond_past_boundary() {
    let sent = issued_at();
    let now = sent + Duration::minutes(OTP_VALIDITY_MINUTES) + Duration::milliseconds(1);

    assert!(is_otp_expired_at(Some(sent), now));
}

#[test]
fn test_expired_when_never_issued() {
    assert!(is_otp_expired_at(None, issued_at()));
}

#[test]
fn test_check_not_generated_when_both_fields_absent() {
    let check = check_otp_at(None, None, "123456", issued_at());

    assert_eq!(check, OtpCheck::NotGenerated);
    assert_eq!(check.reason(), "OTP not generated");
}

#[test]
fn test_check_not_generated_when_timestamp_missing() {
    let check = check_otp_at(Some("123456"), None, "123456", issued_at());

    assert_eq!(check, OtpCheck::NotGenerated);
}

#[test]
fn test_check_expired() {
    let sent = issued_at();
    let now = sent + Duration::minutes(5) + Duration::seconds(1);

    let check = check_otp_at(Some("482913"), Some(sent), "482913", now);

    assert_eq!(check, OtpCheck::Expired);
    assert_eq!(check.reason(), "OTP expired");
}

#[test]
fn test_check_invalid_on_mismatch() {
    let sent = issued_at();
    let now = sent + Duration::seconds(30);

    let check = check_otp_at(Some("111111"), Some(sent), "111112", now);

    assert_eq!(check, OtpCheck::Invalid);
    assert_eq!(check.reason(), "Invalid OTP");
}

#[test]
fn test_check_is_exact_string_comparison() {
    let sent = issued_at();
    let now = sent + Duration::seconds(30);

    // No trimming or normalization of the submitted value.
    assert_eq!(
        check_otp_at(Some("123456"), Some(sent), " 123456", now),
        OtpCheck::Invalid
    );
    assert_eq!(
        check_otp_at(Some("123456"), Some(sent), "123456 ", now),
        OtpCheck::Invalid
    );
}

#[test]
fn test_check_verified_within_window() {
    let sent = issued_at();
    let now = sent + Duration::minutes(4) + Duration::seconds(59);

    let check = check_otp_at(Some("482913"), Some(sent), "482913", now);

    assert!(check.is_verified());
    assert_eq!(check.reason(), "OTP verified successfully");
}

#[test]
fn test_single_use_after_clearing() {
    let sent = issued_at();
    let now = sent + Duration::seconds(30);

    // First verification succeeds; the service then clears both fields.
    assert!(check_otp_at(Some("482913"), Some(sent), "482913", now).is_verified());

    // Replaying the same code against the cleared state fails as if no
    // code had ever been issued.
    assert_eq!(
        check_otp_at(None, None, "482913", now),
        OtpCheck::NotGenerated
    );
}
