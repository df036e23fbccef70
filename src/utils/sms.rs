use tracing::{debug, info, instrument};

/// Outbound SMS channel for OTP delivery.
///
/// No gateway is wired up yet: the service logs the dispatch and drops
/// the message. The code value itself is only emitted at debug level.
pub struct SmsService;

impl SmsService {
    #[instrument(skip(code))]
    pub fn send_otp(mobile_no: &str, code: &str) {
        debug!(code, "outgoing OTP code");
        info!(
            mobile_no,
            "OTP dispatch requested; no SMS gateway configured, delivery skipped"
        );
    }
}
