//! Passcode message texts

use hb_core::domain::entities::otp::OtpPurpose;

pub(crate) fn subject(purpose: OtpPurpose) -> &'static str {
    match purpose {
        OtpPurpose::EmailVerification => "Verify your StayHub email address",
        OtpPurpose::PasswordReset => "Reset your StayHub password",
    }
}

pub(crate) fn body(purpose: OtpPurpose, code: &str) -> String {
    match purpose {
        OtpPurpose::EmailVerification => format!(
            "Your StayHub verification code is {}. It expires shortly; do not share it with anyone.",
            code
        ),
        OtpPurpose::PasswordReset => format!(
            "Your StayHub password reset code is {}. If you did not ask to reset your password, ignore this message.",
            code
        ),
    }
}
