//! Common validation and masking helpers

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static E164_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{7,14}$").expect("valid E.164 regex"));

/// Check if a string's character count is within bounds
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Check if a phone number is in E.164 format (`+` followed by 8 to 15 digits)
pub fn is_valid_e164_phone(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Normalize an email for lookups and uniqueness checks
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mask an email address for logging: `jo***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        None => String::from("***"),
    }
}

/// Mask a phone number for logging, keeping the last four digits
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return String::from("****");
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}****{}", if phone.starts_with('+') { "+" } else { "" }, tail)
}

/// Mask an OTP recipient, which may be an email or a phone number
pub fn mask_recipient(recipient: &str) -> String {
    if recipient.contains('@') {
        mask_email(recipient)
    } else {
        mask_phone(recipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("guest@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("guest@"));
        assert!(!is_valid_email("guest.example.com"));
        assert!(!is_valid_email("guest@example"));
    }

    #[test]
    fn test_e164_validation() {
        assert!(is_valid_e164_phone("+14155552671"));
        assert!(is_valid_e164_phone("+8613812345678"));
        assert!(!is_valid_e164_phone("14155552671"));
        assert!(!is_valid_e164_phone("+0123456789"));
        assert!(!is_valid_e164_phone("+1234"));
    }

    #[test]
    fn test_masking() {
        assert_eq!(mask_email("john@example.com"), "jo***@example.com");
        assert_eq!(mask_email("invalid"), "***");
        assert_eq!(mask_phone("+14155552671"), "+****2671");
        assert_eq!(mask_phone("123"), "****");
        assert_eq!(mask_recipient("+14155552671"), "+****2671");
    }

    #[test]
    fn test_length_counts_chars() {
        assert!(length_between("héllo", 5, 5));
        assert!(!length_between("", 1, 10));
    }
}
