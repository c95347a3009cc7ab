//! Field format checks shared by step guards and the simulated backend.

use once_cell::sync::Lazy;
use regex::Regex;

// ASCII digits only; `\d` would match any Unicode digit.

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static OTP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").unwrap());
static AADHAAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{12}$").unwrap());
static PINCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").unwrap());
static PAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap());
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());
static UPI_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{2,}@[A-Za-z]{2,}$").unwrap());
static CARD_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{16}$").unwrap());
static CVV: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,4}$").unwrap());
static EXPIRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").unwrap());

/// Ten-digit mobile number without country prefix.
pub fn is_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

pub fn is_otp(value: &str) -> bool {
    OTP.is_match(value)
}

/// Strips the display spaces (`1234 5678 9012`) and returns the 12 digits,
/// or `None` when the value is not a well-formed Aadhaar number.
pub fn normalize_aadhaar(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    AADHAAR.is_match(&digits).then_some(digits)
}

pub fn is_aadhaar(value: &str) -> bool {
    normalize_aadhaar(value).is_some()
}

pub fn is_pincode(value: &str) -> bool {
    PINCODE.is_match(value)
}

pub fn is_pan(value: &str) -> bool {
    PAN.is_match(value)
}

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

pub fn is_upi_id(value: &str) -> bool {
    UPI_ID.is_match(value)
}

pub fn is_card_number(value: &str) -> bool {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    CARD_NUMBER.is_match(&digits)
}

pub fn is_cvv(value: &str) -> bool {
    CVV.is_match(value)
}

/// `MM/YY` card expiry.
pub fn is_expiry(value: &str) -> bool {
    EXPIRY.is_match(value)
}

pub fn is_non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_requires_exactly_ten_digits() {
        assert!(is_phone("9876543210"));
        assert!(!is_phone("987654321"));
        assert!(!is_phone("98765432100"));
        assert!(!is_phone("98765x3210"));
        assert!(!is_phone("९८७६५४३२१०"));
        assert!(!is_otp("१२३४५६"));
        assert!(is_otp("123456"));
    }

    #[test]
    fn aadhaar_ignores_display_spaces() {
        assert_eq!(
            normalize_aadhaar("1234 5678 9012").as_deref(),
            Some("123456789012")
        );
        assert!(is_aadhaar("123456789012"));
        assert!(!is_aadhaar("1234 5678 901"));
        assert!(!is_aadhaar("1234-5678-9012"));
        assert_eq!(normalize_aadhaar("१२३४ ५६७८ ९०१२"), None);
    }

    #[test]
    fn pan_and_pincode_formats() {
        assert!(is_pan("ABCDE1234F"));
        assert!(!is_pan("abcde1234f"));
        assert!(is_pincode("110001"));
        assert!(!is_pincode("11001"));
        assert!(!is_pincode("११०००१"));
    }

    #[test]
    fn payment_formats() {
        assert!(is_upi_id("rahul.sharma@okaxis"));
        assert!(!is_upi_id("rahul"));
        assert!(is_card_number("4111 1111 1111 1111"));
        assert!(!is_card_number("4111"));
        assert!(is_cvv("123"));
        assert!(is_cvv("1234"));
        assert!(!is_cvv("12"));
        assert!(is_expiry("08/27"));
        assert!(!is_expiry("13/27"));
        assert!(!is_cvv("१२३"));
        assert!(!is_card_number("४१११ १११११ १११ ११११"));
    }

    #[test]
    fn email_format() {
        assert!(is_email("rahul.sharma@email.com"));
        assert!(!is_email("rahul.sharma@"));
        assert!(!is_email("no-at-sign.com"));
    }
}
