use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::{decoded_char_count, strip_slashes};

use super::errors::CustomerConstraintError;

// ============================================================================
// Customer Value Objects
// ============================================================================
//
// Validated wrappers around submitted customer fields. Construction is the
// only validation point: an instance always satisfies its constraints.
//
// Length is counted after HTML entity decoding, the character pattern is
// checked after backslash unescaping, and the stored value is the raw
// submitted string with escapes and entities preserved.
//
// ============================================================================

/// Maximum allowed length for customer string fields, counted after
/// HTML entity decoding
const MAX_FIELD_LENGTH: usize = 255;

fn name_pattern() -> &'static Regex {
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"^[^0-9!<>,;?=+()@#"°{}_$%:¤|]*$"#).unwrap())
}

fn email_pattern() -> &'static Regex {
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[\p{L}0-9!#$%&'*+/=?^`{}|~_-]+[.\p{L}0-9!#$%&'*+/=?^`{}|~_-]*@[\p{L}0-9]+(?:\.?[_\p{L}0-9-])*\.[\p{L}0-9]+$",
        )
        .unwrap()
    })
}

fn validate_length(field: &'static str, value: &str) -> Result<(), CustomerConstraintError> {
    let length = decoded_char_count(value);
    if length > MAX_FIELD_LENGTH {
        return Err(CustomerConstraintError::TooLong {
            field,
            length,
            max: MAX_FIELD_LENGTH,
        });
    }
    Ok(())
}

fn validate_name(field: &'static str, value: &str) -> Result<(), CustomerConstraintError> {
    validate_length(field, value)?;

    if !name_pattern().is_match(&strip_slashes(value)) {
        return Err(CustomerConstraintError::InvalidCharacters {
            field,
            value: value.to_string(),
        });
    }

    Ok(())
}

/// Identity of a customer record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(u64);

impl CustomerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Customer first name, validated on construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstName(String);

impl FirstName {
    pub const MAX_LENGTH: usize = MAX_FIELD_LENGTH;

    pub fn new(name: impl Into<String>) -> Result<Self, CustomerConstraintError> {
        let name = name.into();
        validate_name("first name", &name)?;
        Ok(Self(name))
    }

    /// The raw value as submitted, escapes and entities preserved
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Customer last name, validated on construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastName(String);

impl LastName {
    pub const MAX_LENGTH: usize = MAX_FIELD_LENGTH;

    pub fn new(name: impl Into<String>) -> Result<Self, CustomerConstraintError> {
        let name = name.into();
        validate_name("last name", &name)?;
        Ok(Self(name))
    }

    /// The raw value as submitted, escapes and entities preserved
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Customer email address, validated on construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub const MAX_LENGTH: usize = MAX_FIELD_LENGTH;

    pub fn new(email: impl Into<String>) -> Result<Self, CustomerConstraintError> {
        let email = email.into();
        validate_length("email", &email)?;

        if !email_pattern().is_match(&email) {
            return Err(CustomerConstraintError::InvalidEmail(email));
        }

        Ok(Self(email))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name_accepts_plain_names() {
        let name = FirstName::new("Marie").unwrap();
        assert_eq!(name.value(), "Marie");
    }

    #[test]
    fn test_first_name_keeps_raw_value_unchanged() {
        // Escapes and entities stay exactly as submitted
        let escaped = FirstName::new(r"O\'Hara").unwrap();
        assert_eq!(escaped.value(), r"O\'Hara");

        let encoded = FirstName::new("M&amp;M").unwrap();
        assert_eq!(encoded.value(), "M&amp;M");
    }

    #[test]
    fn test_first_name_accepts_unicode() {
        assert!(FirstName::new("Éléonore").is_ok());
        assert!(FirstName::new("Jürgen").is_ok());
        assert!(FirstName::new("José María").is_ok());
    }

    #[test]
    fn test_first_name_rejects_digits() {
        let result = FirstName::new("Jo3");
        assert!(matches!(
            result,
            Err(CustomerConstraintError::InvalidCharacters { field: "first name", .. })
        ));
    }

    #[test]
    fn test_first_name_rejects_forbidden_symbols() {
        for value in ["Jo@", "Jo{", "Jo!", "Jo=", "Jo°", "Jo¤", "Jo|", "Jo_"] {
            assert!(
                matches!(
                    FirstName::new(value),
                    Err(CustomerConstraintError::InvalidCharacters { .. })
                ),
                "{} should be rejected",
                value
            );
        }
    }

    #[test]
    fn test_first_name_rejects_escaped_forbidden_symbol() {
        // Unescaping reveals the brace, which stays forbidden
        let result = FirstName::new(r"Jo\{");
        assert!(matches!(
            result,
            Err(CustomerConstraintError::InvalidCharacters { .. })
        ));
    }

    #[test]
    fn test_first_name_accepts_empty_string() {
        assert!(FirstName::new("").is_ok());
    }

    #[test]
    fn test_first_name_length_boundary() {
        let at_limit = "a".repeat(255);
        assert!(FirstName::new(at_limit).is_ok());

        let over_limit = "a".repeat(256);
        let result = FirstName::new(over_limit);
        assert!(matches!(
            result,
            Err(CustomerConstraintError::TooLong { field: "first name", length: 256, max: 255 })
        ));
    }

    #[test]
    fn test_first_name_length_counts_decoded_entities() {
        // 64 entities decode to 64 ampersands, far under the limit even
        // though the raw string is 320 characters
        let encoded = "&amp;".repeat(64);
        assert_eq!(encoded.len(), 320);
        assert!(FirstName::new(encoded).is_ok());
    }

    #[test]
    fn test_first_name_length_wins_over_pattern() {
        // A value violating both constraints reports the length first
        let digits = "1".repeat(256);
        assert!(matches!(
            FirstName::new(digits),
            Err(CustomerConstraintError::TooLong { .. })
        ));
    }

    #[test]
    fn test_last_name_mirrors_first_name_rules() {
        assert_eq!(LastName::new("Curie").unwrap().value(), "Curie");
        assert!(matches!(
            LastName::new("Curie9"),
            Err(CustomerConstraintError::InvalidCharacters { field: "last name", .. })
        ));
    }

    #[test]
    fn test_email_accepts_common_addresses() {
        for value in [
            "test@example.com",
            "user.name+tag@sub-domain.example.co.uk",
            "jose@müller.de",
        ] {
            assert!(Email::new(value).is_ok(), "{} should be accepted", value);
        }
    }

    #[test]
    fn test_email_rejects_malformed_addresses() {
        for value in ["", "plainaddress", "@example.com", "user@", "user name@example.com"] {
            assert!(
                matches!(
                    Email::new(value),
                    Err(CustomerConstraintError::InvalidEmail(_))
                ),
                "{} should be rejected",
                value
            );
        }
    }

    #[test]
    fn test_email_length_checked_before_pattern() {
        let local = "a".repeat(250);
        let over_limit = format!("{}@example.com", local);
        assert!(matches!(
            Email::new(over_limit),
            Err(CustomerConstraintError::TooLong { field: "email", .. })
        ));
    }

    #[test]
    fn test_customer_id_wraps_raw_integer() {
        let id = CustomerId::new(42);
        assert_eq!(id.value(), 42);
    }
}
