//! Field rules shared by users, projects, labels and stories

use validator::ValidateLength;

use crate::shared::errors::DomainError;

type RuleResult = Result<(), DomainError>;

/// Symbols permitted in resource names besides ASCII letters and digits
pub const NAME_SYMBOLS: &str = "-_+=&^%$#*@!|/(){}?.,<>;':\" ";

pub const USERNAME_MIN: u64 = 3;
pub const USERNAME_MAX: u64 = 26;
pub const PASSWORD_MIN: u64 = 8;

pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || NAME_SYMBOLS.contains(c)
}

pub fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// `#RRGGBB`
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// `username:password` where the username part is non-empty and uses
/// username characters only.
pub fn is_basic_credentials(decoded: &str) -> bool {
    match decoded.split_once(':') {
        Some((user, _)) => !user.is_empty() && user.chars().all(is_username_char),
        None => false,
    }
}

/// `{label} must be {min} - {max} characters in length`
pub fn check_length(value: &str, label: &str, min: u64, max: u64) -> RuleResult {
    if value.validate_length(Some(min), Some(max), None) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "{label} must be {min} - {max} characters in length"
        )))
    }
}

/// `{label} must be {max} characters or less`
pub fn check_max_length(value: &str, label: &str, max: u64) -> RuleResult {
    if value.validate_length(None, Some(max), None) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "{label} must be {max} characters or less"
        )))
    }
}

/// Length plus character allow-list check for resource names.
pub fn check_name(value: &str, min: u64, max: u64) -> RuleResult {
    check_length(value, "name", min, max)?;
    if !value.chars().all(is_name_char) {
        return Err(DomainError::validation("name contains invalid characters"));
    }
    Ok(())
}

pub fn check_username(value: &str) -> RuleResult {
    check_length(value, "username", USERNAME_MIN, USERNAME_MAX)?;
    if !value.chars().all(is_username_char) {
        return Err(DomainError::validation(
            "username may only contain alphanumeric, - (dash), and _ (underscore) characters",
        ));
    }
    Ok(())
}

pub fn check_password(value: &str) -> RuleResult {
    if !value.validate_length(Some(PASSWORD_MIN), None, None) {
        return Err(DomainError::validation(format!(
            "password must be at least {PASSWORD_MIN} characters in length"
        )));
    }
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(DomainError::validation(
            "password must have 1 uppercase, lowercase, and number character",
        ));
    }
    Ok(())
}

/// Path ids are UUIDs: `{noun} id is not valid` otherwise.
pub fn check_id(value: &str, noun: &str) -> RuleResult {
    match uuid::Uuid::parse_str(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(DomainError::validation(format!("{noun} id is not valid"))),
    }
}

pub fn check_color(value: &str) -> RuleResult {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(DomainError::validation(
            "color has invalid format. example #000000",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: RuleResult) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn names_accept_the_symbol_allow_list() {
        assert!(check_name("Sprint #4 (backend) - \"fixes\"", 1, 50).is_ok());
        assert_eq!(
            message(check_name("tab\tname", 1, 50)),
            "name contains invalid characters"
        );
        assert_eq!(
            message(check_name("", 1, 26)),
            "name must be 1 - 26 characters in length"
        );
    }

    #[test]
    fn username_rules() {
        assert!(check_username("alice_123-x").is_ok());
        assert_eq!(
            message(check_username("ab")),
            "username must be 3 - 26 characters in length"
        );
        assert_eq!(
            message(check_username("alice!")),
            "username may only contain alphanumeric, - (dash), and _ (underscore) characters"
        );
    }

    #[test]
    fn password_rules() {
        assert!(check_password("Password1").is_ok());
        assert_eq!(
            message(check_password("Pass1")),
            "password must be at least 8 characters in length"
        );
        assert_eq!(
            message(check_password("password1")),
            "password must have 1 uppercase, lowercase, and number character"
        );
    }

    #[test]
    fn colors() {
        assert!(is_hex_color("#00fFaa"));
        assert!(!is_hex_color("00ffaa"));
        assert!(!is_hex_color("#00ffa"));
        assert!(!is_hex_color("#00ffgg"));
    }

    #[test]
    fn basic_credentials_shape() {
        assert!(is_basic_credentials("alice:secret:with:colons"));
        assert!(is_basic_credentials("alice:"));
        assert!(!is_basic_credentials(":secret"));
        assert!(!is_basic_credentials("alice"));
        assert!(!is_basic_credentials("al ice:secret"));
    }

    #[test]
    fn max_length_message() {
        assert_eq!(
            message(check_max_length(&"x".repeat(351), "description", 350)),
            "description must be 350 characters or less"
        );
    }

    #[test]
    fn ids_must_be_uuids() {
        assert!(check_id("6f1c9d1e-8f4a-4a52-9d6e-0b7c3f2a1e55", "project").is_ok());
        assert_eq!(
            message(check_id("42", "story")),
            "story id is not valid"
        );
    }
}
