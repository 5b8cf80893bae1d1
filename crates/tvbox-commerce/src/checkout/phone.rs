//! Phone number input handling.

/// Longest phone value accepted from input.
pub const MAX_PHONE_LEN: usize = 16;

/// Shortest phone value accepted on submit.
pub const MIN_PHONE_LEN: usize = 11;

const COUNTRY_PREFIX: &str = "+7";

/// Normalize raw phone input the way the storefront form does.
///
/// Input already starting with `+7` is kept verbatim. Anything else becomes
/// `+7` followed by its digits. Results longer than [`MAX_PHONE_LEN`]
/// characters are rejected.
pub fn normalize_phone(input: &str) -> Option<String> {
    let value = if input.starts_with(COUNTRY_PREFIX) {
        input.to_string()
    } else {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        format!("{COUNTRY_PREFIX}{digits}")
    };

    (value.chars().count() <= MAX_PHONE_LEN).then_some(value)
}

/// Number of ASCII digits in a phone value.
pub fn phone_digit_count(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_prefix() {
        assert_eq!(normalize_phone("9991234567").as_deref(), Some("+79991234567"));
        assert_eq!(
            normalize_phone("8 (999) 123-45-67").as_deref(),
            Some("+789991234567")
        );
        assert_eq!(normalize_phone("").as_deref(), Some("+7"));
    }

    #[test]
    fn test_normalize_keeps_prefixed_input() {
        assert_eq!(
            normalize_phone("+7 (999) 123-45").as_deref(),
            Some("+7 (999) 123-45")
        );
    }

    #[test]
    fn test_normalize_rejects_long_values() {
        assert_eq!(normalize_phone("+7 (999) 123-45-67"), None);
        assert!(normalize_phone("12345678901234").is_some());
        assert_eq!(normalize_phone("123456789012345"), None);
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(phone_digit_count("+7 (999) 123-45-67"), 11);
        assert_eq!(phone_digit_count("+7"), 1);
    }
}
