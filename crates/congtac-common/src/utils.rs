//! Utility functions for congtac
//!
//! Common helper functions used across the codebase.

use std::sync::LazyLock;

/// Regex pattern for validating identifiers (usernames, skill slugs, etc.)
static VALID_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new("^[a-zA-Z0-9_.-]*$").expect("Invalid regex pattern"));

/// Validate a string contains only allowed identifier characters
///
/// Allowed characters: alphanumeric, underscore, dot, hyphen
///
/// # Examples
///
/// ```
/// use congtac_common::is_valid_identifier;
///
/// assert!(is_valid_identifier("nguyen.van-a_1"));
/// assert!(!is_valid_identifier("with spaces"));
/// assert!(!is_valid_identifier("slash/name"));
/// ```
pub fn is_valid_identifier(str: &str) -> bool {
    VALID_PATTERN.is_match(str)
}

/// Split a textarea payload into trimmed, non-empty lines.
///
/// The profile editor submits interests/experiences/certifications as one
/// newline-separated blob; storage wants a clean JSON array.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Capitalise the first character and lowercase the rest, the normal form
/// for skill names entered free-text ("rust" -> "Rust", "REACT" -> "React").
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("abc123"));
        assert!(is_valid_identifier("test_value"));
        assert!(is_valid_identifier("test-value"));
        assert!(is_valid_identifier("test.value"));
        assert!(is_valid_identifier(""));
    }

    #[test]
    fn test_is_valid_identifier_invalid_chars() {
        assert!(!is_valid_identifier("test value")); // space
        assert!(!is_valid_identifier("test@value")); // @
        assert!(!is_valid_identifier("test/value")); // /
        assert!(!is_valid_identifier("tiếng-việt")); // non-ascii
    }

    #[test]
    fn test_split_lines_filters_blanks() {
        let lines = split_lines("Rust\n\n  Web design  \n\n");
        assert_eq!(lines, vec!["Rust".to_string(), "Web design".to_string()]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("rust"), "Rust");
        assert_eq!(capitalize("REACT"), "React");
        assert_eq!(capitalize(""), "");
    }
}
