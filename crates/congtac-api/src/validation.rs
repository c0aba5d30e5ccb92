//! Input validation for congtac API requests
//!
//! Field limits mirror the web client's form schemas; validators return
//! coded `ValidationError`s which `error_message` turns into the bilingual
//! text shown to the user.

use std::collections::BTreeMap;

use congtac_common::{Lang, is_valid_identifier};
use serde::Serialize;
use validator::{ValidateEmail, ValidationError};

/// Minimum length for username field
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum length for username field
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Minimum length for password field
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length for password field (bcrypt input limit)
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Minimum length for full name field
pub const MIN_FULL_NAME_LENGTH: usize = 3;

/// Maximum length for full name field
pub const MAX_FULL_NAME_LENGTH: usize = 50;

/// Maximum length for project title field
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for project location field
pub const MAX_LOCATION_LENGTH: usize = 200;

/// Maximum length for project description field
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// Accepted project categories
pub const PROJECT_TYPES: &[&str] = &["website", "mobile-app", "desktop-app"];

/// Number of digits in a password-reset OTP code
pub const OTP_LENGTH: usize = 6;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !email.validate_email() {
        return Err(ValidationError::new("email_invalid"));
    }
    Ok(())
}

/// Validate username format
///
/// Username must:
/// - Be between MIN_USERNAME_LENGTH and MAX_USERNAME_LENGTH characters
/// - Contain only alphanumeric characters, dots, hyphens, and underscores
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::new("username_too_short"));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::new("username_too_long"));
    }
    if !is_valid_identifier(username) {
        return Err(ValidationError::new("username_invalid_chars"));
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new("password_too_short"));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::new("password_too_long"));
    }
    Ok(())
}

/// Validate full name length
pub fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    if full_name.chars().count() < MIN_FULL_NAME_LENGTH {
        return Err(ValidationError::new("full_name_too_short"));
    }
    if full_name.chars().count() > MAX_FULL_NAME_LENGTH {
        return Err(ValidationError::new("full_name_too_long"));
    }
    Ok(())
}

/// Validate project title
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title_empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::new("title_too_long"));
    }
    Ok(())
}

/// Validate project location (optional field, empty allowed)
pub fn validate_location(location: &str) -> Result<(), ValidationError> {
    if location.chars().count() > MAX_LOCATION_LENGTH {
        return Err(ValidationError::new("location_too_long"));
    }
    Ok(())
}

/// Validate project description (optional field, empty allowed)
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::new("description_too_long"));
    }
    Ok(())
}

/// Validate project category membership
pub fn validate_project_type(project_type: &str) -> Result<(), ValidationError> {
    if !PROJECT_TYPES.contains(&project_type) {
        return Err(ValidationError::new("project_type_invalid"));
    }
    Ok(())
}

/// Validate an OTP code: exactly six ASCII digits
pub fn validate_otp(token: &str) -> Result<(), ValidationError> {
    if token.len() != OTP_LENGTH || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new("otp_invalid_format"));
    }
    Ok(())
}

/// Validate a review rating (1..=5 stars)
pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::new("rating_out_of_range"));
    }
    Ok(())
}

/// Translate a validator error code into the user-facing message.
pub fn error_message(code: &str, lang: Lang) -> &'static str {
    let (vi, en) = match code {
        "email_invalid" => ("Email không hợp lệ", "Invalid email"),
        "username_too_short" => (
            "Username phải có ít nhất 3 ký tự",
            "Username must be at least 3 characters",
        ),
        "username_too_long" => (
            "Username không được vượt quá 20 ký tự",
            "Username must not exceed 20 characters",
        ),
        "username_invalid_chars" => (
            "Username chỉ được chứa chữ, số, dấu chấm, gạch ngang và gạch dưới",
            "Username may only contain letters, digits, dots, hyphens and underscores",
        ),
        "password_too_short" => (
            "Mật khẩu phải có ít nhất 8 ký tự",
            "Password must be at least 8 characters",
        ),
        "password_too_long" => (
            "Mật khẩu quá dài",
            "Password is too long",
        ),
        "full_name_too_short" => (
            "Tên phải có ít nhất 3 ký tự",
            "Name must be at least 3 characters",
        ),
        "full_name_too_long" => (
            "Tên không được vượt quá 50 ký tự",
            "Name must not exceed 50 characters",
        ),
        "title_empty" => (
            "Tên dự án không được để trống",
            "Project name must not be empty",
        ),
        "title_too_long" => (
            "Tên dự án không được vượt quá 200 ký tự",
            "Project name must not exceed 200 characters",
        ),
        "location_too_long" => (
            "Địa điểm không được vượt quá 200 ký tự",
            "Location must not exceed 200 characters",
        ),
        "description_too_long" => (
            "Mô tả không được vượt quá 5000 ký tự",
            "Description must not exceed 5000 characters",
        ),
        "project_type_invalid" => (
            "Vui lòng chọn phân loại dự án",
            "Please choose a project category",
        ),
        "start_date_missing" => (
            "Vui lòng chọn thời gian bắt đầu",
            "Please choose a start date",
        ),
        "terms_not_accepted" => (
            "Bạn phải đồng ý với chính sách",
            "You must agree to the policy",
        ),
        "otp_invalid_format" => (
            "Mã OTP phải có 6 chữ số",
            "The OTP code must be 6 digits",
        ),
        "password_mismatch" => (
            "Mật khẩu xác nhận không khớp",
            "Password confirmation does not match",
        ),
        "rating_out_of_range" => (
            "Đánh giá phải từ 1 đến 5 sao",
            "Rating must be between 1 and 5 stars",
        ),
        _ => ("Giá trị không hợp lệ", "Invalid value"),
    };

    match lang {
        Lang::Vi => vi,
        Lang::En => en,
    }
}

/// Per-field validation errors, serialized as a flat `{field: message}` map
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one field validator; the first error per field wins.
    pub fn check(&mut self, field: &str, result: Result<(), ValidationError>, lang: Lang) {
        if let Err(err) = result {
            self.0
                .entry(field.to_string())
                .or_insert_with(|| error_message(err.code.as_ref(), lang).to_string());
        }
    }

    /// Record an error by code directly.
    pub fn add(&mut self, field: &str, code: &str, lang: Lang) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| error_message(code, lang).to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username_bounds() {
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(21)).is_err());
        assert!(validate_username("nguyen.van-a").is_ok());
        assert!(validate_username("nguyen van").is_err());
    }

    #[test]
    fn test_validate_password_bounds() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("1234567").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_validate_project_type() {
        assert!(validate_project_type("website").is_ok());
        assert!(validate_project_type("mobile-app").is_ok());
        assert!(validate_project_type("game").is_err());
    }

    #[test]
    fn test_validate_otp_format() {
        assert!(validate_otp("123456").is_ok());
        assert!(validate_otp("12345").is_err());
        assert!(validate_otp("12345a").is_err());
    }

    #[test]
    fn test_field_errors_first_error_wins() {
        let mut errors = FieldErrors::new();
        errors.check("username", validate_username("ab"), Lang::Vi);
        errors.check("username", validate_username(&"a".repeat(30)), Lang::Vi);

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["username"], "Username phải có ít nhất 3 ký tự");
    }

    #[test]
    fn test_field_errors_localized() {
        let mut errors = FieldErrors::new();
        errors.check("password", validate_password("short"), Lang::En);

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["password"], "Password must be at least 8 characters");
    }
}
