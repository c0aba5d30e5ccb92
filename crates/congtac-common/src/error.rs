//! Error types and error codes for congtac
//!
//! This module defines:
//! - `CongtacError`: Application-specific error enum
//! - `AppError`: Wrapper for integration with web frameworks
//! - `ErrorCode`: Structured error codes for API responses

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum CongtacError {
    #[error("caused: {0}")]
    IllegalArgument(String),

    #[error("user '{0}' not exist!")]
    UserNotExist(String),

    #[error("username '{0}' already taken")]
    UsernameTaken(String),

    #[error("email '{0}' already registered")]
    EmailTaken(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account '{0}' is locked")]
    AccountLocked(String),

    #[error("authentication error: {0}")]
    AuthError(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("project {0} not exist")]
    ProjectNotExist(i64),

    #[error("project {0} is not accepting applications")]
    ProjectNotAcceptingApplications(i64),

    #[error("owner cannot apply to own project {0}")]
    OwnerApplication(i64),

    #[error("application already submitted for project {0}")]
    ApplicationExists(i64),

    #[error("application {0} not exist")]
    ApplicationNotExist(i64),

    #[error("otp code invalid or expired")]
    OtpInvalid,

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

/// Wrapper for application errors
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl AppError {
    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }

    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

// General success and error codes
pub const SUCCESS: ErrorCode<'static> = ErrorCode {
    code: 0,
    message: "success",
};

pub const PARAMETER_MISSING: ErrorCode<'static> = ErrorCode {
    code: 10000,
    message: "parameter missing",
};

pub const ACCESS_DENIED: ErrorCode<'static> = ErrorCode {
    code: 10001,
    message: "access denied",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 10002,
    message: "parameter validate error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 10003,
    message: "resource not found",
};

pub const RESOURCE_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: 10004,
    message: "resource conflict",
};

// Auth errors
pub const INVALID_CREDENTIALS: ErrorCode<'static> = ErrorCode {
    code: 20000,
    message: "invalid credentials",
};

pub const USER_ALREADY_EXISTS: ErrorCode<'static> = ErrorCode {
    code: 20001,
    message: "user already exists",
};

pub const ACCOUNT_LOCKED: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "account locked",
};

pub const OTP_INVALID: ErrorCode<'static> = ErrorCode {
    code: 20003,
    message: "otp invalid or expired",
};

// Project errors
pub const PROJECT_NOT_EXIST: ErrorCode<'static> = ErrorCode {
    code: 21000,
    message: "project not exist",
};

pub const PROJECT_NOT_ACCEPTING: ErrorCode<'static> = ErrorCode {
    code: 21001,
    message: "project not accepting applications",
};

// Application errors
pub const APPLICATION_EXISTS: ErrorCode<'static> = ErrorCode {
    code: 22000,
    message: "application already submitted",
};

pub const APPLICATION_NOT_EXIST: ErrorCode<'static> = ErrorCode {
    code: 22001,
    message: "application not exist",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_congtac_error_display() {
        let err = CongtacError::IllegalArgument("invalid param".to_string());
        assert_eq!(format!("{}", err), "caused: invalid param");

        let err = CongtacError::UserNotExist("testuser".to_string());
        assert_eq!(format!("{}", err), "user 'testuser' not exist!");

        let err = CongtacError::ApplicationExists(42);
        assert_eq!(
            format!("{}", err),
            "application already submitted for project 42"
        );
    }

    #[test]
    fn test_error_code_constants() {
        assert_eq!(SUCCESS.code, 0);
        assert_eq!(SUCCESS.message, "success");
        assert_eq!(INVALID_CREDENTIALS.code, 20000);
        assert_eq!(ACCESS_DENIED.code, 10001);
    }

    #[test]
    fn test_app_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("test error");
        let app_err = AppError::from(anyhow_err);
        assert_eq!(format!("{}", app_err), "test error");
    }

    #[test]
    fn test_app_error_downcast() {
        let err: anyhow::Error = CongtacError::OtpInvalid.into();
        let app_err = AppError::from(err);
        assert!(matches!(
            app_err.downcast_ref::<CongtacError>(),
            Some(CongtacError::OtpInvalid)
        ));
    }
}
