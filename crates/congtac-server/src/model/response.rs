//! HTTP response envelope for the congtac API
//!
//! Every endpoint answers `{success, message, data?, error?}`.

use actix_web::{HttpResponse, HttpResponseBuilder, http::StatusCode};
use congtac_common::{Lang, MessageKey, translate};
use serde::{Deserialize, Serialize};

/// Shared response envelope
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T, message: String) -> Self {
        ApiResponse {
            success: true,
            message: Some(message),
            data: Some(data),
            error: None,
        }
    }

    /// 200 with data and a translated message
    pub fn http_ok(data: T, key: MessageKey, lang: Lang) -> HttpResponse {
        HttpResponse::Ok().json(ApiResponse::ok(data, translate(key, lang).to_string()))
    }
}

impl ApiResponse<()> {
    /// 200 with a translated message and no data
    pub fn http_message(key: MessageKey, lang: Lang) -> HttpResponse {
        HttpResponse::Ok().json(ApiResponse::<()> {
            success: true,
            message: Some(translate(key, lang).to_string()),
            data: None,
            error: None,
        })
    }

    /// Failure with a translated message
    pub fn http_fail(status: u16, key: MessageKey, lang: Lang) -> HttpResponse {
        Self::fail_response(status, translate(key, lang).to_string(), None)
    }

    /// Failure carrying structured error details (e.g. per-field messages)
    pub fn http_fail_with(
        status: u16,
        key: MessageKey,
        lang: Lang,
        error: impl Serialize,
    ) -> HttpResponse {
        let error = serde_json::to_value(error).unwrap_or(serde_json::Value::Null);
        Self::fail_response(status, translate(key, lang).to_string(), Some(error))
    }

    fn fail_response(
        status: u16,
        message: String,
        error: Option<serde_json::Value>,
    ) -> HttpResponse {
        HttpResponseBuilder::new(
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        )
        .json(ApiResponse::<()> {
            success: false,
            message: Some(message),
            data: None,
            error,
        })
    }
}

/// Exception handling utilities for unexpected failures
#[derive(Clone, Debug)]
pub struct ApiException {}

impl ApiException {
    /// Generic 500 with the translated generic message; the raw cause is
    /// escaped into the error field for the console.
    pub fn handle_exception(lang: Lang, cause: String) -> HttpResponse {
        HttpResponse::InternalServerError().json(ApiResponse::<()> {
            success: false,
            message: Some(translate(MessageKey::GenericError, lang).to_string()),
            data: None,
            error: Some(serde_json::Value::String(htmlescape::encode_minimal(
                &cause,
            ))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_omits_absent_fields() {
        let response = ApiResponse::ok(serde_json::json!({"id": 1}), "OK".to_string());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "OK");
        assert_eq!(json["data"]["id"], 1);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_envelope_shape() {
        let response = ApiResponse::<()> {
            success: false,
            message: Some("Dự án không tồn tại".to_string()),
            data: None,
            error: None,
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
    }
}
