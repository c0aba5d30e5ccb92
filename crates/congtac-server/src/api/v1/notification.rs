//! Notification endpoints

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;

use congtac_common::MessageKey;

use super::request_lang;
use crate::model::{ApiResponse, AppState};
use crate::secured;
use crate::secured::Secured;
use crate::service::notification;

#[derive(Debug, Deserialize)]
struct MarkReadParam {
    notification_id: Option<i64>,
}

#[get("/notifications")]
async fn list(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(Secured::builder(&req, &data, "notifications").build(), lang);

    match notification::list_for_user(data.db(), current.user_id, lang).await {
        Ok(result) => ApiResponse::http_ok(result, MessageKey::NotificationsFetchSuccess, lang),
        Err(e) => {
            tracing::error!(
                "Failed to list notifications for '{}': {}",
                current.username,
                e
            );
            ApiResponse::http_fail(500, MessageKey::GenericError, lang)
        }
    }
}

#[post("/notifications/read")]
async fn mark_read(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Json<MarkReadParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(Secured::builder(&req, &data, "notifications").build(), lang);

    let Some(notification_id) = params.notification_id else {
        return ApiResponse::http_fail(400, MessageKey::NotificationIdRequired, lang);
    };

    match notification::mark_read(data.db(), current.user_id, notification_id).await {
        Ok(()) => ApiResponse::http_message(MessageKey::NotificationRead, lang),
        Err(e) => {
            tracing::error!("Failed to mark notification {} read: {}", notification_id, e);
            ApiResponse::http_fail(500, MessageKey::NotificationUpdateFailed, lang)
        }
    }
}
