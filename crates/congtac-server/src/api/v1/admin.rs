//! Moderation endpoints, all behind the admin role

use actix_web::{HttpRequest, HttpResponse, get, put, web};
use serde::Deserialize;
use uuid::Uuid;

use congtac_api::Page;
use congtac_auth::model::UserSummary;
use congtac_auth::service::user;
use congtac_common::MessageKey;
use congtac_common::error::CongtacError;

use super::request_lang;
use crate::model::{ApiResponse, AppState};
use crate::secured;
use crate::secured::Secured;
use crate::service::{admin, notification};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserPageParam {
    username: Option<String>,
    page_no: Option<u64>,
    page_size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UpdateUserParam {
    user_id: Uuid,
    role: Option<String>,
    locked: Option<bool>,
}

#[get("/admin/users")]
async fn list_users(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Query<UserPageParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    secured!(
        Secured::builder(&req, &data, "admin/users").admin().build(),
        lang
    );

    let username = params.username.clone().unwrap_or_default();
    let page_no = params.page_no.unwrap_or(1).max(1);
    let page_size = params.page_size.unwrap_or(20).clamp(1, 100);

    match user::search_page(data.db(), &username, page_no, page_size).await {
        Ok(page) => {
            ApiResponse::<Page<UserSummary>>::http_ok(page, MessageKey::UsersListSuccess, lang)
        }
        Err(e) => {
            tracing::error!("Failed to list users: {}", e);
            ApiResponse::http_fail(500, MessageKey::GenericError, lang)
        }
    }
}

#[put("/admin/users")]
async fn update_user(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Json<UpdateUserParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(
        Secured::builder(&req, &data, "admin/users").admin().build(),
        lang
    );

    if params.role.is_none() && params.locked.is_none() {
        return ApiResponse::http_fail(400, MessageKey::MissingFields, lang);
    }

    // An admin cannot lock or demote their own account
    if params.user_id == current.user_id {
        return ApiResponse::http_fail(403, MessageKey::Forbidden, lang);
    }

    match user::update_account(
        data.db(),
        params.user_id,
        params.role.clone(),
        params.locked,
    )
    .await
    {
        Ok(()) => ApiResponse::http_message(MessageKey::UserUpdated, lang),
        Err(err) => match err.downcast_ref() {
            Some(CongtacError::UserNotExist(_)) => {
                ApiResponse::http_fail(404, MessageKey::UserNotFound, lang)
            }
            _ => {
                tracing::error!("Failed to update user '{}': {}", params.user_id, err);
                ApiResponse::http_fail(500, MessageKey::UserUpdateFailed, lang)
            }
        },
    }
}

#[get("/admin/projects/pending")]
async fn pending_projects(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    let lang = request_lang(&req, &data);
    secured!(
        Secured::builder(&req, &data, "admin/projects")
            .admin()
            .build(),
        lang
    );

    match admin::pending_projects(data.db()).await {
        Ok(result) => ApiResponse::http_ok(result, MessageKey::PendingProjectsSuccess, lang),
        Err(e) => {
            tracing::error!("Failed to list pending projects: {}", e);
            ApiResponse::http_fail(500, MessageKey::GenericError, lang)
        }
    }
}

#[put("/admin/projects/{project_id}/approve")]
async fn approve_project(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    secured!(
        Secured::builder(&req, &data, "admin/projects")
            .admin()
            .build(),
        lang
    );

    let project_id = path.into_inner();
    if project_id <= 0 {
        return ApiResponse::http_fail(400, MessageKey::ProjectIdInvalid, lang);
    }

    match admin::approve_project(data.db(), project_id).await {
        Ok(outcome) => {
            notification::notify_project_approved(
                data.db(),
                outcome.owner_id,
                project_id,
                &outcome.project_title,
            )
            .await;

            ApiResponse::http_message(MessageKey::ProjectApproved, lang)
        }
        Err(err) => match err.downcast_ref() {
            Some(CongtacError::ProjectNotExist(_)) => {
                ApiResponse::http_fail(404, MessageKey::ProjectNotFound, lang)
            }
            _ => {
                tracing::error!("Failed to approve project {}: {}", project_id, err);
                ApiResponse::http_fail(500, MessageKey::GenericError, lang)
            }
        },
    }
}

#[put("/admin/projects/{project_id}/reject")]
async fn reject_project(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    secured!(
        Secured::builder(&req, &data, "admin/projects")
            .admin()
            .build(),
        lang
    );

    let project_id = path.into_inner();
    if project_id <= 0 {
        return ApiResponse::http_fail(400, MessageKey::ProjectIdInvalid, lang);
    }

    match admin::reject_project(data.db(), project_id).await {
        Ok(outcome) => {
            notification::notify_project_rejected(
                data.db(),
                outcome.owner_id,
                project_id,
                &outcome.project_title,
            )
            .await;

            ApiResponse::http_message(MessageKey::ProjectRejected, lang)
        }
        Err(err) => match err.downcast_ref() {
            Some(CongtacError::ProjectNotExist(_)) => {
                ApiResponse::http_fail(404, MessageKey::ProjectNotFound, lang)
            }
            _ => {
                tracing::error!("Failed to reject project {}: {}", project_id, err);
                ApiResponse::http_fail(500, MessageKey::GenericError, lang)
            }
        },
    }
}
