//! Application endpoints: submit and the owner-side review workflow

use actix_web::{HttpRequest, HttpResponse, get, post, put, web};
use serde::Deserialize;

use congtac_auth::service::user;
use congtac_common::MessageKey;
use congtac_common::error::CongtacError;

use super::request_lang;
use crate::model::{ApiResponse, AppState};
use crate::secured;
use crate::secured::Secured;
use crate::service::{application, notification, project};

#[derive(Debug, Deserialize)]
struct SubmitParam {
    project_id: i64,
    cover_letter: Option<String>,
    cv_url: Option<String>,
}

#[post("/applications")]
async fn submit(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Json<SubmitParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(
        Secured::builder(&req, &data, "applications")
            .login_message(MessageKey::LoginRequiredToApply)
            .build(),
        lang
    );

    if params.project_id <= 0 {
        return ApiResponse::http_fail(400, MessageKey::ProjectIdInvalid, lang);
    }

    let outcome = match application::submit(
        data.db(),
        current.user_id,
        params.project_id,
        params.cover_letter.clone().filter(|c| !c.is_empty()),
        params.cv_url.clone().filter(|c| !c.is_empty()),
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(err) => {
            return match err.downcast_ref() {
                Some(CongtacError::ProjectNotExist(_)) => {
                    ApiResponse::http_fail(404, MessageKey::ProjectNotFound, lang)
                }
                Some(CongtacError::ProjectNotAcceptingApplications(_)) => {
                    ApiResponse::http_fail(400, MessageKey::ProjectClosed, lang)
                }
                Some(CongtacError::OwnerApplication(_)) => {
                    ApiResponse::http_fail(400, MessageKey::OwnProjectApplication, lang)
                }
                Some(CongtacError::ApplicationExists(_)) => {
                    ApiResponse::http_fail(400, MessageKey::AlreadyApplied, lang)
                }
                _ => {
                    tracing::error!("Failed to submit application: {}", err);
                    ApiResponse::http_fail(500, MessageKey::ApplicationSubmitFailed, lang)
                }
            };
        }
    };

    // The owner's notification shows the applicant's display name
    let applicant_name = match user::find_by_id(data.db(), current.user_id).await {
        Ok(Some(account)) => account.full_name.unwrap_or_else(|| current.username.clone()),
        _ => current.username.clone(),
    };

    notification::notify_application_received(
        data.db(),
        outcome.owner_id,
        &applicant_name,
        &current.username,
        params.project_id,
        &outcome.project_title,
    )
    .await;

    ApiResponse::http_ok(
        serde_json::json!({ "application_id": outcome.application_id }),
        MessageKey::ApplicationSubmitted,
        lang,
    )
}

#[get("/projects/{project_id}/applications")]
async fn list_for_project(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(
        Secured::builder(&req, &data, "projects/applications").build(),
        lang
    );

    let project_id = path.into_inner();
    if project_id <= 0 {
        return ApiResponse::http_fail(400, MessageKey::ProjectIdInvalid, lang);
    }

    match require_ownership(&data, project_id, &current, lang).await {
        Ok(()) => {}
        Err(response) => return response,
    }

    match application::list_for_project(data.db(), project_id).await {
        Ok(result) => ApiResponse::http_ok(result, MessageKey::ApplicationsListSuccess, lang),
        Err(e) => {
            tracing::error!(
                "Failed to list applications for project {}: {}",
                project_id,
                e
            );
            ApiResponse::http_fail(500, MessageKey::GenericError, lang)
        }
    }
}

#[put("/projects/{project_id}/applications/{application_id}/approve")]
async fn approve(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(
        Secured::builder(&req, &data, "projects/applications").build(),
        lang
    );

    let (project_id, application_id) = path.into_inner();
    if project_id <= 0 {
        return ApiResponse::http_fail(400, MessageKey::ProjectIdInvalid, lang);
    }
    if application_id <= 0 {
        return ApiResponse::http_fail(400, MessageKey::ApplicationIdInvalid, lang);
    }

    match require_ownership(&data, project_id, &current, lang).await {
        Ok(()) => {}
        Err(response) => return response,
    }

    match application::approve(data.db(), project_id, application_id).await {
        Ok(outcome) => {
            notification::notify_application_approved(
                data.db(),
                outcome.applicant_id,
                project_id,
                &outcome.project_title,
            )
            .await;

            ApiResponse::http_message(MessageKey::ApplicationApproved, lang)
        }
        Err(err) => match err.downcast_ref() {
            Some(CongtacError::ApplicationNotExist(_)) => {
                ApiResponse::http_fail(400, MessageKey::ApplicationIdInvalid, lang)
            }
            _ => {
                tracing::error!("Failed to approve application {}: {}", application_id, err);
                ApiResponse::http_fail(500, MessageKey::ApplicationApproveFailed, lang)
            }
        },
    }
}

#[put("/projects/{project_id}/applications/{application_id}/reject")]
async fn reject(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(
        Secured::builder(&req, &data, "projects/applications").build(),
        lang
    );

    let (project_id, application_id) = path.into_inner();
    if project_id <= 0 {
        return ApiResponse::http_fail(400, MessageKey::ProjectIdInvalid, lang);
    }
    if application_id <= 0 {
        return ApiResponse::http_fail(400, MessageKey::ApplicationIdInvalid, lang);
    }

    match require_ownership(&data, project_id, &current, lang).await {
        Ok(()) => {}
        Err(response) => return response,
    }

    match application::reject(data.db(), project_id, application_id).await {
        Ok(outcome) => {
            notification::notify_application_rejected(
                data.db(),
                outcome.applicant_id,
                project_id,
                &outcome.project_title,
            )
            .await;

            ApiResponse::http_message(MessageKey::ApplicationRejected, lang)
        }
        Err(err) => match err.downcast_ref() {
            Some(CongtacError::ApplicationNotExist(_)) => {
                ApiResponse::http_fail(400, MessageKey::ApplicationIdInvalid, lang)
            }
            _ => {
                tracing::error!("Failed to reject application {}: {}", application_id, err);
                ApiResponse::http_fail(500, MessageKey::ApplicationRejectFailed, lang)
            }
        },
    }
}

/// Application review is owner-only, even for admins.
async fn require_ownership(
    data: &web::Data<AppState>,
    project_id: i64,
    current: &congtac_auth::model::CurrentUser,
    lang: congtac_common::Lang,
) -> Result<(), HttpResponse> {
    match project::find_live(data.db(), project_id).await {
        Ok(Some(project)) if project.owner_id == current.user_id => Ok(()),
        Ok(Some(_)) => Err(ApiResponse::http_fail(403, MessageKey::Forbidden, lang)),
        Ok(None) => Err(ApiResponse::http_fail(404, MessageKey::ProjectNotFound, lang)),
        Err(e) => {
            tracing::error!("Failed to load project {}: {}", project_id, e);
            Err(ApiResponse::http_fail(500, MessageKey::GenericError, lang))
        }
    }
}
