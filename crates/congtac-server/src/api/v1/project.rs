//! Project endpoints: create, search, dashboard, detail, lifecycle

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use congtac_api::FieldErrors;
use congtac_api::validation;
use congtac_common::MessageKey;
use congtac_common::error::CongtacError;

use super::request_lang;
use crate::model::constants::{SEARCH_DEFAULT_LIMIT, SEARCH_MAX_LIMIT};
use crate::model::{ApiResponse, AppState};
use crate::secured;
use crate::secured::{Secured, maybe_current_user};
use crate::service::project;

#[derive(Debug, Deserialize)]
struct CreateProjectParam {
    project_name: String,
    location: Option<String>,
    category: String,
    start_date: String,
    description: Option<String>,
    cover_image_url: Option<String>,
    #[serde(default)]
    terms: bool,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    milestones: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchParam {
    q: Option<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

#[post("/projects")]
async fn create(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Json<CreateProjectParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(
        Secured::builder(&req, &data, "projects")
            .login_message(MessageKey::LoginRequiredToCreateProject)
            .build(),
        lang
    );

    let mut errors = FieldErrors::new();
    errors.check(
        "project_name",
        validation::validate_title(&params.project_name),
        lang,
    );
    errors.check(
        "location",
        validation::validate_location(params.location.as_deref().unwrap_or_default()),
        lang,
    );
    errors.check(
        "category",
        validation::validate_project_type(&params.category),
        lang,
    );
    errors.check(
        "description",
        validation::validate_description(params.description.as_deref().unwrap_or_default()),
        lang,
    );
    if params.start_date.trim().is_empty() {
        errors.add("start_date", "start_date_missing", lang);
    }
    if !params.terms {
        errors.add("terms", "terms_not_accepted", lang);
    }
    if !errors.is_empty() {
        return ApiResponse::http_fail_with(400, MessageKey::ProjectInvalid, lang, errors);
    }

    let params = params.into_inner();
    let input = project::CreateProjectInput {
        title: params.project_name,
        description: params.description.filter(|d| !d.is_empty()),
        location: params.location.filter(|l| !l.is_empty()),
        project_type: params.category,
        start_date: params.start_date,
        cover_image_url: params.cover_image_url.filter(|u| !u.is_empty()),
        skills: params.skills,
        milestones: params.milestones,
    };

    match project::create(data.db(), current.user_id, input).await {
        Ok(project_id) => ApiResponse::http_ok(
            serde_json::json!({ "project_id": project_id }),
            MessageKey::ProjectCreated,
            lang,
        ),
        Err(e) => {
            tracing::error!("Failed to create project for '{}': {}", current.username, e);
            ApiResponse::http_fail(500, MessageKey::ProjectCreateFailed, lang)
        }
    }
}

#[get("/projects/search")]
async fn search(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Query<SearchParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);

    let query = params.q.clone().unwrap_or_default();
    let limit = params
        .limit
        .unwrap_or(SEARCH_DEFAULT_LIMIT)
        .min(SEARCH_MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    match project::search(data.db(), &query, limit, offset).await {
        Ok(result) => ApiResponse::http_ok(result, MessageKey::SearchSuccess, lang),
        Err(e) => {
            tracing::error!("Failed to search projects: {}", e);
            ApiResponse::http_fail(500, MessageKey::SearchFailed, lang)
        }
    }
}

#[get("/projects/my")]
async fn my_projects(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(Secured::builder(&req, &data, "projects/my").build(), lang);

    match project::my_projects(data.db(), current.user_id).await {
        Ok(result) => ApiResponse::http_ok(result, MessageKey::ProjectListSuccess, lang),
        Err(e) => {
            tracing::error!("Failed to load projects for '{}': {}", current.username, e);
            ApiResponse::http_fail(500, MessageKey::GenericError, lang)
        }
    }
}

#[get("/projects/{project_id}")]
async fn detail(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let project_id = path.into_inner();

    if project_id <= 0 {
        return ApiResponse::http_fail(400, MessageKey::ProjectIdInvalid, lang);
    }

    let current_user = maybe_current_user(&req, &data).await.map(|u| u.user_id);

    match project::detail(data.db(), project_id, current_user).await {
        Ok(Some(result)) => ApiResponse::http_ok(result, MessageKey::Ok, lang),
        Ok(None) => ApiResponse::http_fail(404, MessageKey::ProjectNotFound, lang),
        Err(e) => {
            tracing::error!("Failed to load project {}: {}", project_id, e);
            ApiResponse::http_fail(500, MessageKey::GenericError, lang)
        }
    }
}

#[delete("/projects/{project_id}")]
async fn delete(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(Secured::builder(&req, &data, "projects").build(), lang);

    let project_id = path.into_inner();
    if project_id <= 0 {
        return ApiResponse::http_fail(400, MessageKey::ProjectIdInvalid, lang);
    }

    match project::soft_delete(data.db(), project_id, current.user_id).await {
        Ok(()) => ApiResponse::http_message(MessageKey::ProjectDeleted, lang),
        Err(err) => match err.downcast_ref() {
            Some(CongtacError::ProjectNotExist(_)) => {
                ApiResponse::http_fail(404, MessageKey::ProjectNotFound, lang)
            }
            Some(CongtacError::AccessDenied(_)) => {
                ApiResponse::http_fail(403, MessageKey::ProjectDeleteForbidden, lang)
            }
            _ => {
                tracing::error!("Failed to delete project {}: {}", project_id, err);
                ApiResponse::http_fail(500, MessageKey::ProjectDeleteFailed, lang)
            }
        },
    }
}

#[put("/projects/{project_id}/complete")]
async fn complete(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(Secured::builder(&req, &data, "projects").build(), lang);

    let project_id = path.into_inner();
    if project_id <= 0 {
        return ApiResponse::http_fail(400, MessageKey::ProjectIdInvalid, lang);
    }

    match project::complete(data.db(), project_id, current.user_id).await {
        Ok(()) => ApiResponse::http_message(MessageKey::ProjectCompleted, lang),
        Err(err) => match err.downcast_ref() {
            Some(CongtacError::ProjectNotExist(_)) => {
                ApiResponse::http_fail(404, MessageKey::ProjectNotFound, lang)
            }
            Some(CongtacError::AccessDenied(_)) => {
                ApiResponse::http_fail(403, MessageKey::Forbidden, lang)
            }
            Some(CongtacError::IllegalArgument(_)) => {
                ApiResponse::http_fail(400, MessageKey::ProjectInvalid, lang)
            }
            _ => {
                tracing::error!("Failed to complete project {}: {}", project_id, err);
                ApiResponse::http_fail(500, MessageKey::GenericError, lang)
            }
        },
    }
}
