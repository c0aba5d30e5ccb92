//! Profile endpoints: public profiles, the editor, skills, and reviews

use actix_web::{HttpRequest, HttpResponse, get, post, put, web};
use serde::Deserialize;
use uuid::Uuid;

use congtac_api::FieldErrors;
use congtac_api::validation;
use congtac_common::MessageKey;
use congtac_common::error::CongtacError;

use super::request_lang;
use crate::model::{ApiResponse, AppState};
use crate::secured;
use crate::secured::{Secured, maybe_current_user};
use crate::service::profile;

#[derive(Debug, Deserialize)]
struct UpdateProfileParam {
    full_name: Option<String>,
    avatar_url: Option<String>,
    phone: Option<String>,
    bio: Option<String>,
    address: Option<String>,
    portfolio_url: Option<String>,
    interests: Option<String>,
    experiences: Option<String>,
    projects: Option<String>,
    certifications: Option<String>,
    #[serde(default)]
    skill_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct SubmitReviewParam {
    project_id: i64,
    reviewee_id: Uuid,
    rating: i32,
    comment: Option<String>,
}

#[get("/users/featured")]
async fn featured(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    let lang = request_lang(&req, &data);

    match profile::featured(data.db()).await {
        Ok(result) => ApiResponse::http_ok(result, MessageKey::Ok, lang),
        Err(e) => {
            tracing::error!("Failed to load featured profiles: {}", e);
            ApiResponse::http_fail(500, MessageKey::GenericError, lang)
        }
    }
}

#[get("/users/{username}")]
async fn by_username(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let username = path.into_inner();

    let current_user = maybe_current_user(&req, &data).await.map(|u| u.user_id);

    match profile::get_by_username(data.db(), &username, current_user).await {
        Ok(Some(result)) => ApiResponse::http_ok(result, MessageKey::ProfileFetchSuccess, lang),
        Ok(None) => ApiResponse::http_fail(404, MessageKey::UserNotFound, lang),
        Err(e) => {
            tracing::error!("Failed to load profile '{}': {}", username, e);
            ApiResponse::http_fail(500, MessageKey::GenericError, lang)
        }
    }
}

#[put("/profile")]
async fn update(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Json<UpdateProfileParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(Secured::builder(&req, &data, "profile").build(), lang);

    if let Some(full_name) = &params.full_name {
        let mut errors = FieldErrors::new();
        errors.check("full_name", validation::validate_full_name(full_name), lang);
        if !errors.is_empty() {
            return ApiResponse::http_fail_with(400, MessageKey::ProfileUpdateFailed, lang, errors);
        }
    }

    let params = params.into_inner();
    let input = profile::UpdateProfileInput {
        full_name: params.full_name,
        avatar_url: params.avatar_url,
        phone: params.phone,
        bio: params.bio,
        address: params.address,
        portfolio_url: params.portfolio_url,
        interests: params.interests,
        experiences: params.experiences,
        projects: params.projects,
        certifications: params.certifications,
        skill_ids: params.skill_ids,
    };

    match profile::update(data.db(), current.user_id, input).await {
        Ok(username) => ApiResponse::http_ok(
            serde_json::json!({ "username": username }),
            MessageKey::ProfileUpdated,
            lang,
        ),
        Err(err) => match err.downcast_ref() {
            Some(CongtacError::UserNotExist(_)) => {
                ApiResponse::http_fail(404, MessageKey::UserNotFound, lang)
            }
            _ => {
                tracing::error!("Failed to update profile '{}': {}", current.username, err);
                ApiResponse::http_fail(500, MessageKey::ProfileUpdateFailed, lang)
            }
        },
    }
}

#[get("/skills")]
async fn skills(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    let lang = request_lang(&req, &data);

    match profile::all_skills(data.db()).await {
        Ok(result) => ApiResponse::http_ok(result, MessageKey::Ok, lang),
        Err(e) => {
            tracing::error!("Failed to load skills: {}", e);
            ApiResponse::http_fail(500, MessageKey::GenericError, lang)
        }
    }
}

#[post("/reviews")]
async fn submit_review(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Json<SubmitReviewParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(Secured::builder(&req, &data, "reviews").build(), lang);

    let mut errors = FieldErrors::new();
    errors.check("rating", validation::validate_rating(params.rating), lang);
    if !errors.is_empty() {
        return ApiResponse::http_fail_with(400, MessageKey::ReviewInvalid, lang, errors);
    }

    let input = profile::SubmitReviewInput {
        project_id: params.project_id,
        reviewee_id: params.reviewee_id,
        rating: params.rating,
        comment: params.comment.clone().filter(|c| !c.is_empty()),
    };

    match profile::submit_review(data.db(), current.user_id, input).await {
        Ok(review_id) => ApiResponse::http_ok(
            serde_json::json!({ "review_id": review_id }),
            MessageKey::ReviewSubmitted,
            lang,
        ),
        Err(err) => match err.downcast_ref() {
            Some(CongtacError::ProjectNotExist(_)) => {
                ApiResponse::http_fail(404, MessageKey::ProjectNotFound, lang)
            }
            Some(CongtacError::AccessDenied(_)) => {
                ApiResponse::http_fail(403, MessageKey::Forbidden, lang)
            }
            Some(CongtacError::IllegalArgument(_)) => {
                ApiResponse::http_fail(400, MessageKey::ReviewInvalid, lang)
            }
            _ => {
                tracing::error!("Failed to submit review: {}", err);
                ApiResponse::http_fail(500, MessageKey::GenericError, lang)
            }
        },
    }
}
