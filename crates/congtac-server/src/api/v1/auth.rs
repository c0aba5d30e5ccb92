//! Account endpoints: signup, login, logout, and OTP password recovery

use actix_web::{HttpMessage, HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use congtac_api::FieldErrors;
use congtac_api::validation;
use congtac_auth::model::{
    AUTHORIZATION_HEADER, AuthContext, RESET_TOKEN_EXPIRE_SECONDS, TOKEN_PREFIX,
};
use congtac_auth::service::{otp, token, user};
use congtac_common::error::CongtacError;
use congtac_common::{Lang, MessageKey, ROLE_USER};
use congtac_persistence::entity::users;

use super::request_lang;
use crate::model::{ApiResponse, AppState};
use crate::secured;
use crate::secured::Secured;

#[derive(Debug, Deserialize)]
struct SignupParam {
    email: String,
    username: String,
    password: String,
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct SigninParam {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct ForgotPasswordParam {
    email: String,
}

#[derive(Debug, Deserialize)]
struct VerifyOtpParam {
    email: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct SetPasswordParam {
    password: String,
    confirm_password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResult {
    access_token: String,
    token_ttl: i64,
    global_admin: bool,
    username: String,
}

#[post("/auth/signup")]
async fn signup(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Form<SignupParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);

    let mut errors = FieldErrors::new();
    errors.check("email", validation::validate_email(&params.email), lang);
    errors.check(
        "username",
        validation::validate_username(&params.username),
        lang,
    );
    errors.check(
        "password",
        validation::validate_password(&params.password),
        lang,
    );
    errors.check(
        "full_name",
        validation::validate_full_name(&params.full_name),
        lang,
    );
    if !errors.is_empty() {
        return ApiResponse::http_fail_with(400, MessageKey::SignupInvalid, lang, errors);
    }

    match user::find_by_username(data.db(), &params.username).await {
        Ok(Some(_)) => {
            return ApiResponse::http_fail(400, MessageKey::UsernameTaken, lang);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to check username '{}': {}", params.username, e);
            return ApiResponse::http_fail(500, MessageKey::SignupFailed, lang);
        }
    }

    match user::find_by_email(data.db(), &params.email).await {
        Ok(Some(_)) => {
            return ApiResponse::http_fail(400, MessageKey::EmailTaken, lang);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to check email: {}", e);
            return ApiResponse::http_fail(500, MessageKey::SignupFailed, lang);
        }
    }

    let account = match user::create(
        data.db(),
        &params.username,
        &params.email,
        &params.password,
        &params.full_name,
        ROLE_USER,
    )
    .await
    {
        Ok(account) => account,
        Err(e) => {
            tracing::error!("Failed to create account '{}': {}", params.username, e);
            return ApiResponse::http_fail(500, MessageKey::SignupFailed, lang);
        }
    };

    tracing::info!(username = %account.username, "Account created");

    token_response(&data, &account, MessageKey::SignupSuccess, lang)
}

#[post("/auth/login")]
async fn login(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Form<SigninParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);

    let mut errors = FieldErrors::new();
    errors.check(
        "username",
        validation::validate_username(&params.username),
        lang,
    );
    errors.check(
        "password",
        validation::validate_password(&params.password),
        lang,
    );
    if !errors.is_empty() {
        return ApiResponse::http_fail_with(400, MessageKey::SigninInvalid, lang, errors);
    }

    let account = match user::authenticate(data.db(), &params.username, &params.password).await {
        Ok(account) => account,
        Err(err) => {
            return match err.downcast_ref() {
                Some(CongtacError::InvalidCredentials) => {
                    ApiResponse::http_fail(400, MessageKey::SigninInvalid, lang)
                }
                Some(CongtacError::AccountLocked(_)) => {
                    ApiResponse::http_fail(403, MessageKey::AccountLocked, lang)
                }
                _ => {
                    tracing::error!("Failed to authenticate '{}': {}", params.username, err);
                    ApiResponse::http_fail(500, MessageKey::SigninFailed, lang)
                }
            };
        }
    };

    token_response(&data, &account, MessageKey::SigninSuccess, lang)
}

#[post("/auth/logout")]
async fn logout(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    let lang = request_lang(&req, &data);

    if let Some(context) = req.extensions().get::<AuthContext>()
        && let Some(raw_token) = &context.token
    {
        token::invalidate_token(raw_token);
    }

    ApiResponse::http_message(MessageKey::SignoutSuccess, lang)
}

#[post("/auth/forgot-password")]
async fn forgot_password(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Form<ForgotPasswordParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);

    if validation::validate_email(&params.email).is_err() {
        return ApiResponse::http_fail(400, MessageKey::EmailInvalid, lang);
    }

    let account = match user::find_by_email(data.db(), &params.email).await {
        Ok(Some(account)) => account,
        Ok(None) => return ApiResponse::http_fail(404, MessageKey::EmailNotFound, lang),
        Err(e) => {
            tracing::error!("Failed to look up email: {}", e);
            return ApiResponse::http_fail(500, MessageKey::GenericError, lang);
        }
    };

    let code = match otp::issue(data.db(), account.user_id).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Failed to issue OTP for '{}': {}", account.username, e);
            return ApiResponse::http_fail(500, MessageKey::OtpSendFailed, lang);
        }
    };

    // Mailer boundary: delivery is handled out of process
    tracing::info!(username = %account.username, "Password reset OTP issued, dispatching to mailer");
    tracing::debug!(code = %code, "OTP code (mailer payload)");

    ApiResponse::http_message(MessageKey::OtpSent, lang)
}

#[post("/auth/verify-otp")]
async fn verify_otp(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Json<VerifyOtpParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);

    if validation::validate_email(&params.email).is_err()
        || validation::validate_otp(&params.token).is_err()
    {
        return ApiResponse::http_fail(400, MessageKey::OtpInvalid, lang);
    }

    let account = match user::find_by_email(data.db(), &params.email).await {
        Ok(Some(account)) => account,
        Ok(None) => return ApiResponse::http_fail(400, MessageKey::OtpInvalid, lang),
        Err(e) => {
            tracing::error!("Failed to look up email: {}", e);
            return ApiResponse::http_fail(500, MessageKey::GenericError, lang);
        }
    };

    if let Err(err) = otp::verify(data.db(), account.user_id, &params.token).await {
        return match err.downcast_ref() {
            Some(CongtacError::OtpInvalid) => {
                ApiResponse::http_fail(400, MessageKey::OtpInvalid, lang)
            }
            _ => {
                tracing::error!("Failed to verify OTP for '{}': {}", account.username, err);
                ApiResponse::http_fail(500, MessageKey::GenericError, lang)
            }
        };
    }

    // Short-lived token that only lives long enough to set a new password
    let secret_key = data.configuration.token_secret_key();
    let access_token = match token::encode_jwt_token(
        &account.user_id.to_string(),
        &secret_key,
        RESET_TOKEN_EXPIRE_SECONDS,
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to generate reset token: {}", e);
            return ApiResponse::http_fail(500, MessageKey::GenericError, lang);
        }
    };

    ApiResponse::http_ok(
        serde_json::json!({
            "user_id": account.user_id,
            "access_token": access_token,
            "token_ttl": RESET_TOKEN_EXPIRE_SECONDS,
        }),
        MessageKey::OtpVerified,
        lang,
    )
}

#[post("/auth/set-password")]
async fn set_password(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Json<SetPasswordParam>,
) -> HttpResponse {
    let lang = request_lang(&req, &data);
    let current = secured!(
        Secured::builder(&req, &data, "auth/password")
            .login_message(MessageKey::OtpRequiredBeforeSetPassword)
            .build(),
        lang
    );

    let mut errors = FieldErrors::new();
    errors.check(
        "password",
        validation::validate_password(&params.password),
        lang,
    );
    if params.password != params.confirm_password {
        errors.add("confirm_password", "password_mismatch", lang);
    }
    if !errors.is_empty() {
        return ApiResponse::http_fail_with(400, MessageKey::InvalidInput, lang, errors);
    }

    match user::update_password(data.db(), current.user_id, &params.password).await {
        Ok(()) => ApiResponse::http_message(MessageKey::PasswordSet, lang),
        Err(e) => {
            tracing::error!("Failed to set password for '{}': {}", current.username, e);
            ApiResponse::http_fail(500, MessageKey::PasswordSetFailed, lang)
        }
    }
}

/// Issue a session token and answer with the login payload, mirroring the
/// token in the Authorization response header.
fn token_response(
    data: &web::Data<AppState>,
    account: &users::Model,
    message: MessageKey,
    lang: Lang,
) -> HttpResponse {
    let secret_key = data.configuration.token_secret_key();
    let token_expire_seconds = data.configuration.auth_token_expire_seconds();

    let access_token = match token::encode_jwt_token(
        &account.user_id.to_string(),
        &secret_key,
        token_expire_seconds,
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to generate token: {}", e);
            return ApiResponse::http_fail(500, MessageKey::GenericError, lang);
        }
    };

    let login_result = LoginResult {
        access_token: access_token.clone(),
        token_ttl: token_expire_seconds,
        global_admin: account.role == congtac_common::ROLE_ADMIN,
        username: account.username.clone(),
    };

    HttpResponse::Ok()
        .append_header((
            AUTHORIZATION_HEADER,
            format!("{}{}", TOKEN_PREFIX, access_token),
        ))
        .json(ApiResponse::ok(
            login_result,
            congtac_common::translate(message, lang).to_string(),
        ))
}
