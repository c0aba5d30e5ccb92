//! Authentication and account models

use jsonwebtoken::errors::ErrorKind;
use sea_orm::prelude::DateTimeUtc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use congtac_persistence::entity::users;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const TOKEN_PREFIX: &str = "Bearer ";
pub const ACCESS_TOKEN: &str = "accessToken";

/// Default session token lifetime (seconds)
pub const DEFAULT_TOKEN_EXPIRE_SECONDS: i64 = 18000;

/// Lifetime of the token handed out after OTP verification (seconds)
pub const RESET_TOKEN_EXPIRE_SECONDS: i64 = 900;

/// OTP validity window (seconds)
pub const OTP_EXPIRE_SECONDS: i64 = 600;

/// JWT payload; `sub` carries the account's user_id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtPayload {
    pub sub: String,
    pub exp: i64,
}

/// Auth context passed through request extensions
#[derive(Debug, Default, Clone)]
pub struct AuthContext {
    /// user_id from the token subject, empty when unauthenticated
    pub sub: String,
    /// The raw token, kept so logout can invalidate the decode cache
    pub token: Option<String>,
    pub jwt_error: Option<jsonwebtoken::errors::Error>,
    pub token_provided: bool,
}

impl AuthContext {
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    pub fn jwt_error_string(&self) -> String {
        if let Some(e) = &self.jwt_error {
            match e.kind() {
                ErrorKind::ExpiredSignature => "token expired!".to_string(),
                _ => e.to_string(),
            }
        } else {
            String::default()
        }
    }
}

/// The resolved caller of a secured endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == congtac_common::ROLE_ADMIN
    }
}

impl From<&users::Model> for CurrentUser {
    fn from(value: &users::Model) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username.clone(),
            role: value.role.clone(),
        }
    }
}

/// Account row shaped for the admin console listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub avatar_url: Option<String>,
    pub created_at: Option<DateTimeUtc>,
    pub locked: bool,
}

impl From<users::Model> for UserSummary {
    fn from(value: users::Model) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            email: value.email,
            full_name: value.full_name,
            role: value.role,
            avatar_url: value.avatar_url,
            created_at: value.created_at,
            locked: value.deleted_at.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_context_user_id_parsing() {
        let mut ctx = AuthContext::default();
        assert!(ctx.user_id().is_none());

        let id = Uuid::new_v4();
        ctx.sub = id.to_string();
        assert_eq!(ctx.user_id(), Some(id));

        ctx.sub = "not-a-uuid".to_string();
        assert!(ctx.user_id().is_none());
    }

    #[test]
    fn test_current_user_is_admin() {
        let user = CurrentUser {
            user_id: Uuid::new_v4(),
            username: "mod".to_string(),
            role: congtac_common::ROLE_ADMIN.to_string(),
        };
        assert!(user.is_admin());

        let user = CurrentUser {
            role: congtac_common::ROLE_USER.to_string(),
            ..user
        };
        assert!(!user.is_admin());
    }
}
