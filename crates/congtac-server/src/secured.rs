//! Access control for API handlers
//!
//! Handlers declare their requirements with a `Secured` builder and resolve
//! the caller through the `secured!` macro, which early-returns the proper
//! envelope on missing/expired tokens or insufficient role.

use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use congtac_auth::model::{AuthContext, CurrentUser};
use congtac_auth::service::user;
use congtac_common::{Lang, MessageKey};

use crate::model::{ApiResponse, AppState};

// Security context for API access control
#[derive(Debug, Clone)]
pub struct Secured<'a> {
    pub req: &'a HttpRequest,          // HTTP request reference
    pub data: &'a web::Data<AppState>, // Application state
    pub resource: &'a str,             // Target resource name (for logging)
    pub admin_only: bool,              // Require the admin role
    pub login_message: MessageKey,     // Message for the 401 response
}

impl<'a> Secured<'a> {
    pub fn builder(
        req: &'a HttpRequest,
        data: &'a web::Data<AppState>,
        resource: &'a str,
    ) -> SecuredBuilder<'a> {
        SecuredBuilder::new(req, data, resource)
    }

    /// Resolve the caller or produce the response that ends the request.
    pub async fn resolve(&self, lang: Lang) -> Result<CurrentUser, HttpResponse> {
        let auth_context = self
            .req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .unwrap_or_default();

        if !auth_context.token_provided {
            return Err(ApiResponse::http_fail(401, self.login_message, lang));
        }

        if let Some(err) = &auth_context.jwt_error {
            tracing::debug!(resource = self.resource, error = %err, "JWT validation failed");
            return Err(ApiResponse::http_fail(401, self.login_message, lang));
        }

        let user_id = match auth_context.user_id() {
            Some(id) => id,
            None => return Err(ApiResponse::http_fail(401, self.login_message, lang)),
        };

        let account = match user::find_by_id(self.data.db(), user_id).await {
            Ok(account) => account,
            Err(e) => {
                tracing::error!("Failed to load account '{}': {}", user_id, e);
                return Err(ApiResponse::http_fail(500, MessageKey::GenericError, lang));
            }
        };

        // Locked accounts are soft-deleted and lose access immediately
        let account = match account {
            Some(account) => account,
            None => return Err(ApiResponse::http_fail(401, MessageKey::AccountLocked, lang)),
        };

        let current = CurrentUser::from(&account);

        if self.admin_only && !current.is_admin() {
            return Err(ApiResponse::http_fail(403, MessageKey::AdminOnly, lang));
        }

        Ok(current)
    }
}

#[derive(Debug, Clone)]
pub struct SecuredBuilder<'a> {
    req: &'a HttpRequest,
    data: &'a web::Data<AppState>,
    resource: &'a str,
    admin_only: bool,
    login_message: MessageKey,
}

impl<'a> SecuredBuilder<'a> {
    pub fn new(req: &'a HttpRequest, data: &'a web::Data<AppState>, resource: &'a str) -> Self {
        SecuredBuilder::<'a> {
            req,
            data,
            resource,
            admin_only: false,
            login_message: MessageKey::LoginRequired,
        }
    }

    pub fn admin(mut self) -> Self {
        self.admin_only = true;
        self
    }

    pub fn login_message(mut self, key: MessageKey) -> Self {
        self.login_message = key;
        self
    }

    pub fn build(self) -> Secured<'a> {
        Secured::<'a> {
            req: self.req,
            data: self.data,
            resource: self.resource,
            admin_only: self.admin_only,
            login_message: self.login_message,
        }
    }
}

/// Resolve the authenticated caller or return the failure response.
#[macro_export]
macro_rules! secured {
    ($secured:expr, $lang:expr) => {
        match $secured.resolve($lang).await {
            Ok(user) => user,
            Err(response) => return response,
        }
    };
}

/// Best-effort identification for endpoints that are public but personalise
/// their answer for signed-in callers.
pub async fn maybe_current_user(
    req: &HttpRequest,
    data: &web::Data<AppState>,
) -> Option<CurrentUser> {
    let auth_context = req.extensions().get::<AuthContext>().cloned()?;
    let user_id = auth_context.user_id()?;

    match user::find_by_id(data.db(), user_id).await {
        Ok(Some(account)) => Some(CurrentUser::from(&account)),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Failed to resolve optional caller: {}", e);
            None
        }
    }
}
