//! Congtac Auth - Authentication and account services
//!
//! JWT session tokens, bcrypt credential checks, OTP-based password
//! recovery, and the account queries behind the admin console.

pub mod model;
pub mod service;

pub use model::{AuthContext, CurrentUser, JwtPayload};
