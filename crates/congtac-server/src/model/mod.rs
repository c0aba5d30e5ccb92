//! Data models module
//!
//! Configuration, shared application state, the response envelope, and
//! server constants.

pub mod app_state;
pub mod config;
pub mod constants;
pub mod response;

// Re-export commonly used types at the module level
pub use app_state::AppState;
pub use config::Configuration;
pub use constants::*;
pub use response::{ApiException, ApiResponse};
