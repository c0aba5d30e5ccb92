//! Business services
//!
//! Free async functions over the database connection; handlers stay thin.

pub mod admin;
pub mod application;
pub mod notification;
pub mod profile;
pub mod project;
