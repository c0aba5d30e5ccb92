//! Entity definitions for all congtac tables

pub mod applications;
pub mod notifications;
pub mod password_resets;
pub mod project_members;
pub mod project_milestones;
pub mod project_skills;
pub mod projects;
pub mod reviews;
pub mod skills;
pub mod user_profiles;
pub mod user_skills;
pub mod users;
