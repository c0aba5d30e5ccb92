//! Congtac Common - Shared types and utilities
//!
//! This crate provides the foundational types used across all congtac components:
//! - Error types and error codes
//! - The vi/en message catalogue and notification templates
//! - Utility functions

pub mod error;
pub mod i18n;
pub mod utils;

// Re-exports for convenience
pub use error::{AppError, CongtacError, ErrorCode};
pub use i18n::{Lang, MessageKey, translate};
pub use utils::{capitalize, is_valid_identifier, split_lines};

/// Role assigned to every newly registered account
pub const ROLE_USER: &str = "user";

/// Role required for moderation endpoints
pub const ROLE_ADMIN: &str = "admin";

/// Project lifecycle states
pub const PROJECT_STATUS_PENDING: &str = "pending";
pub const PROJECT_STATUS_APPROVED: &str = "approved";
pub const PROJECT_STATUS_COMPLETED: &str = "completed";

/// Application lifecycle states
pub const APPLICATION_STATUS_PENDING: &str = "pending";
pub const APPLICATION_STATUS_APPROVED: &str = "approved";
pub const APPLICATION_STATUS_REJECTED: &str = "rejected";

/// Membership roles within a project
pub const MEMBER_ROLE_OWNER: &str = "owner";
pub const MEMBER_ROLE_COLLABORATOR: &str = "collaborator";

/// Percentage of progress contributed by each milestone
pub const PROGRESS_PER_MILESTONE: u32 = 20;

/// Derive the coarse progress percentage of a project from its milestone count.
///
/// Completed projects always report 100 regardless of milestones.
pub fn project_progress(milestone_count: u64, completed: bool) -> u32 {
    if completed {
        return 100;
    }

    (milestone_count as u32).saturating_mul(PROGRESS_PER_MILESTONE).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_progress_scales_by_milestones() {
        assert_eq!(project_progress(0, false), 0);
        assert_eq!(project_progress(1, false), 20);
        assert_eq!(project_progress(3, false), 60);
        assert_eq!(project_progress(5, false), 100);
        assert_eq!(project_progress(6, false), 100);
    }

    #[test]
    fn test_project_progress_completed_is_always_full() {
        assert_eq!(project_progress(0, true), 100);
        assert_eq!(project_progress(2, true), 100);
    }
}
