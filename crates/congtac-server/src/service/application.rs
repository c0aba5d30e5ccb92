//! Application service
//!
//! Submission and the owner-side approve/reject workflow.

use chrono::Utc;
use congtac_common::error::CongtacError;
use congtac_common::{
    APPLICATION_STATUS_APPROVED, APPLICATION_STATUS_PENDING, APPLICATION_STATUS_REJECTED,
    MEMBER_ROLE_COLLABORATOR, PROJECT_STATUS_APPROVED,
};
use congtac_persistence::entity::{applications, project_members, projects, users};
use congtac_persistence::sea_orm::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::project;

/// Result of a successful submission, with what the notification needs
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub application_id: i64,
    pub owner_id: Uuid,
    pub project_title: String,
}

/// Submit an application.
///
/// The project must exist, be approved, not be the caller's own, and not
/// already have a live application from the caller.
pub async fn submit(
    db: &DatabaseConnection,
    applicant_id: Uuid,
    project_id: i64,
    cover_letter: Option<String>,
    cv_url: Option<String>,
) -> anyhow::Result<SubmitOutcome> {
    let project = match project::find_live(db, project_id).await? {
        Some(p) => p,
        None => return Err(CongtacError::ProjectNotExist(project_id).into()),
    };

    if project.status != PROJECT_STATUS_APPROVED {
        return Err(CongtacError::ProjectNotAcceptingApplications(project_id).into());
    }

    if project.owner_id == applicant_id {
        return Err(CongtacError::OwnerApplication(project_id).into());
    }

    let existing = applications::Entity::find()
        .filter(applications::Column::ProjectId.eq(project_id))
        .filter(applications::Column::ApplicantId.eq(applicant_id))
        .filter(applications::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    if existing.is_some() {
        return Err(CongtacError::ApplicationExists(project_id).into());
    }

    let application = applications::ActiveModel {
        project_id: Set(project_id),
        applicant_id: Set(applicant_id),
        cover_letter: Set(cover_letter),
        cv_url: Set(cv_url),
        status: Set(APPLICATION_STATUS_PENDING.to_string()),
        applied_at: Set(Some(Utc::now())),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(SubmitOutcome {
        application_id: application.id,
        owner_id: project.owner_id,
        project_title: project.title,
    })
}

/// Applicant block on the owner's review screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantInfo {
    pub user_id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationWithApplicant {
    pub id: i64,
    pub status: String,
    pub applied_at: Option<prelude::DateTimeUtc>,
    pub cover_letter: Option<String>,
    pub cv_url: Option<String>,
    pub applicant: Option<ApplicantInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectApplications {
    pub pending: Vec<ApplicationWithApplicant>,
    pub approved: Vec<ApplicationWithApplicant>,
}

/// List a project's live applications, newest first, grouped by status.
pub async fn list_for_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> anyhow::Result<ProjectApplications> {
    let rows = applications::Entity::find()
        .filter(applications::Column::ProjectId.eq(project_id))
        .filter(applications::Column::DeletedAt.is_null())
        .order_by_desc(applications::Column::AppliedAt)
        .all(db)
        .await?;

    if rows.is_empty() {
        return Ok(ProjectApplications::default());
    }

    let applicant_ids = rows.iter().map(|a| a.applicant_id).collect::<Vec<_>>();
    let applicants = users::Entity::find()
        .filter(users::Column::UserId.is_in(applicant_ids))
        .filter(users::Column::DeletedAt.is_null())
        .all(db)
        .await?
        .into_iter()
        .map(|u| {
            (
                u.user_id,
                ApplicantInfo {
                    user_id: u.user_id,
                    username: u.username,
                    full_name: u.full_name,
                    email: u.email,
                    avatar_url: u.avatar_url,
                },
            )
        })
        .collect::<HashMap<_, _>>();

    let mut result = ProjectApplications::default();
    for row in rows {
        let entry = ApplicationWithApplicant {
            id: row.id,
            status: row.status.clone(),
            applied_at: row.applied_at,
            cover_letter: row.cover_letter,
            cv_url: row.cv_url,
            applicant: applicants.get(&row.applicant_id).cloned(),
        };

        if row.status == APPLICATION_STATUS_APPROVED {
            result.approved.push(entry);
        } else {
            result.pending.push(entry);
        }
    }

    Ok(result)
}

/// What the applicant-facing notification needs after a decision
#[derive(Debug, Clone)]
pub struct DecisionOutcome {
    pub applicant_id: Uuid,
    pub project_title: String,
}

/// Approve an application and add the applicant as a collaborator.
///
/// The membership insert is skipped when the applicant is already an active
/// member, which makes repeated approvals harmless.
pub async fn approve(
    db: &DatabaseConnection,
    project_id: i64,
    application_id: i64,
) -> anyhow::Result<DecisionOutcome> {
    let (application, project) = load_application(db, project_id, application_id).await?;

    let mut active: applications::ActiveModel = application.clone().into();
    active.status = Set(APPLICATION_STATUS_APPROVED.to_string());
    active.update(db).await?;

    let already_member = project_members::Entity::find()
        .filter(project_members::Column::ProjectId.eq(project_id))
        .filter(project_members::Column::UserId.eq(application.applicant_id))
        .filter(project_members::Column::DeletedAt.is_null())
        .filter(project_members::Column::LeftAt.is_null())
        .one(db)
        .await?
        .is_some();

    if !already_member {
        project_members::ActiveModel {
            project_id: Set(project_id),
            user_id: Set(application.applicant_id),
            role: Set(Some(MEMBER_ROLE_COLLABORATOR.to_string())),
            joined_at: Set(Some(Utc::now())),
            left_at: Set(None),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(DecisionOutcome {
        applicant_id: application.applicant_id,
        project_title: project.title,
    })
}

/// Reject an application.
pub async fn reject(
    db: &DatabaseConnection,
    project_id: i64,
    application_id: i64,
) -> anyhow::Result<DecisionOutcome> {
    let (application, project) = load_application(db, project_id, application_id).await?;

    let mut active: applications::ActiveModel = application.clone().into();
    active.status = Set(APPLICATION_STATUS_REJECTED.to_string());
    active.update(db).await?;

    Ok(DecisionOutcome {
        applicant_id: application.applicant_id,
        project_title: project.title,
    })
}

async fn load_application(
    db: &DatabaseConnection,
    project_id: i64,
    application_id: i64,
) -> anyhow::Result<(applications::Model, projects::Model)> {
    let application = applications::Entity::find_by_id(application_id)
        .filter(applications::Column::ProjectId.eq(project_id))
        .filter(applications::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    let application = match application {
        Some(a) => a,
        None => return Err(CongtacError::ApplicationNotExist(application_id).into()),
    };

    let project = match project::find_live(db, project_id).await? {
        Some(p) => p,
        None => return Err(CongtacError::ProjectNotExist(project_id).into()),
    };

    Ok((application, project))
}
