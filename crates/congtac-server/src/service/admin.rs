//! Moderation service
//!
//! Pending-project review queue and the approve/reject decisions.

use std::collections::HashMap;

use chrono::Utc;
use congtac_common::error::CongtacError;
use congtac_common::{PROJECT_STATUS_APPROVED, PROJECT_STATUS_PENDING};
use congtac_persistence::entity::{projects, users};
use congtac_persistence::sea_orm::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::project;

/// Owner block on the moderation queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerBrief {
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingProject {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: Option<prelude::DateTimeUtc>,
    pub owner_id: Uuid,
    pub owner: Option<OwnerBrief>,
}

/// Pending projects with owner info, newest first.
pub async fn pending_projects(db: &DatabaseConnection) -> anyhow::Result<Vec<PendingProject>> {
    let rows = projects::Entity::find()
        .filter(projects::Column::Status.eq(PROJECT_STATUS_PENDING))
        .filter(projects::Column::DeletedAt.is_null())
        .order_by_desc(projects::Column::CreatedAt)
        .all(db)
        .await?;

    if rows.is_empty() {
        return Ok(vec![]);
    }

    let owner_ids = rows.iter().map(|p| p.owner_id).collect::<Vec<_>>();
    let owners = users::Entity::find()
        .filter(users::Column::UserId.is_in(owner_ids))
        .filter(users::Column::DeletedAt.is_null())
        .all(db)
        .await?
        .into_iter()
        .map(|u| {
            (
                u.user_id,
                OwnerBrief {
                    username: u.username,
                    full_name: u.full_name,
                    email: u.email,
                },
            )
        })
        .collect::<HashMap<_, _>>();

    Ok(rows
        .into_iter()
        .map(|p| PendingProject {
            id: p.id,
            title: p.title,
            description: p.description,
            status: p.status,
            created_at: p.created_at,
            owner_id: p.owner_id,
            owner: owners.get(&p.owner_id).cloned(),
        })
        .collect())
}

/// What the owner notification needs after a moderation decision
#[derive(Debug, Clone)]
pub struct ModerationOutcome {
    pub owner_id: Uuid,
    pub project_title: String,
}

/// Approve a pending project.
pub async fn approve_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> anyhow::Result<ModerationOutcome> {
    let project = match project::find_live(db, project_id).await? {
        Some(p) => p,
        None => return Err(CongtacError::ProjectNotExist(project_id).into()),
    };

    let owner_id = project.owner_id;
    let project_title = project.title.clone();

    let mut active: projects::ActiveModel = project.into();
    active.status = Set(PROJECT_STATUS_APPROVED.to_string());
    active.updated_at = Set(Some(Utc::now()));
    active.update(db).await?;

    Ok(ModerationOutcome {
        owner_id,
        project_title,
    })
}

/// Reject a project: moderation rejection is a soft delete.
pub async fn reject_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> anyhow::Result<ModerationOutcome> {
    let project = match project::find_live(db, project_id).await? {
        Some(p) => p,
        None => return Err(CongtacError::ProjectNotExist(project_id).into()),
    };

    let owner_id = project.owner_id;
    let project_title = project.title.clone();

    let mut active: projects::ActiveModel = project.into();
    active.deleted_at = Set(Some(Utc::now()));
    active.update(db).await?;

    Ok(ModerationOutcome {
        owner_id,
        project_title,
    })
}
