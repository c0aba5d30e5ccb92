//! Notification service
//!
//! Rows store the event payload as JSON; text is rendered per language at
//! read time. Creation failures are logged and never fail the triggering
//! operation.

use chrono::Utc;
use congtac_common::i18n::{Lang, NotificationKind, NotificationLink, render_notification};
use congtac_persistence::entity::notifications;
use congtac_persistence::sea_orm::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Insert a notification row for a user
pub async fn create(
    db: &DatabaseConnection,
    user_id: Uuid,
    kind: NotificationKind,
    payload: serde_json::Value,
) -> anyhow::Result<()> {
    notifications::ActiveModel {
        user_id: Set(user_id),
        kind: Set(Some(kind.as_str().to_string())),
        title: Set(None), // rendered from templates at read time
        message: Set(Some(payload.to_string())),
        is_read: Set(false),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(())
}

/// Fire a notification without failing the caller on error
async fn fire(db: &DatabaseConnection, user_id: Uuid, kind: NotificationKind, payload: serde_json::Value) {
    if let Err(e) = create(db, user_id, kind, payload).await {
        tracing::warn!(kind = kind.as_str(), "Failed to create notification: {}", e);
    }
}

/// Tell a project owner that someone applied
pub async fn notify_application_received(
    db: &DatabaseConnection,
    owner_id: Uuid,
    applicant_name: &str,
    applicant_username: &str,
    project_id: i64,
    project_title: &str,
) {
    fire(
        db,
        owner_id,
        NotificationKind::ApplicationReceived,
        json!({
            "applicantName": applicant_name,
            "applicantUsername": applicant_username,
            "projectId": project_id,
            "projectTitle": project_title,
        }),
    )
    .await;
}

/// Tell a project owner their project passed moderation
pub async fn notify_project_approved(
    db: &DatabaseConnection,
    owner_id: Uuid,
    project_id: i64,
    project_title: &str,
) {
    fire(
        db,
        owner_id,
        NotificationKind::ProjectApproved,
        json!({ "projectId": project_id, "projectTitle": project_title }),
    )
    .await;
}

/// Tell a project owner their project was rejected
pub async fn notify_project_rejected(
    db: &DatabaseConnection,
    owner_id: Uuid,
    project_id: i64,
    project_title: &str,
) {
    fire(
        db,
        owner_id,
        NotificationKind::ProjectRejected,
        json!({ "projectId": project_id, "projectTitle": project_title }),
    )
    .await;
}

/// Tell an applicant they were accepted
pub async fn notify_application_approved(
    db: &DatabaseConnection,
    applicant_id: Uuid,
    project_id: i64,
    project_title: &str,
) {
    fire(
        db,
        applicant_id,
        NotificationKind::ApplicationApproved,
        json!({ "projectId": project_id, "projectTitle": project_title }),
    )
    .await;
}

/// Tell an applicant they were declined
pub async fn notify_application_rejected(
    db: &DatabaseConnection,
    applicant_id: Uuid,
    project_id: i64,
    project_title: &str,
) {
    fire(
        db,
        applicant_id,
        NotificationKind::ApplicationRejected,
        json!({ "projectId": project_id, "projectTitle": project_title }),
    )
    .await;
}

/// Notification rendered for the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<NotificationLink>,
    pub is_read: bool,
    pub created_at: Option<prelude::DateTimeUtc>,
}

/// A user's notifications, newest first, rendered for the given language.
pub async fn list_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    lang: Lang,
) -> anyhow::Result<Vec<NotificationView>> {
    let rows = notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .order_by_desc(notifications::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let rendered =
                render_notification(row.kind.as_deref(), row.message.as_deref(), lang);
            NotificationView {
                id: row.id,
                kind: row.kind,
                // A stored title (legacy rows) wins over the template one
                title: row.title.unwrap_or(rendered.title),
                text: rendered.text,
                link: rendered.link,
                is_read: row.is_read,
                created_at: row.created_at,
            }
        })
        .collect())
}

/// Mark one of the user's notifications read. A foreign or unknown id
/// matches no rows and succeeds without effect.
pub async fn mark_read(
    db: &DatabaseConnection,
    user_id: Uuid,
    notification_id: i64,
) -> anyhow::Result<()> {
    notifications::Entity::update_many()
        .col_expr(notifications::Column::IsRead, prelude::Expr::value(true))
        .filter(notifications::Column::Id.eq(notification_id))
        .filter(notifications::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    Ok(())
}
