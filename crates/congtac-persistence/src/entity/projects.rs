//! Project entity
//!
//! Lifecycle: created as "pending", moderated by an admin into "approved"
//! (visible and accepting applications) and finally "completed" by the
//! owner. Moderation rejection and owner deletion both soft-delete the row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub location: Option<String>,
    /// "website", "mobile-app" or "desktop-app"
    #[sea_orm(column_type = "Text", nullable)]
    pub project_type: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub start_date: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub cover_image_url: Option<String>,
    pub owner_id: Uuid,
    /// "pending", "approved" or "completed"
    pub status: String,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
