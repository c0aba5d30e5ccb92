//! Notification entity
//!
//! `message` stores the raw JSON payload of the event; title and text are
//! rendered from per-language templates when the row is read, never at
//! write time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Uuid,
    /// Event type, e.g. "application_received"
    #[sea_orm(column_name = "type", column_type = "Text", nullable)]
    pub kind: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub title: Option<String>,
    /// JSON payload for template rendering
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    pub is_read: bool,
    pub created_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
