//! Application entity
//!
//! One live application per (project, applicant); rejected rows stay live so
//! the uniqueness check also bars resubmission.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    pub applicant_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub cover_letter: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub cv_url: Option<String>,
    /// "pending", "approved" or "rejected"
    pub status: String,
    pub applied_at: Option<DateTimeUtc>,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
