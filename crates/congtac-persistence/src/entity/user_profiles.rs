//! Extended profile entity
//!
//! Free-form profile sections; the list-like columns hold JSON arrays of
//! strings produced from the profile editor's textarea inputs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub portfolio_url: Option<String>,
    /// JSON array of strings
    #[sea_orm(column_type = "Text", nullable)]
    pub interests: Option<String>,
    /// JSON array of strings
    #[sea_orm(column_type = "Text", nullable)]
    pub experiences: Option<String>,
    /// JSON array of strings
    #[sea_orm(column_type = "Text", nullable)]
    pub projects: Option<String>,
    /// JSON array of strings
    #[sea_orm(column_type = "Text", nullable)]
    pub certifications: Option<String>,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
