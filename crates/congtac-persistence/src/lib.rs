//! Congtac Persistence - Database entities
//!
//! SeaORM entity definitions for the marketplace's relational schema.
//! Soft deletion is modelled with a nullable `deleted_at` column wherever
//! the domain keeps history instead of removing rows.

pub mod entity;

// Re-export sea-orm for convenience
pub use sea_orm;
