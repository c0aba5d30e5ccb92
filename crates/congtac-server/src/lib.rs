//! Main library module for congtac - a bilingual project-collaboration
//! marketplace server.

// Module declarations
pub mod api; // API handlers
pub mod middleware; // HTTP middleware
pub mod model; // Data models and types
pub mod secured; // Access control for handlers
pub mod service; // Business services
pub mod startup; // Application startup utilities

// Re-export common types for convenience
pub use congtac_common::{Lang, MessageKey, translate};

pub use model::{ApiResponse, AppState, Configuration};
pub use secured::{Secured, SecuredBuilder};
