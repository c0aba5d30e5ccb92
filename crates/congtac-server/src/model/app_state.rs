//! Application state shared across all handlers

use sea_orm::DatabaseConnection;

use super::config::Configuration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub configuration: Configuration,
    pub database_connection: DatabaseConnection,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configuration", &self.configuration)
            .field("database_connection", &"<DatabaseConnection>")
            .finish()
    }
}

impl AppState {
    pub fn new(configuration: Configuration, database_connection: DatabaseConnection) -> Self {
        Self {
            configuration,
            database_connection,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.database_connection
    }
}
