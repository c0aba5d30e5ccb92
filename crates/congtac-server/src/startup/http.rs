//! HTTP server setup.

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};

use crate::{api, middleware::auth::Authentication, model::AppState};

/// Creates and binds the API HTTP server.
///
/// All routes live under the configured context path; the authentication
/// middleware parses the JWT (when present) into the request extensions for
/// the `secured!` guards downstream.
pub fn api_server(
    app_state: Arc<AppState>,
    context_path: String,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Authentication)
            .app_data(web::Data::from(app_state.clone()))
            .service(web::scope(&context_path).service(api::v1::route::routes()))
    })
    .bind((address, port))?
    .run())
}
