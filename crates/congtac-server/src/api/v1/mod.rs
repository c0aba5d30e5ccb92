//! API version 1 endpoints

pub mod admin;
pub mod application;
pub mod auth;
pub mod notification;
pub mod profile;
pub mod project;
pub mod route;

use actix_web::{HttpRequest, web};
use congtac_common::Lang;

use crate::model::AppState;

/// The request language: `lang` query parameter, else the configured default.
pub(crate) fn request_lang(req: &HttpRequest, data: &web::Data<AppState>) -> Lang {
    req.uri()
        .query()
        .and_then(|query| {
            query.split('&').find_map(|pair| {
                pair.split_once('=')
                    .filter(|(key, _)| *key == "lang")
                    .map(|(_, value)| Lang::from_code(value))
            })
        })
        .unwrap_or_else(|| data.configuration.default_lang())
}
