//! HTTP handlers for the boat resources.

pub mod boats;
pub mod expenses;
pub mod logs;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::error::AppError;

/// Non-integer path ids are rejected before reaching a handler.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::bad_request("ID must be an integer").into())
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::bad_request(err.to_string()).into())
}
