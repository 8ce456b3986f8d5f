pub mod dashboard;
pub mod form;
pub mod plan;

use actix_web::{error, web};
use log::info;

use crate::errors::AppError;

/// Maps malformed JSON bodies onto the API's `{success:false, message}` shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        info!("Rejected JSON body: {}", err);
        error::Error::from(AppError::BadRequest(format!("Invalid request body: {}", err)))
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::BadRequest(format!("Invalid query string: {}", err)))
    })
}

pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::BadRequest(format!("Invalid form: {}", err)))
    })
}
