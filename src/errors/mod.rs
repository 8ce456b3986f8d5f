use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Bad Gateway: {0}")]
    BadGateway(String),
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
    #[error("Bad Request: {0}")]
    BadRequest(String),
}

/// Body shape shared by every failed API call.
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ErrorResponse {
    fn with_message(msg: &str) -> Self {
        ErrorResponse { success: false, message: Some(msg.to_string()) }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(ErrorResponse::with_message(msg)),
            AppError::BadGateway(msg) => HttpResponse::BadGateway().json(ErrorResponse::with_message(msg)),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(ErrorResponse::with_message(msg)),
            AppError::InternalServerError(msg) => {
                // Store failures are not differentiated for the caller
                error!("{}", msg);
                HttpResponse::InternalServerError().json(ErrorResponse { success: false, message: None })
            }
        }
    }
}
