use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_NAME_HEADER: &str = "X-User-Name";
pub const USER_EMAIL_HEADER: &str = "X-User-Email";
pub const USER_IMAGE_HEADER: &str = "X-User-Image";

/// The signed-in user, as forwarded by the identity provider in front of
/// this service.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl CurrentUser {
    pub fn from_request_headers(req: &HttpRequest) -> Result<Self, AppError> {
        let id = header(req, USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Sign in required".to_string()))?;

        Ok(CurrentUser {
            id,
            username: header(req, USER_NAME_HEADER),
            email: header(req, USER_EMAIL_HEADER),
            image_url: header(req, USER_IMAGE_HEADER),
        })
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(CurrentUser::from_request_headers(req))
    }
}
