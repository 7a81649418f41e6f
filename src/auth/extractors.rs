use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::Claims;
use crate::error::AppError;
use crate::models::Role;

/// The verified identity of the caller.
///
/// Only usable on routes wrapped by `AuthMiddleware`, which inserts the decoded
/// `Claims` into the request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from(req).map(AuthenticatedUser).map_err(Into::into))
    }
}

fn claims_from(req: &HttpRequest) -> Result<Claims, AppError> {
    req.extensions().get::<Claims>().cloned().ok_or_else(|| {
        AppError::Unauthorized("Identity not found in request. Ensure AuthMiddleware is active.".into())
    })
}
