use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated claims placed in request extensions by
/// `AuthMiddleware`.
///
/// Intended for handlers behind the middleware; if the claims are missing
/// (middleware not applied, or an internal wiring error), the extractor
/// fails with `Unauthorized` as a safe default.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

impl FromRequest for AuthClaims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthClaims(claims))),
            None => {
                let err = AppError::Unauthorized(
                    "Authentication required. Ensure AuthMiddleware is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
