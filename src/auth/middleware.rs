use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::auth::token::verify_token;
use crate::error::AppError;

/// Identity gate applied to the `/api/v1` scope.
///
/// Extracts and verifies the bearer token on every request, attaching the
/// decoded [`Claims`](crate::auth::token::Claims) to request extensions for
/// downstream extractors. Stateless: each request is evaluated independently.
///
/// The signing secret is provided at construction from process configuration
/// rather than read from the environment inside the verifier.
pub struct AuthMiddleware {
    secret: Rc<String>,
}

impl AuthMiddleware {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Rc::new(secret.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            secret: Rc::clone(&self.secret),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    secret: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Registration and login are the only unauthenticated endpoints
        // inside the API scope.
        let path = req.path();
        if path.starts_with("/api/v1/auth/login") || path.starts_with("/api/v1/auth/register") {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer {
            Some(token) => match verify_token(&self.secret, token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
                }
                Err(app_err) => {
                    let (req, _) = req.into_parts();
                    let res = app_err.error_response().map_into_right_body();
                    Box::pin(async move { Ok(ServiceResponse::new(req, res)) })
                }
            },
            None => {
                let app_err = AppError::Unauthorized("Missing or invalid authorization header".into());
                let (req, _) = req.into_parts();
                let res = app_err.error_response().map_into_right_body();
                Box::pin(async move { Ok(ServiceResponse::new(req, res)) })
            }
        }
    }
}
