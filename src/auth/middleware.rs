//! Bearer-token gate for protected routes.
//!
//! [`AuthGate`] wraps whole scopes; [`AuthenticatedUser`] does the same check
//! for a single handler and also reads the identity the gate attached.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use super::token::TokenPayload;
use crate::error::{AppError, AuthError};
use crate::AppState;

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingHeader)?;
    let value = value.to_str().map_err(|_| AuthError::MissingToken)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::MissingToken),
    }
}

/// Runs the full gate check against the request headers.
pub fn authenticate_request(req: &HttpRequest) -> Result<TokenPayload, AppError> {
    let token = bearer_token(req.headers().get(header::AUTHORIZATION)).map_err(|e| {
        debug!(path = req.path(), reason = %e, "Request rejected by auth gate");
        e
    })?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("Application state is not configured".into()))?;

    Ok(state.auth_service.verify_access_token(token)?)
}

pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware { service }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
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
        match authenticate_request(req.request()) {
            Ok(payload) => {
                // Handlers read the identity back through `AuthenticatedUser`.
                req.extensions_mut().insert(payload);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                let response = req.error_response(err).map_into_right_body();
                Box::pin(ready(Ok(response)))
            }
        }
    }
}

/// The verified identity of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub TokenPayload);

impl AuthenticatedUser {
    pub fn user_id(&self) -> i32 {
        self.0.userid
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let attached = req.extensions().get::<TokenPayload>().copied();
        match attached {
            Some(payload) => ready(Ok(AuthenticatedUser(payload))),
            None => ready(authenticate_request(req).map(AuthenticatedUser)),
        }
    }
}
