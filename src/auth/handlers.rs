use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use validator::Validate;

use crate::db::models::Credentials;
use crate::AppState;
use crate::Result;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

pub async fn sign_up(
    req: web::Json<Credentials>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    info!("Received sign-up request for email: {}", req.email);
    req.validate()?;

    match state.auth_service.sign_up(&req.email, &req.password).await {
        Ok(response) => {
            info!("Sign-up successful for email: {}", req.email);
            Ok(HttpResponse::Created().json(response))
        }
        Err(e) => {
            error!("Sign-up failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

pub async fn sign_in(
    req: web::Json<Credentials>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    info!("Received sign-in request for email: {}", req.email);
    req.validate()?;

    match state.auth_service.sign_in(&req.email, &req.password).await {
        Ok(tokens) => {
            info!("Sign-in successful for email: {}", req.email);
            Ok(HttpResponse::Ok().json(tokens))
        }
        Err(e) => {
            error!("Sign-in failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

pub async fn refresh_token(
    req: web::Json<RefreshRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let access_token = state
        .auth_service
        .refresh_access_token(&req.refresh_token)
        .await
        .map_err(|e| {
            error!("Token refresh failed: {}", e);
            e
        })?;

    Ok(HttpResponse::Ok().json(RefreshResponse { access_token }))
}
