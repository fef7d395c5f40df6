use actix_web::{web, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::db::models::{CreateBoat, UpdateBoat};
use crate::error::AppError;
use crate::AppState;
use crate::Result;

pub async fn list_boats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let boats = state.store.list_boats().await?;
    Ok(HttpResponse::Ok().json(boats))
}

pub async fn get_boat(path: web::Path<i32>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let boat = state
        .store
        .find_boat_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Boat not found"))?;

    Ok(HttpResponse::Ok().json(boat))
}

pub async fn create_boat(
    caller: AuthenticatedUser,
    req: web::Json<CreateBoat>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    req.validate()?;

    if state.store.find_user_by_id(req.user_id).await?.is_none() {
        warn!("Boat owner {} does not exist", req.user_id);
        return Err(AppError::bad_request(
            "Error creating boat, user id does not exist in database",
        ));
    }

    let boat = state.store.create_boat(&req).await?;
    info!(caller = caller.user_id(), "Created boat {} for user {}", boat.id, boat.user_id);
    Ok(HttpResponse::Created().json(boat))
}

pub async fn update_boat(
    path: web::Path<i32>,
    req: web::Json<UpdateBoat>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    req.validate()?;

    if let Some(user_id) = req.user_id {
        if state.store.find_user_by_id(user_id).await?.is_none() {
            return Err(AppError::bad_request(
                "Error updating boat, user id does not exist in database",
            ));
        }
    }

    let boat = state
        .store
        .update_boat(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Boat not found"))?;

    Ok(HttpResponse::Ok().json(boat))
}

pub async fn delete_boat(path: web::Path<i32>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let id = path.into_inner();
    if !state.store.delete_boat(id).await? {
        return Err(AppError::not_found("Boat not found"));
    }

    info!("Deleted boat {}", id);
    Ok(HttpResponse::NoContent().finish())
}
