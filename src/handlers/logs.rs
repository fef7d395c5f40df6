use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use crate::db::models::{AddCoordinates, CreateLog, UpdateLog};
use crate::error::AppError;
use crate::AppState;
use crate::Result;

pub async fn list_logs(state: web::Data<AppState>) -> Result<HttpResponse> {
    let logs = state.store.list_logs().await?;
    if logs.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }

    Ok(HttpResponse::Ok().json(logs))
}

pub async fn get_log(path: web::Path<i32>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let log = state
        .store
        .find_log_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Log not found"))?;

    Ok(HttpResponse::Ok().json(log))
}

pub async fn list_logs_by_boat(
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let boat_id = path.into_inner();

    if state.store.find_boat_by_id(boat_id).await?.is_none() {
        return Err(AppError::not_found(format!("No boat found for boatId: {}", boat_id)));
    }

    let logs = state.store.list_logs_by_boat(boat_id).await?;
    if logs.is_empty() {
        return Err(AppError::not_found(format!("No Logs found for boatId: {}", boat_id)));
    }

    Ok(HttpResponse::Ok().json(logs))
}

pub async fn create_log(
    path: web::Path<i32>,
    req: web::Json<CreateLog>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let boat_id = path.into_inner();
    req.validate()?;

    if state.store.find_boat_by_id(boat_id).await?.is_none() {
        return Err(AppError::bad_request("Boat ID does not exist in the database"));
    }

    let log = state.store.create_log(boat_id, &req).await?;
    info!("Created log {} for boat {}", log.id, boat_id);
    Ok(HttpResponse::Created().json(log))
}

/// Appends GPS points after the log's existing coordinates.
pub async fn add_coordinates(
    req: web::Json<AddCoordinates>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let log = state
        .store
        .append_coordinates(req.log_id, &req.coordinates)
        .await?
        .ok_or_else(|| AppError::not_found("Log not found"))?;

    info!("Appended {} coordinates to log {}", req.coordinates.len(), log.id);
    Ok(HttpResponse::Ok().json(log))
}

pub async fn update_log(
    path: web::Path<i32>,
    req: web::Json<UpdateLog>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    req.validate()?;

    if let Some(boat_id) = req.boat_id {
        if state.store.find_boat_by_id(boat_id).await?.is_none() {
            return Err(AppError::bad_request("Boat ID does not exist in the database"));
        }
    }

    let log = state
        .store
        .update_log(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Log not found"))?;

    Ok(HttpResponse::Ok().json(log))
}

pub async fn delete_log(path: web::Path<i32>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let id = path.into_inner();
    if !state.store.delete_log(id).await? {
        return Err(AppError::not_found("Log not found"));
    }

    info!("Deleted log {}", id);
    Ok(HttpResponse::NoContent().finish())
}
