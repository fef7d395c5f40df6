use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use crate::db::models::{CreateTask, UpdateTask};
use crate::error::AppError;
use crate::AppState;
use crate::Result;

pub async fn list_tasks(state: web::Data<AppState>) -> Result<HttpResponse> {
    let tasks = state.store.list_tasks().await?;
    if tasks.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }

    Ok(HttpResponse::Ok().json(tasks))
}

pub async fn get_task(path: web::Path<i32>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let task = state
        .store
        .find_task_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    Ok(HttpResponse::Ok().json(task))
}

pub async fn list_tasks_by_boat(
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let tasks = state.store.list_tasks_by_boat(path.into_inner()).await?;
    if tasks.is_empty() {
        return Err(AppError::not_found("No tasks found for this boat"));
    }

    Ok(HttpResponse::Ok().json(tasks))
}

pub async fn create_task(
    path: web::Path<i32>,
    req: web::Json<CreateTask>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let boat_id = path.into_inner();
    req.validate()?;

    if state.store.find_boat_by_id(boat_id).await?.is_none() {
        return Err(AppError::bad_request("Boat ID does not exist in the database"));
    }

    let task = state.store.create_task(boat_id, &req).await?;
    info!("Created task {} for boat {}", task.id, boat_id);
    Ok(HttpResponse::Created().json(task))
}

pub async fn update_task(
    path: web::Path<i32>,
    req: web::Json<UpdateTask>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    req.validate()?;

    let task = state
        .store
        .update_task(path.into_inner(), &req)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    Ok(HttpResponse::Ok().json(task))
}

pub async fn delete_task(path: web::Path<i32>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let id = path.into_inner();
    if !state.store.delete_task(id).await? {
        return Err(AppError::not_found("Task not found"));
    }

    info!("Deleted task {}", id);
    Ok(HttpResponse::NoContent().finish())
}
