use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use crate::db::models::{CreateExpense, UpdateExpense};
use crate::error::AppError;
use crate::AppState;
use crate::Result;

pub async fn list_expenses(state: web::Data<AppState>) -> Result<HttpResponse> {
    let expenses = state.store.list_expenses().await?;
    Ok(HttpResponse::Ok().json(expenses))
}

pub async fn get_expense(path: web::Path<i32>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let expense = state
        .store
        .find_expense_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Expense not found"))?;

    Ok(HttpResponse::Ok().json(expense))
}

pub async fn list_expenses_by_boat(
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let expenses = state.store.list_expenses_by_boat(path.into_inner()).await?;
    if expenses.is_empty() {
        return Err(AppError::not_found("No expenses found for this boat"));
    }

    Ok(HttpResponse::Ok().json(expenses))
}

pub async fn create_expense(
    path: web::Path<i32>,
    req: web::Json<CreateExpense>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let boat_id = path.into_inner();
    req.validate()?;

    if state.store.find_boat_by_id(boat_id).await?.is_none() {
        return Err(AppError::bad_request("Boat ID does not exist in the database"));
    }

    let expense = state.store.create_expense(boat_id, &req).await?;
    info!("Recorded {} expense of {} for boat {}", expense.expense_type, expense.amount, boat_id);
    Ok(HttpResponse::Created().json(expense))
}

pub async fn update_expense(
    path: web::Path<i32>,
    req: web::Json<UpdateExpense>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    req.validate()?;

    let expense = state
        .store
        .update_expense(path.into_inner(), &req)
        .await?
        .ok_or_else(|| AppError::not_found("Expense not found"))?;

    Ok(HttpResponse::Ok().json(expense))
}

pub async fn delete_expense(
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    if !state.store.delete_expense(id).await? {
        return Err(AppError::not_found("Expense not found"));
    }

    info!("Deleted expense {}", id);
    Ok(HttpResponse::NoContent().finish())
}
