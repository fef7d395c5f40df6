use actix_web::{web, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::db::models::{PublicUser, UpdateUser, UserChanges};
use crate::error::{AppError, AuthError, DatabaseError};
use crate::AppState;
use crate::Result;

pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse> {
    let users: Vec<PublicUser> = state
        .store
        .list_users()
        .await?
        .iter()
        .map(PublicUser::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user(path: web::Path<i32>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let id = path.into_inner();
    let user = state
        .store
        .find_user_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(PublicUser::from(&user)))
}

/// Only the account holder may change or remove an account.
fn ensure_self(caller: &AuthenticatedUser, id: i32) -> Result<()> {
    if caller.user_id() != id {
        warn!(caller = caller.user_id(), target = id, "Refusing change to another user's account");
        return Err(AppError::Forbidden("Cannot modify another user".into()));
    }
    Ok(())
}

pub async fn update_user(
    caller: AuthenticatedUser,
    path: web::Path<i32>,
    req: web::Json<UpdateUser>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    ensure_self(&caller, id)?;
    req.validate()?;
    info!("Updating user {}", id);

    if let Some(email) = req.email.as_deref() {
        if let Some(existing) = state.store.find_user_by_email(email).await? {
            if existing.id != id {
                warn!("Email {} is already taken by user {}", email, existing.id);
                return Err(AuthError::DuplicateEmail.into());
            }
        }
    }

    let password_hash = match req.password.as_deref() {
        Some(password) => Some(state.auth_service.hash_password(password).await?),
        None => None,
    };

    let changes = UserChanges {
        email: req.email.clone(),
        password_hash,
    };

    let user = match state.store.update_user(id, &changes).await {
        Ok(user) => user,
        Err(AppError::DatabaseError(DatabaseError::Duplicate)) => {
            return Err(AuthError::DuplicateEmail.into());
        }
        Err(e) => return Err(e),
    }
    .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(PublicUser::from(&user)))
}

pub async fn delete_user(
    caller: AuthenticatedUser,
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    ensure_self(&caller, id)?;
    info!("Deleting user {}", id);

    if !state.store.delete_user(id).await? {
        return Err(AppError::not_found("User not found"));
    }

    Ok(HttpResponse::NoContent().finish())
}
