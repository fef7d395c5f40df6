//! bcrypt hashing. Both operations are CPU bound and run on the blocking
//! pool so a slow hash never stalls other requests.

use crate::error::AppError;
use crate::Result;

pub async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

/// Compares `password` against a stored bcrypt hash in constant time.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Password verification task failed: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("Failed to verify password: {}", e)))
}
