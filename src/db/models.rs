use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A stored account. The password column only ever holds a bcrypt hash and
/// the type is deliberately not `Serialize`; responses use [`PublicUser`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i32,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "This request requires a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "This request requires a valid password"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Boat {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBoat {
    pub user_id: i32,
    #[validate(length(min = 1, message = "This request requires a valid name"))]
    pub name: String,
    #[validate(length(min = 1, message = "This request requires a valid model"))]
    pub model: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBoat {
    pub user_id: Option<i32>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Model cannot be empty"))]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Log {
    pub id: i32,
    pub boat_id: i32,
    pub description: String,
    pub crew_members: Vec<String>,
    pub coordinates: Json<Vec<Coordinate>>,
    pub photo_urls: Vec<String>,
    pub log_started: DateTime<Utc>,
    pub log_ended: DateTime<Utc>,
    pub created_on: DateTime<Utc>,
    pub isrecordinglocation: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLog {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub crew_members: Vec<String>,
    pub coordinates: Vec<Coordinate>,
    pub photo_urls: Vec<String>,
    pub log_started: DateTime<Utc>,
    pub log_ended: DateTime<Utc>,
    pub created_on: Option<DateTime<Utc>>,
    #[serde(alias = "isRecordingLocation")]
    pub isrecordinglocation: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLog {
    pub boat_id: Option<i32>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub crew_members: Option<Vec<String>>,
    pub coordinates: Option<Vec<Coordinate>>,
    pub photo_urls: Option<Vec<String>>,
    pub log_started: Option<DateTime<Utc>>,
    pub log_ended: Option<DateTime<Utc>>,
    #[serde(alias = "isRecordingLocation")]
    pub isrecordinglocation: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddCoordinates {
    pub log_id: i32,
    pub coordinates: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub boat_id: i32,
    pub description: String,
    pub status: String,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    pub created_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Status cannot be empty"))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i32,
    pub boat_id: i32,
    pub expense_type: String,
    pub amount: f64,
    pub expense_date: DateTime<Utc>,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpense {
    #[validate(length(min = 1, message = "Expense type is required"))]
    pub expense_type: String,
    #[validate(range(exclusive_min = 0.0, message = "Amount is required and must be greater than zero"))]
    pub amount: f64,
    pub expense_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExpense {
    #[validate(length(min = 1, message = "Expense type cannot be empty"))]
    pub expense_type: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Amount must be greater than zero"))]
    pub amount: Option<f64>,
    pub expense_date: Option<DateTime<Utc>>,
}
