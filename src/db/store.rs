//! Keyed-query interfaces over the relational store. `DbOperations`
//! implements all of them against Postgres; the auth core only ever sees
//! [`UserStore`].

use async_trait::async_trait;

use super::models::{
    Boat, Coordinate, CreateBoat, CreateExpense, CreateLog, CreateTask, Expense, Log, NewUser, Task,
    UpdateBoat, UpdateExpense, UpdateLog, UpdateTask, User, UserChanges,
};
use crate::Result;

/// The credential store consumed by the auth service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create_user(&self, user: &NewUser) -> Result<User>;
    async fn update_user(&self, id: i32, changes: &UserChanges) -> Result<Option<User>>;
    async fn delete_user(&self, id: i32) -> Result<bool>;
}

#[async_trait]
pub trait BoatStore: Send + Sync {
    async fn list_boats(&self) -> Result<Vec<Boat>>;
    async fn find_boat_by_id(&self, id: i32) -> Result<Option<Boat>>;
    async fn create_boat(&self, boat: &CreateBoat) -> Result<Boat>;
    async fn update_boat(&self, id: i32, changes: &UpdateBoat) -> Result<Option<Boat>>;
    async fn delete_boat(&self, id: i32) -> Result<bool>;
}

#[async_trait]
pub trait LogStore: Send + Sync {
    async fn list_logs(&self) -> Result<Vec<Log>>;
    async fn find_log_by_id(&self, id: i32) -> Result<Option<Log>>;
    async fn list_logs_by_boat(&self, boat_id: i32) -> Result<Vec<Log>>;
    async fn create_log(&self, boat_id: i32, log: &CreateLog) -> Result<Log>;
    async fn update_log(&self, id: i32, changes: &UpdateLog) -> Result<Option<Log>>;
    /// Appends `coordinates` after the log's existing pairs, preserving order.
    async fn append_coordinates(&self, log_id: i32, coordinates: &[Coordinate]) -> Result<Option<Log>>;
    async fn delete_log(&self, id: i32) -> Result<bool>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>>;
    async fn find_task_by_id(&self, id: i32) -> Result<Option<Task>>;
    /// Newest first.
    async fn list_tasks_by_boat(&self, boat_id: i32) -> Result<Vec<Task>>;
    async fn create_task(&self, boat_id: i32, task: &CreateTask) -> Result<Task>;
    async fn update_task(&self, id: i32, changes: &UpdateTask) -> Result<Option<Task>>;
    async fn delete_task(&self, id: i32) -> Result<bool>;
}

#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn list_expenses(&self) -> Result<Vec<Expense>>;
    async fn find_expense_by_id(&self, id: i32) -> Result<Option<Expense>>;
    /// Newest first.
    async fn list_expenses_by_boat(&self, boat_id: i32) -> Result<Vec<Expense>>;
    async fn create_expense(&self, boat_id: i32, expense: &CreateExpense) -> Result<Expense>;
    async fn update_expense(&self, id: i32, changes: &UpdateExpense) -> Result<Option<Expense>>;
    async fn delete_expense(&self, id: i32) -> Result<bool>;
}

/// Everything the HTTP handlers need from storage.
pub trait Repository: UserStore + BoatStore + LogStore + TaskStore + ExpenseStore {}

impl<T> Repository for T where T: UserStore + BoatStore + LogStore + TaskStore + ExpenseStore {}
