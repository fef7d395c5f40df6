#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::types::Json;
use tokio::sync::RwLock;

use boatlog_server::config::Settings;
use boatlog_server::db::models::{
    Boat, Coordinate, CreateBoat, CreateExpense, CreateLog, CreateTask, Expense, Log, NewUser, Task,
    UpdateBoat, UpdateExpense, UpdateLog, UpdateTask, User, UserChanges,
};
use boatlog_server::db::{BoatStore, ExpenseStore, LogStore, TaskStore, UserStore};
use boatlog_server::error::{AppError, DatabaseError};
use boatlog_server::{routes, AppState, Result};

#[derive(Default)]
struct Tables {
    next_id: i32,
    users: Vec<User>,
    boats: Vec<Boat>,
    logs: Vec<Log>,
    tasks: Vec<Task>,
    expenses: Vec<Expense>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Store backed by plain vectors, mirroring the Postgres schema's
/// uniqueness and cascade rules.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DatabaseError(DatabaseError::Duplicate));
        }
        let user = User {
            id: tables.next_id(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: i32, changes: &UserChanges) -> Result<Option<User>> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        if let Some(hash) = &changes.password_hash {
            user.password_hash = hash.clone();
        }
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        let boat_ids: Vec<i32> = tables.boats.iter().filter(|b| b.user_id == id).map(|b| b.id).collect();
        tables.boats.retain(|b| b.user_id != id);
        for boat_id in boat_ids {
            cascade_boat(&mut tables, boat_id);
        }
        Ok(tables.users.len() < before)
    }
}

fn cascade_boat(tables: &mut Tables, boat_id: i32) {
    tables.logs.retain(|l| l.boat_id != boat_id);
    tables.tasks.retain(|t| t.boat_id != boat_id);
    tables.expenses.retain(|e| e.boat_id != boat_id);
}

#[async_trait]
impl BoatStore for MemoryStore {
    async fn list_boats(&self) -> Result<Vec<Boat>> {
        Ok(self.tables.read().await.boats.clone())
    }

    async fn find_boat_by_id(&self, id: i32) -> Result<Option<Boat>> {
        Ok(self.tables.read().await.boats.iter().find(|b| b.id == id).cloned())
    }

    async fn create_boat(&self, boat: &CreateBoat) -> Result<Boat> {
        let mut tables = self.tables.write().await;
        let boat = Boat {
            id: tables.next_id(),
            user_id: boat.user_id,
            name: boat.name.clone(),
            model: boat.model.clone(),
        };
        tables.boats.push(boat.clone());
        Ok(boat)
    }

    async fn update_boat(&self, id: i32, changes: &UpdateBoat) -> Result<Option<Boat>> {
        let mut tables = self.tables.write().await;
        let Some(boat) = tables.boats.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(user_id) = changes.user_id {
            boat.user_id = user_id;
        }
        if let Some(name) = &changes.name {
            boat.name = name.clone();
        }
        if let Some(model) = &changes.model {
            boat.model = model.clone();
        }
        Ok(Some(boat.clone()))
    }

    async fn delete_boat(&self, id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.boats.len();
        tables.boats.retain(|b| b.id != id);
        cascade_boat(&mut tables, id);
        Ok(tables.boats.len() < before)
    }
}

#[async_trait]
impl LogStore for MemoryStore {
    async fn list_logs(&self) -> Result<Vec<Log>> {
        Ok(self.tables.read().await.logs.clone())
    }

    async fn find_log_by_id(&self, id: i32) -> Result<Option<Log>> {
        Ok(self.tables.read().await.logs.iter().find(|l| l.id == id).cloned())
    }

    async fn list_logs_by_boat(&self, boat_id: i32) -> Result<Vec<Log>> {
        let tables = self.tables.read().await;
        Ok(tables.logs.iter().filter(|l| l.boat_id == boat_id).cloned().collect())
    }

    async fn create_log(&self, boat_id: i32, log: &CreateLog) -> Result<Log> {
        let mut tables = self.tables.write().await;
        let log = Log {
            id: tables.next_id(),
            boat_id,
            description: log.description.clone(),
            crew_members: log.crew_members.clone(),
            coordinates: Json(log.coordinates.clone()),
            photo_urls: log.photo_urls.clone(),
            log_started: log.log_started,
            log_ended: log.log_ended,
            created_on: log.created_on.unwrap_or_else(Utc::now),
            isrecordinglocation: log.isrecordinglocation,
        };
        tables.logs.push(log.clone());
        Ok(log)
    }

    async fn update_log(&self, id: i32, changes: &UpdateLog) -> Result<Option<Log>> {
        let mut tables = self.tables.write().await;
        let Some(log) = tables.logs.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        if let Some(boat_id) = changes.boat_id {
            log.boat_id = boat_id;
        }
        if let Some(description) = &changes.description {
            log.description = description.clone();
        }
        if let Some(crew) = &changes.crew_members {
            log.crew_members = crew.clone();
        }
        if let Some(coordinates) = &changes.coordinates {
            log.coordinates = Json(coordinates.clone());
        }
        if let Some(photos) = &changes.photo_urls {
            log.photo_urls = photos.clone();
        }
        if let Some(started) = changes.log_started {
            log.log_started = started;
        }
        if let Some(ended) = changes.log_ended {
            log.log_ended = ended;
        }
        if let Some(recording) = changes.isrecordinglocation {
            log.isrecordinglocation = recording;
        }
        Ok(Some(log.clone()))
    }

    async fn append_coordinates(&self, log_id: i32, coordinates: &[Coordinate]) -> Result<Option<Log>> {
        let mut tables = self.tables.write().await;
        let Some(log) = tables.logs.iter_mut().find(|l| l.id == log_id) else {
            return Ok(None);
        };
        log.coordinates.0.extend_from_slice(coordinates);
        Ok(Some(log.clone()))
    }

    async fn delete_log(&self, id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.logs.len();
        tables.logs.retain(|l| l.id != id);
        Ok(tables.logs.len() < before)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tables.read().await.tasks.clone())
    }

    async fn find_task_by_id(&self, id: i32) -> Result<Option<Task>> {
        Ok(self.tables.read().await.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn list_tasks_by_boat(&self, boat_id: i32) -> Result<Vec<Task>> {
        let tables = self.tables.read().await;
        let mut tasks: Vec<Task> = tables.tasks.iter().filter(|t| t.boat_id == boat_id).cloned().collect();
        tasks.sort_by(|a, b| b.created_on.cmp(&a.created_on).then(b.id.cmp(&a.id)));
        Ok(tasks)
    }

    async fn create_task(&self, boat_id: i32, task: &CreateTask) -> Result<Task> {
        let mut tables = self.tables.write().await;
        let task = Task {
            id: tables.next_id(),
            boat_id,
            description: task.description.clone(),
            status: task.status.clone(),
            created_on: task.created_on.unwrap_or_else(Utc::now),
        };
        tables.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: i32, changes: &UpdateTask) -> Result<Option<Task>> {
        let mut tables = self.tables.write().await;
        let Some(task) = tables.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(description) = &changes.description {
            task.description = description.clone();
        }
        if let Some(status) = &changes.status {
            task.status = status.clone();
        }
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.tasks.len();
        tables.tasks.retain(|t| t.id != id);
        Ok(tables.tasks.len() < before)
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        Ok(self.tables.read().await.expenses.clone())
    }

    async fn find_expense_by_id(&self, id: i32) -> Result<Option<Expense>> {
        Ok(self.tables.read().await.expenses.iter().find(|e| e.id == id).cloned())
    }

    async fn list_expenses_by_boat(&self, boat_id: i32) -> Result<Vec<Expense>> {
        let tables = self.tables.read().await;
        let mut expenses: Vec<Expense> =
            tables.expenses.iter().filter(|e| e.boat_id == boat_id).cloned().collect();
        expenses.sort_by(|a, b| b.created_on.cmp(&a.created_on).then(b.id.cmp(&a.id)));
        Ok(expenses)
    }

    async fn create_expense(&self, boat_id: i32, expense: &CreateExpense) -> Result<Expense> {
        let mut tables = self.tables.write().await;
        let expense = Expense {
            id: tables.next_id(),
            boat_id,
            expense_type: expense.expense_type.clone(),
            amount: expense.amount,
            expense_date: expense.expense_date,
            created_on: Utc::now(),
        };
        tables.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn update_expense(&self, id: i32, changes: &UpdateExpense) -> Result<Option<Expense>> {
        let mut tables = self.tables.write().await;
        let Some(expense) = tables.expenses.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        if let Some(expense_type) = &changes.expense_type {
            expense.expense_type = expense_type.clone();
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(date) = changes.expense_date {
            expense.expense_date = date;
        }
        Ok(Some(expense.clone()))
    }

    async fn delete_expense(&self, id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.expenses.len();
        tables.expenses.retain(|e| e.id != id);
        Ok(tables.expenses.len() < before)
    }
}

pub fn test_settings() -> Settings {
    let vars = [
        ("APP_ENVIRONMENT", "test"),
        ("APP_AUTH__ACCESS_TOKEN_SECRET", "test_access_secret"),
        ("APP_AUTH__REFRESH_TOKEN_SECRET", "test_refresh_secret"),
        ("APP_AUTH__BCRYPT_COST", "4"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    Settings::from_env_map(vars).expect("Failed to load test config")
}

pub fn test_state(store: Arc<MemoryStore>) -> web::Data<AppState> {
    web::Data::new(AppState::with_store(test_settings(), store))
}

pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(App::new().app_data(state).configure(routes::configure)).await
}

/// Creates an account through the API and returns the sign-up body.
pub async fn sign_up<S>(app: &S, email: &str, password: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(serde_json::json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "sign-up for {} failed", email);
    test::read_body_json(resp).await
}

/// Signs up a fresh account and returns `(user_id, access_token)`.
pub async fn signed_in_user<S>(app: &S, email: &str) -> (i32, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let body = sign_up(app, email, "P@ssw0rd").await;
    let id = body["user"]["id"].as_i64().expect("user id") as i32;
    let token = body["accessToken"].as_str().expect("access token").to_string();
    (id, token)
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (actix_web::http::header::AUTHORIZATION, format!("Bearer {}", token))
}
