use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::db::models::{
    Boat, Coordinate, CreateBoat, CreateExpense, CreateLog, CreateTask, Expense, Log, NewUser, Task,
    UpdateBoat, UpdateExpense, UpdateLog, UpdateTask, User, UserChanges,
};
use crate::db::store::{BoatStore, ExpenseStore, LogStore, TaskStore, UserStore};
use crate::Result;

pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn new_with_options(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(self.pool.as_ref()).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for DbOperations {
    async fn list_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, password, created FROM users ORDER BY id ASC",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(users)
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, created FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, created FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, created)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, created
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn update_user(&self, id: i32, changes: &UserChanges) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = COALESCE($1, email),
                password = COALESCE($2, password)
            WHERE id = $3
            RETURNING id, email, password, created
            "#,
        )
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl BoatStore for DbOperations {
    async fn list_boats(&self) -> Result<Vec<Boat>> {
        let boats = sqlx::query_as::<_, Boat>(
            "SELECT id, user_id, name, model FROM boats ORDER BY id ASC",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(boats)
    }

    async fn find_boat_by_id(&self, id: i32) -> Result<Option<Boat>> {
        let boat = sqlx::query_as::<_, Boat>(
            "SELECT id, user_id, name, model FROM boats WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(boat)
    }

    async fn create_boat(&self, boat: &CreateBoat) -> Result<Boat> {
        let boat = sqlx::query_as::<_, Boat>(
            r#"
            INSERT INTO boats (user_id, name, model)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, model
            "#,
        )
        .bind(boat.user_id)
        .bind(&boat.name)
        .bind(&boat.model)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(boat)
    }

    async fn update_boat(&self, id: i32, changes: &UpdateBoat) -> Result<Option<Boat>> {
        let boat = sqlx::query_as::<_, Boat>(
            r#"
            UPDATE boats
            SET user_id = COALESCE($1, user_id),
                name = COALESCE($2, name),
                model = COALESCE($3, model)
            WHERE id = $4
            RETURNING id, user_id, name, model
            "#,
        )
        .bind(changes.user_id)
        .bind(&changes.name)
        .bind(&changes.model)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(boat)
    }

    async fn delete_boat(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM boats WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl LogStore for DbOperations {
    async fn list_logs(&self) -> Result<Vec<Log>> {
        let logs = sqlx::query_as::<_, Log>(
            r#"
            SELECT id, boat_id, description, crew_members, coordinates, photo_urls,
                   log_started, log_ended, created_on, isrecordinglocation
            FROM logs ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(logs)
    }

    async fn find_log_by_id(&self, id: i32) -> Result<Option<Log>> {
        let log = sqlx::query_as::<_, Log>(
            r#"
            SELECT id, boat_id, description, crew_members, coordinates, photo_urls,
                   log_started, log_ended, created_on, isrecordinglocation
            FROM logs WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(log)
    }

    async fn list_logs_by_boat(&self, boat_id: i32) -> Result<Vec<Log>> {
        let logs = sqlx::query_as::<_, Log>(
            r#"
            SELECT id, boat_id, description, crew_members, coordinates, photo_urls,
                   log_started, log_ended, created_on, isrecordinglocation
            FROM logs WHERE boat_id = $1 ORDER BY id ASC
            "#,
        )
        .bind(boat_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(logs)
    }

    async fn create_log(&self, boat_id: i32, log: &CreateLog) -> Result<Log> {
        let log = sqlx::query_as::<_, Log>(
            r#"
            INSERT INTO logs (boat_id, description, crew_members, coordinates, photo_urls,
                              log_started, log_ended, created_on, isrecordinglocation)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, boat_id, description, crew_members, coordinates, photo_urls,
                      log_started, log_ended, created_on, isrecordinglocation
            "#,
        )
        .bind(boat_id)
        .bind(&log.description)
        .bind(&log.crew_members)
        .bind(Json(&log.coordinates))
        .bind(&log.photo_urls)
        .bind(log.log_started)
        .bind(log.log_ended)
        .bind(log.created_on.unwrap_or_else(Utc::now))
        .bind(log.isrecordinglocation)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(log)
    }

    async fn update_log(&self, id: i32, changes: &UpdateLog) -> Result<Option<Log>> {
        let log = sqlx::query_as::<_, Log>(
            r#"
            UPDATE logs
            SET boat_id = COALESCE($1, boat_id),
                description = COALESCE($2, description),
                crew_members = COALESCE($3, crew_members),
                coordinates = COALESCE($4, coordinates),
                photo_urls = COALESCE($5, photo_urls),
                log_started = COALESCE($6, log_started),
                log_ended = COALESCE($7, log_ended),
                isrecordinglocation = COALESCE($8, isrecordinglocation)
            WHERE id = $9
            RETURNING id, boat_id, description, crew_members, coordinates, photo_urls,
                      log_started, log_ended, created_on, isrecordinglocation
            "#,
        )
        .bind(changes.boat_id)
        .bind(&changes.description)
        .bind(&changes.crew_members)
        .bind(changes.coordinates.as_ref().map(Json))
        .bind(&changes.photo_urls)
        .bind(changes.log_started)
        .bind(changes.log_ended)
        .bind(changes.isrecordinglocation)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(log)
    }

    async fn append_coordinates(&self, log_id: i32, coordinates: &[Coordinate]) -> Result<Option<Log>> {
        // Single statement, so concurrent appends to one log never drop pairs.
        let log = sqlx::query_as::<_, Log>(
            r#"
            UPDATE logs
            SET coordinates = (CASE jsonb_typeof(coordinates)
                                   WHEN 'array' THEN coordinates
                                   ELSE '[]'::jsonb
                               END) || $1
            WHERE id = $2
            RETURNING id, boat_id, description, crew_members, coordinates, photo_urls,
                      log_started, log_ended, created_on, isrecordinglocation
            "#,
        )
        .bind(Json(coordinates))
        .bind(log_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(log)
    }

    async fn delete_log(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM logs WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskStore for DbOperations {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, boat_id, description, status, created_on FROM tasks ORDER BY id ASC",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(tasks)
    }

    async fn find_task_by_id(&self, id: i32) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, boat_id, description, status, created_on FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(task)
    }

    async fn list_tasks_by_boat(&self, boat_id: i32) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, boat_id, description, status, created_on
            FROM tasks WHERE boat_id = $1 ORDER BY created_on DESC, id DESC
            "#,
        )
        .bind(boat_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(tasks)
    }

    async fn create_task(&self, boat_id: i32, task: &CreateTask) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (boat_id, description, status, created_on)
            VALUES ($1, $2, $3, $4)
            RETURNING id, boat_id, description, status, created_on
            "#,
        )
        .bind(boat_id)
        .bind(&task.description)
        .bind(&task.status)
        .bind(task.created_on.unwrap_or_else(Utc::now))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(task)
    }

    async fn update_task(&self, id: i32, changes: &UpdateTask) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET description = COALESCE($1, description),
                status = COALESCE($2, status)
            WHERE id = $3
            RETURNING id, boat_id, description, status, created_on
            "#,
        )
        .bind(&changes.description)
        .bind(&changes.status)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(task)
    }

    async fn delete_task(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ExpenseStore for DbOperations {
    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, boat_id, expense_type, amount, expense_date, created_on
            FROM expenses ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(expenses)
    }

    async fn find_expense_by_id(&self, id: i32) -> Result<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, boat_id, expense_type, amount, expense_date, created_on
            FROM expenses WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(expense)
    }

    async fn list_expenses_by_boat(&self, boat_id: i32) -> Result<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, boat_id, expense_type, amount, expense_date, created_on
            FROM expenses WHERE boat_id = $1 ORDER BY created_on DESC, id DESC
            "#,
        )
        .bind(boat_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(expenses)
    }

    async fn create_expense(&self, boat_id: i32, expense: &CreateExpense) -> Result<Expense> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (boat_id, expense_type, amount, expense_date, created_on)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, boat_id, expense_type, amount, expense_date, created_on
            "#,
        )
        .bind(boat_id)
        .bind(&expense.expense_type)
        .bind(expense.amount)
        .bind(expense.expense_date)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(expense)
    }

    async fn update_expense(&self, id: i32, changes: &UpdateExpense) -> Result<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET expense_type = COALESCE($1, expense_type),
                amount = COALESCE($2, amount),
                expense_date = COALESCE($3, expense_date)
            WHERE id = $4
            RETURNING id, boat_id, expense_type, amount, expense_date, created_on
            "#,
        )
        .bind(&changes.expense_type)
        .bind(changes.amount)
        .bind(changes.expense_date)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(expense)
    }

    async fn delete_expense(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
