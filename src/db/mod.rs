//! Database module for the boat log server
//!
//! Row types, the keyed-query store traits, and their Postgres
//! implementation.

pub mod models;
pub mod operations;
pub mod store;

pub use models::{Boat, Coordinate, Expense, Log, PublicUser, Task, User};
pub use operations::DbOperations;
pub use store::{BoatStore, ExpenseStore, LogStore, Repository, TaskStore, UserStore};
