//! Storage collaborator of the dealership books.
//!
//! The analytics engine only reads snapshots; this crate is where vehicles
//! and expenses are listed, created and updated. Two implementations are
//! provided:
//!
//! - [`JsonStore`] keeps `vehicles.json` and `expenses.json` in a data
//!   directory.
//! - [`MemoryStore`] keeps everything in RAM (tests, demos).
//!
//! Failures (I/O, malformed files, unknown ids, invalid input) are surfaced
//! here as [`StoreError`], never synthesized by the engine.

use engine::{EngineError, Expense, NewExpense, NewVehicle, Snapshot, Vehicle};
use thiserror::Error;

pub use json::JsonStore;
pub use memory::MemoryStore;

mod books;
mod json;
mod memory;

pub type ResultStore<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    InvalidRecord(#[from] EngineError),
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("store lock poisoned")]
    Poisoned,
}

/// Interface the rest of the system uses to reach persisted records.
pub trait Store: Send + Sync {
    fn list_vehicles(&self) -> ResultStore<Vec<Vehicle>>;

    fn list_expenses(&self) -> ResultStore<Vec<Expense>>;

    /// Both collections, read for one computation.
    fn snapshot(&self) -> ResultStore<Snapshot> {
        Ok(Snapshot::new(self.list_vehicles()?, self.list_expenses()?))
    }

    /// Books a purchase as a new `Available` vehicle and returns it.
    fn add_vehicle(&self, new: NewVehicle) -> ResultStore<Vehicle>;

    /// Replaces the vehicle with the same id and returns the stored value.
    fn update_vehicle(&self, vehicle: Vehicle) -> ResultStore<Vehicle>;

    /// Books an expense against an existing vehicle and returns it.
    fn add_expense(&self, new: NewExpense) -> ResultStore<Expense>;

    /// Replaces the expense with the same id and returns the stored value.
    fn update_expense(&self, expense: Expense) -> ResultStore<Expense>;
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
