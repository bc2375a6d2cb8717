//! The module contains the errors the engine can return.
//!
//! The analytics themselves are total and never fail; these errors only
//! surface when raw input (amounts, statuses, dates, records) is parsed at
//! the edges of the engine:
//!
//! - [`InvalidAmount`] thrown when a money value cannot be parsed.
//! - [`InvalidStatus`] thrown when a vehicle status name is unknown.
//! - [`InvalidRecord`] thrown when a new vehicle or expense fails validation.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidStatus`]: EngineError::InvalidStatus
//!  [`InvalidRecord`]: EngineError::InvalidRecord
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}
