use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, date};

/// A running cost booked against one vehicle (repairs, polishing, transport…).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub vehicle_id: String,
    pub amount: Money,
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Expense {
    /// Normalized expense date, `None` if the stored string is malformed.
    #[must_use]
    pub fn occurred_on(&self) -> Option<NaiveDate> {
        date::parse_date(&self.date)
    }
}

/// An expense entering the books.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewExpense {
    pub vehicle_id: String,
    pub amount: Money,
    pub date: String,
    pub description: Option<String>,
}

impl NewExpense {
    pub fn validate(&self) -> ResultEngine<()> {
        if self.vehicle_id.trim().is_empty() {
            return Err(EngineError::InvalidRecord(
                "an expense must reference a vehicle".to_string(),
            ));
        }
        if !self.amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "expense amount must be > 0".to_string(),
            ));
        }
        if date::parse_date(&self.date).is_none() {
            return Err(EngineError::InvalidDate(format!(
                "invalid expense date: {:?}",
                self.date
            )));
        }
        Ok(())
    }

    /// Validates the expense and assigns it an id.
    pub fn into_expense(self, id: String) -> ResultEngine<Expense> {
        self.validate()?;
        Ok(Expense {
            id,
            vehicle_id: self.vehicle_id.trim().to_string(),
            amount: self.amount,
            date: self.date.trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }
}

impl From<Expense> for NewExpense {
    fn from(expense: Expense) -> Self {
        Self {
            vehicle_id: expense.vehicle_id,
            amount: expense.amount,
            date: expense.date,
            description: expense.description,
        }
    }
}
