//! Record-level mutations shared by every store implementation.

use engine::{Expense, NewExpense, NewVehicle, Vehicle};

use crate::{ResultStore, StoreError, new_id};

/// Mutable working copy of both collections, newest records first.
#[derive(Clone, Debug, Default)]
pub(crate) struct Books {
    pub vehicles: Vec<Vehicle>,
    pub expenses: Vec<Expense>,
}

impl Books {
    pub fn add_vehicle(&mut self, new: NewVehicle) -> ResultStore<Vehicle> {
        let vehicle = new.into_vehicle(new_id())?;
        self.vehicles.insert(0, vehicle.clone());
        Ok(vehicle)
    }

    pub fn update_vehicle(&mut self, vehicle: Vehicle) -> ResultStore<Vehicle> {
        if vehicle.purchase.price.is_negative() {
            return Err(engine::EngineError::InvalidAmount(
                "purchase price must be >= 0".to_string(),
            )
            .into());
        }
        let slot = self
            .vehicles
            .iter_mut()
            .find(|v| v.id == vehicle.id)
            .ok_or_else(|| StoreError::KeyNotFound(vehicle.id.clone()))?;
        *slot = vehicle.clone();
        Ok(vehicle)
    }

    pub fn add_expense(&mut self, new: NewExpense) -> ResultStore<Expense> {
        let expense = new.into_expense(new_id())?;
        self.ensure_vehicle(&expense.vehicle_id)?;
        self.expenses.insert(0, expense.clone());
        Ok(expense)
    }

    pub fn update_expense(&mut self, expense: Expense) -> ResultStore<Expense> {
        let id = expense.id.clone();
        let expense = NewExpense::from(expense).into_expense(id)?;
        self.ensure_vehicle(&expense.vehicle_id)?;
        let slot = self
            .expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or_else(|| StoreError::KeyNotFound(expense.id.clone()))?;
        *slot = expense.clone();
        Ok(expense)
    }

    fn ensure_vehicle(&self, vehicle_id: &str) -> ResultStore<()> {
        if self.vehicles.iter().any(|v| v.id == vehicle_id) {
            Ok(())
        } else {
            Err(StoreError::KeyNotFound(vehicle_id.to_string()))
        }
    }
}
