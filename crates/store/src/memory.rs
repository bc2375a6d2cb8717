use std::sync::{Mutex, MutexGuard};

use engine::{Expense, NewExpense, NewVehicle, Vehicle};

use crate::{ResultStore, Store, StoreError, books::Books};

/// Store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: Mutex<Books>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(vehicles: Vec<Vehicle>, expenses: Vec<Expense>) -> Self {
        Self {
            books: Mutex::new(Books { vehicles, expenses }),
        }
    }

    fn books(&self) -> ResultStore<MutexGuard<'_, Books>> {
        self.books.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl Store for MemoryStore {
    fn list_vehicles(&self) -> ResultStore<Vec<Vehicle>> {
        Ok(self.books()?.vehicles.clone())
    }

    fn list_expenses(&self) -> ResultStore<Vec<Expense>> {
        Ok(self.books()?.expenses.clone())
    }

    fn add_vehicle(&self, new: NewVehicle) -> ResultStore<Vehicle> {
        self.books()?.add_vehicle(new)
    }

    fn update_vehicle(&self, vehicle: Vehicle) -> ResultStore<Vehicle> {
        self.books()?.update_vehicle(vehicle)
    }

    fn add_expense(&self, new: NewExpense) -> ResultStore<Expense> {
        self.books()?.add_expense(new)
    }

    fn update_expense(&self, expense: Expense) -> ResultStore<Expense> {
        self.books()?.update_expense(expense)
    }
}

#[cfg(test)]
mod tests {
    use engine::{Money, VehicleStatus};

    use super::*;

    fn intake(brand_model: &str) -> NewVehicle {
        NewVehicle {
            brand_model: brand_model.to_string(),
            vehicle_number: "KL-01-A-1".to_string(),
            purchase_date: "2024-01-05".to_string(),
            purchase_price: Money::from_major(40_000),
            seller_name: "Ravi".to_string(),
            seller_contact: "999".to_string(),
            seller_place: "Kochi".to_string(),
            ..NewVehicle::default()
        }
    }

    #[test]
    fn added_vehicles_are_available_and_newest_first() {
        let store = MemoryStore::default();
        let first = store.add_vehicle(intake("Honda Activa")).unwrap();
        let second = store.add_vehicle(intake("TVS Jupiter")).unwrap();
        assert_eq!(first.status(), VehicleStatus::Available);
        assert_ne!(first.id, second.id);

        let listed = store.list_vehicles().unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[test]
    fn invalid_intake_is_rejected() {
        let store = MemoryStore::default();
        let mut bad = intake("Honda Activa");
        bad.seller_name.clear();
        assert!(matches!(
            store.add_vehicle(bad),
            Err(StoreError::InvalidRecord(_))
        ));
        assert!(store.list_vehicles().unwrap().is_empty());
    }

    #[test]
    fn update_replaces_by_id() {
        let store = MemoryStore::default();
        let mut vehicle = store.add_vehicle(intake("Honda Activa")).unwrap();
        vehicle.set_status(VehicleStatus::Workshop);
        store.update_vehicle(vehicle.clone()).unwrap();
        assert_eq!(
            store.list_vehicles().unwrap()[0].status(),
            VehicleStatus::Workshop
        );

        vehicle.id = "missing".to_string();
        assert!(matches!(
            store.update_vehicle(vehicle),
            Err(StoreError::KeyNotFound(_))
        ));
    }

    #[test]
    fn expenses_need_an_existing_vehicle() {
        let store = MemoryStore::default();
        let vehicle = store.add_vehicle(intake("Honda Activa")).unwrap();

        let orphan = NewExpense {
            vehicle_id: "ghost".to_string(),
            amount: Money::from_major(100),
            date: "2024-01-06".to_string(),
            description: None,
        };
        assert!(matches!(
            store.add_expense(orphan),
            Err(StoreError::KeyNotFound(_))
        ));

        let mut expense = store
            .add_expense(NewExpense {
                vehicle_id: vehicle.id.clone(),
                amount: Money::from_major(100),
                date: "2024-01-06".to_string(),
                description: Some("wash".to_string()),
            })
            .unwrap();
        expense.amount = Money::from_major(250);
        store.update_expense(expense).unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.expenses.len(), 1);
        assert_eq!(snapshot.expenses[0].amount, Money::from_major(250));
    }

    #[test]
    fn update_expense_validates_amount() {
        let store = MemoryStore::default();
        let vehicle = store.add_vehicle(intake("Honda Activa")).unwrap();
        let mut expense = store
            .add_expense(NewExpense {
                vehicle_id: vehicle.id,
                amount: Money::from_major(100),
                date: "2024-01-06".to_string(),
                description: None,
            })
            .unwrap();
        expense.amount = Money::ZERO;
        assert!(matches!(
            store.update_expense(expense),
            Err(StoreError::InvalidRecord(_))
        ));
    }
}
