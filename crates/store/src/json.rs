use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use engine::{Expense, NewExpense, NewVehicle, Vehicle};
use serde::{Serialize, de::DeserializeOwned};

use crate::{ResultStore, Store, StoreError, books::Books};

const VEHICLES_FILE: &str = "vehicles.json";
const EXPENSES_FILE: &str = "expenses.json";

/// Store backed by two JSON array files in a data directory.
///
/// A missing file reads as an empty collection, so a fresh directory is a
/// valid empty dealership. Writes go through a temporary file and a rename,
/// and are serialized by a process-local lock.
#[derive(Debug)]
pub struct JsonStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn vehicles_path(&self) -> PathBuf {
        self.data_dir.join(VEHICLES_FILE)
    }

    fn expenses_path(&self) -> PathBuf {
        self.data_dir.join(EXPENSES_FILE)
    }

    fn lock(&self) -> ResultStore<MutexGuard<'_, ()>> {
        self.write_lock.lock().map_err(|_| StoreError::Poisoned)
    }

    fn load(&self) -> ResultStore<Books> {
        Ok(Books {
            vehicles: read_collection(&self.vehicles_path())?,
            expenses: read_collection(&self.expenses_path())?,
        })
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> ResultStore<Vec<T>> {
    let path_str = path.display().to_string();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path_str, "data file missing, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path_str,
                source,
            });
        }
    };

    let items: Vec<T> = serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
        path: path_str.clone(),
        source,
    })?;
    tracing::debug!(path = %path_str, count = items.len(), "loaded data file");
    Ok(items)
}

fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> ResultStore<()> {
    let path_str = path.display().to_string();
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path_str.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_vec_pretty(items).map_err(|source| StoreError::Json {
        path: path_str.clone(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    tracing::info!(path = %path_str, count = items.len(), "saved data file");
    Ok(())
}

impl Store for JsonStore {
    fn list_vehicles(&self) -> ResultStore<Vec<Vehicle>> {
        read_collection(&self.vehicles_path())
    }

    fn list_expenses(&self) -> ResultStore<Vec<Expense>> {
        read_collection(&self.expenses_path())
    }

    fn add_vehicle(&self, new: NewVehicle) -> ResultStore<Vehicle> {
        let _guard = self.lock()?;
        let mut books = self.load()?;
        let vehicle = books.add_vehicle(new)?;
        write_collection(&self.vehicles_path(), &books.vehicles)?;
        Ok(vehicle)
    }

    fn update_vehicle(&self, vehicle: Vehicle) -> ResultStore<Vehicle> {
        let _guard = self.lock()?;
        let mut books = self.load()?;
        let vehicle = books.update_vehicle(vehicle)?;
        write_collection(&self.vehicles_path(), &books.vehicles)?;
        Ok(vehicle)
    }

    fn add_expense(&self, new: NewExpense) -> ResultStore<Expense> {
        let _guard = self.lock()?;
        let mut books = self.load()?;
        let expense = books.add_expense(new)?;
        write_collection(&self.expenses_path(), &books.expenses)?;
        Ok(expense)
    }

    fn update_expense(&self, expense: Expense) -> ResultStore<Expense> {
        let _guard = self.lock()?;
        let mut books = self.load()?;
        let expense = books.update_expense(expense)?;
        write_collection(&self.expenses_path(), &books.expenses)?;
        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use engine::{Money, SaleDetails, VehicleStatus};

    use super::*;

    fn temp_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_stores")
            .join(uuid::Uuid::new_v4().to_string())
    }

    #[test]
    fn missing_files_read_as_empty() {
        let store = JsonStore::new(temp_dir());
        let snapshot = store.snapshot().unwrap();
        assert!(snapshot.vehicles.is_empty());
        assert!(snapshot.expenses.is_empty());
    }

    #[test]
    fn writes_survive_a_reopen() {
        let dir = temp_dir();
        let store = JsonStore::new(&dir);
        let mut vehicle = store
            .add_vehicle(NewVehicle {
                brand_model: "Honda Activa".to_string(),
                vehicle_number: "KL-07-1".to_string(),
                purchase_date: "2024-01-05".to_string(),
                purchase_price: Money::from_major(50_000),
                seller_name: "Ravi".to_string(),
                seller_contact: "999".to_string(),
                seller_place: "Kochi".to_string(),
                ..NewVehicle::default()
            })
            .unwrap();
        vehicle.sell(SaleDetails {
            date: Some("2024-02-01".to_string()),
            selling_price: Some(Money::from_major(65_000)),
            ..SaleDetails::default()
        });
        store.update_vehicle(vehicle.clone()).unwrap();
        store
            .add_expense(NewExpense {
                vehicle_id: vehicle.id.clone(),
                amount: Money::from_major(3_000),
                date: "2024-01-10".to_string(),
                description: None,
            })
            .unwrap();

        let reopened = JsonStore::new(&dir);
        let snapshot = reopened.snapshot().unwrap();
        assert_eq!(snapshot.vehicles, vec![vehicle]);
        assert_eq!(snapshot.vehicles[0].status(), VehicleStatus::Sold);
        assert_eq!(snapshot.expenses.len(), 1);

        let raw = fs::read_to_string(dir.join(VEHICLES_FILE)).unwrap();
        assert!(raw.contains("\"sellingPrice\": 65000"));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(EXPENSES_FILE), "{not json").unwrap();
        let store = JsonStore::new(&dir);
        assert!(matches!(
            store.list_expenses(),
            Err(StoreError::Json { .. })
        ));
    }
}
