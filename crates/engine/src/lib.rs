//! Derived analytics over a vehicle dealership's books.
//!
//! The engine reads two immutable collections, [`Vehicle`]s and
//! [`Expense`]s, and turns them into dashboard figures, monthly series,
//! profit reports, filtered lists and search results. Every computation is a
//! pure function of its inputs plus an explicit `today`; nothing is cached,
//! nothing is persisted and no analytics operation can fail.
//!
//! ```rust
//! use engine::{Money, Snapshot};
//!
//! let vehicles = serde_json::from_str(r#"[{
//!     "id": "v1", "brandModel": "Honda Activa", "vehicleNumber": "KL-07-1",
//!     "purchaseDate": "2024-01-05", "purchasePrice": 50000,
//!     "sellerName": "Ravi", "status": "Sold",
//!     "saleDate": "2024-02-01", "sellingPrice": 65000
//! }]"#).unwrap();
//! let expenses = serde_json::from_str(
//!     r#"[{"id": "e1", "vehicleId": "v1", "amount": 3000, "date": "2024-01-10"}]"#,
//! ).unwrap();
//!
//! let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let dashboard = Snapshot::new(vehicles, expenses).dashboard(today);
//! assert_eq!(dashboard.stats.total_profit, Money::from_major(12_000));
//! assert_eq!(dashboard.stats.total_invested, Money::ZERO);
//! ```

pub use buckets::{
    DEFAULT_SALES_WINDOW, MonthKey, MonthlyActivity, MonthlySales, build_fixed_window_series,
    build_monthly_series,
};
pub use currency::Currency;
pub use error::EngineError;
pub use expense::{Expense, NewExpense};
pub use filter::{
    DateRange, ExpenseWindow, SearchResult, StatusFilter, VehicleFilter, filter_expenses_by_window,
    filter_vehicles, group_by_status, search_vehicles,
};
pub use finance::{
    DashboardStats, ExpenseTotals, expenses_by_known_vehicle, expenses_by_vehicle, fleet_stats,
    profit, total_invested, total_profit,
};
pub use money::Money;
pub use search::{SearchScope, matches, matches_in};
pub use vehicle::{
    Buyer, Finance, NewVehicle, Partnership, Party, PurchaseDetails, SaleDetails, Vehicle,
    VehicleRecord, VehicleState, VehicleStatus,
};
pub use views::{Dashboard, ExpenseGroup, ExpenseReport, InventoryRow, SalesReport, Snapshot};

pub mod buckets;
mod currency;
pub mod date;
mod error;
mod expense;
pub mod filter;
pub mod finance;
mod money;
pub mod search;
mod vehicle;
mod views;

type ResultEngine<T> = Result<T, EngineError>;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::{
        Expense, Money, Party, PurchaseDetails, SaleDetails, Vehicle, VehicleState, VehicleStatus,
    };

    pub(crate) fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base(id: &str, brand_model: &str, purchase_date: &str, price: i64) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            brand_model: brand_model.to_string(),
            vehicle_number: format!("KL-{id}"),
            purchase: PurchaseDetails {
                date: purchase_date.to_string(),
                price: Money::from_major(price),
                seller: Party {
                    name: "Seller".to_string(),
                    contact: "0000".to_string(),
                    place: "Kochi".to_string(),
                    address: None,
                },
                ..PurchaseDetails::default()
            },
            state: VehicleState::Available,
            notes: None,
        }
    }

    pub(crate) fn vehicle(id: &str, brand_model: &str, status: VehicleStatus) -> Vehicle {
        let mut v = base(id, brand_model, "2024-01-01", 0);
        v.set_status(status);
        v
    }

    pub(crate) fn vehicle_with_price(id: &str, status: VehicleStatus, price: i64) -> Vehicle {
        let mut v = base(id, "Hero Splendor", "2024-01-01", price);
        v.set_status(status);
        v
    }

    pub(crate) fn purchased(id: &str, purchase_date: &str, price: i64) -> Vehicle {
        base(id, "Honda Activa", purchase_date, price)
    }

    pub(crate) fn sold(
        id: &str,
        purchase_date: &str,
        price: i64,
        sale_date: Option<&str>,
        selling_price: Option<i64>,
    ) -> Vehicle {
        let mut v = base(id, "Bajaj Pulsar", purchase_date, price);
        v.sell(SaleDetails {
            date: sale_date.map(ToString::to_string),
            selling_price: selling_price.map(Money::from_major),
            ..SaleDetails::default()
        });
        v
    }

    pub(crate) fn expense(id: &str, vehicle_id: &str, amount: i64, date: &str) -> Expense {
        Expense {
            id: id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            amount: Money::from_major(amount),
            date: date.to_string(),
            description: None,
        }
    }
}
