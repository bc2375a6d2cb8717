//! View models handed to presentation, computed from one [`Snapshot`].

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    Expense, ExpenseWindow, Money, Vehicle, VehicleFilter, VehicleStatus,
    buckets::{self, DEFAULT_SALES_WINDOW, MonthlyActivity, MonthlySales},
    filter::{self, SearchResult},
    finance::{self, DashboardStats, ExpenseTotals},
    search::{self, SearchScope},
};

/// Immutable copy of the two raw collections the engine works on.
///
/// Every view is recomputed from scratch; nothing is cached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub vehicles: Vec<Vehicle>,
    pub expenses: Vec<Expense>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub activity: Vec<MonthlyActivity>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub vehicle: Vehicle,
    pub expense_total: Money,
    /// Only for sold vehicles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<Money>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub sale_count: usize,
    /// Over every sold vehicle, regardless of the list filters.
    pub total_profit: Money,
    pub monthly_sales: Vec<MonthlySales>,
    /// Newest sale first.
    pub sales: Vec<InventoryRow>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseGroup {
    pub vehicle: Vehicle,
    pub expenses: Vec<Expense>,
    pub total: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    pub window: ExpenseWindow,
    pub label: &'static str,
    /// Sum over the shown groups; orphaned expenses never count.
    pub total: Money,
    pub groups: Vec<ExpenseGroup>,
}

impl Snapshot {
    #[must_use]
    pub fn new(vehicles: Vec<Vehicle>, expenses: Vec<Expense>) -> Self {
        Self { vehicles, expenses }
    }

    fn expense_totals(&self) -> ExpenseTotals {
        finance::expenses_by_known_vehicle(&self.vehicles, &self.expenses)
    }

    fn row(vehicle: &Vehicle, totals: &ExpenseTotals) -> InventoryRow {
        InventoryRow {
            vehicle: vehicle.clone(),
            expense_total: totals.get(&vehicle.id),
            profit: finance::profit(vehicle, totals),
        }
    }

    /// Fleet figures and the monthly purchase/sale series up to `today`.
    #[must_use]
    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        Dashboard {
            stats: finance::fleet_stats(&self.vehicles, &self.expenses),
            activity: buckets::build_monthly_series(&self.vehicles, today),
        }
    }

    /// Vehicles passing `filter`, each with its expense total and profit.
    #[must_use]
    pub fn inventory(&self, filter: &VehicleFilter) -> Vec<InventoryRow> {
        let totals = self.expense_totals();
        self.vehicles
            .iter()
            .filter(|v| filter.accepts(v))
            .map(|v| Self::row(v, &totals))
            .collect()
    }

    /// Sold vehicles matching `search_term` (brand/model, number, buyer) and
    /// sold on `sale_date` when given, newest sale first.
    #[must_use]
    pub fn sales_report(&self, search_term: &str, sale_date: &str, today: NaiveDate) -> SalesReport {
        let totals = self.expense_totals();
        let sold: Vec<&Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.status() == VehicleStatus::Sold)
            .collect();

        let mut listed: Vec<&Vehicle> = sold
            .iter()
            .copied()
            .filter(|v| search::matches_in(v, search_term, SearchScope::Sales))
            .filter(|v| sale_date.is_empty() || v.sale_date() == Some(sale_date))
            .collect();
        // Undated sales sort last.
        listed.sort_by_key(|v| Reverse(v.sold_on()));

        SalesReport {
            sale_count: sold.len(),
            total_profit: finance::total_profit(sold.iter().copied(), &totals),
            monthly_sales: buckets::build_fixed_window_series(
                &self.vehicles,
                DEFAULT_SALES_WINDOW,
                today,
            ),
            sales: listed.into_iter().map(|v| Self::row(v, &totals)).collect(),
        }
    }

    /// Expenses inside `window`, grouped under the vehicles matching
    /// `search_term` (brand/model and number).
    ///
    /// Every matching vehicle gets a group, possibly empty.
    #[must_use]
    pub fn expense_report(
        &self,
        window: &ExpenseWindow,
        search_term: &str,
        today: NaiveDate,
    ) -> ExpenseReport {
        let in_window = filter::filter_expenses_by_window(&self.expenses, window, today);

        let groups: Vec<ExpenseGroup> = self
            .vehicles
            .iter()
            .filter(|v| search::matches_in(v, search_term, SearchScope::Expenses))
            .map(|v| {
                let expenses: Vec<Expense> = in_window
                    .iter()
                    .filter(|e| e.vehicle_id == v.id)
                    .cloned()
                    .collect();
                let total = expenses.iter().map(|e| e.amount).sum();
                ExpenseGroup {
                    vehicle: v.clone(),
                    expenses,
                    total,
                }
            })
            .collect();

        ExpenseReport {
            window: window.clone(),
            label: window.label(),
            total: groups.iter().map(|g| g.total).sum(),
            groups,
        }
    }

    /// Global search across the fleet.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<SearchResult> {
        filter::search_vehicles(&self.vehicles, term)
    }
}
