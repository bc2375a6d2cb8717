//! Money roll-ups joining vehicles to their expenses.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{Expense, Money, Vehicle, VehicleStatus};

/// Expense totals per vehicle id.
///
/// Vehicles without expenses are absent; [`ExpenseTotals::get`] reads them as
/// zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseTotals(HashMap<String, Money>);

impl ExpenseTotals {
    /// Total expenses booked against `vehicle_id`.
    #[must_use]
    pub fn get(&self, vehicle_id: &str) -> Money {
        self.0.get(vehicle_id).copied().unwrap_or(Money::ZERO)
    }
}

/// Sums expense amounts per vehicle id.
#[must_use]
pub fn expenses_by_vehicle(expenses: &[Expense]) -> ExpenseTotals {
    let mut totals: HashMap<String, Money> = HashMap::new();
    for expense in expenses {
        *totals.entry(expense.vehicle_id.clone()).or_default() += expense.amount;
    }
    ExpenseTotals(totals)
}

/// Like [`expenses_by_vehicle`], skipping orphaned expenses whose vehicle is
/// not in `vehicles`.
#[must_use]
pub fn expenses_by_known_vehicle(vehicles: &[Vehicle], expenses: &[Expense]) -> ExpenseTotals {
    let known: HashSet<&str> = vehicles.iter().map(|v| v.id.as_str()).collect();
    let (kept, orphaned): (Vec<&Expense>, Vec<&Expense>) = expenses
        .iter()
        .partition(|e| known.contains(e.vehicle_id.as_str()));
    if !orphaned.is_empty() {
        tracing::debug!(count = orphaned.len(), "ignoring orphaned expenses");
    }

    let mut totals: HashMap<String, Money> = HashMap::new();
    for expense in kept {
        *totals.entry(expense.vehicle_id.clone()).or_default() += expense.amount;
    }
    ExpenseTotals(totals)
}

/// Capital tied up in unsold stock: purchase price plus expenses of every
/// vehicle that is not `Sold`.
#[must_use]
pub fn total_invested(vehicles: &[Vehicle], totals: &ExpenseTotals) -> Money {
    vehicles
        .iter()
        .filter(|v| !v.is_sold())
        .map(|v| v.purchase.price + totals.get(&v.id))
        .sum()
}

/// Profit of a sold vehicle: selling price (absent = 0) minus purchase price
/// minus its expenses. Can be negative.
///
/// `None` for vehicles that are not sold; unsold stock has no profit figure.
#[must_use]
pub fn profit(vehicle: &Vehicle, totals: &ExpenseTotals) -> Option<Money> {
    let sale = vehicle.sale()?;
    let selling_price = sale.selling_price.unwrap_or(Money::ZERO);
    Some(selling_price - vehicle.purchase.price - totals.get(&vehicle.id))
}

/// Sum of [`profit`] over `sold_vehicles`.
///
/// Callers are expected to pass vehicles already restricted to `Sold`;
/// anything else has no profit and contributes nothing. A sold vehicle
/// without a selling price counts with a selling price of 0.
#[must_use]
pub fn total_profit<'a, I>(sold_vehicles: I, totals: &ExpenseTotals) -> Money
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    sold_vehicles
        .into_iter()
        .filter_map(|v| profit(v, totals))
        .sum()
}

/// Fleet-wide figures shown on the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_vehicles: usize,
    /// Vehicles not yet sold.
    pub current_stock: usize,
    pub available_count: usize,
    pub total_invested: Money,
    pub total_profit: Money,
}

/// Computes [`DashboardStats`] over the whole fleet.
///
/// `total_profit` only counts sold vehicles that carry a selling price.
#[must_use]
pub fn fleet_stats(vehicles: &[Vehicle], expenses: &[Expense]) -> DashboardStats {
    let totals = expenses_by_vehicle(expenses);

    let priced_sales = vehicles
        .iter()
        .filter(|v| v.is_sold() && v.selling_price().is_some());

    DashboardStats {
        total_vehicles: vehicles.len(),
        current_stock: vehicles.iter().filter(|v| !v.is_sold()).count(),
        available_count: vehicles
            .iter()
            .filter(|v| v.status() == VehicleStatus::Available)
            .count(),
        total_invested: total_invested(vehicles, &totals),
        total_profit: total_profit(priced_sales, &totals),
    }
}
