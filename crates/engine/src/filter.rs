//! Composable filters over vehicles and expenses.
//!
//! Filters are plain criteria values; the engine never decides which
//! criteria to build. Deriving them from widget state (e.g. switching to a
//! custom range as soon as a bound is typed) belongs to the caller, helped by
//! [`ExpenseWindow::from_range`].

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, Expense, Vehicle, VehicleStatus, date,
    search::{self, SearchScope},
};

/// Status criterion of [`VehicleFilter`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(VehicleStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn accepts(self, status: VehicleStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = EngineError;

    /// `"All"` (or empty) accepts every status, anything else must name one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        trimmed.parse().map(StatusFilter::Only)
    }
}

/// Inventory criteria; a vehicle must pass all of them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VehicleFilter {
    pub status: StatusFilter,
    pub search_term: String,
    /// `YYYY-MM-DD`; matched against purchase or sale date. Empty = any.
    pub exact_date: String,
}

impl VehicleFilter {
    #[must_use]
    pub fn accepts(&self, vehicle: &Vehicle) -> bool {
        self.status.accepts(vehicle.status())
            && search::matches(vehicle, &self.search_term)
            && date_matches(&self.exact_date, vehicle)
    }
}

fn date_matches(exact_date: &str, vehicle: &Vehicle) -> bool {
    exact_date.is_empty()
        || vehicle.purchase.date == exact_date
        || vehicle.sale_date() == Some(exact_date)
}

/// Vehicles passing every criterion of `filter`, in input order.
#[must_use]
pub fn filter_vehicles(vehicles: &[Vehicle], filter: &VehicleFilter) -> Vec<Vehicle> {
    vehicles
        .iter()
        .filter(|v| filter.accepts(v))
        .cloned()
        .collect()
}

/// Inclusive `YYYY-MM-DD` bounds; an empty bound is open.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl DateRange {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    /// Raw string comparison; valid because the storage format sorts in
    /// calendar order.
    #[must_use]
    pub fn contains(&self, date: &str) -> bool {
        (self.start.is_empty() || date >= self.start.as_str())
            && (self.end.is_empty() || date <= self.end.as_str())
    }
}

/// Temporal criterion for expenses, relative to today or absolute.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ExpenseWindow {
    #[default]
    All,
    Today,
    /// Since the most recent Sunday, no upper bound.
    Week,
    /// Since the first of the current month, no upper bound.
    Month,
    Custom(DateRange),
}

impl ExpenseWindow {
    /// Window selected by a pair of range inputs: a custom range as soon as
    /// either bound is filled in, everything once both are cleared.
    #[must_use]
    pub fn from_range(start: &str, end: &str) -> Self {
        let range = DateRange {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        };
        if range.is_empty() {
            ExpenseWindow::All
        } else {
            ExpenseWindow::Custom(range)
        }
    }

    /// Parses a window name (`all`, `today`, `week`, `month`, `custom`) plus
    /// the custom bounds.
    pub fn parse(mode: &str, start: &str, end: &str) -> Result<Self, EngineError> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(ExpenseWindow::from_range(start, end)),
            "today" => Ok(ExpenseWindow::Today),
            "week" => Ok(ExpenseWindow::Week),
            "month" => Ok(ExpenseWindow::Month),
            "custom" => Ok(ExpenseWindow::Custom(DateRange {
                start: start.trim().to_string(),
                end: end.trim().to_string(),
            })),
            other => Err(EngineError::InvalidWindow(format!(
                "unknown expense window: {other}"
            ))),
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseWindow::All => "Total",
            ExpenseWindow::Today => "Today",
            ExpenseWindow::Week => "This Week",
            ExpenseWindow::Month => "This Month",
            ExpenseWindow::Custom(_) => "Custom Range",
        }
    }

    /// `true` if `expense` falls inside the window, with `today` as "now".
    ///
    /// Relative windows compare normalized dates, so an unparseable date
    /// never passes them; custom ranges compare the raw strings.
    #[must_use]
    pub fn accepts(&self, expense: &Expense, today: NaiveDate) -> bool {
        let since = match self {
            ExpenseWindow::All => return true,
            ExpenseWindow::Custom(range) => return range.contains(&expense.date),
            ExpenseWindow::Today => today,
            ExpenseWindow::Week => date::week_start(today),
            ExpenseWindow::Month => date::month_start(today),
        };
        let Some(occurred_on) = expense.occurred_on() else {
            tracing::debug!(id = %expense.id, date = %expense.date, "unparseable expense date");
            return false;
        };
        match self {
            ExpenseWindow::Today => occurred_on == today,
            _ => occurred_on >= since,
        }
    }
}

impl fmt::Display for ExpenseWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Expenses inside `window`, in input order.
#[must_use]
pub fn filter_expenses_by_window(
    expenses: &[Expense],
    window: &ExpenseWindow,
    today: NaiveDate,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| window.accepts(e, today))
        .cloned()
        .collect()
}

/// One global search hit, tagged with the vehicle's status so results can be
/// grouped without recomputation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub status: VehicleStatus,
    pub vehicle: Vehicle,
    /// Where a presentation layer shows the vehicle.
    pub route_hint: &'static str,
}

pub const INVENTORY_ROUTE: &str = "/inventory";

/// Vehicles matching `term` across the global field list.
#[must_use]
pub fn search_vehicles(vehicles: &[Vehicle], term: &str) -> Vec<SearchResult> {
    vehicles
        .iter()
        .filter(|v| search::matches_in(v, term, SearchScope::Global))
        .map(|v| SearchResult {
            status: v.status(),
            vehicle: v.clone(),
            route_hint: INVENTORY_ROUTE,
        })
        .collect()
}

/// Groups search hits by status, in [`VehicleStatus::ALL`] order; empty
/// groups are left out.
#[must_use]
pub fn group_by_status(results: &[SearchResult]) -> Vec<(VehicleStatus, Vec<&SearchResult>)> {
    VehicleStatus::ALL
        .into_iter()
        .map(|status| {
            let hits: Vec<&SearchResult> =
                results.iter().filter(|r| r.status == status).collect();
            (status, hits)
        })
        .filter(|(_, hits)| !hits.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn fleet() -> Vec<Vehicle> {
        vec![
            purchased("v1", "2024-01-10", 10_000),
            sold("v2", "2024-01-05", 20_000, Some("2024-02-10"), Some(25_000)),
            vehicle_with_price("v3", VehicleStatus::Workshop, 5_000),
        ]
    }

    #[test]
    fn no_op_filter_is_identity() {
        let vehicles = fleet();
        let filtered = filter_vehicles(&vehicles, &VehicleFilter::default());
        assert_eq!(filtered, vehicles);
    }

    #[test]
    fn criteria_compose_with_and() {
        let vehicles = fleet();
        let filter = VehicleFilter {
            status: StatusFilter::Only(VehicleStatus::Sold),
            search_term: "v2".to_string(),
            exact_date: String::new(),
        };
        let ids: Vec<String> = filter_vehicles(&vehicles, &filter)
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, ["v2"]);

        let filter = VehicleFilter {
            status: StatusFilter::Only(VehicleStatus::Available),
            search_term: "v2".to_string(),
            exact_date: String::new(),
        };
        assert!(filter_vehicles(&vehicles, &filter).is_empty());
    }

    #[test]
    fn exact_date_matches_purchase_or_sale() {
        let vehicles = fleet();
        let by_purchase = VehicleFilter {
            exact_date: "2024-01-10".to_string(),
            ..VehicleFilter::default()
        };
        assert_eq!(filter_vehicles(&vehicles, &by_purchase)[0].id, "v1");

        let by_sale = VehicleFilter {
            exact_date: "2024-02-10".to_string(),
            ..VehicleFilter::default()
        };
        let hits = filter_vehicles(&vehicles, &by_sale);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "v2");
    }

    #[test]
    fn status_filter_parses() {
        assert_eq!("All".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "workshop".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(VehicleStatus::Workshop)
        );
        assert!("nope".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn today_window_includes_today_only() {
        let today = ymd(2024, 1, 17);
        let expenses = vec![
            expense("e1", "v1", 10, "2024-01-17"),
            expense("e2", "v1", 10, "2024-01-16"),
        ];
        let hits = filter_expenses_by_window(&expenses, &ExpenseWindow::Today, today);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "e1");
    }

    #[test]
    fn week_window_starts_on_sunday_without_upper_bound() {
        // Wednesday; the week starts on Sunday 2024-01-14.
        let today = ymd(2024, 1, 17);
        let expenses = vec![
            expense("e1", "v1", 10, "2024-01-13"),
            expense("e2", "v1", 10, "2024-01-14"),
            expense("e3", "v1", 10, "2024-01-30"),
        ];
        let ids: Vec<String> = filter_expenses_by_window(&expenses, &ExpenseWindow::Week, today)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, ["e2", "e3"]);
    }

    #[test]
    fn month_window_starts_on_the_first() {
        let today = ymd(2024, 3, 15);
        let expenses = vec![
            expense("e1", "v1", 10, "2024-02-29"),
            expense("e2", "v1", 10, "2024-03-01"),
            expense("e3", "v1", 10, "garbage"),
        ];
        let ids: Vec<String> = filter_expenses_by_window(&expenses, &ExpenseWindow::Month, today)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, ["e2"]);
    }

    #[test]
    fn custom_range_is_inclusive() {
        let window = ExpenseWindow::Custom(DateRange {
            start: "2024-01-10".to_string(),
            end: "2024-01-20".to_string(),
        });
        let expenses = vec![
            expense("e1", "v1", 10, "2024-01-15"),
            expense("e2", "v1", 10, "2024-01-21"),
            expense("e3", "v1", 10, "2024-01-10"),
            expense("e4", "v1", 10, "2024-01-20"),
        ];
        let ids: Vec<String> = filter_expenses_by_window(&expenses, &window, ymd(2030, 1, 1))
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, ["e1", "e3", "e4"]);
    }

    #[test]
    fn custom_range_with_open_bound() {
        let window = ExpenseWindow::from_range("", "2024-01-20");
        assert!(window.accepts(&expense("e1", "v1", 1, "1999-01-01"), ymd(2024, 1, 1)));
        assert!(!window.accepts(&expense("e2", "v1", 1, "2024-01-21"), ymd(2024, 1, 1)));
    }

    #[test]
    fn range_inputs_drive_the_window() {
        assert_eq!(ExpenseWindow::from_range("", ""), ExpenseWindow::All);
        assert_eq!(
            ExpenseWindow::from_range("2024-01-01", ""),
            ExpenseWindow::Custom(DateRange {
                start: "2024-01-01".to_string(),
                end: String::new(),
            })
        );
    }

    #[test]
    fn window_names_parse() {
        assert_eq!(ExpenseWindow::parse("week", "", "").unwrap(), ExpenseWindow::Week);
        assert_eq!(
            ExpenseWindow::parse("all", "2024-01-01", "").unwrap().label(),
            "Custom Range"
        );
        assert!(matches!(
            ExpenseWindow::parse("fortnight", "", ""),
            Err(EngineError::InvalidWindow(_))
        ));
    }

    #[test]
    fn all_window_keeps_everything() {
        let expenses = vec![expense("e1", "v1", 1, "not a date")];
        assert_eq!(
            filter_expenses_by_window(&expenses, &ExpenseWindow::All, ymd(2024, 1, 1)).len(),
            1
        );
    }

    #[test]
    fn search_tags_results_with_status() {
        let vehicles = fleet();
        let results = search_vehicles(&vehicles, "sold");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, VehicleStatus::Sold);
        assert_eq!(results[0].route_hint, "/inventory");

        let everything = search_vehicles(&vehicles, "");
        let groups = group_by_status(&everything);
        let statuses: Vec<VehicleStatus> = groups.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            statuses,
            [
                VehicleStatus::Available,
                VehicleStatus::Workshop,
                VehicleStatus::Sold
            ]
        );
    }
}
