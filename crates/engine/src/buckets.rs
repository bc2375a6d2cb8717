//! Calendar-month time series of purchases and sales.

use std::{collections::BTreeMap, fmt};

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::Vehicle;

/// Default length of the trailing sales window.
pub const DEFAULT_SALES_WINDOW: u32 = 12;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, keyed by year so equal month names in different years
/// never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based.
    pub month: u32,
}

impl MonthKey {
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// `"Jan"`.
    #[must_use]
    pub fn short_label(self) -> &'static str {
        let idx = self.month.clamp(1, 12) as usize - 1;
        MONTH_ABBREVIATIONS[idx]
    }

    /// `"Jan 24"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} {:02}", self.short_label(), self.year.rem_euclid(100))
    }
}

impl fmt::Display for MonthKey {
    /// `YYYY-MM`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Purchase and sale counts of one month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActivity {
    pub month: MonthKey,
    pub label: String,
    pub purchases: u32,
    pub sales: u32,
}

/// Sale count of one month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    pub month: MonthKey,
    pub label: String,
    pub sales: u32,
}

/// Builds one bucket per month from the earliest purchase or sale up to the
/// month of `today`, inclusive.
///
/// The axis is anchored on real data and always reaches the current month,
/// so trailing months without activity show up with zero counts. With no
/// parseable dates at all the series is empty. Events dated after the
/// current month fall outside the axis and are not counted.
#[must_use]
pub fn build_monthly_series(vehicles: &[Vehicle], today: NaiveDate) -> Vec<MonthlyActivity> {
    let events: Vec<(NaiveDate, bool)> = vehicles
        .iter()
        .flat_map(|v| {
            let purchase = v.purchased_on().map(|d| (d, true));
            let sale = v.sold_on().map(|d| (d, false));
            purchase.into_iter().chain(sale)
        })
        .collect();

    let Some(earliest) = events.iter().map(|(d, _)| *d).min() else {
        return Vec::new();
    };

    let last = MonthKey::of(today);
    let mut buckets: BTreeMap<MonthKey, MonthlyActivity> = BTreeMap::new();
    let mut cursor = MonthKey::of(earliest);
    while cursor <= last {
        buckets.insert(
            cursor,
            MonthlyActivity {
                month: cursor,
                label: cursor.label(),
                purchases: 0,
                sales: 0,
            },
        );
        cursor = cursor.next();
    }

    for (date, is_purchase) in events {
        let Some(bucket) = buckets.get_mut(&MonthKey::of(date)) else {
            tracing::debug!(%date, "event outside the activity axis");
            continue;
        };
        if is_purchase {
            bucket.purchases += 1;
        } else {
            bucket.sales += 1;
        }
    }

    buckets.into_values().collect()
}

/// Builds exactly `window_months` sale buckets ending at the month of `today`,
/// whatever the data range.
#[must_use]
pub fn build_fixed_window_series(
    vehicles: &[Vehicle],
    window_months: u32,
    today: NaiveDate,
) -> Vec<MonthlySales> {
    if window_months == 0 {
        return Vec::new();
    }

    let last = MonthKey::of(today);
    let mut first = last;
    for _ in 1..window_months {
        first = first.prev();
    }

    let mut buckets: BTreeMap<MonthKey, MonthlySales> = BTreeMap::new();
    let mut cursor = first;
    while cursor <= last {
        buckets.insert(
            cursor,
            MonthlySales {
                month: cursor,
                label: cursor.short_label().to_string(),
                sales: 0,
            },
        );
        cursor = cursor.next();
    }

    for sold_on in vehicles.iter().filter_map(Vehicle::sold_on) {
        if let Some(bucket) = buckets.get_mut(&MonthKey::of(sold_on)) {
            bucket.sales += 1;
        }
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{VehicleStatus, test_support::*};

    #[test]
    fn empty_fleet_has_no_buckets() {
        assert!(build_monthly_series(&[], ymd(2024, 5, 10)).is_empty());
    }

    #[test]
    fn series_runs_from_earliest_month_to_today() {
        let vehicles = vec![
            purchased("v1", "2024-01-20", 50_000),
            sold("v2", "2023-11-03", 30_000, Some("2024-02-14"), Some(36_000)),
        ];
        let series = build_monthly_series(&vehicles, ymd(2024, 4, 2));
        let months: Vec<String> = series.iter().map(|b| b.month.to_string()).collect();
        assert_eq!(
            months,
            ["2023-11", "2023-12", "2024-01", "2024-02", "2024-03", "2024-04"]
        );
        assert_eq!(series[0].purchases, 1);
        assert_eq!(series[2].purchases, 1);
        assert_eq!(series[3].sales, 1);
        let last = series.last().unwrap();
        assert_eq!((last.purchases, last.sales), (0, 0));
        assert_eq!(last.label, "Apr 24");
    }

    #[test]
    fn current_month_is_present_without_activity() {
        let vehicles = vec![purchased("v1", "2024-04-01", 10_000)];
        let series = build_monthly_series(&vehicles, ymd(2024, 4, 30));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].month, MonthKey { year: 2024, month: 4 });
    }

    #[test]
    fn same_month_name_in_different_years_does_not_collide() {
        let vehicles = vec![
            purchased("v1", "2023-03-10", 1),
            purchased("v2", "2024-03-10", 1),
        ];
        let series = build_monthly_series(&vehicles, ymd(2024, 3, 31));
        assert_eq!(series.len(), 13);
        assert_eq!(series[0].purchases, 1);
        assert_eq!(series[12].purchases, 1);
        assert_eq!(series[0].label, "Mar 23");
        assert_eq!(series[12].label, "Mar 24");
    }

    #[test]
    fn unparseable_dates_are_skipped() {
        let vehicles = vec![purchased("v1", "not-a-date", 1)];
        assert!(build_monthly_series(&vehicles, ymd(2024, 3, 31)).is_empty());
    }

    #[test]
    fn future_only_activity_yields_no_buckets() {
        let vehicles = vec![purchased("v1", "2024-06-05", 10_000)];
        assert!(build_monthly_series(&vehicles, ymd(2024, 4, 10)).is_empty());
    }

    #[test]
    fn events_after_the_current_month_are_not_counted() {
        let vehicles = vec![sold("v1", "2024-01-15", 10_000, Some("2024-06-02"), Some(12_000))];
        let series = build_monthly_series(&vehicles, ymd(2024, 4, 10));
        let months: Vec<String> = series.iter().map(|b| b.month.to_string()).collect();
        assert_eq!(months, ["2024-01", "2024-02", "2024-03", "2024-04"]);
        assert_eq!(series[0].purchases, 1);
        assert_eq!(series.iter().map(|b| b.sales).sum::<u32>(), 0);
    }

    #[test]
    fn fixed_window_has_exact_length_and_counts_sales_only() {
        let vehicles = vec![
            sold("v1", "2020-01-01", 1, Some("2024-05-09"), Some(2)),
            sold("v2", "2020-01-01", 1, Some("2023-06-30"), Some(2)),
            sold("v3", "2020-01-01", 1, Some("2023-05-31"), Some(2)),
            vehicle("v4", "Unsold", VehicleStatus::Available),
        ];
        let series = build_fixed_window_series(&vehicles, DEFAULT_SALES_WINDOW, ymd(2024, 5, 20));
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].month, MonthKey { year: 2023, month: 6 });
        assert_eq!(series[0].sales, 1);
        assert_eq!(series[11].month, MonthKey { year: 2024, month: 5 });
        assert_eq!(series[11].sales, 1);
        assert_eq!(series[11].label, "May");
        assert_eq!(series.iter().map(|b| b.sales).sum::<u32>(), 2);
    }

    #[test]
    fn zero_window_is_empty() {
        assert!(build_fixed_window_series(&[], 0, ymd(2024, 5, 20)).is_empty());
    }

    #[test]
    fn month_key_wraps_years() {
        let dec = MonthKey { year: 2023, month: 12 };
        assert_eq!(dec.next(), MonthKey { year: 2024, month: 1 });
        assert_eq!(dec.next().prev(), dec);
    }
}
