//! Plain-text rendering of the engine views.

use std::fmt::{self, Write};

use engine::{
    Dashboard, ExpenseReport, InventoryRow, SalesReport, SearchResult, Vehicle, group_by_status,
};

fn title(vehicle: &Vehicle) -> String {
    format!("{} ({})", vehicle.brand_model, vehicle.vehicle_number)
}

pub fn dashboard(view: &Dashboard) -> Result<String, fmt::Error> {
    let stats = &view.stats;
    let mut out = String::new();
    writeln!(out, "Total vehicles   {}", stats.total_vehicles)?;
    writeln!(out, "Current stock    {}", stats.current_stock)?;
    writeln!(out, "Available        {}", stats.available_count)?;
    writeln!(out, "Total invested   {}", stats.total_invested)?;
    writeln!(out, "Total profit     {}", stats.total_profit)?;

    if !view.activity.is_empty() {
        writeln!(out, "\nMonth    Purchases  Sales")?;
        for bucket in &view.activity {
            writeln!(
                out,
                "{:<8} {:>9}  {:>5}",
                bucket.label, bucket.purchases, bucket.sales
            )?;
        }
    }
    Ok(out)
}

fn row_line(row: &InventoryRow) -> Result<String, fmt::Error> {
    let vehicle = &row.vehicle;
    let mut line = format!(
        "{:<9} {}  bought {} for {}  expenses {}",
        vehicle.status().as_str(),
        title(vehicle),
        vehicle.purchase.date,
        vehicle.purchase.price,
        row.expense_total
    );
    if let Some(profit) = row.profit {
        write!(line, "  profit {profit}")?;
    }
    Ok(line)
}

pub fn inventory(rows: &[InventoryRow]) -> Result<String, fmt::Error> {
    if rows.is_empty() {
        return Ok("No vehicles found.\n".to_string());
    }
    let mut out = String::new();
    for row in rows {
        writeln!(out, "{}", row_line(row)?)?;
    }
    Ok(out)
}

pub fn sales(report: &SalesReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Vehicles sold    {}", report.sale_count)?;
    writeln!(out, "Total profit     {}", report.total_profit)?;

    writeln!(out, "\nMonth    Sales")?;
    for bucket in &report.monthly_sales {
        writeln!(out, "{:<8} {:>5}", bucket.label, bucket.sales)?;
    }

    writeln!(out)?;
    if report.sales.is_empty() {
        writeln!(out, "No sales found.")?;
    }
    for row in &report.sales {
        let vehicle = &row.vehicle;
        writeln!(
            out,
            "{}  {}  to {}  for {}  profit {}",
            vehicle.sale_date().unwrap_or("-"),
            title(vehicle),
            vehicle.buyer_name().unwrap_or("-"),
            vehicle
                .selling_price()
                .map_or_else(|| "-".to_string(), |p| p.to_string()),
            row.profit.map_or_else(|| "-".to_string(), |p| p.to_string()),
        )?;
    }
    Ok(out)
}

pub fn expenses(report: &ExpenseReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}: {}", report.label, report.total)?;
    for group in &report.groups {
        writeln!(out, "\n{}  {}", title(&group.vehicle), group.total)?;
        for expense in &group.expenses {
            writeln!(
                out,
                "  {}  {}  {}",
                expense.date,
                expense.amount,
                expense.description.as_deref().unwrap_or("")
            )?;
        }
    }
    Ok(out)
}

pub fn search(results: &[SearchResult]) -> Result<String, fmt::Error> {
    if results.is_empty() {
        return Ok("No vehicles found.\n".to_string());
    }
    let mut out = String::new();
    for (status, hits) in group_by_status(results) {
        writeln!(out, "{status} ({})", hits.len())?;
        for hit in hits {
            writeln!(out, "  {}  -> {}", title(&hit.vehicle), hit.route_hint)?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{Expense, ExpenseWindow, Money, NewVehicle, SaleDetails, Snapshot, VehicleFilter};

    use super::*;

    fn intake(id: &str, brand_model: &str, price: i64) -> Vehicle {
        NewVehicle {
            brand_model: brand_model.to_string(),
            vehicle_number: format!("KL-{id}"),
            purchase_date: "2024-01-05".to_string(),
            purchase_price: Money::from_major(price),
            seller_name: "Ravi".to_string(),
            seller_contact: "999".to_string(),
            seller_place: "Kochi".to_string(),
            ..NewVehicle::default()
        }
        .into_vehicle(id.to_string())
        .unwrap()
    }

    fn snapshot() -> Snapshot {
        let mut sold = intake("v1", "Honda Activa", 50_000);
        sold.sell(SaleDetails {
            date: Some("2024-02-10".to_string()),
            selling_price: Some(Money::from_major(65_000)),
            ..SaleDetails::default()
        });
        let stock = intake("v2", "TVS Jupiter", 40_000);
        let expense = Expense {
            id: "e1".to_string(),
            vehicle_id: "v1".to_string(),
            amount: Money::from_major(3_000),
            date: "2024-01-20".to_string(),
            description: Some("tyres".to_string()),
        };
        Snapshot::new(vec![sold, stock], vec![expense])
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn dashboard_shows_money_and_months() {
        let text = dashboard(&snapshot().dashboard(today())).unwrap();
        assert!(text.contains("Total invested   ₹40,000"));
        assert!(text.contains("Total profit     ₹12,000"));
        assert!(text.contains("Jan 24"));
        assert!(text.contains("Mar 24"));
    }

    #[test]
    fn inventory_prints_profit_only_for_sold() {
        let text = inventory(&snapshot().inventory(&VehicleFilter::default())).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Sold"));
        assert!(lines[0].ends_with("profit ₹12,000"));
        assert!(!lines[1].contains("profit"));
    }

    #[test]
    fn expenses_list_each_group() {
        let report = snapshot().expense_report(&ExpenseWindow::All, "", today());
        let text = expenses(&report).unwrap();
        assert!(text.starts_with("Total: ₹3,000"));
        assert!(text.contains("  2024-01-20  ₹3,000  tyres"));
        assert!(text.contains("TVS Jupiter (KL-v2)  ₹0"));
    }

    #[test]
    fn sales_lists_chart_and_rows() {
        let text = sales(&snapshot().sales_report("", "", today())).unwrap();
        assert!(text.starts_with("Vehicles sold    1\nTotal profit     ₹12,000\n"));
        assert!(text.contains("\nFeb          1\n"));
        assert!(text.contains("2024-02-10  Honda Activa (KL-v1)  to -  for ₹65,000  profit ₹12,000"));
        assert!(!text.contains("No sales found."));

        let none = sales(&snapshot().sales_report("", "2023-01-01", today())).unwrap();
        assert!(none.ends_with("\nNo sales found.\n"));
    }

    #[test]
    fn search_groups_by_status() {
        let text = search(&snapshot().search("ravi")).unwrap();
        assert!(text.contains("Available (1)"));
        assert!(text.contains("Sold (1)"));
        assert!(text.find("Available").unwrap() < text.find("Sold").unwrap());
        assert_eq!(search(&[]).unwrap(), "No vehicles found.\n");
    }
}
