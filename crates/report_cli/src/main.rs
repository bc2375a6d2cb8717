use std::error::Error;

use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use engine::{ExpenseWindow, StatusFilter, VehicleFilter};
use store::{JsonStore, Store};

mod render;

#[derive(Parser, Debug)]
#[command(name = "dealerbook_report")]
#[command(about = "Prints dealership reports from the books on disk")]
struct Cli {
    /// Directory holding `vehicles.json` and `expenses.json`.
    #[arg(long, env = "DEALERBOOK_DATA_DIR", default_value = "data")]
    data_dir: String,

    /// IANA zone used to compute "today".
    #[arg(long, default_value = "Asia/Kolkata")]
    timezone: String,

    /// Log level for diagnostics on stderr.
    #[arg(long, default_value = "warn")]
    level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fleet figures and monthly activity.
    Dashboard,
    Inventory(InventoryArgs),
    Sales(SalesArgs),
    Expenses(ExpensesArgs),
    /// Global search, grouped by status.
    Search { term: String },
}

#[derive(Args, Debug)]
struct InventoryArgs {
    /// Status name or `All`.
    #[arg(long, default_value = "All")]
    status: String,
    #[arg(long, default_value = "")]
    search: String,
    /// Purchase or sale date, `YYYY-MM-DD`.
    #[arg(long, default_value = "")]
    date: String,
}

#[derive(Args, Debug)]
struct SalesArgs {
    #[arg(long, default_value = "")]
    search: String,
    /// Sale date, `YYYY-MM-DD`.
    #[arg(long, default_value = "")]
    date: String,
}

#[derive(Args, Debug)]
struct ExpensesArgs {
    /// One of all, today, week, month, custom.
    #[arg(long, default_value = "")]
    window: String,
    #[arg(long, default_value = "")]
    from: String,
    #[arg(long, default_value = "")]
    to: String,
    #[arg(long, default_value = "")]
    search: String,
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "dealerbook_report={level},store={level},engine={level}",
            level = cli.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let timezone: Tz = cli
        .timezone
        .parse()
        .map_err(|err| format!("invalid timezone {:?}: {err}", cli.timezone))?;
    let today = engine::date::today_in(timezone);

    let books = JsonStore::new(&cli.data_dir);
    let snapshot = books.snapshot()?;
    tracing::debug!(
        vehicles = snapshot.vehicles.len(),
        expenses = snapshot.expenses.len(),
        %today,
        "books loaded"
    );

    let text = match cli.command {
        Command::Dashboard => render::dashboard(&snapshot.dashboard(today)),
        Command::Inventory(args) => {
            let filter = VehicleFilter {
                status: args.status.parse::<StatusFilter>()?,
                search_term: args.search,
                exact_date: args.date.trim().to_string(),
            };
            render::inventory(&snapshot.inventory(&filter))
        }
        Command::Sales(args) => {
            render::sales(&snapshot.sales_report(&args.search, args.date.trim(), today))
        }
        Command::Expenses(args) => {
            let window = ExpenseWindow::parse(&args.window, &args.from, &args.to)?;
            render::expenses(&snapshot.expense_report(&window, &args.search, today))
        }
        Command::Search { term } => {
            if term.trim().is_empty() {
                return Err("search term must not be empty".into());
            }
            render::search(&snapshot.search(&term))
        }
    }?;

    print!("{text}");
    Ok(())
}
