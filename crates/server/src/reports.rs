//! Read-only report endpoints. Each request works on a fresh snapshot.

use api_types::{
    expenses::ExpensesQuery, inventory::InventoryQuery, sales::SalesQuery, search::SearchQuery,
};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::{
    Dashboard, ExpenseReport, ExpenseWindow, InventoryRow, SalesReport, SearchResult,
    StatusFilter, VehicleFilter,
};

use crate::{ServerError, server::ServerState};

pub async fn dashboard(State(state): State<ServerState>) -> Result<Json<Dashboard>, ServerError> {
    let today = state.today();
    let view = state
        .with_store(move |store| Ok(store.snapshot()?.dashboard(today)))
        .await?;
    Ok(Json(view))
}

pub async fn inventory(
    State(state): State<ServerState>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<Vec<InventoryRow>>, ServerError> {
    let filter = VehicleFilter {
        status: query.status.as_deref().unwrap_or_default().parse::<StatusFilter>()?,
        search_term: query.search.unwrap_or_default(),
        exact_date: query.date.unwrap_or_default().trim().to_string(),
    };
    let rows = state
        .with_store(move |store| Ok(store.snapshot()?.inventory(&filter)))
        .await?;
    Ok(Json(rows))
}

pub async fn sales(
    State(state): State<ServerState>,
    Query(query): Query<SalesQuery>,
) -> Result<Json<SalesReport>, ServerError> {
    let today = state.today();
    let search = query.search.unwrap_or_default();
    let date = query.date.unwrap_or_default();
    let report = state
        .with_store(move |store| {
            Ok(store.snapshot()?.sales_report(&search, date.trim(), today))
        })
        .await?;
    Ok(Json(report))
}

pub async fn expenses(
    State(state): State<ServerState>,
    Query(query): Query<ExpensesQuery>,
) -> Result<Json<ExpenseReport>, ServerError> {
    let window = ExpenseWindow::parse(
        query.window.as_deref().unwrap_or_default(),
        query.start.as_deref().unwrap_or_default(),
        query.end.as_deref().unwrap_or_default(),
    )?;
    tracing::debug!(%window, "expense report requested");

    let today = state.today();
    let search = query.search.unwrap_or_default();
    let report = state
        .with_store(move |store| Ok(store.snapshot()?.expense_report(&window, &search, today)))
        .await?;
    Ok(Json(report))
}

pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>, ServerError> {
    if query.q.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }
    let hits = state
        .with_store(move |store| Ok(store.snapshot()?.search(&query.q)))
        .await?;
    Ok(Json(hits))
}
