//! Expense API endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Expense, NewExpense};

use crate::{ServerError, server::ServerState};

pub async fn expense_new(
    State(state): State<ServerState>,
    Json(payload): Json<NewExpense>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let expense = state
        .with_store(move |store| Ok(store.add_expense(payload)?))
        .await?;
    tracing::info!(id = %expense.id, vehicle = %expense.vehicle_id, "expense booked");
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn expense_update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(mut payload): Json<Expense>,
) -> Result<Json<Expense>, ServerError> {
    if payload.id.is_empty() {
        payload.id.clone_from(&id);
    } else if payload.id != id {
        return Err(ServerError::Generic(format!(
            "body id {} does not match path id {id}",
            payload.id
        )));
    }
    let expense = state
        .with_store(move |store| Ok(store.update_expense(payload)?))
        .await?;
    Ok(Json(expense))
}
