//! Vehicle API endpoints.

use api_types::vehicle::{SellVehicle, StatusChange};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{
    Buyer, EngineError, Finance, NewVehicle, SaleDetails, Vehicle, VehicleStatus, date,
};
use store::{Store, StoreError};

use crate::{ServerError, server::ServerState};

pub async fn vehicle_new(
    State(state): State<ServerState>,
    Json(payload): Json<NewVehicle>,
) -> Result<(StatusCode, Json<Vehicle>), ServerError> {
    let vehicle = state
        .with_store(move |store| Ok(store.add_vehicle(payload)?))
        .await?;
    tracing::info!(id = %vehicle.id, number = %vehicle.vehicle_number, "vehicle booked");
    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn vehicle_update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(mut payload): Json<Vehicle>,
) -> Result<Json<Vehicle>, ServerError> {
    if payload.id.is_empty() {
        payload.id.clone_from(&id);
    } else if payload.id != id {
        return Err(ServerError::Generic(format!(
            "body id {} does not match path id {id}",
            payload.id
        )));
    }
    let vehicle = state
        .with_store(move |store| Ok(store.update_vehicle(payload)?))
        .await?;
    Ok(Json(vehicle))
}

pub async fn vehicle_sell(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SellVehicle>,
) -> Result<Json<Vehicle>, ServerError> {
    if let Some(sale_date) = payload.sale_date.as_deref()
        && date::parse_date(sale_date).is_none()
    {
        return Err(EngineError::InvalidDate(format!("invalid sale date: {sale_date:?}")).into());
    }
    if payload.selling_price.is_some_and(|price| price.is_negative()) {
        return Err(EngineError::InvalidAmount("selling price must be >= 0".to_string()).into());
    }

    let vehicle = state
        .with_store(move |store| {
            let mut vehicle = find_vehicle(store, &id)?;
            vehicle.sell(sale_details(payload));
            Ok(store.update_vehicle(vehicle)?)
        })
        .await?;
    tracing::info!(id = %vehicle.id, "vehicle sold");
    Ok(Json(vehicle))
}

pub async fn vehicle_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusChange>,
) -> Result<Json<Vehicle>, ServerError> {
    let status: VehicleStatus = payload.status.parse()?;
    let vehicle = state
        .with_store(move |store| {
            let mut vehicle = find_vehicle(store, &id)?;
            vehicle.set_status(status);
            Ok(store.update_vehicle(vehicle)?)
        })
        .await?;
    Ok(Json(vehicle))
}

fn find_vehicle(store: &dyn Store, id: &str) -> Result<Vehicle, ServerError> {
    store
        .list_vehicles()?
        .into_iter()
        .find(|v| v.id == id)
        .ok_or_else(|| StoreError::KeyNotFound(id.to_string()).into())
}

fn sale_details(payload: SellVehicle) -> SaleDetails {
    let has_finance = payload.financier_name.is_some()
        || payload.financier_amount.is_some()
        || payload.finance_credited_date.is_some();

    SaleDetails {
        date: payload.sale_date,
        selling_price: payload.selling_price,
        buyer: Buyer {
            name: payload.buyer_name,
            contact: payload.buyer_contact,
            place: payload.buyer_place,
            address: payload.buyer_address,
        },
        bill: payload.sale_bill,
        balance: payload.sale_balance,
        finance: has_finance.then_some(Finance {
            financier_name: payload.financier_name,
            amount: payload.financier_amount,
            credited_date: payload.finance_credited_date,
        }),
    }
}
