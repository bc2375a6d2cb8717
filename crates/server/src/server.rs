use axum::{
    Router,
    routing::{get, post},
};
use chrono::NaiveDate;
use chrono_tz::Tz;

use std::sync::Arc;

use crate::{ServerError, expenses, reports, vehicles};
use store::Store;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn Store>,
    /// Zone in which "today" is computed for time-relative views.
    pub timezone: Tz,
    /// Pins "today" instead of reading the clock.
    pub fixed_today: Option<NaiveDate>,
}

impl ServerState {
    pub fn new(store: Arc<dyn Store>, timezone: Tz) -> Self {
        Self {
            store,
            timezone,
            fixed_today: None,
        }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| engine::date::today_in(self.timezone))
    }

    /// Runs `work` against the store on the blocking pool.
    ///
    /// Store calls do file I/O and take a mutex, so they never run on a
    /// runtime worker.
    pub(crate) async fn with_store<T, F>(&self, work: F) -> Result<T, ServerError>
    where
        F: FnOnce(&dyn Store) -> Result<T, ServerError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || work(store.as_ref()))
            .await
            .map_err(|err| ServerError::Internal(format!("store task failed: {err}")))?
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/dashboard", get(reports::dashboard))
        .route("/inventory", get(reports::inventory))
        .route("/sales", get(reports::sales))
        .route(
            "/expenses",
            get(reports::expenses).post(expenses::expense_new),
        )
        .route("/expenses/{id}", axum::routing::put(expenses::expense_update))
        .route("/search", get(reports::search))
        .route("/vehicles", post(vehicles::vehicle_new))
        .route("/vehicles/{id}", axum::routing::put(vehicles::vehicle_update))
        .route("/vehicles/{id}/sell", post(vehicles::vehicle_sell))
        .route("/vehicles/{id}/status", post(vehicles::vehicle_status))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
