use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::logic::Catalog;
use crate::model::{
    Circuit, CircuitRaces, Constructor, ConstructorStanding, Driver, DriverStanding,
    QualifyingEntry, RaceDetail, RaceDriver, RaceResult, ResultEntry, SeasonCircuit,
};
use crate::store::traits::DataProvider;

pub type AppState<P> = Arc<Catalog<P>>;

pub async fn root() -> &'static str {
    "Formula 1 API is running !"
}

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn route_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Route not found.")),
    )
}

/// Bound the whole request, every provider call included, by `deadline`.
/// Dropping the inner future cancels whatever call is in flight.
pub async fn request_deadline(
    State(deadline): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => ApiError::Provider(format!(
            "Request timed out after {}ms",
            deadline.as_millis()
        ))
        .into_response(),
    }
}

// Circuits

pub async fn list_circuits<P: DataProvider>(
    State(catalog): State<AppState<P>>,
) -> ApiResult<Json<Vec<Circuit>>> {
    catalog.circuits().await.map(Json)
}

pub async fn get_circuit<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(reference): Path<String>,
) -> ApiResult<Json<Circuit>> {
    catalog.circuit_by_ref(&reference).await.map(Json)
}

pub async fn list_season_circuits<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(year): Path<String>,
) -> ApiResult<Json<Vec<SeasonCircuit>>> {
    catalog.circuits_in_season(&year).await.map(Json)
}

// Constructors

pub async fn list_constructors<P: DataProvider>(
    State(catalog): State<AppState<P>>,
) -> ApiResult<Json<Vec<Constructor>>> {
    catalog.constructors().await.map(Json)
}

pub async fn get_constructor<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(reference): Path<String>,
) -> ApiResult<Json<Constructor>> {
    catalog.constructor_by_ref(&reference).await.map(Json)
}

// Drivers

pub async fn list_drivers<P: DataProvider>(
    State(catalog): State<AppState<P>>,
) -> ApiResult<Json<Vec<Driver>>> {
    catalog.drivers().await.map(Json)
}

pub async fn get_driver<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(reference): Path<String>,
) -> ApiResult<Json<Driver>> {
    catalog.driver_by_ref(&reference).await.map(Json)
}

pub async fn search_drivers<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(prefix): Path<String>,
) -> ApiResult<Json<Vec<Driver>>> {
    catalog.search_drivers(&prefix).await.map(Json)
}

pub async fn list_race_drivers<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(race_id): Path<String>,
) -> ApiResult<Json<Vec<RaceDriver>>> {
    catalog.drivers_in_race(&race_id).await.map(Json)
}

// Races

pub async fn get_race<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(race_id): Path<String>,
) -> ApiResult<Json<RaceDetail>> {
    catalog.race(&race_id).await.map(Json)
}

pub async fn list_season_races<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(year): Path<String>,
) -> ApiResult<Json<Vec<RaceDetail>>> {
    catalog.races_in_season(&year).await.map(Json)
}

pub async fn get_season_race<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path((year, round)): Path<(String, String)>,
) -> ApiResult<Json<RaceDetail>> {
    catalog.race_by_round(&year, &round).await.map(Json)
}

pub async fn list_circuit_races<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(reference): Path<String>,
) -> ApiResult<Json<CircuitRaces>> {
    catalog.races_at_circuit(&reference).await.map(Json)
}

pub async fn list_circuit_races_between<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path((reference, start, end)): Path<(String, String, String)>,
) -> ApiResult<Json<CircuitRaces>> {
    catalog
        .races_at_circuit_between(&reference, &start, &end)
        .await
        .map(Json)
}

// Results

pub async fn list_race_results<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(race_id): Path<String>,
) -> ApiResult<Json<Vec<RaceResult>>> {
    catalog.results_for_race(&race_id).await.map(Json)
}

pub async fn list_driver_results<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(reference): Path<String>,
) -> ApiResult<Json<Vec<ResultEntry>>> {
    catalog.results_for_driver(&reference).await.map(Json)
}

pub async fn list_driver_results_between<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path((reference, start, end)): Path<(String, String, String)>,
) -> ApiResult<Json<Vec<ResultEntry>>> {
    catalog
        .results_for_driver_between(&reference, &start, &end)
        .await
        .map(Json)
}

// Qualifying and standings

pub async fn list_qualifying<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(race_id): Path<String>,
) -> ApiResult<Json<Vec<QualifyingEntry>>> {
    catalog.qualifying_for_race(&race_id).await.map(Json)
}

pub async fn list_driver_standings<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(race_id): Path<String>,
) -> ApiResult<Json<Vec<DriverStanding>>> {
    catalog.driver_standings(&race_id).await.map(Json)
}

pub async fn list_constructor_standings<P: DataProvider>(
    State(catalog): State<AppState<P>>,
    Path(race_id): Path<String>,
) -> ApiResult<Json<Vec<ConstructorStanding>>> {
    catalog.constructor_standings(&race_id).await.map(Json)
}
