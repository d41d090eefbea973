use axum::{http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::{self, AppState};
use crate::store::traits::DataProvider;

pub fn create_router<P: DataProvider + 'static>() -> Router<AppState<P>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        // Health check
        .route("/health", get(handlers::health_check))
        // Circuits
        .route("/api/circuits", get(handlers::list_circuits::<P>))
        .route("/api/circuits/:ref", get(handlers::get_circuit::<P>))
        .route(
            "/api/circuits/season/:year",
            get(handlers::list_season_circuits::<P>),
        )
        // Constructors
        .route("/api/constructors", get(handlers::list_constructors::<P>))
        .route("/api/constructors/:ref", get(handlers::get_constructor::<P>))
        // Drivers
        .route("/api/drivers", get(handlers::list_drivers::<P>))
        .route("/api/drivers/:ref", get(handlers::get_driver::<P>))
        .route(
            "/api/drivers/search/:substring",
            get(handlers::search_drivers::<P>),
        )
        .route(
            "/api/drivers/race/:race_id",
            get(handlers::list_race_drivers::<P>),
        )
        // Races
        .route("/api/races/:race_id", get(handlers::get_race::<P>))
        .route(
            "/api/races/season/:year",
            get(handlers::list_season_races::<P>),
        )
        .route(
            "/api/races/season/:year/:round",
            get(handlers::get_season_race::<P>),
        )
        .route(
            "/api/races/circuits/:ref",
            get(handlers::list_circuit_races::<P>),
        )
        .route(
            "/api/races/circuits/:ref/season/:start/:end",
            get(handlers::list_circuit_races_between::<P>),
        )
        // Results
        .route("/api/results/:race_id", get(handlers::list_race_results::<P>))
        .route(
            "/api/results/driver/:ref",
            get(handlers::list_driver_results::<P>),
        )
        .route(
            "/api/results/drivers/:ref/seasons/:start/:end",
            get(handlers::list_driver_results_between::<P>),
        )
        // Qualifying
        .route(
            "/api/qualifying/:race_id",
            get(handlers::list_qualifying::<P>),
        )
        // Standings
        .route(
            "/api/standings/drivers/:race_id",
            get(handlers::list_driver_standings::<P>),
        )
        .route(
            "/api/standings/constructors/:race_id",
            get(handlers::list_constructor_standings::<P>),
        )
        .fallback(handlers::route_not_found)
        .layer(cors)
}
