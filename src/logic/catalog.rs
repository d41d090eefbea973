use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::logic::assemble::{circuit_races, decode, decode_all, require_parent, spread_all};
use crate::logic::compose;
use crate::logic::execute::{Lookup, QueryExecutor};
use crate::logic::lookup::{ref_not_found, resolve_by_ref, search_drivers};
use crate::logic::validate::{parse_id, validate_year, validate_year_range, YearBounds};
use crate::model::{
    Circuit, CircuitRaces, Constructor, ConstructorStanding, Driver, DriverStanding, Entity,
    QualifyingEntry, Query, RaceDetail, RaceDriver, RaceResult, RaceSummary, ResultEntry, Row,
    SeasonCircuit,
};
use crate::store::traits::DataProvider;

/// Every read the API offers, taking raw path parameters.
///
/// Parameters are validated before any provider call. Listings scoped to a
/// race or driver return `NotFound` when that parent does not exist and `[]`
/// when it exists without children.
pub struct Catalog<P> {
    executor: QueryExecutor<P>,
    bounds: Option<YearBounds>,
}

fn race_not_found(race_id: &str) -> ApiError {
    ApiError::NotFound(format!("Race with ID '{}' not found.", race_id))
}

impl<P: DataProvider> Catalog<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            executor: QueryExecutor::new(provider),
            bounds: None,
        }
    }

    /// Pin the accepted season range instead of deriving it from the clock.
    pub fn with_year_bounds(mut self, bounds: YearBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    fn bounds(&self) -> YearBounds {
        self.bounds.unwrap_or_else(YearBounds::current)
    }

    async fn single<T: serde::de::DeserializeOwned>(
        &self,
        query: &Query,
        missing: impl FnOnce() -> ApiError,
    ) -> ApiResult<T> {
        match self.executor.fetch_one(query).await? {
            Lookup::Found(row) => decode(row),
            Lookup::Missing => Err(missing()),
            Lookup::Ambiguous(count) => Err(ApiError::Internal(format!(
                "{} singleton query matched {} rows",
                query.source, count
            ))),
        }
    }

    /// Run a per-race listing, probing the race when nothing came back.
    async fn race_children(&self, raw_id: &str, query: impl FnOnce(i64) -> Query) -> ApiResult<Vec<Row>> {
        let race_id = parse_id("race id", raw_id)?;
        let rows = self.executor.fetch_all(&query(race_id)).await?;
        require_parent(&self.executor, rows, &compose::race_exists(race_id), || {
            race_not_found(raw_id)
        })
        .await
    }

    // Circuits

    pub async fn circuits(&self) -> ApiResult<Vec<Circuit>> {
        decode_all(self.executor.fetch_all(&compose::all_circuits()).await?)
    }

    pub async fn circuit_by_ref(&self, reference: &str) -> ApiResult<Circuit> {
        resolve_by_ref(&self.executor, Entity::Circuits, reference).await
    }

    pub async fn circuits_in_season(&self, year: &str) -> ApiResult<Vec<SeasonCircuit>> {
        let year = validate_year(year, self.bounds())?;
        let rows = self.executor.fetch_all(&compose::circuits_in_season(year)).await?;
        decode_all(spread_all(rows, Entity::Circuits))
    }

    // Constructors

    pub async fn constructors(&self) -> ApiResult<Vec<Constructor>> {
        decode_all(self.executor.fetch_all(&compose::all_constructors()).await?)
    }

    pub async fn constructor_by_ref(&self, reference: &str) -> ApiResult<Constructor> {
        resolve_by_ref(&self.executor, Entity::Constructors, reference).await
    }

    // Drivers

    pub async fn drivers(&self) -> ApiResult<Vec<Driver>> {
        decode_all(self.executor.fetch_all(&compose::all_drivers()).await?)
    }

    pub async fn driver_by_ref(&self, reference: &str) -> ApiResult<Driver> {
        resolve_by_ref(&self.executor, Entity::Drivers, reference).await
    }

    pub async fn search_drivers(&self, prefix: &str) -> ApiResult<Vec<Driver>> {
        search_drivers(&self.executor, prefix).await
    }

    pub async fn drivers_in_race(&self, race_id: &str) -> ApiResult<Vec<RaceDriver>> {
        let rows = self.race_children(race_id, compose::drivers_in_race).await?;
        decode_all(spread_all(rows, Entity::Drivers))
    }

    // Races

    pub async fn race(&self, race_id: &str) -> ApiResult<RaceDetail> {
        let id = parse_id("race id", race_id)?;
        self.single(&compose::race_by_id(id), || race_not_found(race_id))
            .await
    }

    pub async fn races_in_season(&self, year: &str) -> ApiResult<Vec<RaceDetail>> {
        let year = validate_year(year, self.bounds())?;
        decode_all(self.executor.fetch_all(&compose::races_in_season(year)).await?)
    }

    pub async fn race_by_round(&self, year: &str, round: &str) -> ApiResult<RaceDetail> {
        let year = validate_year(year, self.bounds())?;
        let round_number = parse_id("round", round)?;
        self.single(&compose::race_by_round(year, round_number), || {
            ApiError::NotFound(format!("Race for year {}, round {} not found.", year, round))
        })
        .await
    }

    pub async fn races_at_circuit(&self, reference: &str) -> ApiResult<CircuitRaces> {
        self.circuit_races(reference, None).await
    }

    pub async fn races_at_circuit_between(
        &self,
        reference: &str,
        start: &str,
        end: &str,
    ) -> ApiResult<CircuitRaces> {
        let seasons = validate_year_range(start, end, self.bounds())?;
        self.circuit_races(reference, Some(seasons)).await
    }

    async fn circuit_races(
        &self,
        reference: &str,
        seasons: Option<(i32, i32)>,
    ) -> ApiResult<CircuitRaces> {
        let circuit: Circuit = resolve_by_ref(&self.executor, Entity::Circuits, reference).await?;
        let rows = self
            .executor
            .fetch_all(&compose::races_at_circuit(circuit.circuit_id, seasons))
            .await?;
        let races: Vec<RaceSummary> = decode_all(rows)?;
        Ok(circuit_races(circuit, races))
    }

    // Results

    pub async fn results_for_race(&self, race_id: &str) -> ApiResult<Vec<RaceResult>> {
        decode_all(self.race_children(race_id, compose::results_for_race).await?)
    }

    pub async fn results_for_driver(&self, reference: &str) -> ApiResult<Vec<ResultEntry>> {
        let rows = self
            .executor
            .fetch_all(&compose::results_for_driver(reference))
            .await?;
        decode_all(self.require_driver(rows, reference).await?)
    }

    pub async fn results_for_driver_between(
        &self,
        reference: &str,
        start: &str,
        end: &str,
    ) -> ApiResult<Vec<ResultEntry>> {
        let (start, end) = validate_year_range(start, end, self.bounds())?;
        let rows = self
            .executor
            .fetch_all(&compose::results_for_driver_between(reference, start, end))
            .await?;
        decode_all(self.require_driver(rows, reference).await?)
    }

    async fn require_driver(&self, rows: Vec<Row>, reference: &str) -> ApiResult<Vec<Row>> {
        let probe = compose::by_ref(Entity::Drivers, "driverRef", reference).select(&["driverId"]);
        require_parent(&self.executor, rows, &probe, || {
            ref_not_found(Entity::Drivers, reference)
        })
        .await
    }

    // Qualifying and standings

    pub async fn qualifying_for_race(&self, race_id: &str) -> ApiResult<Vec<QualifyingEntry>> {
        decode_all(self.race_children(race_id, compose::qualifying_for_race).await?)
    }

    pub async fn driver_standings(&self, race_id: &str) -> ApiResult<Vec<DriverStanding>> {
        decode_all(self.race_children(race_id, compose::driver_standings).await?)
    }

    pub async fn constructor_standings(
        &self,
        race_id: &str,
    ) -> ApiResult<Vec<ConstructorStanding>> {
        decode_all(self.race_children(race_id, compose::constructor_standings).await?)
    }
}
