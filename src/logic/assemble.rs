use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::logic::execute::QueryExecutor;
use crate::model::{Circuit, CircuitHeader, CircuitRaces, Entity, Query, RaceSummary, Row};
use crate::store::traits::DataProvider;

/// Deserialize a provider row into its response shape.
///
/// A row that does not fit means the provider broke the join contract or the
/// schema drifted; both are internal errors.
pub fn decode<T: DeserializeOwned>(row: Row) -> ApiResult<T> {
    serde_json::from_value(Value::Object(row)).map_err(|err| {
        ApiError::Internal(format!(
            "row does not match {}: {}",
            std::any::type_name::<T>(),
            err
        ))
    })
}

pub fn decode_all<T: DeserializeOwned>(rows: Vec<Row>) -> ApiResult<Vec<T>> {
    rows.into_iter().map(decode).collect()
}

/// Lift the fields of the entity embedded under `relation` to the top level.
/// Fields already on the row win; a null relation contributes nothing.
pub fn spread(mut row: Row, relation: Entity) -> Row {
    if let Some(Value::Object(related)) = row.remove(relation.table()) {
        for (key, value) in related {
            row.entry(key).or_insert(value);
        }
    }
    row
}

pub fn spread_all(rows: Vec<Row>, relation: Entity) -> Vec<Row> {
    rows.into_iter().map(|row| spread(row, relation)).collect()
}

pub fn circuit_races(circuit: Circuit, races: Vec<RaceSummary>) -> CircuitRaces {
    CircuitRaces {
        circuit: CircuitHeader {
            circuit_ref: circuit.circuit_ref,
            name: circuit.name,
            location: circuit.location,
            country: circuit.country,
        },
        races,
    }
}

/// Tell "parent exists, no children" apart from "parent missing".
///
/// Non-empty `rows` pass straight through. Otherwise `probe` is run and an
/// empty probe turns into `missing()`.
pub async fn require_parent<P: DataProvider>(
    executor: &QueryExecutor<P>,
    rows: Vec<Row>,
    probe: &Query,
    missing: impl FnOnce() -> ApiError,
) -> ApiResult<Vec<Row>> {
    if !rows.is_empty() || executor.exists(probe).await? {
        Ok(rows)
    } else {
        Err(missing())
    }
}
