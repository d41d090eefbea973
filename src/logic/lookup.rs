use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};
use crate::logic::assemble::{decode, decode_all};
use crate::logic::compose;
use crate::logic::execute::{Lookup, QueryExecutor};
use crate::model::{Driver, Entity};
use crate::store::traits::DataProvider;

pub fn ref_not_found(entity: Entity, reference: &str) -> ApiError {
    ApiError::NotFound(format!(
        "{} with ref '{}' not found.",
        entity.kind_name(),
        reference
    ))
}

/// Resolve a reference code to exactly one record, ignoring case.
///
/// Zero matches is `NotFound`; several matches break the uniqueness invariant
/// and are reported as an internal error rather than picking one.
pub async fn resolve_by_ref<P, T>(
    executor: &QueryExecutor<P>,
    entity: Entity,
    reference: &str,
) -> ApiResult<T>
where
    P: DataProvider,
    T: DeserializeOwned,
{
    let ref_column = entity.ref_column().ok_or_else(|| {
        ApiError::Internal(format!("{} has no reference code column", entity))
    })?;

    match executor
        .fetch_one(&compose::by_ref(entity, ref_column, reference))
        .await?
    {
        Lookup::Found(row) => decode(row),
        Lookup::Missing => Err(ref_not_found(entity, reference)),
        Lookup::Ambiguous(count) => Err(ApiError::Internal(format!(
            "{} ref '{}' matched {} rows",
            entity, reference, count
        ))),
    }
}

/// Drivers whose surname starts with `prefix`, ignoring case, by surname.
pub async fn search_drivers<P: DataProvider>(
    executor: &QueryExecutor<P>,
    prefix: &str,
) -> ApiResult<Vec<Driver>> {
    let rows = executor
        .fetch_all(&compose::drivers_by_surname_prefix(prefix))
        .await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No drivers found with surname starting with '{}'.",
            prefix
        )));
    }
    decode_all(rows)
}
