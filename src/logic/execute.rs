use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::model::{Query, Row};
use crate::store::traits::DataProvider;

/// Outcome of a query expected to match at most one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Row),
    Missing,
    /// More than one row matched; carries the count.
    Ambiguous(usize),
}

impl From<Vec<Row>> for Lookup {
    fn from(mut rows: Vec<Row>) -> Self {
        match rows.len() {
            0 => Lookup::Missing,
            1 => Lookup::Found(rows.remove(0)),
            count => Lookup::Ambiguous(count),
        }
    }
}

/// Runs query objects against a provider after checking them against the schema.
pub struct QueryExecutor<P> {
    provider: Arc<P>,
}

impl<P: DataProvider> QueryExecutor<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub async fn fetch_all(&self, query: &Query) -> ApiResult<Vec<Row>> {
        query
            .check()
            .map_err(|detail| ApiError::Internal(format!("invalid query on {}: {}", query.source, detail)))?;
        log::debug!("query {:?}", query);

        Ok(self.provider.query(query).await?)
    }

    pub async fn fetch_one(&self, query: &Query) -> ApiResult<Lookup> {
        self.fetch_all(query).await.map(Lookup::from)
    }

    pub async fn exists(&self, query: &Query) -> ApiResult<bool> {
        Ok(!self.fetch_all(query).await?.is_empty())
    }
}
