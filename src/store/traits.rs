use thiserror::Error;

use crate::model::{Query, Row};

/// Failure reported by a data provider: connectivity, a rejected statement, a
/// malformed row. The message is surfaced to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Read-only access to the relational dataset.
///
/// Implementations must honor the query's join kinds (required joins drop
/// unmatched rows, optional joins embed `null`), apply every filter, and
/// return rows ordered by the sort key with the source primary key as tiebreak.
#[async_trait::async_trait]
pub trait DataProvider: Send + Sync {
    async fn query(&self, query: &Query) -> Result<Vec<Row>, ProviderError>;
}
