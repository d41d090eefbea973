use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::Itertools;
use serde_json::Value;

use crate::model::{ColumnRef, Entity, Filter, FilterOp, JoinKind, Query, Row};
use crate::store::traits::{DataProvider, ProviderError};

/// Dataset held in memory, interpreting queries the way the SQL provider does:
/// `NULL` never matches a filter, required joins drop unmatched rows, and
/// sorts are ascending with nulls last.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    tables: HashMap<Entity, Vec<Row>>,
}

/// A source row together with the row each join matched (or `None`).
struct Candidate<'a> {
    source: &'a Row,
    joined: Vec<Option<&'a Row>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a provider from a JSON object keyed by table name, e.g.
    /// `{"circuits": [{...}], "races": [{...}]}`. Unknown tables are rejected.
    pub fn from_dataset(dataset: Value) -> Result<Self, ProviderError> {
        let Value::Object(tables) = dataset else {
            return Err(ProviderError::new("dataset must be a JSON object"));
        };

        let mut provider = Self::new();
        for (table, rows) in tables {
            let entity = Entity::ALL
                .into_iter()
                .find(|entity| entity.table() == table)
                .ok_or_else(|| ProviderError::new(format!("unknown table '{table}'")))?;
            let Value::Array(rows) = rows else {
                return Err(ProviderError::new(format!("table '{table}' must be an array")));
            };
            for row in rows {
                match row {
                    Value::Object(row) => provider.insert(entity, row),
                    other => {
                        return Err(ProviderError::new(format!(
                            "row in '{table}' is not an object: {other}"
                        )))
                    }
                }
            }
        }
        Ok(provider)
    }

    pub fn insert(&mut self, entity: Entity, row: Row) {
        self.tables.entry(entity).or_default().push(row);
    }

    fn rows(&self, entity: Entity) -> &[Row] {
        self.tables.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }

    fn run(&self, query: &Query) -> Result<Vec<Row>, ProviderError> {
        query.check().map_err(ProviderError::new)?;

        let mut candidates = Vec::new();
        'rows: for source in self.rows(query.source) {
            let mut joined = Vec::with_capacity(query.joins.len());
            for join in &query.joins {
                let key = query
                    .source
                    .foreign_key_to(join.entity)
                    .and_then(|fk| source.get(fk))
                    .filter(|value| !value.is_null());
                let matched = key.and_then(|key| {
                    self.rows(join.entity).iter().find(|row| {
                        row.get(join.entity.primary_key())
                            .is_some_and(|pk| values_equal(pk, key))
                    })
                });
                if matched.is_none() && join.kind == JoinKind::Required {
                    continue 'rows;
                }
                joined.push(matched);
            }
            candidates.push(Candidate { source, joined });
        }

        let candidates = candidates
            .into_iter()
            .filter(|candidate| {
                query
                    .filters
                    .iter()
                    .all(|filter| matches_filter(query, candidate, filter))
            })
            .sorted_by(|a, b| {
                let primary = query.sort.map_or(Ordering::Equal, |sort| {
                    compare_nulls_last(lookup(query, a, sort.column), lookup(query, b, sort.column))
                });
                let key = query.source.primary_key();
                primary.then_with(|| compare_nulls_last(a.source.get(key), b.source.get(key)))
            });

        Ok(candidates.map(|candidate| project(query, &candidate)).collect())
    }
}

#[async_trait::async_trait]
impl DataProvider for MemoryProvider {
    async fn query(&self, query: &Query) -> Result<Vec<Row>, ProviderError> {
        self.run(query)
    }
}

fn lookup<'a>(query: &Query, candidate: &Candidate<'a>, column: ColumnRef) -> Option<&'a Value> {
    let row = match column.entity {
        None => Some(candidate.source),
        Some(entity) => {
            let index = query.joins.iter().position(|join| join.entity == entity)?;
            candidate.joined[index]
        }
    };
    row.and_then(|row| row.get(column.name))
        .filter(|value| !value.is_null())
}

fn matches_filter(query: &Query, candidate: &Candidate<'_>, filter: &Filter) -> bool {
    let Some(value) = lookup(query, candidate, filter.column) else {
        return false;
    };

    match filter.op {
        FilterOp::Eq => values_equal(value, &filter.value),
        FilterOp::Gte => compare_values(value, &filter.value).is_some_and(Ordering::is_ge),
        FilterOp::Lte => compare_values(value, &filter.value).is_some_and(Ordering::is_le),
        FilterOp::EqIgnoreCase => match (value.as_str(), filter.value.as_str()) {
            (Some(left), Some(right)) => left.to_lowercase() == right.to_lowercase(),
            _ => false,
        },
        FilterOp::StartsWithIgnoreCase => match (value.as_str(), filter.value.as_str()) {
            (Some(text), Some(prefix)) => text.to_lowercase().starts_with(&prefix.to_lowercase()),
            _ => false,
        },
    }
}

fn values_equal(left: &Value, right: &Value) -> bool {
    compare_values(left, right) == Some(Ordering::Equal)
}

fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn compare_nulls_last(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(a), Some(b)) => compare_values(a, b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn select(row: &Row, columns: &[&str]) -> Row {
    columns
        .iter()
        .map(|name| (name.to_string(), row.get(*name).cloned().unwrap_or(Value::Null)))
        .collect()
}

fn project(query: &Query, candidate: &Candidate<'_>) -> Row {
    let mut row = select(candidate.source, &query.selection.columns(query.source));
    for (join, matched) in query.joins.iter().zip(&candidate.joined) {
        if !join.embeds() {
            continue;
        }
        let embedded = matched
            .map(|matched| Value::Object(select(matched, &join.selection.columns(join.entity))))
            .unwrap_or(Value::Null);
        row.insert(join.entity.table().to_string(), embedded);
    }
    row
}
