use anyhow::{Context, Result};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder, Row as _};

use crate::model::{ColumnRef, Entity, FilterOp, JoinKind, Query, Row};
use crate::store::traits::{DataProvider, ProviderError};

const SOURCE_ALIAS: &str = "t0";

#[derive(Debug, Clone)]
pub struct PostgresProvider {
    pool: PgPool,
}

impl PostgresProvider {
    /// Create a new provider backed by a connection pool for the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DataProvider for PostgresProvider {
    async fn query(&self, query: &Query) -> Result<Vec<Row>, ProviderError> {
        let mut builder = build_statement(query)?;

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(provider_error)?;

        rows.into_iter()
            .map(|row| {
                let value: Value = row.try_get("row").map_err(provider_error)?;
                match value {
                    Value::Object(map) => Ok(map),
                    other => Err(ProviderError::new(format!(
                        "expected a JSON object row from {}, got {}",
                        query.source, other
                    ))),
                }
            })
            .collect()
    }
}

/// Database errors carry the server's own message; anything else is described by sqlx.
fn provider_error(err: sqlx::Error) -> ProviderError {
    match err.as_database_error() {
        Some(db_err) => ProviderError::new(db_err.message()),
        None => ProviderError::new(err.to_string()),
    }
}

fn alias(query: &Query, entity: Option<Entity>) -> String {
    match entity.and_then(|e| query.joins.iter().position(|j| j.entity == e)) {
        Some(index) => format!("j{}", index + 1),
        None => SOURCE_ALIAS.to_string(),
    }
}

fn column(query: &Query, column: ColumnRef) -> String {
    format!("{}.\"{}\"", alias(query, column.entity), column.name)
}

/// Push `'col', alias."col"` pairs for a json_build_object call.
fn push_pairs(
    builder: &mut QueryBuilder<'static, Postgres>,
    alias: &str,
    columns: &[&str],
    first: &mut bool,
) {
    for name in columns {
        if !*first {
            builder.push(", ");
        }
        *first = false;
        builder.push(format!("'{name}', {alias}.\"{name}\""));
    }
}

fn push_value(
    builder: &mut QueryBuilder<'static, Postgres>,
    value: &Value,
) -> Result<(), ProviderError> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                builder.push_bind(int);
            } else {
                let float = number
                    .as_f64()
                    .ok_or_else(|| ProviderError::new(format!("unsupported number {number}")))?;
                builder.push_bind(float);
            }
        }
        Value::String(text) => {
            builder.push_bind(text.clone());
        }
        Value::Bool(flag) => {
            builder.push_bind(*flag);
        }
        Value::Null => {
            builder.push("NULL");
        }
        other => {
            return Err(ProviderError::new(format!(
                "unsupported filter value {other}"
            )))
        }
    }
    Ok(())
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Compile a query into a single statement returning one JSON object per row,
/// in a column named `row`.
pub fn build_statement(query: &Query) -> Result<QueryBuilder<'static, Postgres>, ProviderError> {
    query.check().map_err(ProviderError::new)?;

    let mut builder = QueryBuilder::new("SELECT json_build_object(");
    let mut first = true;
    push_pairs(&mut builder, SOURCE_ALIAS, &query.selection.columns(query.source), &mut first);
    for (index, join) in query.joins.iter().enumerate() {
        if !join.embeds() {
            continue;
        }
        if !first {
            builder.push(", ");
        }
        first = false;
        let join_alias = format!("j{}", index + 1);
        builder.push(format!(
            "'{}', CASE WHEN {join_alias}.\"{}\" IS NULL THEN NULL ELSE json_build_object(",
            join.entity.table(),
            join.entity.primary_key()
        ));
        let mut nested_first = true;
        push_pairs(
            &mut builder,
            &join_alias,
            &join.selection.columns(join.entity),
            &mut nested_first,
        );
        builder.push(") END");
    }
    builder.push(") AS \"row\"");

    builder.push(format!(" FROM \"{}\" {SOURCE_ALIAS}", query.source.table()));
    for (index, join) in query.joins.iter().enumerate() {
        let join_alias = format!("j{}", index + 1);
        let keyword = match join.kind {
            JoinKind::Required => "INNER JOIN",
            JoinKind::Optional => "LEFT JOIN",
        };
        // check() guarantees the reference exists
        let key = query
            .source
            .foreign_key_to(join.entity)
            .unwrap_or_else(|| join.entity.primary_key());
        builder.push(format!(
            " {keyword} \"{}\" {join_alias} ON {join_alias}.\"{}\" = {SOURCE_ALIAS}.\"{key}\"",
            join.entity.table(),
            join.entity.primary_key()
        ));
    }

    for (index, filter) in query.filters.iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        let target = column(query, filter.column);
        match filter.op {
            FilterOp::Eq => {
                builder.push(format!("{target} = "));
                push_value(&mut builder, &filter.value)?;
            }
            FilterOp::Gte => {
                builder.push(format!("{target} >= "));
                push_value(&mut builder, &filter.value)?;
            }
            FilterOp::Lte => {
                builder.push(format!("{target} <= "));
                push_value(&mut builder, &filter.value)?;
            }
            FilterOp::EqIgnoreCase => {
                builder.push(format!("lower({target}) = lower("));
                push_value(&mut builder, &filter.value)?;
                builder.push(")");
            }
            FilterOp::StartsWithIgnoreCase => {
                let prefix = filter.value.as_str().unwrap_or_default();
                builder.push(format!("{target} ILIKE "));
                builder.push_bind(format!("{}%", escape_like(prefix)));
            }
        }
    }

    builder.push(" ORDER BY ");
    if let Some(sort) = &query.sort {
        builder.push(format!("{} ASC, ", column(query, sort.column)));
    }
    builder.push(format!(
        "{SOURCE_ALIAS}.\"{}\" ASC",
        query.source.primary_key()
    ));

    Ok(builder)
}
