use serde_json::Value;

use crate::model::Entity;

/// A row as handed back by a provider: the selected columns of the source
/// entity, with each embedded join stored under the joined table's name.
pub type Row = serde_json::Map<String, Value>;

/// A column on the query's source entity (`entity == None`) or on one of its joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub entity: Option<Entity>,
    pub name: &'static str,
}

impl ColumnRef {
    pub fn source(name: &'static str) -> Self {
        Self { entity: None, name }
    }

    pub fn joined(entity: Entity, name: &'static str) -> Self {
        Self {
            entity: Some(entity),
            name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
    /// Whole-string match ignoring case. `%` and `_` are literal.
    EqIgnoreCase,
    /// Prefix match ignoring case. `%` and `_` are literal.
    StartsWithIgnoreCase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: ColumnRef,
    pub op: FilterOp,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Only(Vec<&'static str>),
    /// Join used to filter or sort only; nothing is embedded in the row.
    Nothing,
}

impl Selection {
    /// Resolve the selection to concrete column names for `entity`.
    pub fn columns(&self, entity: Entity) -> Vec<&'static str> {
        match self {
            Selection::All => entity.columns().to_vec(),
            Selection::Only(columns) => columns.clone(),
            Selection::Nothing => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Rows without a match are excluded (inner join).
    Required,
    /// Rows without a match are kept with a null related value (left join).
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub entity: Entity,
    pub kind: JoinKind,
    pub selection: Selection,
}

impl Join {
    pub fn required(entity: Entity) -> Self {
        Self {
            entity,
            kind: JoinKind::Required,
            selection: Selection::All,
        }
    }

    pub fn optional(entity: Entity) -> Self {
        Self {
            entity,
            kind: JoinKind::Optional,
            selection: Selection::All,
        }
    }

    /// Required join that only constrains the result set.
    pub fn filter_only(entity: Entity) -> Self {
        Self {
            entity,
            kind: JoinKind::Required,
            selection: Selection::Nothing,
        }
    }

    pub fn select(mut self, columns: &[&'static str]) -> Self {
        self.selection = Selection::Only(columns.to_vec());
        self
    }

    pub fn embeds(&self) -> bool {
        self.selection != Selection::Nothing
    }
}

/// Ascending, nulls last, ties broken by the source primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: ColumnRef,
}

/// Declarative description of one read against the provider.
///
/// Providers interpret it; nothing outside a provider builds query text.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub source: Entity,
    pub selection: Selection,
    pub filters: Vec<Filter>,
    pub joins: Vec<Join>,
    pub sort: Option<Sort>,
}

impl Query {
    pub fn from(source: Entity) -> Self {
        Self {
            source,
            selection: Selection::All,
            filters: Vec::new(),
            joins: Vec::new(),
            sort: None,
        }
    }

    pub fn select(mut self, columns: &[&'static str]) -> Self {
        self.selection = Selection::Only(columns.to_vec());
        self
    }

    pub fn filter(mut self, column: ColumnRef, op: FilterOp, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column,
            op,
            value: value.into(),
        });
        self
    }

    pub fn eq(self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filter(ColumnRef::source(column), FilterOp::Eq, value)
    }

    pub fn eq_ignore_case(self, column: &'static str, value: &str) -> Self {
        self.filter(ColumnRef::source(column), FilterOp::EqIgnoreCase, value)
    }

    pub fn starts_with_ignore_case(self, column: &'static str, prefix: &str) -> Self {
        self.filter(ColumnRef::source(column), FilterOp::StartsWithIgnoreCase, prefix)
    }

    pub fn between(self, column: ColumnRef, start: i32, end: i32) -> Self {
        self.filter(column, FilterOp::Gte, start)
            .filter(column, FilterOp::Lte, end)
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    pub fn order_by(self, column: &'static str) -> Self {
        self.order_by_column(ColumnRef::source(column))
    }

    pub fn order_by_column(mut self, column: ColumnRef) -> Self {
        self.sort = Some(Sort { column });
        self
    }

    pub fn join_for(&self, entity: Entity) -> Option<&Join> {
        self.joins.iter().find(|join| join.entity == entity)
    }

    /// Check that every column and join the query names exists in the schema.
    pub fn check(&self) -> Result<(), String> {
        for column in self.selection.columns(self.source) {
            self.check_column(ColumnRef::source(column))?;
        }

        for (index, join) in self.joins.iter().enumerate() {
            if self.source.foreign_key_to(join.entity).is_none() {
                return Err(format!("{} has no reference to {}", self.source, join.entity));
            }
            if self.joins[..index].iter().any(|j| j.entity == join.entity) {
                return Err(format!("{} is joined more than once", join.entity));
            }
            for column in join.selection.columns(join.entity) {
                self.check_column(ColumnRef::joined(join.entity, column))?;
            }
        }

        for filter in &self.filters {
            self.check_column(filter.column)?;
            let textual = matches!(filter.op, FilterOp::EqIgnoreCase | FilterOp::StartsWithIgnoreCase);
            if textual && !filter.value.is_string() {
                return Err(format!("{:?} on '{}' needs a string value", filter.op, filter.column.name));
            }
        }

        if let Some(sort) = &self.sort {
            self.check_column(sort.column)?;
        }

        Ok(())
    }

    fn check_column(&self, column: ColumnRef) -> Result<(), String> {
        let entity = match column.entity {
            None => self.source,
            Some(entity) => {
                if self.join_for(entity).is_none() {
                    return Err(format!("{} is referenced but not joined", entity));
                }
                entity
            }
        };

        if entity.has_column(column.name) {
            Ok(())
        } else {
            Err(format!("{} has no column '{}'", entity, column.name))
        }
    }
}
